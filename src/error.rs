use thiserror::Error;

/// Failures reported by [`GrowVec`](crate::GrowVec) and its cursors.
///
/// Every variant describes a misuse of the container. A failed operation
/// leaves the container exactly as it was before the call.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The requested capacity cannot be represented as an allocation.
    #[error("capacity {requested} cannot be allocated")]
    InvalidCapacity { requested: usize },

    /// Growing a full container would need more slots than `usize` counts.
    #[error("growing a container of length {len} overflows the capacity")]
    CapacityOverflow { len: usize },

    /// A reallocation asked for fewer slots than there are live elements.
    #[error("new capacity {requested} is smaller than the current length {len}")]
    CapacityTooSmall { requested: usize, len: usize },

    /// An element was removed from a container with no elements.
    #[error("attempt to remove an element from an empty container")]
    EmptyContainer,

    /// Direct index access at or beyond the current length.
    #[error("index {index} is out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// A cursor handed to `insert` or `erase` resolves to an illegal offset.
    #[error("cursor offset {offset} is out of bounds for length {len}")]
    IteratorOutOfBounds { offset: isize, len: usize },

    /// A cursor was dereferenced while failing the validity check.
    #[error("bad cursor access")]
    BadIteratorAccess,
}

pub type Result<T, E = Error> = core::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn test_messages() {
        assert_eq!(
            Error::CapacityTooSmall {
                requested: 1,
                len: 3
            }
            .to_string(),
            "new capacity 1 is smaller than the current length 3"
        );
        assert_eq!(
            Error::IndexOutOfBounds { index: 4, len: 4 }.to_string(),
            "index 4 is out of bounds for length 4"
        );
        assert_eq!(
            Error::IteratorOutOfBounds { offset: -1, len: 0 }.to_string(),
            "cursor offset -1 is out of bounds for length 0"
        );
        assert_eq!(
            Error::CapacityOverflow { len: 7 }.to_string(),
            "growing a container of length 7 overflows the capacity"
        );
        assert_eq!(Error::BadIteratorAccess.to_string(), "bad cursor access");
    }

    #[test]
    fn test_is_std_error() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>(_: &E) {}
        assert_error(&Error::EmptyContainer);
    }
}
