//! Forward cursors into a [`GrowVec`].
//!
//! A cursor does not borrow the container it was issued from. It remembers a
//! raw position, a logical offset and the stamp of the container at the time
//! it was issued, and every dereference re-checks those against the live
//! container. Reallocating, shrinking or reassigning the container therefore
//! turns outstanding cursors stale without any bookkeeping on the container
//! side: the next access reports [`Error::BadIteratorAccess`].
//!
//! ```
//! use grow_vec::{Error, GrowVec};
//!
//! let mut v = GrowVec::from([1, 2]);
//! let first = v.cbegin();
//! assert_eq!(first.get(&v), Ok(&1));
//!
//! v.shrink_to_fit().unwrap();
//! assert_eq!(first.get(&v), Err(Error::BadIteratorAccess));
//! ```

use core::fmt;
use core::marker::PhantomData;
use core::ops::Sub;

use crate::{Error, GrowVec, Result};

/// Position, offset and issuing stamp shared by both cursor kinds.
struct Raw<T> {
    pos: usize,
    offset: usize,
    stamp: u64,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Raw<T> {
    const fn new(pos: usize, offset: usize, stamp: u64) -> Self {
        Self {
            pos,
            offset,
            stamp,
            _marker: PhantomData,
        }
    }

    fn is_valid(&self, vec: &GrowVec<T>) -> bool {
        self.stamp != 0
            && self.pos != 0
            && self.stamp == vec.stamp()
            && self.offset < vec.len()
            && self.pos == vec.position_of(self.offset)
    }

    fn advance(&mut self, vec: &GrowVec<T>) {
        if self.is_valid(vec) {
            self.offset += 1;
            self.pos = self.pos.wrapping_add(GrowVec::<T>::stride());
        }
    }

    /// Element distance between two raw positions.
    fn distance(&self, other: &Self) -> isize {
        (self.pos as isize).wrapping_sub(other.pos as isize) / GrowVec::<T>::stride() as isize
    }
}

impl<T> Clone for Raw<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Raw<T> {}

/// A read-only forward cursor.
///
/// Obtained from [`GrowVec::cbegin`], [`GrowVec::cend`], or by narrowing a
/// [`CursorMut`].
pub struct Cursor<T> {
    raw: Raw<T>,
}

/// A forward cursor that can hand out mutable access.
///
/// Obtained from [`GrowVec::begin`], [`GrowVec::end`], [`GrowVec::insert`] and
/// [`GrowVec::erase`]. Converts into a [`Cursor`] through [`From`]; there is
/// no conversion the other way.
pub struct CursorMut<T> {
    raw: Raw<T>,
}

impl<T> Cursor<T> {
    pub(crate) const fn new(pos: usize, offset: usize, stamp: u64) -> Self {
        Self {
            raw: Raw::new(pos, offset, stamp),
        }
    }

    /// Returns the logical offset recorded when the cursor was issued or last
    /// advanced.
    pub const fn offset(&self) -> usize {
        self.raw.offset
    }

    /// Returns `true` if the cursor may be dereferenced against `vec`.
    ///
    /// A cursor is valid only when it was issued by `vec`, the container has
    /// not been reallocated or reassigned since, its offset is below the
    /// current length and its position still matches the live buffer.
    pub fn is_valid(&self, vec: &GrowVec<T>) -> bool {
        self.raw.is_valid(vec)
    }

    /// Dereferences the cursor.
    ///
    /// ```
    /// use grow_vec::{Error, GrowVec};
    ///
    /// let v = GrowVec::from(['a', 'b']);
    /// assert_eq!(v.cbegin().get(&v), Ok(&'a'));
    /// assert_eq!(v.cend().get(&v), Err(Error::BadIteratorAccess));
    /// ```
    pub fn get<'a>(&self, vec: &'a GrowVec<T>) -> Result<&'a T> {
        if !self.is_valid(vec) {
            return Err(Error::BadIteratorAccess);
        }

        vec.as_slice()
            .get(self.raw.offset)
            .ok_or(Error::BadIteratorAccess)
    }

    /// Moves the cursor one element forward and returns it.
    ///
    /// Does nothing if the cursor is not valid against `vec`; the stale
    /// cursor is returned unchanged and only fails once dereferenced.
    pub fn advance(&mut self, vec: &GrowVec<T>) -> &mut Self {
        self.raw.advance(vec);
        self
    }

    /// Moves the cursor one element forward and returns its prior value.
    pub fn post_advance(&mut self, vec: &GrowVec<T>) -> Self {
        let prior = *self;
        self.raw.advance(vec);
        prior
    }
}

impl<T> CursorMut<T> {
    pub(crate) const fn new(pos: usize, offset: usize, stamp: u64) -> Self {
        Self {
            raw: Raw::new(pos, offset, stamp),
        }
    }

    /// Returns the logical offset recorded when the cursor was issued or last
    /// advanced.
    pub const fn offset(&self) -> usize {
        self.raw.offset
    }

    /// Returns `true` if the cursor may be dereferenced against `vec`.
    pub fn is_valid(&self, vec: &GrowVec<T>) -> bool {
        self.raw.is_valid(vec)
    }

    /// Dereferences the cursor for reading.
    pub fn get<'a>(&self, vec: &'a GrowVec<T>) -> Result<&'a T> {
        Cursor::from(*self).get(vec)
    }

    /// Dereferences the cursor for writing.
    ///
    /// ```
    /// use grow_vec::GrowVec;
    ///
    /// let mut v = GrowVec::from([1, 2, 3]);
    /// let mut it = v.begin();
    /// it.advance(&v);
    /// *it.get_mut(&mut v).unwrap() = 20;
    /// assert_eq!(v.as_slice(), &[1, 20, 3]);
    /// ```
    pub fn get_mut<'a>(&self, vec: &'a mut GrowVec<T>) -> Result<&'a mut T> {
        if !self.is_valid(vec) {
            return Err(Error::BadIteratorAccess);
        }

        vec.as_mut_slice()
            .get_mut(self.raw.offset)
            .ok_or(Error::BadIteratorAccess)
    }

    /// Moves the cursor one element forward and returns it.
    ///
    /// Does nothing if the cursor is not valid against `vec`.
    pub fn advance(&mut self, vec: &GrowVec<T>) -> &mut Self {
        self.raw.advance(vec);
        self
    }

    /// Moves the cursor one element forward and returns its prior value.
    pub fn post_advance(&mut self, vec: &GrowVec<T>) -> Self {
        let prior = *self;
        self.raw.advance(vec);
        prior
    }
}

impl<T> From<CursorMut<T>> for Cursor<T> {
    fn from(value: CursorMut<T>) -> Self {
        Self { raw: value.raw }
    }
}

/// A detached cursor: never valid, positioned nowhere.
impl<T> Default for Cursor<T> {
    fn default() -> Self {
        Self::new(0, 0, 0)
    }
}

impl<T> Default for CursorMut<T> {
    fn default() -> Self {
        Self::new(0, 0, 0)
    }
}

impl<T> Clone for Cursor<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<T> {}

impl<T> Clone for CursorMut<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for CursorMut<T> {}

// Equality looks at the raw position only. Cursors issued by different
// containers compare equal whenever their positions coincide.

impl<T> PartialEq for Cursor<T> {
    fn eq(&self, other: &Self) -> bool {
        self.raw.pos == other.raw.pos
    }
}

impl<T> Eq for Cursor<T> {}

impl<T> PartialEq for CursorMut<T> {
    fn eq(&self, other: &Self) -> bool {
        self.raw.pos == other.raw.pos
    }
}

impl<T> Eq for CursorMut<T> {}

impl<T> PartialEq<Cursor<T>> for CursorMut<T> {
    fn eq(&self, other: &Cursor<T>) -> bool {
        self.raw.pos == other.raw.pos
    }
}

impl<T> PartialEq<CursorMut<T>> for Cursor<T> {
    fn eq(&self, other: &CursorMut<T>) -> bool {
        self.raw.pos == other.raw.pos
    }
}

/// Distance in elements between two cursor positions.
impl<T> Sub for Cursor<T> {
    type Output = isize;

    fn sub(self, rhs: Self) -> Self::Output {
        self.raw.distance(&rhs.raw)
    }
}

impl<T> Sub for CursorMut<T> {
    type Output = isize;

    fn sub(self, rhs: Self) -> Self::Output {
        self.raw.distance(&rhs.raw)
    }
}

impl<T> fmt::Debug for Cursor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("pos", &(self.raw.pos as *const T))
            .field("offset", &self.raw.offset)
            .field("stamp", &self.raw.stamp)
            .finish()
    }
}

impl<T> fmt::Debug for CursorMut<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut")
            .field("pos", &(self.raw.pos as *const T))
            .field("offset", &self.raw.offset)
            .field("stamp", &self.raw.stamp)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::{Cursor, CursorMut, Error, GrowVec};

    #[test]
    fn test_walk_from_begin_to_end() {
        let v = GrowVec::from([3, 1, 4]);
        let mut sut = v.cbegin();
        let mut seen = Vec::new();

        while sut != v.cend() {
            seen.push(*sut.get(&v).unwrap());
            sut.advance(&v);
        }

        assert_eq!(seen, [3, 1, 4], "Walk should visit every element in order");
        assert_eq!(sut.offset(), 3);
    }

    #[test]
    fn test_end_is_never_dereferenceable() {
        let v = GrowVec::from([1]);
        assert_eq!(v.end().get(&v), Err(Error::BadIteratorAccess));
        assert_eq!(v.cend().get(&v), Err(Error::BadIteratorAccess));
        assert!(!v.cend().is_valid(&v));
    }

    #[test]
    fn test_advance_on_invalid_cursor_is_noop() {
        let v = GrowVec::from([1, 2]);
        let mut sut = v.cend();
        sut.advance(&v).advance(&v);
        assert_eq!(sut, v.cend(), "Stale cursor must not move");
        assert_eq!(sut.offset(), 2);

        let mut detached = Cursor::<i32>::default();
        detached.advance(&v);
        assert_eq!(detached.offset(), 0);
        assert_eq!(detached.get(&v), Err(Error::BadIteratorAccess));
    }

    #[test]
    fn test_post_advance_returns_prior_cursor() {
        let v = GrowVec::from([10, 20]);
        let mut sut = v.begin();
        let prior = sut.post_advance(&v);

        assert_eq!(prior.get(&v), Ok(&10));
        assert_eq!(sut.get(&v), Ok(&20));
        assert_eq!(sut - prior, 1);
    }

    #[test]
    fn test_get_mut_through_cursor() {
        let mut v = GrowVec::from([1, 2, 3]);
        let mut sut = v.begin();

        while sut != v.end() {
            *sut.get_mut(&mut v).unwrap() *= 10;
            sut.advance(&v);
        }

        assert_eq!(v.as_slice(), &[10, 20, 30]);
    }

    #[test]
    fn test_growth_invalidates_cursor() {
        let mut v = GrowVec::from([1, 2]);
        v.shrink_to_fit().unwrap();
        let sut = v.cbegin();
        assert_eq!(sut.get(&v), Ok(&1));

        v.push(3).unwrap();
        assert_eq!(
            sut.get(&v),
            Err(Error::BadIteratorAccess),
            "Cursor must go stale once the buffer is replaced"
        );
    }

    #[test]
    fn test_get_mut_rejects_stale_and_end_cursors() {
        let mut v = GrowVec::from([1, 2]);
        v.shrink_to_fit().unwrap();
        let sut = v.begin();

        v.push(3).unwrap();
        assert_eq!(
            sut.get_mut(&mut v),
            Err(Error::BadIteratorAccess),
            "Writing through a stale cursor must be refused"
        );

        let end = v.end();
        assert_eq!(end.get_mut(&mut v), Err(Error::BadIteratorAccess));
        assert_eq!(v.as_slice(), &[1, 2, 3], "Refused writes leave the contents");
        assert_eq!(v.capacity(), 6);
    }

    #[test]
    fn test_clear_invalidates_cursor() {
        let mut v = GrowVec::from([1, 2, 3]);
        let sut = v.begin();
        v.clear();
        assert_eq!(sut.get(&v), Err(Error::BadIteratorAccess));

        // The buffer was kept, so refilling makes the offset legal again.
        v.push(7).unwrap();
        assert_eq!(sut.get(&v), Ok(&7));
    }

    #[test]
    fn test_same_capacity_reallocation_invalidates_cursor() {
        let mut v = GrowVec::from([1, 2, 3]);
        let capacity = v.capacity();
        let sut = v.cbegin();

        v.reallocate(capacity).unwrap();
        assert_eq!(v.capacity(), capacity);
        assert_eq!(sut.get(&v), Err(Error::BadIteratorAccess));
    }

    #[test]
    fn test_cursor_of_other_container_is_rejected() {
        let a = GrowVec::from([1, 2]);
        let b = a.clone();
        assert_eq!(a.cbegin().get(&b), Err(Error::BadIteratorAccess));
        assert_eq!(b.cbegin().get(&b), Ok(&1));
    }

    #[test]
    fn test_equality_ignores_issuing_container() {
        let a = GrowVec::<u8>::new();
        let b = GrowVec::<u8>::new();
        assert_eq!(
            a.begin(),
            b.end(),
            "Empty containers share the null position"
        );

        let c = GrowVec::from([1u8]);
        assert_ne!(a.cbegin(), c.cbegin());
        assert_eq!(c.begin(), c.cbegin(), "Both cursor kinds compare by position");
    }

    #[test]
    fn test_narrowing_conversion() {
        let v = GrowVec::from(["x", "y"]);
        let wide: CursorMut<&str> = v.begin();
        let narrow: Cursor<&str> = wide.into();
        assert_eq!(narrow.get(&v), Ok(&"x"));
        assert_eq!(narrow.offset(), wide.offset());
    }

    #[test]
    fn test_distance() {
        let v = GrowVec::from([0u64; 5]);
        assert_eq!(v.cend() - v.cbegin(), 5);
        assert_eq!(v.cbegin() - v.cend(), -5);
        assert_eq!(v.end() - v.begin(), 5);
    }

    #[test]
    fn test_zst_cursors() {
        let v = GrowVec::from([(), (), ()]);
        assert_eq!(v.cend() - v.cbegin(), 3);

        let mut sut = v.cbegin();
        let mut steps = 0;
        while sut != v.cend() {
            assert_eq!(sut.get(&v), Ok(&()));
            sut.advance(&v);
            steps += 1;
        }
        assert_eq!(steps, 3);
    }
}
