//! A **heap-allocated**, **growable**, **contiguous** array with checked cursors.
//!
//! `GrowVec<T>` owns a single buffer of `capacity` slots, of which the first
//! `len` hold live elements. Appending to a full container reallocates to
//! `(len + 1) * 2` slots, so a run of appends costs amortized constant time.
//!
//! Positions inside the container are handed out as [`Cursor`] and
//! [`CursorMut`] values. They do not borrow the container; instead every
//! dereference re-validates the cursor against the container's live state and
//! fails with [`Error::BadIteratorAccess`] once the cursor went stale.
//!
//! ```rust
//! use grow_vec::{Error, GrowVec};
//!
//! let mut v = GrowVec::new();
//! assert_eq!(v.capacity(), 0);
//!
//! v.push(5).unwrap();
//! v.push(7).unwrap();
//! assert_eq!((v.len(), v.capacity()), (2, 2));
//!
//! let first = v.cbegin();
//! v.push(9).unwrap();
//! assert_eq!((v.len(), v.capacity()), (3, 6));
//! assert_eq!(first.get(&v), Err(Error::BadIteratorAccess));
//!
//! assert_eq!(v.pop(), Ok(9));
//! assert_eq!(v.to_string(), "[5, 7]");
//! ```

mod cursor;
mod error;

use core::alloc::Layout;
use core::fmt;
use core::hash::Hash;
use core::iter::FusedIterator;
use core::mem::{self, MaybeUninit};
use core::ops::{Index, IndexMut};
use core::ptr;
use core::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, trace};

pub use cursor::{Cursor, CursorMut};
pub use error::{Error, Result};

/// Added to the length before scaling when a full container grows.
const RESERVATION_SHIFT: usize = 1;

/// Growth factor applied when a full container grows.
const RESERVATION_SCALE: usize = 2;

/// Source of container stamps. Zero is reserved for detached cursors.
static NEXT_STAMP: AtomicU64 = AtomicU64::new(1);

fn next_stamp() -> u64 {
    NEXT_STAMP.fetch_add(1, Ordering::Relaxed)
}

/// Builds a [`GrowVec`] from a list of elements.
///
/// Like the `From<[T; N]>` conversion, the result holds the listed elements
/// and reserves twice as many slots.
///
/// ```
/// use grow_vec::grow_vec;
///
/// let v = grow_vec![1, 2, 3];
/// assert_eq!(v.len(), 3);
/// assert_eq!(v.capacity(), 6);
/// ```
#[macro_export]
macro_rules! grow_vec {
    ($($element:expr),* $(,)?) => {
        $crate::GrowVec::from([$($element),*])
    };
}

/// A heap-allocated, growable, contiguous array.
///
/// `GrowVec` keeps its own `len` and `capacity` next to a single owned
/// buffer:
/// - slots `[0, len)` hold live elements, slots `[len, capacity)` are absent;
/// - a zero capacity never holds an allocation;
/// - the buffer only changes through [`GrowVec::reallocate`], which every
///   growing or shrinking operation funnels through.
pub struct GrowVec<T> {
    len: usize,
    cap: usize,
    buf: Option<Box<[MaybeUninit<T>]>>,
    stamp: u64,
}

impl<T> GrowVec<T> {
    /// Creates a new, empty `GrowVec` without allocating.
    ///
    /// ```
    /// use grow_vec::GrowVec;
    ///
    /// let v = GrowVec::<i32>::new();
    /// assert_eq!(v.len(), 0);
    /// assert_eq!(v.capacity(), 0);
    /// assert!(v.is_empty());
    /// ```
    pub fn new() -> Self {
        Self {
            len: 0,
            cap: 0,
            buf: None,
            stamp: next_stamp(),
        }
    }

    /// Creates an empty `GrowVec` with room for exactly `capacity` elements.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` slots of `T` exceed `isize::MAX` bytes. Use
    /// [`GrowVec::try_with_capacity`] to get an error instead.
    ///
    /// ```
    /// use grow_vec::GrowVec;
    ///
    /// let v = GrowVec::<u8>::with_capacity(16);
    /// assert_eq!(v.len(), 0);
    /// assert_eq!(v.capacity(), 16);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            len: 0,
            cap: capacity,
            buf: Self::allocate(capacity),
            stamp: next_stamp(),
        }
    }

    /// Fallible counterpart of [`GrowVec::with_capacity`].
    ///
    /// ```
    /// use grow_vec::{Error, GrowVec};
    ///
    /// assert_eq!(GrowVec::<u8>::try_with_capacity(4).map(|v| v.capacity()), Ok(4));
    /// assert_eq!(
    ///     GrowVec::<u64>::try_with_capacity(usize::MAX).map(|v| v.capacity()),
    ///     Err(Error::InvalidCapacity { requested: usize::MAX })
    /// );
    /// ```
    pub fn try_with_capacity(capacity: usize) -> Result<Self> {
        Self::check_capacity(capacity)?;
        Ok(Self::with_capacity(capacity))
    }

    /// Returns the current number of live elements.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the container holds no live elements.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of allocated slots.
    pub const fn capacity(&self) -> usize {
        self.cap
    }

    /// Replaces the buffer with one of exactly `new_capacity` slots.
    ///
    /// Live elements are relocated to the new buffer and the old buffer is
    /// released. Every cursor issued before the call goes stale, even when the
    /// capacity did not change.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidCapacity`] if `new_capacity` slots cannot be
    ///   allocated.
    /// - [`Error::CapacityTooSmall`] if `new_capacity` is below the length.
    ///
    /// ```
    /// use grow_vec::{Error, GrowVec};
    ///
    /// let mut v = GrowVec::from([1, 2, 3]);
    /// assert_eq!(
    ///     v.reallocate(2),
    ///     Err(Error::CapacityTooSmall { requested: 2, len: 3 })
    /// );
    ///
    /// v.reallocate(3).unwrap();
    /// assert_eq!(v.capacity(), 3);
    /// assert_eq!(v.as_slice(), &[1, 2, 3]);
    /// ```
    pub fn reallocate(&mut self, new_capacity: usize) -> Result<()> {
        Self::check_capacity(new_capacity)?;

        if new_capacity < self.len {
            debug!(
                requested = new_capacity,
                len = self.len,
                "rejected reallocation below length"
            );
            return Err(Error::CapacityTooSmall {
                requested: new_capacity,
                len: self.len,
            });
        }

        let mut buf = Self::allocate(new_capacity);

        if let (Some(old), Some(new)) = (self.buf.as_deref(), buf.as_deref_mut()) {
            unsafe {
                // Both buffers hold at least `len` slots and never overlap
                ptr::copy_nonoverlapping(old.as_ptr(), new.as_mut_ptr(), self.len);
            }
        }

        trace!(
            old_capacity = self.cap,
            new_capacity,
            len = self.len,
            "reallocated buffer"
        );

        // The old slots are `MaybeUninit`, dropping the box only frees memory
        self.buf = buf;
        self.cap = new_capacity;
        self.stamp = next_stamp();
        Ok(())
    }

    /// Raises the capacity to `capacity` if it is currently smaller.
    ///
    /// ```
    /// use grow_vec::GrowVec;
    ///
    /// let mut v = GrowVec::<i32>::with_capacity(8);
    /// v.reserve(4).unwrap();
    /// assert_eq!(v.capacity(), 8);
    /// v.reserve(10).unwrap();
    /// assert_eq!(v.capacity(), 10);
    /// ```
    pub fn reserve(&mut self, capacity: usize) -> Result<()> {
        if self.cap < capacity {
            self.reallocate(capacity)?;
        }

        Ok(())
    }

    /// Shrinks the capacity to the length, releasing unused slots.
    ///
    /// ```
    /// use grow_vec::GrowVec;
    ///
    /// let mut v = GrowVec::from([1, 2]);
    /// assert_eq!(v.capacity(), 4);
    /// v.shrink_to_fit().unwrap();
    /// assert_eq!(v.capacity(), 2);
    /// ```
    pub fn shrink_to_fit(&mut self) -> Result<()> {
        if self.len < self.cap {
            self.reallocate(self.len)?;
        }

        Ok(())
    }

    /// Appends an element, growing the buffer if it is full.
    ///
    /// # Errors
    ///
    /// [`Error::CapacityOverflow`] if the grown capacity does not fit in a
    /// `usize`, and [`Error::InvalidCapacity`] if it cannot be allocated.
    ///
    /// ```
    /// use grow_vec::GrowVec;
    ///
    /// let mut v = GrowVec::new();
    /// v.push(10).unwrap();
    /// v.push(20).unwrap();
    /// assert_eq!(v.as_slice(), &[10, 20]);
    /// ```
    pub fn push(&mut self, element: T) -> Result<()> {
        if self.len >= self.cap {
            self.grow()?;
        }

        let len = self.len;
        self.slots_mut()[len].write(element);
        self.len += 1;
        Ok(())
    }

    /// Appends every element of `iter`, stopping at the first failure.
    ///
    /// ```
    /// use grow_vec::GrowVec;
    ///
    /// let mut v = GrowVec::from([1]);
    /// v.extend([2, 3, 4]).unwrap();
    /// assert_eq!(v.as_slice(), &[1, 2, 3, 4]);
    /// ```
    pub fn extend<I>(&mut self, iter: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        iter.into_iter().try_for_each(|element| self.push(element))
    }

    /// Removes the last element and returns it.
    ///
    /// The capacity is left untouched.
    ///
    /// ```
    /// use grow_vec::{Error, GrowVec};
    ///
    /// let mut v = GrowVec::from([1]);
    /// assert_eq!(v.pop(), Ok(1));
    /// assert_eq!(v.pop(), Err(Error::EmptyContainer));
    /// ```
    pub fn pop(&mut self) -> Result<T> {
        if self.is_empty() {
            return Err(Error::EmptyContainer);
        }

        self.len -= 1;
        let len = self.len;
        let element = unsafe { self.slots_mut()[len].assume_init_read() };
        Ok(element)
    }

    /// Returns a reference to the element at `index`.
    ///
    /// ```
    /// use grow_vec::{Error, GrowVec};
    ///
    /// let v = GrowVec::from([10, 20]);
    /// assert_eq!(v.at(1), Ok(&20));
    /// assert_eq!(v.at(2), Err(Error::IndexOutOfBounds { index: 2, len: 2 }));
    /// ```
    pub fn at(&self, index: usize) -> Result<&T> {
        self.as_slice().get(index).ok_or(Error::IndexOutOfBounds {
            index,
            len: self.len,
        })
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// ```
    /// use grow_vec::{Error, GrowVec};
    ///
    /// let mut v = GrowVec::from([10, 20]);
    /// *v.at_mut(0).unwrap() += 1;
    /// assert_eq!(v.as_slice(), &[11, 20]);
    /// assert_eq!(v.at_mut(2), Err(Error::IndexOutOfBounds { index: 2, len: 2 }));
    /// ```
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(Error::IndexOutOfBounds { index, len })
    }

    /// Inserts `element` before `position` and returns a cursor to it.
    ///
    /// The offset of `position` is measured from [`GrowVec::cbegin`]. If the
    /// container is full it grows first, which turns `position` and every
    /// other outstanding cursor stale; the returned cursor is always fresh.
    ///
    /// # Errors
    ///
    /// [`Error::IteratorOutOfBounds`] if the offset is negative or greater
    /// than the length, and [`Error::InvalidCapacity`] or
    /// [`Error::CapacityOverflow`] if growing fails.
    ///
    /// ```
    /// use grow_vec::GrowVec;
    ///
    /// let mut v = GrowVec::from([1, 2, 3]);
    /// let mut position = v.begin();
    /// position.advance(&v);
    ///
    /// let inserted = v.insert(position, 99).unwrap();
    /// assert_eq!(v.as_slice(), &[1, 99, 2, 3]);
    /// assert_eq!(inserted.get(&v), Ok(&99));
    /// ```
    pub fn insert(&mut self, position: impl Into<Cursor<T>>, element: T) -> Result<CursorMut<T>> {
        let offset = self.offset_of(position.into(), self.len.saturating_add(1))?;

        if self.len >= self.cap {
            self.grow()?;
        }

        let len = self.len;
        let slots = self.slots_mut();

        unsafe {
            // Shift elements starting from the offset to the right
            let ptr = slots.as_mut_ptr();
            ptr::copy(ptr.add(offset), ptr.add(offset + 1), len - offset);
        }

        slots[offset].write(element);
        self.len += 1;
        Ok(self.cursor_mut_at(offset))
    }

    /// Removes the element at `position`.
    ///
    /// Returns the removed element together with a cursor at the same
    /// offset, which now holds the following element or is the end cursor.
    ///
    /// # Errors
    ///
    /// [`Error::IteratorOutOfBounds`] if the offset is negative or not below
    /// the length.
    ///
    /// ```
    /// use grow_vec::GrowVec;
    ///
    /// let mut v = GrowVec::from([1, 99, 2]);
    /// let mut position = v.cbegin();
    /// position.advance(&v);
    ///
    /// let (removed, next) = v.erase(position).unwrap();
    /// assert_eq!(removed, 99);
    /// assert_eq!(next.get(&v), Ok(&2));
    /// assert_eq!(v.as_slice(), &[1, 2]);
    /// ```
    pub fn erase(&mut self, position: impl Into<Cursor<T>>) -> Result<(T, CursorMut<T>)> {
        let offset = self.offset_of(position.into(), self.len)?;
        let len = self.len;
        let slots = self.slots_mut();

        // Read the element to be removed
        let element = unsafe { slots[offset].assume_init_read() };

        unsafe {
            // Shift elements to fill the gap
            let ptr = slots.as_mut_ptr();
            ptr::copy(ptr.add(offset + 1), ptr.add(offset), len - offset - 1);
        }

        self.len -= 1;
        Ok((element, self.cursor_mut_at(offset)))
    }

    /// Drops all elements. The capacity remains allocated.
    ///
    /// ```
    /// use grow_vec::GrowVec;
    ///
    /// let mut v = GrowVec::from([1, 2, 3]);
    /// v.clear();
    /// assert!(v.is_empty());
    /// assert_eq!(v.capacity(), 6);
    /// ```
    pub fn clear(&mut self) {
        let len = mem::replace(&mut self.len, 0);

        if let Some(slots) = self.buf.as_deref_mut() {
            unsafe {
                // Slots [0, len) are initialized and no longer reachable
                let live = ptr::slice_from_raw_parts_mut(slots.as_mut_ptr().cast::<T>(), len);
                ptr::drop_in_place(live);
            }
        }
    }

    /// Replaces the contents with those of `source` by swapping storage.
    ///
    /// `source` is usually a fresh clone, which makes this copy-and-swap: the
    /// replacement is complete before `self` is touched, and the previous
    /// buffer is released exactly once when `source` is dropped. Cursors
    /// issued by `self` before the call go stale.
    ///
    /// ```
    /// use grow_vec::GrowVec;
    ///
    /// let source = GrowVec::from([4, 5]);
    /// let mut v = GrowVec::from([1, 2, 3]);
    /// v.assign(source.clone());
    /// assert_eq!(v, source);
    /// assert_eq!(v.capacity(), source.capacity());
    /// ```
    pub fn assign(&mut self, mut source: Self) {
        mem::swap(&mut self.len, &mut source.len);
        mem::swap(&mut self.cap, &mut source.cap);
        mem::swap(&mut self.buf, &mut source.buf);
        self.stamp = next_stamp();
    }

    /// Returns a shared slice over the live elements.
    ///
    /// ```
    /// use grow_vec::GrowVec;
    ///
    /// let v = GrowVec::from([1, 2]);
    /// assert_eq!(v.as_slice(), &[1, 2]);
    /// assert!(GrowVec::<i32>::new().as_slice().is_empty());
    /// ```
    pub fn as_slice(&self) -> &[T] {
        match self.buf.as_deref() {
            Some(slots) => unsafe { core::slice::from_raw_parts(slots.as_ptr().cast(), self.len) },
            None => &[],
        }
    }

    /// Returns a mutable slice over the live elements.
    ///
    /// ```
    /// use grow_vec::GrowVec;
    ///
    /// let mut v = GrowVec::from([3, 1, 2]);
    /// v.as_mut_slice().sort();
    /// assert_eq!(v.as_slice(), &[1, 2, 3]);
    /// ```
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        let len = self.len;
        match self.buf.as_deref_mut() {
            Some(slots) => unsafe { core::slice::from_raw_parts_mut(slots.as_mut_ptr().cast(), len) },
            None => &mut [],
        }
    }

    /// Returns a forward iterator over the elements.
    ///
    /// ```
    /// use grow_vec::GrowVec;
    ///
    /// let v = GrowVec::from([1, 2, 3]);
    /// assert_eq!(v.iter().sum::<i32>(), 6);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.as_slice().iter(),
        }
    }

    /// Returns a forward iterator over mutable references to the elements.
    ///
    /// ```
    /// use grow_vec::GrowVec;
    ///
    /// let mut v = GrowVec::from([1, 2, 3]);
    /// v.iter_mut().for_each(|x| *x *= 2);
    /// assert_eq!(v.as_slice(), &[2, 4, 6]);
    /// ```
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            inner: self.as_mut_slice().iter_mut(),
        }
    }

    /// Returns a mutable cursor at the first element.
    ///
    /// ```
    /// use grow_vec::GrowVec;
    ///
    /// let mut v = GrowVec::from(['a', 'b']);
    /// let first = v.begin();
    /// *first.get_mut(&mut v).unwrap() = 'z';
    /// assert_eq!(v.as_slice(), &['z', 'b']);
    /// ```
    pub fn begin(&self) -> CursorMut<T> {
        self.cursor_mut_at(0)
    }

    /// Returns a mutable cursor one past the last element.
    ///
    /// The end cursor marks a position but never refers to an element.
    ///
    /// ```
    /// use grow_vec::{Error, GrowVec};
    ///
    /// let mut v = GrowVec::from([1, 2]);
    /// let end = v.end();
    /// assert_eq!(end.offset(), 2);
    /// assert_eq!(end.get_mut(&mut v), Err(Error::BadIteratorAccess));
    /// ```
    pub fn end(&self) -> CursorMut<T> {
        self.cursor_mut_at(self.len)
    }

    /// Returns a read-only cursor at the first element.
    ///
    /// ```
    /// use grow_vec::GrowVec;
    ///
    /// let v = GrowVec::from([4, 5]);
    /// let mut it = v.cbegin();
    /// assert_eq!(it.get(&v), Ok(&4));
    /// it.advance(&v);
    /// assert_eq!(it.get(&v), Ok(&5));
    /// ```
    pub fn cbegin(&self) -> Cursor<T> {
        Cursor::new(self.position_of(0), 0, self.stamp)
    }

    /// Returns a read-only cursor one past the last element.
    ///
    /// ```
    /// use grow_vec::GrowVec;
    ///
    /// let v = GrowVec::from([4, 5]);
    /// let mut it = v.cbegin();
    /// it.advance(&v).advance(&v);
    /// assert_eq!(it, v.cend());
    /// assert_eq!(v.cend() - v.cbegin(), 2);
    /// assert!(GrowVec::<i32>::new().cbegin() == GrowVec::<i32>::new().cend());
    /// ```
    pub fn cend(&self) -> Cursor<T> {
        Cursor::new(self.position_of(self.len), self.len, self.stamp)
    }

    pub(crate) const fn stamp(&self) -> u64 {
        self.stamp
    }

    /// Distance in bytes between consecutive cursor positions.
    pub(crate) const fn stride() -> usize {
        let size = mem::size_of::<T>();
        if size == 0 {
            1
        } else {
            size
        }
    }

    /// Raw position of `offset` in the current buffer, null without one.
    pub(crate) fn position_of(&self, offset: usize) -> usize {
        let base = self.buf.as_deref().map_or(0, |slots| slots.as_ptr() as usize);
        base.wrapping_add(offset.wrapping_mul(Self::stride()))
    }

    fn cursor_mut_at(&self, offset: usize) -> CursorMut<T> {
        CursorMut::new(self.position_of(offset), offset, self.stamp)
    }

    /// Resolves `position` to an offset below `limit`.
    fn offset_of(&self, position: Cursor<T>, limit: usize) -> Result<usize> {
        let diff = position - self.cbegin();

        usize::try_from(diff)
            .ok()
            .filter(|&offset| offset < limit)
            .ok_or(Error::IteratorOutOfBounds {
                offset: diff,
                len: self.len,
            })
    }

    fn grow(&mut self) -> Result<()> {
        let new_capacity = self
            .len
            .checked_add(RESERVATION_SHIFT)
            .and_then(|n| n.checked_mul(RESERVATION_SCALE))
            .ok_or(Error::CapacityOverflow { len: self.len })?;

        self.reallocate(new_capacity)
    }

    /// Moves `len` elements starting at `src` into a container that reserves
    /// twice as many slots, or exactly `len` if doubling overflows.
    ///
    /// # Safety
    ///
    /// `src` must point to `len` initialized elements that the caller gives
    /// up ownership of.
    unsafe fn from_list(src: *const T, len: usize) -> Self {
        let capacity = len.checked_mul(RESERVATION_SCALE).unwrap_or(len);
        let mut vec = Self::with_capacity(capacity);
        let dst = vec.slots_mut().as_mut_ptr().cast::<T>();
        ptr::copy_nonoverlapping(src, dst, len);
        vec.len = len;
        vec
    }

    fn slots_mut(&mut self) -> &mut [MaybeUninit<T>] {
        self.buf.as_deref_mut().unwrap_or(&mut [])
    }

    fn check_capacity(capacity: usize) -> Result<()> {
        if Layout::array::<T>(capacity).is_err() {
            debug!(requested = capacity, "rejected unrepresentable capacity");
            return Err(Error::InvalidCapacity {
                requested: capacity,
            });
        }

        Ok(())
    }

    fn allocate(capacity: usize) -> Option<Box<[MaybeUninit<T>]>> {
        (capacity > 0).then(|| Box::<[T]>::new_uninit_slice(capacity))
    }
}

impl<T> Default for GrowVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> From<[T; N]> for GrowVec<T> {
    fn from(value: [T; N]) -> Self {
        let value = mem::ManuallyDrop::new(value);
        unsafe { Self::from_list(value.as_ptr(), N) }
    }
}

impl<T> From<Vec<T>> for GrowVec<T> {
    fn from(mut value: Vec<T>) -> Self {
        let len = value.len();
        let vec = unsafe { Self::from_list(value.as_ptr(), len) };
        // Ownership of the elements moved into `vec`
        unsafe { value.set_len(0) };
        vec
    }
}

impl<T> FromIterator<T> for GrowVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<T> Clone for GrowVec<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        let mut cloned = Self::with_capacity(self.cap);

        if let Some(slots) = cloned.buf.as_deref_mut() {
            for (slot, element) in slots.iter_mut().zip(self.as_slice()) {
                slot.write(element.clone());
                cloned.len += 1;
            }
        }

        cloned
    }

    fn clone_from(&mut self, source: &Self) {
        self.assign(source.clone());
    }
}

/// Appends every element, panicking if the container cannot grow.
///
/// The inherent [`GrowVec::extend`] reports the failure instead.
impl<T> Extend<T> for GrowVec<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            if let Err(err) = self.push(element) {
                panic!("{err}");
            }
        }
    }
}

impl<T> Index<usize> for GrowVec<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        match self.at(index) {
            Ok(element) => element,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> IndexMut<usize> for GrowVec<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match self.at_mut(index) {
            Ok(element) => element,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> IntoIterator for GrowVec<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> Self::IntoIter {
        let len = mem::replace(&mut self.len, 0);
        self.cap = 0;

        match self.buf.take() {
            None => IntoIter::default(),
            Some(buf) => IntoIter {
                inner: buf.into_vec().into_iter().take(len),
            },
        }
    }
}

impl<'a, T> IntoIterator for &'a GrowVec<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut GrowVec<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T, U> PartialEq<GrowVec<U>> for GrowVec<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &GrowVec<U>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T> PartialEq<[T]> for GrowVec<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T> PartialEq<&[T]> for GrowVec<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &&[T]) -> bool {
        self.as_slice() == *other
    }
}

impl<T, const N: usize> PartialEq<[T; N]> for GrowVec<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other
    }
}

impl<T, const N: usize> PartialEq<&[T; N]> for GrowVec<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &&[T; N]) -> bool {
        self.as_slice() == *other
    }
}

impl<T> Eq for GrowVec<T> where T: Eq {}

impl<T> PartialOrd for GrowVec<T>
where
    T: PartialOrd,
{
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T> Ord for GrowVec<T>
where
    T: Ord,
{
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T> Hash for GrowVec<T>
where
    T: Hash,
{
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T> fmt::Debug for GrowVec<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Renders the live elements as `[e0, e1, ..., eN]`.
impl<T> fmt::Display for GrowVec<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;

        for (index, element) in self.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            fmt::Display::fmt(element, f)?;
        }

        f.write_str("]")
    }
}

impl<T> Drop for GrowVec<T> {
    fn drop(&mut self) {
        self.clear();
        self.buf = None;
        self.cap = 0;
    }
}

// ---

/// Forward iterator over shared references, see [`GrowVec::iter`].
#[derive(Debug)]
pub struct Iter<'a, T> {
    inner: core::slice::Iter<'a, T>,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

/// Forward iterator over mutable references, see [`GrowVec::iter_mut`].
#[derive(Debug)]
pub struct IterMut<'a, T> {
    inner: core::slice::IterMut<'a, T>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> FusedIterator for IterMut<'_, T> {}

impl<T> ExactSizeIterator for IterMut<'_, T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

// ---

/// Owning forward iterator, see [`GrowVec::into_iter`].
pub struct IntoIter<T> {
    inner: core::iter::Take<std::vec::IntoIter<MaybeUninit<T>>>,
}

impl<T> Default for IntoIter<T> {
    fn default() -> Self {
        Self {
            inner: Vec::new().into_iter().take(0),
        }
    }
}

impl<T> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter")
            .field("remaining", &self.inner.len())
            .finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|e| unsafe { e.assume_init() })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        for mut element in self.inner.by_ref() {
            unsafe { element.assume_init_drop() };
        }
    }
}
