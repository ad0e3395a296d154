//! A growable double-ended ring buffer that keeps its elements in two contiguous runs.
//!
//! `CircVec` offers amortized *O(1)* insertion and removal at both ends. Instead of letting
//! the elements wrap around an arbitrary point of the buffer, it pins one run of elements to
//! each end of a single allocation:
//! ```text
//!         growth ->               <- growth
//! +-- back run ---+               +-- front run --+
//! |               |               |               |
//! v               v               v               v
//! +---+---+---+---+---+---+---+---+---+---+---+---+
//! | 4 | 5 | 6 | 7 |   |   |   |   | 0 | 1 | 2 | 3 |
//! +---+---+---+---+---+---+---+---+---+---+---+---+
//!                   |               |
//!         back_len -+               +- front_start
//! ```
//! The front run holds the first elements of the deque and grows to the left, the back run
//! holds the last elements and grows to the right. Reading the front run and then the back run
//! yields the deque in order. Both runs are plain slices (see [`CircVec::as_slices`]), so bulk
//! processing never has to deal with modular arithmetic.
//!
//! When the two runs meet the buffer is full and the next push reallocates. The new buffer is
//! *recentred*: the first half of the elements (rounded up) form the new front run and the
//! rest the new back run, which leaves the same amount of room for pushes at both ends.
//! Building a deque from a sequence of elements uses the same split.
//!
//! Popping from an end whose run is empty recentres the remaining elements in place, so a
//! long run of pops from one end is amortized *O(1)* as well.

use core::cmp;
use core::ops::{Index, IndexMut};

use std::fmt;
use std::mem::{self, ManuallyDrop, MaybeUninit};
use std::ptr;
use std::slice;

#[macro_use]
mod macros;

mod error;
mod into_iter;
mod iter;
mod raw_vec;

pub use error::{CursorError, PushError, TryReserveError};
pub use into_iter::IntoIter;
pub use iter::{Cursor, Iter, IterMut};
use iter::RawCursor;
use raw_vec::{handle_error, RawVec};


/// Runs the destructor for all items in the slice when it gets dropped (normally or during unwinding).
/// Used by `CircVec::drop` and `CircVec::clear` to ensure that elements in the back run are dropped
/// even when the destructor of an element in the front run panics.
struct Dropper<'a, T>(&'a mut [T]);

impl<'a, T> Drop for Dropper<'a, T> {
    fn drop(&mut self) {
        unsafe {
            ptr::drop_in_place(self.0);
        }
    }
}

/// A growable double-ended ring buffer.
///
/// See the [module-level documentation](./index.html) for more details.
pub struct CircVec<T> {
    // The front run occupies [front_start, cap), the back run [0, back_len).
    // Slots in [back_len, front_start) are uninitialized.
    // If back_len == front_start the buffer is full.
    // 0 <= back_len <= front_start <= cap <= usize::MAX
    front_start: usize,
    back_len: usize,
    buf: RawVec<T>,
}

// SAFETY: CircVec owns its elements like a Vec does
unsafe impl<T: Send> Send for CircVec<T> {}
unsafe impl<T: Sync> Sync for CircVec<T> {}

impl<T> CircVec<T> {
    /// Creates an empty deque without allocating.
    ///
    /// # Examples
    ///
    /// ```
    /// use circvec::CircVec;
    ///
    /// let deque: CircVec<i32> = CircVec::new();
    /// assert_eq!(deque.capacity(), 0);
    /// ```
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty deque with space for exactly `capacity` elements.
    ///
    /// # Panics
    ///
    /// Panics if the capacity exceeds `isize::MAX` bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use circvec::CircVec;
    ///
    /// let deque: CircVec<i32> = CircVec::with_capacity(10);
    /// assert_eq!(deque.capacity(), 10);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        let buf = RawVec::with_capacity(capacity);
        Self { front_start: buf.capacity(), back_len: 0, buf }
    }

    /// Creates a deque holding the elements of `iter` in a buffer of at least `capacity` slots.
    ///
    /// The first half of the elements (rounded up) go into the front run, the rest into the back
    /// run. This is the same layout a deque has after growing to `capacity`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use circvec::CircVec;
    /// let deque = CircVec::from_iter_with_capacity(8, [1, 2, 3, 4, 5]);
    /// assert_eq!(deque.capacity(), 8);
    /// assert_eq!(deque.as_slices(), (&[1, 2, 3][..], &[4, 5][..]));
    /// ```
    pub fn from_iter_with_capacity<I>(capacity: usize, iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let vec: Vec<T> = iter.into_iter().collect();
        Self::from_vec_with_capacity(vec, capacity)
    }

    /// Returns the number of elements the deque can hold without reallocating.
    ///
    /// # Examples
    ///
    /// ```
    /// # use circvec::CircVec;
    /// let deque: CircVec<i32> = CircVec::with_capacity(10);
    /// assert_eq!(deque.capacity(), 10);
    /// ```
    #[inline]
    pub fn capacity(&self) -> usize {
        self.cap()
    }

    /// Returns the number of elements in the deque.
    ///
    /// # Examples
    ///
    /// ```
    /// # use circvec::CircVec;
    /// let deque = CircVec::from([1, 2, 3]);
    /// assert_eq!(deque.len(), 3);
    /// ```
    pub fn len(&self) -> usize {
        // this cannot overflow because back_len <= front_start <= cap
        self.cap() - self.front_start + self.back_len
    }

    /// Returns whether the deque is empty or not.
    ///
    /// # Examples
    ///
    /// ```
    /// # use circvec::CircVec;
    /// let mut deque = CircVec::new();
    /// assert!(deque.is_empty());
    /// deque.push_back(42);
    /// assert!(!deque.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.back_len == 0 && self.front_start == self.cap()
    }

    /// Returns the front run: the elements at the start of the deque that are stored at the end
    /// of the buffer.
    ///
    /// # Examples
    ///
    /// ```
    /// # use circvec::CircVec;
    /// let deque = CircVec::from([1, 2, 3, 4, 5]);
    /// assert_eq!(deque.first_span(), &[1, 2, 3]);
    /// ```
    pub fn first_span(&self) -> &[T] {
        self.as_slices().0
    }

    /// Returns the back run: the elements at the end of the deque that are stored at the start
    /// of the buffer.
    ///
    /// # Examples
    ///
    /// ```
    /// # use circvec::CircVec;
    /// let deque = CircVec::from([1, 2, 3, 4, 5]);
    /// assert_eq!(deque.second_span(), &[4, 5]);
    /// ```
    pub fn second_span(&self) -> &[T] {
        self.as_slices().1
    }

    /// Returns the front run as a mutable slice.
    pub fn first_span_mut(&mut self) -> &mut [T] {
        self.as_mut_slices().0
    }

    /// Returns the back run as a mutable slice.
    pub fn second_span_mut(&mut self) -> &mut [T] {
        self.as_mut_slices().1
    }

    /// Returns a pair of slices which contain, in order, the contents of the deque. These are
    /// the front run and the back run.
    ///
    /// # Examples
    ///
    /// ```
    /// # use circvec::CircVec;
    /// let mut deque = CircVec::new();
    ///
    /// deque.push_back(0);
    /// deque.push_back(1);
    /// deque.push_back(2);
    ///
    /// assert_eq!(deque.as_slices(), (&[][..], &[0, 1, 2][..]));
    ///
    /// deque.push_front(3);
    /// // the deque is full, this push reallocates and splits the elements evenly
    /// deque.push_front(4);
    ///
    /// assert_eq!(deque.as_slices(), (&[4, 3, 0][..], &[1, 2][..]));
    /// ```
    pub fn as_slices(&self) -> (&[T], &[T]) {
        let (front, back) = self.runs();
        // SAFETY: both runs only cover live elements
        unsafe { (&*front, &*back) }
    }

    /// Returns a mutable pair of slices which contain, in order, the contents of the deque.
    ///
    /// See the non-mutable version [`as_slices`] for details and examples.
    ///
    /// [`as_slices`]: CircVec::as_slices
    pub fn as_mut_slices(&mut self) -> (&mut [T], &mut [T]) {
        let (front, back) = self.runs();
        // SAFETY: both runs only cover live elements and never overlap
        unsafe { (&mut *front, &mut *back) }
    }

    /// Provides a reference to the element at the given index.
    ///
    /// Element at index 0 is the front of the deque.
    ///
    /// # Examples
    ///
    /// ```
    /// # use circvec::CircVec;
    /// let deque = CircVec::from([1, 2, 3]);
    /// assert_eq!(deque.get(1), Some(&2));
    /// assert_eq!(deque.get(3), None);
    /// ```
    pub fn get(&self, index: usize) -> Option<&T> {
        let slot = self.slot(index)?;
        // SAFETY: slot() only returns slots of live elements
        unsafe { Some(&*self.buf_add(slot)) }
    }

    /// Provides a mutable reference to the element at the given index.
    ///
    /// Element at index 0 is the front of the deque.
    ///
    /// # Examples
    ///
    /// ```
    /// # use circvec::CircVec;
    /// let mut deque = CircVec::from([1, 2, 3]);
    /// *deque.get_mut(1).unwrap() += 40;
    /// assert_eq!(deque.get(1), Some(&42));
    /// ```
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        let slot = self.slot(index)?;
        // SAFETY: slot() only returns slots of live elements
        unsafe { Some(&mut *self.buf_add(slot)) }
    }

    /// Makes sure the deque can hold at least `new_capacity` elements in total.
    ///
    /// Does nothing if the capacity is already sufficient. Otherwise the deque reallocates to at
    /// least `new_capacity`, and at least twice the old capacity, and splits its elements evenly
    /// between the front run and the back run.
    ///
    /// Note that unlike `Vec::reserve` this takes the total capacity, not the number of
    /// additional elements.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity exceeds `isize::MAX` bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// # use circvec::CircVec;
    /// let mut deque = CircVec::from([1, 2, 3, 4]);
    /// deque.reserve(10);
    /// assert!(deque.capacity() >= 10);
    /// assert_eq!(deque.as_slices(), (&[1, 2][..], &[3, 4][..]));
    /// ```
    pub fn reserve(&mut self, new_capacity: usize) {
        if let Err(err) = self.try_reserve(new_capacity) {
            handle_error(err);
        }
    }

    /// Makes sure the deque can hold exactly `new_capacity` elements in total. Does nothing if
    /// the capacity is already sufficient.
    ///
    /// Prefer [`reserve`] if future insertions are expected.
    ///
    /// [`reserve`]: CircVec::reserve
    ///
    /// # Panics
    ///
    /// Panics if the new capacity exceeds `isize::MAX` bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// # use circvec::CircVec;
    /// let mut deque = CircVec::from([1, 2, 3, 4]);
    /// deque.reserve_exact(7);
    /// assert_eq!(deque.capacity(), 7);
    /// ```
    pub fn reserve_exact(&mut self, new_capacity: usize) {
        if let Err(err) = self.try_reserve_exact(new_capacity) {
            handle_error(err);
        }
    }

    /// Tries to make sure the deque can hold at least `new_capacity` elements in total, using
    /// the same growth policy as [`reserve`].
    ///
    /// # Errors
    ///
    /// If the capacity overflows or the allocator reports a failure an error is returned and the
    /// deque is left untouched.
    ///
    /// [`reserve`]: CircVec::reserve
    ///
    /// # Examples
    ///
    /// ```
    /// # use circvec::{CircVec, TryReserveError};
    /// let mut deque = CircVec::from([1, 2, 3]);
    /// assert_eq!(deque.try_reserve(usize::MAX), Err(TryReserveError::CapacityOverflow));
    /// assert_eq!(deque, [1, 2, 3]);
    /// ```
    pub fn try_reserve(&mut self, new_capacity: usize) -> Result<(), TryReserveError> {
        if new_capacity <= self.cap() {
            return Ok(());
        }
        let doubled = cmp::max(self.cap().saturating_mul(2), RawVec::<T>::MIN_NON_ZERO_CAP);
        self.grow_to(cmp::max(new_capacity, doubled))
    }

    /// Tries to make sure the deque can hold exactly `new_capacity` elements in total.
    ///
    /// # Errors
    ///
    /// If the capacity overflows or the allocator reports a failure an error is returned and the
    /// deque is left untouched.
    pub fn try_reserve_exact(&mut self, new_capacity: usize) -> Result<(), TryReserveError> {
        if new_capacity <= self.cap() {
            return Ok(());
        }
        self.grow_to(new_capacity)
    }

    /// Removes all elements from the deque. The capacity is kept.
    ///
    /// # Examples
    ///
    /// ```
    /// # use circvec::CircVec;
    /// let mut deque = CircVec::from([1, 2, 3]);
    /// deque.clear();
    /// assert!(deque.is_empty());
    /// assert_eq!(deque.capacity(), 3);
    /// ```
    pub fn clear(&mut self) {
        let (front, back) = self.runs();
        // mark everything as uninitialized first so nothing is dropped twice if a destructor panics
        self.front_start = self.cap();
        self.back_len = 0;
        // SAFETY: the slices are still valid and not reachable through self anymore
        unsafe {
            let _back_dropper = Dropper(&mut *back);
            ptr::drop_in_place(front);
        }
    }

    /// Provides a reference to the front element, or `None` if the deque is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use circvec::CircVec;
    /// let mut deque = CircVec::new();
    /// assert_eq!(deque.front(), None);
    /// deque.push_back(1);
    /// deque.push_back(2);
    /// assert_eq!(deque.front(), Some(&1));
    /// ```
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    /// Provides a mutable reference to the front element, or `None` if the deque is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use circvec::CircVec;
    /// let mut deque = CircVec::new();
    /// assert_eq!(deque.front_mut(), None);
    /// deque.push_back(1);
    /// deque.push_back(2);
    /// *deque.front_mut().unwrap() += 10;
    /// assert_eq!(deque.front(), Some(&11));
    /// ```
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.get_mut(0)
    }

    /// Provides a reference to the back element, or `None` if the deque is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use circvec::CircVec;
    /// let mut deque = CircVec::new();
    /// assert_eq!(deque.back(), None);
    /// deque.push_front(1);
    /// deque.push_front(2);
    /// assert_eq!(deque.back(), Some(&1));
    /// ```
    pub fn back(&self) -> Option<&T> {
        self.get(self.len().checked_sub(1)?)
    }

    /// Provides a mutable reference to the back element, or `None` if the deque is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use circvec::CircVec;
    /// let mut deque = CircVec::new();
    /// assert_eq!(deque.back_mut(), None);
    /// deque.push_front(1);
    /// deque.push_front(2);
    /// *deque.back_mut().unwrap() += 10;
    /// assert_eq!(deque.back(), Some(&11));
    /// ```
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.get_mut(self.len().checked_sub(1)?)
    }

    /// Removes the first element and returns it, or `None` if the deque is empty.
    ///
    /// If the front run is empty the remaining elements are first split evenly between both
    /// runs. This takes *O(n)* time but happens at most once every *n / 2* pops.
    ///
    /// # Examples
    ///
    /// ```
    /// # use circvec::CircVec;
    /// let mut deque = CircVec::from([1, 2]);
    /// assert_eq!(deque.pop_front(), Some(1));
    /// assert_eq!(deque.pop_front(), Some(2));
    /// assert_eq!(deque.pop_front(), None);
    /// ```
    pub fn pop_front(&mut self) -> Option<T> {
        if self.front_start == self.cap() {
            if self.back_len == 0 {
                return None;
            }
            // SAFETY: the back run holds all elements
            unsafe {
                self.recentre_in_place(0, self.back_len);
            }
        }
        let front_start = self.front_start;
        self.front_start += 1;
        // SAFETY: front_start < cap
        unsafe { Some(ptr::read(self.buf_add(front_start))) }
    }

    /// Removes the last element and returns it, or `None` if the deque is empty.
    ///
    /// If the back run is empty the remaining elements are first split evenly between both
    /// runs. This takes *O(n)* time but happens at most once every *n / 2* pops.
    ///
    /// # Examples
    ///
    /// ```
    /// # use circvec::CircVec;
    /// let mut deque = CircVec::from([1, 2]);
    /// assert_eq!(deque.pop_back(), Some(2));
    /// assert_eq!(deque.pop_back(), Some(1));
    /// assert_eq!(deque.pop_back(), None);
    /// ```
    pub fn pop_back(&mut self) -> Option<T> {
        if self.back_len == 0 {
            match self.front_len() {
                0 => return None,
                // the only element is both the front and the back
                1 => return self.pop_front(),
                front_len => {
                    // SAFETY: the front run holds all elements
                    unsafe {
                        self.recentre_in_place(self.front_start, front_len);
                    }
                }
            }
        }
        self.back_len -= 1;
        // SAFETY: old back_len was > 0
        unsafe { Some(ptr::read(self.buf_add(self.back_len))) }
    }

    /// Prepends an element to the deque.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity exceeds `isize::MAX` bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// # use circvec::CircVec;
    /// let mut deque = CircVec::new();
    /// deque.push_front(1);
    /// deque.push_front(2);
    /// deque.push_front(3);
    /// assert_eq!(deque, [3, 2, 1]);
    /// ```
    pub fn push_front(&mut self, value: T) {
        if self.is_full() {
            if let Err(err) = self.grow() {
                handle_error(err);
            }
        }
        // SAFETY: the buffer is not full
        unsafe {
            self.push_front_unchecked(value);
        }
    }

    /// Appends an element to the back of the deque.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity exceeds `isize::MAX` bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// # use circvec::CircVec;
    /// let mut deque = CircVec::new();
    /// deque.push_back(1);
    /// deque.push_back(2);
    /// deque.push_back(3);
    /// assert_eq!(deque, [1, 2, 3]);
    /// ```
    pub fn push_back(&mut self, value: T) {
        if self.is_full() {
            if let Err(err) = self.grow() {
                handle_error(err);
            }
        }
        // SAFETY: the buffer is not full
        unsafe {
            self.push_back_unchecked(value);
        }
    }

    /// Prepends an element to the deque, or gives it back if the deque could not grow.
    ///
    /// # Errors
    ///
    /// Returns the value together with the reason if growing failed. The deque is left
    /// untouched in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// # use circvec::CircVec;
    /// let mut deque = CircVec::new();
    /// deque.try_push_front(1).unwrap();
    /// assert_eq!(deque, [1]);
    /// ```
    pub fn try_push_front(&mut self, value: T) -> Result<(), PushError<T>> {
        if self.is_full() {
            if let Err(error) = self.grow() {
                return Err(PushError { value, error });
            }
        }
        // SAFETY: the buffer is not full
        unsafe {
            self.push_front_unchecked(value);
        }
        Ok(())
    }

    /// Appends an element to the back of the deque, or gives it back if the deque could not
    /// grow.
    ///
    /// # Errors
    ///
    /// Returns the value together with the reason if growing failed. The deque is left
    /// untouched in that case.
    pub fn try_push_back(&mut self, value: T) -> Result<(), PushError<T>> {
        if self.is_full() {
            if let Err(error) = self.grow() {
                return Err(PushError { value, error });
            }
        }
        // SAFETY: the buffer is not full
        unsafe {
            self.push_back_unchecked(value);
        }
        Ok(())
    }

    /// Returns a cursor at the first element, or at the end position if the deque is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use circvec::CircVec;
    /// let deque: CircVec<i32> = CircVec::new();
    /// assert_eq!(deque.begin(), deque.end());
    /// ```
    pub fn begin(&self) -> Cursor<'_, T> {
        Cursor::new(self.raw_cursor(self.front_start), 0, self.len())
    }

    /// Returns a cursor at the end position, one past the last element.
    ///
    /// # Examples
    ///
    /// ```
    /// # use circvec::CircVec;
    /// let deque = CircVec::from([1, 2, 3]);
    /// let mut cursor = deque.end();
    /// cursor.move_prev().unwrap();
    /// assert_eq!(cursor.get(), Some(&3));
    /// ```
    pub fn end(&self) -> Cursor<'_, T> {
        let len = self.len();
        Cursor::new(self.raw_cursor(self.back_len), len, len)
    }

    /// Returns a front-to-back iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// # use circvec::CircVec;
    /// let deque = CircVec::from([1, 2, 3, 4, 5]);
    /// assert_eq!(deque.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 4, 5]);
    /// assert_eq!(deque.iter().rev().copied().collect::<Vec<_>>(), [5, 4, 3, 2, 1]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.raw_cursor(self.front_start), self.raw_cursor(self.back_len), self.len())
    }

    /// Returns a front-to-back iterator that returns mutable references.
    ///
    /// # Examples
    ///
    /// ```
    /// # use circvec::CircVec;
    /// let mut deque = CircVec::from([1, 2, 3]);
    /// deque.iter_mut().for_each(|el| *el *= 2);
    /// assert_eq!(deque, [2, 4, 6]);
    /// ```
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let len = self.len();
        IterMut::new(self.raw_cursor(self.front_start), self.raw_cursor(self.back_len), len)
    }

    #[inline]
    fn cap(&self) -> usize {
        self.buf.capacity()
    }

    #[inline]
    fn front_len(&self) -> usize {
        self.cap() - self.front_start
    }

    /// Maps a logical index to the buffer slot holding that element.
    #[inline]
    fn slot(&self, index: usize) -> Option<usize> {
        let front_len = self.front_len();
        if index < front_len {
            Some(self.front_start + index)
        } else if index - front_len < self.back_len {
            Some(index - front_len)
        } else {
            None
        }
    }

    /// Returns the front run `[front_start, cap)` and the back run `[0, back_len)`.
    #[inline]
    fn runs(&self) -> (*mut [T], *mut [T]) {
        // SAFETY: front_start <= cap
        let front = unsafe { self.buf_add(self.front_start) };
        (ptr::slice_from_raw_parts_mut(front, self.front_len()), ptr::slice_from_raw_parts_mut(self.buf.ptr(), self.back_len))
    }

    #[inline]
    fn is_full(&self) -> bool {
        self.front_start == self.back_len
    }

    #[inline]
    unsafe fn buf_add(&self, offset: usize) -> *mut T {
        self.buf.ptr().add(offset)
    }

    #[inline]
    unsafe fn copy(&mut self, from: usize, to: usize, len: usize) {
        ptr::copy(self.buf_add(from), self.buf_add(to), len);
    }

    fn raw_cursor(&self, offset: usize) -> RawCursor<T> {
        debug_assert!(offset <= self.cap());
        // SAFETY: offset <= cap
        unsafe { RawCursor::new(self.buf.ptr(), self.buf_add(self.cap()), self.buf_add(offset)) }
    }

    /// # Safety
    ///
    /// The buffer must not be full.
    #[inline]
    unsafe fn push_front_unchecked(&mut self, value: T) {
        debug_assert!(!self.is_full());
        self.front_start -= 1;
        // SAFETY: old front_start was > back_len >= 0 because buf is not full
        ptr::write(self.buf_add(self.front_start), value);
    }

    /// # Safety
    ///
    /// The buffer must not be full.
    #[inline]
    unsafe fn push_back_unchecked(&mut self, value: T) {
        debug_assert!(!self.is_full());
        // SAFETY: back_len < front_start because buf is not full
        ptr::write(self.buf_add(self.back_len), value);
        self.back_len += 1;
    }

    #[inline(never)]
    fn grow(&mut self) -> Result<(), TryReserveError> {
        debug_assert!(self.is_full());
        let required = self.len().checked_add(1).ok_or(TryReserveError::CapacityOverflow)?;
        self.try_reserve(required)?;
        debug_assert!(!self.is_full());
        Ok(())
    }

    /// Moves all elements into a new buffer of exactly `new_cap` slots, splitting them evenly
    /// between the front run and the back run.
    ///
    /// The new buffer is allocated before anything is touched, so on error the deque is
    /// unchanged.
    fn grow_to(&mut self, new_cap: usize) -> Result<(), TryReserveError> {
        debug_assert!(new_cap > self.cap());
        let new_buf = RawVec::<T>::try_with_capacity(new_cap)?;

        let len = self.len();
        let new_front_len = front_share(len);
        let new_front_start = new_cap - new_front_len;
        // SAFETY: new_buf is a different allocation with room for len elements.
        // * the first new_front_len elements go to [new_front_start, new_cap)
        // * the remaining len - new_front_len elements go to [0, len - new_front_len)
        //   where len - new_front_len <= new_front_start because len <= new_cap
        unsafe {
            let dst = new_buf.ptr();
            self.copy_logical_to(0, dst.add(new_front_start), new_front_len);
            self.copy_logical_to(new_front_len, dst, len - new_front_len);
        }

        // the elements have been moved, dropping the old buffer only frees its memory
        self.buf = new_buf;
        self.front_start = new_front_start;
        self.back_len = len - new_front_len;
        debug_assert_eq!(self.len(), len);
        Ok(())
    }

    /// Copies the elements `[start, start + count)` of the deque to `dst`.
    ///
    /// # Safety
    ///
    /// `start + count <= len` and `dst` must be valid for `count` writes and not overlap the buffer.
    unsafe fn copy_logical_to(&self, start: usize, dst: *mut T, count: usize) {
        debug_assert!(start + count <= self.len());
        let front_len = self.front_len();
        if start < front_len {
            let from_front = cmp::min(count, front_len - start);
            ptr::copy_nonoverlapping(self.buf_add(self.front_start + start), dst, from_front);
            ptr::copy_nonoverlapping(self.buf_add(0), dst.add(from_front), count - from_front);
        } else {
            ptr::copy_nonoverlapping(self.buf_add(start - front_len), dst, count);
        }
    }

    /// Redistributes `len` elements stored contiguously at `start` into a front run of
    /// `ceil(len / 2)` and a back run of `floor(len / 2)` elements without reallocating.
    ///
    /// # Safety
    ///
    /// `[start, start + len)` must be within the buffer and hold all elements of the deque, in order.
    unsafe fn recentre_in_place(&mut self, start: usize, len: usize) {
        let cap = self.cap();
        debug_assert!(start + len <= cap);
        let front_len = front_share(len);
        let back_len = len - front_len;
        let front_dst = cap - front_len;

        if mem::size_of::<T>() != 0 {
            if back_len <= start {
                // the back part does not land on the front part, move it first
                // from: ..ABCDE...
                //       DEABC.....
                // to:   DE.....ABC
                self.copy(start + front_len, 0, back_len);
                self.copy(start, front_dst, front_len);
            } else if front_dst >= start + len {
                // the front part does not land on the back part, move it first
                // from: ABCDE.....
                //       ...DE..ABC
                // to:   DE.....ABC
                self.copy(start, front_dst, front_len);
                self.copy(start + front_len, 0, back_len);
            } else {
                // both parts would overwrite each other, rotate the whole buffer instead
                // from: .ABCDE.
                // to:   DE..ABC
                // failing both checks above means cap < 2 * len, so this is still linear in len
                let buf = slice::from_raw_parts_mut(self.buf.ptr().cast::<MaybeUninit<T>>(), cap);
                buf.rotate_left(start + front_len);
            }
        }

        self.front_start = front_dst;
        self.back_len = back_len;
        debug_assert!(self.back_len <= self.front_start);
    }

    /// Moves all elements of `vec` into a new deque of at least `capacity` slots.
    fn from_vec_with_capacity(mut vec: Vec<T>, capacity: usize) -> Self {
        let len = vec.len();
        let mut deque = Self::with_capacity(cmp::max(capacity, len));
        // SAFETY: vec gives up ownership of its elements before they are moved, its buffer is
        // still freed when it is dropped
        unsafe {
            vec.set_len(0);
            deque.init_from_raw(vec.as_ptr(), len);
        }
        deque
    }

    /// Moves `len` elements from `src` into this empty deque, using the same split as growing.
    ///
    /// # Safety
    ///
    /// The deque must be empty with a capacity of at least `len`, `src` must be valid for `len`
    /// reads and the caller must not use the elements at `src` afterwards.
    unsafe fn init_from_raw(&mut self, src: *const T, len: usize) {
        debug_assert!(self.is_empty() && len <= self.cap());
        let front_len = front_share(len);
        let back_len = len - front_len;
        self.front_start = self.cap() - front_len;
        ptr::copy_nonoverlapping(src, self.buf_add(self.front_start), front_len);
        ptr::copy_nonoverlapping(src.add(front_len), self.buf_add(0), back_len);
        self.back_len = back_len;
    }
}

/// The number of elements that go into the front run when `len` elements are split.
#[inline]
fn front_share(len: usize) -> usize {
    len - len / 2
}

/// Compares two sequences that are each split into two slices at different points.
fn spans_eq<'a, 'b, A, B>(
    (mut lhs, mut lhs_rest): (&'a [A], &'a [A]),
    (mut rhs, mut rhs_rest): (&'b [B], &'b [B]),
) -> bool
where
    A: PartialEq<B>,
{
    if lhs.len() + lhs_rest.len() != rhs.len() + rhs_rest.len() {
        return false;
    }
    loop {
        if lhs.is_empty() {
            lhs = mem::take(&mut lhs_rest);
        }
        if rhs.is_empty() {
            rhs = mem::take(&mut rhs_rest);
        }
        // both sides have the same length, so they run out together
        if lhs.is_empty() || rhs.is_empty() {
            return true;
        }
        let n = cmp::min(lhs.len(), rhs.len());
        if lhs[..n] != rhs[..n] {
            return false;
        }
        lhs = &lhs[n..];
        rhs = &rhs[n..];
    }
}

impl<T: Clone> CircVec<T> {
    /// Creates a deque from a slice by cloning its elements, with the same layout as
    /// [`from_iter_with_capacity`].
    ///
    /// [`from_iter_with_capacity`]: CircVec::from_iter_with_capacity
    ///
    /// # Examples
    ///
    /// ```
    /// # use circvec::CircVec;
    /// let deque = CircVec::from_slice(&[1, 2, 3]);
    /// assert_eq!(deque.as_slices(), (&[1, 2][..], &[3][..]));
    /// ```
    pub fn from_slice(slice: &[T]) -> Self {
        Self::from_vec_with_capacity(slice.to_vec(), 0)
    }
}

impl<T: Clone> Clone for CircVec<T> {
    /// Clones the deque into a new buffer of the same capacity, keeping the split between the
    /// front run and the back run.
    fn clone(&self) -> Self {
        let mut deque = Self::with_capacity(self.cap());
        let (front, back) = self.as_slices();
        // none of these pushes reallocate, and a panicking clone leaves a valid deque behind
        for el in front.iter().rev() {
            deque.push_front(el.clone());
        }
        for el in back {
            deque.push_back(el.clone());
        }
        deque
    }
}

impl<T: fmt::Debug> fmt::Debug for CircVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self).finish()
    }
}

impl<T> Default for CircVec<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for CircVec<T> {
    fn drop(&mut self) {
        self.clear();
        // RawVec handles deallocation
    }
}

impl<T> Extend<T> for CircVec<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.push_back(element);
        }
    }
}

impl<'a, T: 'a + Copy> Extend<&'a T> for CircVec<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T> From<Vec<T>> for CircVec<T> {
    fn from(vec: Vec<T>) -> Self {
        Self::from_vec_with_capacity(vec, 0)
    }
}

impl<T> From<CircVec<T>> for Vec<T> {
    fn from(mut other: CircVec<T>) -> Self {
        let len = other.len();
        let mut vec = Vec::with_capacity(len);
        // SAFETY: vec has room for len elements. The elements are moved out of other, which is
        // emptied right after so it only frees its buffer.
        unsafe {
            other.copy_logical_to(0, vec.as_mut_ptr(), len);
            vec.set_len(len);
        }
        other.front_start = other.cap();
        other.back_len = 0;
        vec
    }
}

impl<T, const N: usize> From<[T; N]> for CircVec<T> {
    fn from(arr: [T; N]) -> Self {
        let arr = ManuallyDrop::new(arr);
        let mut deque = CircVec::with_capacity(N);
        // SAFETY: CircVec::with_capacity ensures that there is enough capacity and the array is never dropped
        unsafe {
            deque.init_from_raw(arr.as_ptr(), N);
        }
        deque
    }
}

impl<T> FromIterator<T> for CircVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_iter_with_capacity(0, iter)
    }
}

impl<T> Index<usize> for CircVec<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        self.get(index).unwrap_or_else(|| index_out_of_bounds(self.len(), index))
    }
}

impl<T> IndexMut<usize> for CircVec<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len();
        self.get_mut(index).unwrap_or_else(|| index_out_of_bounds(len, index))
    }
}

impl<T> IntoIterator for CircVec<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter::new(self)
    }
}

impl<'a, T> IntoIterator for &'a CircVec<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut CircVec<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

impl<T: PartialEq> PartialEq for CircVec<T> {
    fn eq(&self, other: &Self) -> bool {
        spans_eq(self.as_slices(), other.as_slices())
    }
}

impl<T: Eq> Eq for CircVec<T> {}

__impl_slice_eq! { [] CircVec<T>, Vec<U>, }
__impl_slice_eq! { [] CircVec<T>, &[U], }
__impl_slice_eq! { [] CircVec<T>, &mut [U], }
__impl_slice_eq! { [const N: usize] CircVec<T>, [U; N], }
__impl_slice_eq! { [const N: usize] CircVec<T>, &[U; N], }
__impl_slice_eq! { [const N: usize] CircVec<T>, &mut [U; N], }

fn index_out_of_bounds(len: usize, index: usize) -> ! {
    panic!("index out of bounds: the len is {} but the index is {}", len, index);
}
