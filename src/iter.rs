use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr;

use crate::CursorError;

/// A position in the logical sequence of a `CircVec`.
///
/// Besides the current slot it remembers where the front run ends and where the back run
/// starts, so a single step can cross the wrap boundary:
/// ```text
///   back_start              front_end
///   v                       v
///   +---+---+---+---+---+---+
///   | 3 | 4 |   |   | 1 | 2 |
///   +---+---+---+---+---+---+
///                   ^
///                   front run start
/// ```
/// Stepping forward from `2` lands on `front_end` and jumps to `back_start`. Stepping back
/// from `back_start` jumps to `front_end` first.
///
/// A `RawCursor` does not know how many elements there are, so stepping never checks bounds.
/// Callers count the elements themselves.
pub(crate) struct RawCursor<T> {
    ptr: *mut T,
    front_end: *mut T,
    back_start: *mut T,
}

impl<T> Clone for RawCursor<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RawCursor<T> {}

impl<T> RawCursor<T> {
    /// Creates a cursor at `ptr`. A cursor landing on `front_end` is moved to `back_start`,
    /// which makes the start of an empty front run coincide with the start of the back run.
    ///
    /// # Safety
    ///
    /// `ptr` and `front_end` must lie within or one past the allocation starting at `back_start`.
    pub(crate) unsafe fn new(back_start: *mut T, front_end: *mut T, ptr: *mut T) -> Self {
        let ptr = if ptr == front_end { back_start } else { ptr };
        Self { ptr, front_end, back_start }
    }

    /// # Safety
    ///
    /// The cursor must point at an element, not at the end position.
    #[inline]
    unsafe fn step_forward(&mut self) {
        self.ptr = self.ptr.add(1);
        if self.ptr == self.front_end {
            self.ptr = self.back_start;
        }
    }

    /// # Safety
    ///
    /// There must be an element before the cursor.
    #[inline]
    unsafe fn step_back(&mut self) {
        if self.ptr == self.back_start {
            self.ptr = self.front_end;
        }
        self.ptr = self.ptr.sub(1);
    }

    fn is_same_deque(&self, other: &Self) -> bool {
        ptr::eq(self.back_start, other.back_start) && ptr::eq(self.front_end, other.front_end)
    }
}

/// A bidirectional cursor over the elements of a [`CircVec`].
///
/// A cursor either points at an element or at the end position, one past the last element.
/// It is created by [`begin`] and [`end`]. Moving it past either end is reported as a
/// [`CursorError`] and leaves the cursor where it was.
///
/// # Examples
///
/// ```
/// # use circvec::{CircVec, CursorError};
/// let deque = CircVec::from([1, 2, 3]);
/// let mut cursor = deque.begin();
/// assert_eq!(cursor.get(), Some(&1));
/// cursor.move_next().unwrap();
/// cursor.move_next().unwrap();
/// cursor.move_next().unwrap();
/// assert_eq!(cursor, deque.end());
/// assert_eq!(cursor.get(), None);
/// assert_eq!(cursor.move_next(), Err(CursorError::PastEnd));
/// ```
///
/// [`CircVec`]: crate::CircVec
/// [`begin`]: crate::CircVec::begin
/// [`end`]: crate::CircVec::end
pub struct Cursor<'a, T> {
    raw: RawCursor<T>,
    index: usize,
    len: usize,
    _marker: PhantomData<&'a T>,
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) fn new(raw: RawCursor<T>, index: usize, len: usize) -> Self {
        debug_assert!(index <= len);
        Self { raw, index, len, _marker: PhantomData }
    }

    /// Returns the logical index of the cursor. The end position has index `len`.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the element the cursor points at, or `None` at the end position.
    pub fn get(&self) -> Option<&'a T> {
        if self.index < self.len {
            // SAFETY: index < len -> the cursor points at a live element
            unsafe { Some(&*self.raw.ptr) }
        } else {
            None
        }
    }

    /// Moves the cursor to the next element, or to the end position after the last element.
    pub fn move_next(&mut self) -> Result<(), CursorError> {
        if self.index == self.len {
            return Err(CursorError::PastEnd);
        }
        // SAFETY: index < len
        unsafe {
            self.raw.step_forward();
        }
        self.index += 1;
        Ok(())
    }

    /// Moves the cursor to the previous element.
    pub fn move_prev(&mut self) -> Result<(), CursorError> {
        if self.index == 0 {
            return Err(CursorError::BeforeBegin);
        }
        // SAFETY: index > 0
        unsafe {
            self.raw.step_back();
        }
        self.index -= 1;
        Ok(())
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.raw.is_same_deque(&other.raw)
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor").field("index", &self.index).field("current", &self.get()).finish()
    }
}

// SAFETY: Cursor only hands out shared references, like a &T
unsafe impl<T: Sync> Send for Cursor<'_, T> {}
unsafe impl<T: Sync> Sync for Cursor<'_, T> {}

/// An iterator over the elements of a [`CircVec`].
///
/// This `struct` is created by the [`iter`] method on [`CircVec`]. See its documentation for
/// more information.
///
/// [`CircVec`]: crate::CircVec
/// [`iter`]: crate::CircVec::iter
pub struct Iter<'a, T> {
    head: RawCursor<T>,
    tail: RawCursor<T>,
    // the counter decides termination, head and tail may share an address while elements remain
    remaining: usize,
    _marker: PhantomData<&'a T>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(head: RawCursor<T>, tail: RawCursor<T>, len: usize) -> Self {
        Self { head, tail, remaining: len, _marker: PhantomData }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self { head: self.head, tail: self.tail, remaining: self.remaining, _marker: PhantomData }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        // SAFETY: remaining > 0 -> head points at a live element that is not yielded by next_back
        unsafe {
            let el = &*self.head.ptr;
            self.head.step_forward();
            Some(el)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        // SAFETY: remaining > 0 -> there is a live element before tail
        unsafe {
            self.tail.step_back();
            Some(&*self.tail.ptr)
        }
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

// SAFETY: Iter only hands out shared references, like a &[T]
unsafe impl<T: Sync> Send for Iter<'_, T> {}
unsafe impl<T: Sync> Sync for Iter<'_, T> {}

/// A mutable iterator over the elements of a [`CircVec`].
///
/// This `struct` is created by the [`iter_mut`] method on [`CircVec`]. See its documentation
/// for more information.
///
/// [`CircVec`]: crate::CircVec
/// [`iter_mut`]: crate::CircVec::iter_mut
pub struct IterMut<'a, T> {
    head: RawCursor<T>,
    tail: RawCursor<T>,
    remaining: usize,
    _marker: PhantomData<&'a mut T>,
}

impl<'a, T> IterMut<'a, T> {
    pub(crate) fn new(head: RawCursor<T>, tail: RawCursor<T>, len: usize) -> Self {
        Self { head, tail, remaining: len, _marker: PhantomData }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<&'a mut T> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        // SAFETY: every live element is yielded at most once, either by next or by next_back
        unsafe {
            let el = &mut *self.head.ptr;
            self.head.step_forward();
            Some(el)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a mut T> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        // SAFETY: see next
        unsafe {
            self.tail.step_back();
            Some(&mut *self.tail.ptr)
        }
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

// SAFETY: IterMut behaves like a &mut [T]
unsafe impl<T: Send> Send for IterMut<'_, T> {}
unsafe impl<T: Sync> Sync for IterMut<'_, T> {}
