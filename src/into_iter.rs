use std::fmt;
use std::iter::FusedIterator;

use super::CircVec;

/// An owning iterator over the elements of a `CircVec`.
///
/// This `struct` is created by the [`into_iter`] method on [`CircVec`] (provided by the
/// [`IntoIterator`] trait). See its documentation for more information.
///
/// [`into_iter`]: CircVec::into_iter
/// [`IntoIterator`]: core::iter::IntoIterator
#[derive(Clone)]
pub struct IntoIter<T> {
    inner: CircVec<T>,
}

impl<T> IntoIter<T> {
    pub(super) fn new(inner: CircVec<T>) -> Self {
        IntoIter { inner }
    }

    /// Returns the remaining elements as a pair of slices, see [`CircVec::as_slices`].
    pub fn as_slices(&self) -> (&[T], &[T]) {
        self.inner.as_slices()
    }
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.inner).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.inner.len();
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.inner.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}
