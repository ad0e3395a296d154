use std::alloc::Layout;
use std::error::Error;
use std::fmt;

/// The error returned by the fallible reservation methods of [`CircVec`].
///
/// When this is returned the deque has not been modified.
///
/// [`CircVec`]: crate::CircVec
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TryReserveError {
    /// The requested capacity exceeds the maximum allocation size of `isize::MAX` bytes.
    CapacityOverflow,
    /// The allocator could not provide memory for the given layout.
    AllocError {
        /// The layout of the rejected allocation.
        layout: Layout,
    },
}

impl fmt::Display for TryReserveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("memory allocation failed")?;
        match self {
            TryReserveError::CapacityOverflow => f.write_str(" because the computed capacity exceeded the collection's maximum"),
            TryReserveError::AllocError { .. } => f.write_str(" because the memory allocator returned an error"),
        }
    }
}

impl Error for TryReserveError {}

/// The error returned by [`try_push_front`] and [`try_push_back`]. It gives back the value that
/// could not be inserted.
///
/// [`try_push_front`]: crate::CircVec::try_push_front
/// [`try_push_back`]: crate::CircVec::try_push_back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushError<T> {
    /// The rejected value.
    pub value: T,
    /// Why the deque could not grow.
    pub error: TryReserveError,
}

impl<T> PushError<T> {
    /// Returns the rejected value, discarding the error.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T> fmt::Display for PushError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not push element: {}", self.error)
    }
}

impl<T: fmt::Debug> Error for PushError<T> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.error)
    }
}

/// The error returned when a [`Cursor`] is moved outside of its deque.
///
/// [`Cursor`]: crate::Cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorError {
    /// `move_prev` was called on a cursor at the first element.
    BeforeBegin,
    /// `move_next` was called on a cursor at the end position.
    PastEnd,
}

impl fmt::Display for CursorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CursorError::BeforeBegin => f.write_str("cursor moved before the first element"),
            CursorError::PastEnd => f.write_str("cursor moved past the end position"),
        }
    }
}

impl Error for CursorError {}
