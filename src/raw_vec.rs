use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;

use crate::TryReserveError;

/// The backing store of a `CircVec`: a fixed-size block of uninitialized slots.
///
/// A `RawVec` never constructs or drops elements. Its owner is responsible for dropping every
/// live slot before the `RawVec` itself is dropped, which only frees the memory. It is never
/// resized in place, growth allocates a new `RawVec` and moves the elements over.
pub(crate) struct RawVec<T> {
    ptr: NonNull<T>,
    cap: usize,
    _marker: PhantomData<T>,
}

impl<T> RawVec<T> {
    const IS_ZST: bool = mem::size_of::<T>() == 0;

    /// Smallest non-zero capacity the growth policy will pick. Tiny capacities only cause extra
    /// reallocations, so this follows the values `Vec` uses.
    pub(crate) const MIN_NON_ZERO_CAP: usize = if mem::size_of::<T>() == 1 {
        8
    } else if mem::size_of::<T>() <= 1024 {
        4
    } else {
        1
    };

    /// Creates a store without allocating. Zero-sized types get `usize::MAX` slots for free.
    pub(crate) const fn new() -> Self {
        let cap = if Self::IS_ZST { usize::MAX } else { 0 };
        Self { ptr: NonNull::dangling(), cap, _marker: PhantomData }
    }

    /// Allocates a store with exactly `capacity` slots.
    ///
    /// # Panics
    ///
    /// Panics if the layout overflows and aborts via [`handle_alloc_error`] if the allocator fails.
    ///
    /// [`handle_alloc_error`]: std::alloc::handle_alloc_error
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        match Self::try_with_capacity(capacity) {
            Ok(buf) => buf,
            Err(err) => handle_error(err),
        }
    }

    pub(crate) fn try_with_capacity(capacity: usize) -> Result<Self, TryReserveError> {
        if Self::IS_ZST || capacity == 0 {
            return Ok(Self::new());
        }

        // Layout::array rejects sizes above isize::MAX
        let layout = Layout::array::<T>(capacity).map_err(|_| TryReserveError::CapacityOverflow)?;
        // SAFETY: layout has a non-zero size because T is not zero-sized and capacity > 0
        let ptr = unsafe { alloc::alloc(layout) };
        match NonNull::new(ptr.cast::<T>()) {
            Some(ptr) => Ok(Self { ptr, cap: capacity, _marker: PhantomData }),
            None => Err(TryReserveError::AllocError { layout }),
        }
    }

    #[inline]
    pub(crate) fn ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.cap
    }
}

impl<T> Drop for RawVec<T> {
    fn drop(&mut self) {
        if Self::IS_ZST || self.cap == 0 {
            return;
        }
        // SAFETY: the same layout was successfully created in try_with_capacity
        unsafe {
            let layout = Layout::from_size_align_unchecked(mem::size_of::<T>() * self.cap, mem::align_of::<T>());
            alloc::dealloc(self.ptr.as_ptr().cast::<u8>(), layout);
        }
    }
}

/// Turns a failed reservation into the panic or abort of the infallible API.
#[cold]
pub(crate) fn handle_error(err: TryReserveError) -> ! {
    match err {
        TryReserveError::CapacityOverflow => panic!("capacity overflow"),
        TryReserveError::AllocError { layout } => alloc::handle_alloc_error(layout),
    }
}
