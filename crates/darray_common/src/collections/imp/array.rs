use core::{
    alloc::Layout,
    marker::PhantomData,
    mem::size_of,
    ptr::NonNull,
};

use crate::{
    collections::TryReserveError,
    log,
    mem::Storage,
};

/// Low level utility for allocating, reallocating, and deallocating a buffer of memory in a storage,
/// without having to worry about the corner cases involved. In particular:
///
/// - Zero-sized types never allocate, the capacity is only tracked.
/// - Capacity computations that don't fit in `isize::MAX` bytes are reported as a "capacity overflow".
/// - A failed resize leaves the current buffer untouched.
///
/// This type does not inspect the memory it manages. When dropped it *will* free its memory, but it *won't* drop its contents.
/// It is up to the user of `RawArray` to handle the things *stored* inside of it.
pub(crate) struct RawArray<T, S: Storage> {
    ptr:      NonNull<T>,
    cap:      usize,
    storage:  S,
    _phantom: PhantomData<T>,
}

// SAFETY: `RawArray` owns its buffer, so it can be sent or shared whenever `T` and the storage can
unsafe impl<T: Send, S: Storage + Send> Send for RawArray<T, S> {}
unsafe impl<T: Sync, S: Storage + Sync> Sync for RawArray<T, S> {}

impl<T, S: Storage> RawArray<T, S> {
    const IS_ZST: bool = size_of::<T>() == 0;

    /// Try to create a `RawArray` with exactly the capacity and alignment requirements for a `[T; capacity]`.
    pub fn try_with_capacity_in(capacity: usize, mut storage: S) -> Result<Self, TryReserveError> {
        let ptr = Self::allocate_ptr(&mut storage, capacity)?;
        Ok(Self { ptr, cap: capacity, storage, _phantom: PhantomData })
    }

    /// Get the capacity of the allocation.
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Get the storage used for the allocation.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Get a raw pointer to the start of the allocation.
    ///
    /// The pointer is dangling when `T` is zero-sized.
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    /// Get a mutable raw pointer to the start of the allocation.
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Reallocate the buffer to hold exactly `new_cap` elements.
    ///
    /// The first `min(capacity, new_cap)` elements are preserved, on failure the buffer is left untouched.
    pub fn try_resize(&mut self, new_cap: usize) -> Result<(), TryReserveError> {
        if new_cap == self.cap {
            return Ok(());
        }

        if let Err(err) = self.resize_impl(new_cap) {
            log::alloc_failed(new_cap, &err);
            return Err(err);
        }

        log::resized(self.cap, new_cap);
        self.cap = new_cap;
        Ok(())
    }

    fn resize_impl(&mut self, new_cap: usize) -> Result<(), TryReserveError> {
        if Self::IS_ZST {
            return Ok(());
        }

        let new_layout = Self::layout_for(new_cap)?;
        if self.cap == 0 {
            self.ptr = Self::allocate_ptr(&mut self.storage, new_cap)?;
            return Ok(());
        }
        if new_cap == 0 {
            self.deallocate();
            self.ptr = NonNull::dangling();
            return Ok(());
        }

        let old_layout = Self::layout_for(self.cap)?;
        // SAFETY: the current block was allocated by `self.storage` with `old_layout`
        let res = unsafe {
            if new_cap > self.cap {
                self.storage.grow(self.ptr.cast(), old_layout, new_layout)
            } else {
                self.storage.shrink(self.ptr.cast(), old_layout, new_layout)
            }
        };
        match res {
            Ok(ptr) => {
                self.ptr = ptr.cast();
                Ok(())
            },
            Err(_) => Err(TryReserveError::AllocError(new_layout)),
        }
    }

    //--------------------------------------------------------------

    fn layout_for(cap: usize) -> Result<Layout, TryReserveError> {
        Layout::array::<T>(cap).map_err(|_| TryReserveError::CapacityOverflow)
    }

    fn allocate_ptr(storage: &mut S, cap: usize) -> Result<NonNull<T>, TryReserveError> {
        let layout = Self::layout_for(cap)?;
        if Self::IS_ZST || cap == 0 {
            return Ok(NonNull::dangling());
        }
        storage.allocate(layout)
            .map(NonNull::cast)
            .map_err(|_| TryReserveError::AllocError(layout))
    }

    fn deallocate(&mut self) {
        if Self::IS_ZST || self.cap == 0 {
            return;
        }
        if let Ok(layout) = Self::layout_for(self.cap) {
            // SAFETY: the current block was allocated by `self.storage` with this layout
            unsafe { self.storage.deallocate(self.ptr.cast(), layout) };
        }
    }
}

impl<T, S: Storage> Drop for RawArray<T, S> {
    fn drop(&mut self) {
        self.deallocate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mem::TrackingStorage;

    #[test]
    fn resize_grows_and_shrinks_in_place() {
        let storage = TrackingStorage::new();
        let mut arr = RawArray::<u32, _>::try_with_capacity_in(1, storage.clone()).unwrap();
        assert_eq!(storage.stats().live_bytes, 4);

        unsafe { arr.as_mut_ptr().write(7) };
        arr.try_resize(8).unwrap();
        assert_eq!(arr.capacity(), 8);
        assert_eq!(storage.stats().live_bytes, 32);
        assert_eq!(unsafe { arr.as_ptr().read() }, 7);

        arr.try_resize(2).unwrap();
        assert_eq!(unsafe { arr.as_ptr().read() }, 7);
        assert_eq!(storage.stats().reallocations, 2);

        drop(arr);
        assert_eq!(storage.stats().live_bytes, 0);
    }

    #[test]
    fn failed_resize_keeps_buffer() {
        let storage = TrackingStorage::with_limit(8);
        let mut arr = RawArray::<u32, _>::try_with_capacity_in(2, storage.clone()).unwrap();
        assert!(matches!(arr.try_resize(4), Err(TryReserveError::AllocError(_))));
        assert_eq!(arr.capacity(), 2);
        assert_eq!(storage.stats().live_bytes, 8);
    }

    #[test]
    fn capacity_overflow() {
        let res = RawArray::<u64, _>::try_with_capacity_in(usize::MAX / 4, TrackingStorage::new());
        assert!(matches!(res, Err(TryReserveError::CapacityOverflow)));
    }

    #[test]
    fn zero_sized_never_allocates() {
        let storage = TrackingStorage::new();
        let mut arr = RawArray::<(), _>::try_with_capacity_in(4, storage.clone()).unwrap();
        arr.try_resize(1024).unwrap();
        assert_eq!(arr.capacity(), 1024);
        assert_eq!(storage.stats().allocations, 0);
    }
}
