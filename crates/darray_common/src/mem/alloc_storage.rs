use std::{
    alloc::{self, Layout},
    ptr::NonNull,
};

use super::{AllocError, Storage};

/// Storage backed by the global allocator.
#[derive(Clone, Copy, Default, Debug)]
pub struct GlobalStorage;

unsafe impl Storage for GlobalStorage {
    fn allocate(&mut self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        debug_assert!(layout.size() != 0);
        // SAFETY: callers never request zero-sized layouts
        NonNull::new(unsafe { alloc::alloc(layout) }).ok_or(AllocError)
    }

    unsafe fn deallocate(&mut self, ptr: NonNull<u8>, layout: Layout) {
        alloc::dealloc(ptr.as_ptr(), layout)
    }

    unsafe fn grow(&mut self, ptr: NonNull<u8>, old_layout: Layout, new_layout: Layout) -> Result<NonNull<u8>, AllocError> {
        debug_assert!(new_layout.size() >= old_layout.size() && new_layout.align() == old_layout.align());
        NonNull::new(alloc::realloc(ptr.as_ptr(), old_layout, new_layout.size())).ok_or(AllocError)
    }

    unsafe fn shrink(&mut self, ptr: NonNull<u8>, old_layout: Layout, new_layout: Layout) -> Result<NonNull<u8>, AllocError> {
        debug_assert!(new_layout.size() <= old_layout.size() && new_layout.align() == old_layout.align());
        NonNull::new(alloc::realloc(ptr.as_ptr(), old_layout, new_layout.size())).ok_or(AllocError)
    }
}
