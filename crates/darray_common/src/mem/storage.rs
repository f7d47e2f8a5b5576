//! Storage interface used by the containers to obtain their backing memory.
//!
//! This is a reduced take on the storage proposal for rust by matthieu-m:
//! a container never talks to the allocator directly, it asks a storage for blocks,
//! which allows tracking, limiting, or redirecting the memory a container uses.

use core::{
    alloc::Layout,
    fmt,
    ptr::{self, NonNull},
};

/// Error returned when a storage could not provide a block of memory.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct AllocError;

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("memory allocation failed")
    }
}

impl std::error::Error for AllocError {}

/// A storage providing blocks of memory to a container.
///
/// # Safety
///
/// Implementors must return blocks that are valid for reads and writes for the size of the requested layout,
/// aligned to its alignment, and that stay valid until passed back to `deallocate`, `grow`, or `shrink`.
///
/// Callers never request zero-sized layouts.
pub unsafe trait Storage {
    /// Allocate a block of memory fitting `layout`.
    fn allocate(&mut self, layout: Layout) -> Result<NonNull<u8>, AllocError>;

    /// Deallocate a block of memory.
    ///
    /// # Safety
    ///
    /// `ptr` must have been allocated by this storage (or one it shares its memory with) with `layout`.
    unsafe fn deallocate(&mut self, ptr: NonNull<u8>, layout: Layout);

    /// Grow a block of memory, the contents of the old block are preserved.
    ///
    /// On failure the old block is left untouched.
    ///
    /// # Safety
    ///
    /// - `ptr` must have been allocated by this storage with `old_layout`.
    /// - `new_layout.size()` must be greater or equal to `old_layout.size()`, with the same alignment.
    unsafe fn grow(&mut self, ptr: NonNull<u8>, old_layout: Layout, new_layout: Layout) -> Result<NonNull<u8>, AllocError> {
        debug_assert!(new_layout.size() >= old_layout.size());
        self.move_to_new_block(ptr, old_layout, new_layout, old_layout.size())
    }

    /// Shrink a block of memory, the first `new_layout.size()` bytes of the old block are preserved.
    ///
    /// On failure the old block is left untouched.
    ///
    /// # Safety
    ///
    /// - `ptr` must have been allocated by this storage with `old_layout`.
    /// - `new_layout.size()` must be smaller or equal to `old_layout.size()`, with the same alignment.
    unsafe fn shrink(&mut self, ptr: NonNull<u8>, old_layout: Layout, new_layout: Layout) -> Result<NonNull<u8>, AllocError> {
        debug_assert!(new_layout.size() <= old_layout.size());
        self.move_to_new_block(ptr, old_layout, new_layout, new_layout.size())
    }

    #[doc(hidden)]
    unsafe fn move_to_new_block(&mut self, ptr: NonNull<u8>, old_layout: Layout, new_layout: Layout, copy_size: usize) -> Result<NonNull<u8>, AllocError> {
        let new_ptr = self.allocate(new_layout)?;
        ptr::copy_nonoverlapping(ptr.as_ptr(), new_ptr.as_ptr(), copy_size);
        self.deallocate(ptr, old_layout);
        Ok(new_ptr)
    }
}
