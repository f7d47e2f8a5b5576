use core::fmt;
use std::sync::Arc;

/// Callback releasing an item when it leaves a [`DArray`](super::DArray) without being handed back to the caller.
///
/// A destroyer is shared: cloning it, or cloning the container it is attached to, does not duplicate the callback.
pub struct Destroyer<T> {
    func: Arc<dyn Fn(T) + Send + Sync>,
}

impl<T> Destroyer<T> {
    /// Create a destroyer from a callback.
    pub fn new<F>(func: F) -> Self where
        F: Fn(T) + Send + Sync + 'static
    {
        Self { func: Arc::new(func) }
    }

    /// Release `item`.
    pub fn destroy(&self, item: T) {
        (self.func)(item)
    }

    /// Check if both destroyers share the same callback.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl<T> Clone for Destroyer<T> {
    fn clone(&self) -> Self {
        Self { func: self.func.clone() }
    }
}

impl<T> fmt::Debug for Destroyer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Destroyer").field("func", &Arc::as_ptr(&self.func)).finish()
    }
}

/// Release `item` with `destroyer`, or drop it when there is none.
#[inline]
pub(super) fn release<T>(destroyer: Option<&Destroyer<T>>, item: T) {
    match destroyer {
        Some(destroyer) => destroyer.destroy(item),
        None => drop(item),
    }
}
