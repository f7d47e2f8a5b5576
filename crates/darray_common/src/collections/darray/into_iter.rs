use core::{
    fmt,
    iter::FusedIterator,
    slice,
};

use crate::{
    collections::imp::array::RawArray,
    mem::Storage,
};
use super::{release, Destroyer};

/// An iterator that moves the items out of a [`DArray`](super::DArray).
///
/// Items handed out by the iterator belong to the caller, items still remaining when the iterator is dropped are released through the destroyer.
pub struct IntoIter<T, S: Storage> {
    pub(super) arr:       RawArray<T, S>,
    pub(super) destroyer: Option<Destroyer<T>>,
    pub(super) start:     usize,
    pub(super) end:       usize,
}

impl<T, S: Storage> IntoIter<T, S> {
    /// Returns the remaining items of this iterator as a slice.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: items in `start..end` are initialized and not yet handed out
        unsafe { slice::from_raw_parts(self.arr.as_ptr().add(self.start), self.end - self.start) }
    }

    /// Returns the remaining items of this iterator as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: items in `start..end` are initialized and not yet handed out
        unsafe { slice::from_raw_parts_mut(self.arr.as_mut_ptr().add(self.start), self.end - self.start) }
    }
}

impl<T: fmt::Debug, S: Storage> fmt::Debug for IntoIter<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T, S: Storage> Iterator for IntoIter<T, S> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        // SAFETY: `start` is in bounds and is moved past before the item can be observed again
        let item = unsafe { self.arr.as_ptr().add(self.start).read() };
        self.start += 1;
        Some(item)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.end - self.start;
        (len, Some(len))
    }

    #[inline]
    fn count(self) -> usize {
        self.len()
    }
}

impl<T, S: Storage> DoubleEndedIterator for IntoIter<T, S> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        self.end -= 1;
        // SAFETY: `end` was in bounds and is excluded from now on
        Some(unsafe { self.arr.as_ptr().add(self.end).read() })
    }
}

impl<T, S: Storage> ExactSizeIterator for IntoIter<T, S> {}

impl<T, S: Storage> FusedIterator for IntoIter<T, S> {}

impl<T, S: Storage> Drop for IntoIter<T, S> {
    fn drop(&mut self) {
        while let Some(item) = self.next() {
            release(self.destroyer.as_ref(), item);
        }
    }
}
