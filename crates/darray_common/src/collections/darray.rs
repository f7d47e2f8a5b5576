use core::{
    cmp::Ordering,
    fmt,
    marker::PhantomData,
    mem::{self, ManuallyDrop},
    ops::{Deref, DerefMut},
    ptr,
    slice,
};

use scopeguard::{guard, ScopeGuard};
use static_assertions::assert_impl_all;

use crate::{
    error::{DArrayError, DArrayResult},
    mem::{GlobalStorage, Storage},
};

use super::{
    imp::array::RawArray,
    impl_slice_partial_eq_generic,
    Pow2ReserveStrategy,
    ReserveStrategy,
};

mod destroyer;
mod into_iter;
mod sort;


pub use destroyer::Destroyer;
pub use into_iter::IntoIter;

use destroyer::release;

/// A resizable, ordered array of item handles, with an optional destroyer managing the lifetime of the items.
///
/// The array never looks at its items, it only moves the handles around and calls the callbacks it is given.
/// Whether an item is owned, shared, or borrowed is expressed by the handle type itself:
/// a `DArray<Box<X>>` owns its items, a `DArray<Rc<X>>` shares them, and a `DArray<&X>` only views them.
///
/// When a destroyer is set, it gets called exactly once for every item that leaves the array without being handed back to the caller,
/// i.e. on `pop`, `pop_range`, `unique`, `clear`, and when the array itself is dropped.
/// Without a destroyer, those items are simply dropped.
///
/// # Capacity
///
/// The backing memory is resized according to the reserve strategy `R` on every operation that changes the length.
/// With the default [`Pow2ReserveStrategy`] the capacity stays a power of 2:
/// it doubles when the array is full, and halves once the array only fills half of it.
///
/// Growing happens before the array is modified, so an operation that fails to grow leaves the array as it was.
/// Shrinking happens in place after the items were removed, a storage refusing to shrink only leaves the buffer larger.
///
/// # Examples
///
/// ```
/// use darray_common::collections::DArray;
///
/// let mut arr = DArray::new(None).unwrap();
/// for i in 0..5 {
///     arr.append(i).unwrap();
/// }
/// arr.pop(0).unwrap();
/// arr.insert(0, -1).unwrap();
/// arr.sort(i32::cmp);
/// assert_eq!(arr, [-1, 1, 2, 3, 4]);
/// assert_eq!(arr.search(&3, i32::cmp), Ok(3));
/// ```
pub struct DArray<T, S: Storage = GlobalStorage, R: ReserveStrategy = Pow2ReserveStrategy> {
    arr:       RawArray<T, S>,
    len:       usize,
    destroyer: Option<Destroyer<T>>,
    _phantom:  PhantomData<fn() -> R>,
}

assert_impl_all!(DArray<i32>: Send, Sync);
assert_impl_all!(DArray<Box<str>>: Send, Sync);

impl<T> DArray<T> {
    /// Create an empty array using the global allocator, with a capacity of 1.
    ///
    /// # Errors
    ///
    /// Returns `AllocationFailure` if the initial storage could not be allocated.
    pub fn new(destroyer: Option<Destroyer<T>>) -> DArrayResult<Self> {
        Self::new_in(destroyer, GlobalStorage)
    }
}

impl<T, S: Storage, R: ReserveStrategy> DArray<T, S, R> {
    /// Create an empty array in the given storage, with a capacity of 1.
    ///
    /// # Errors
    ///
    /// Returns `AllocationFailure` if the initial storage could not be allocated.
    pub fn new_in(destroyer: Option<Destroyer<T>>, storage: S) -> DArrayResult<Self> {
        let cap = R::calculate(0, 0)?;
        let arr = RawArray::try_with_capacity_in(cap, storage)?;
        Ok(Self { arr, len: 0, destroyer, _phantom: PhantomData })
    }

    /// Replace the destroyer, returning the previous one.
    ///
    /// Items already in the array will be released with the new destroyer.
    pub fn set_destroyer(&mut self, destroyer: Option<Destroyer<T>>) -> Option<Destroyer<T>> {
        mem::replace(&mut self.destroyer, destroyer)
    }

    /// Get the destroyer, if any.
    pub fn destroyer(&self) -> Option<&Destroyer<T>> {
        self.destroyer.as_ref()
    }

    /// Get the number of items in the array.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the array contains no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the number of items the array can hold before it needs to grow.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.arr.capacity()
    }

    /// Get the storage the array allocates from.
    pub fn storage(&self) -> &S {
        self.arr.storage()
    }

    /// Extract a slice containing the entire array.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: items in `0..len` are initialized
        unsafe { slice::from_raw_parts(self.arr.as_ptr(), self.len) }
    }

    /// Extract a mutable slice of the entire array.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: items in `0..len` are initialized
        unsafe { slice::from_raw_parts_mut(self.arr.as_mut_ptr(), self.len) }
    }

    /// Call `consumer` on every item, in order.
    pub fn foreach<F>(&mut self, mut consumer: F) where
        F: FnMut(&mut T)
    {
        for item in self.as_mut_slice() {
            consumer(item);
        }
    }

    /// Fold every item into `accumulator`, in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use darray_common::collections::DArray;
    ///
    /// let mut arr = DArray::new(None).unwrap();
    /// arr.append(3).unwrap();
    /// arr.append(4).unwrap();
    ///
    /// let mut sum = 0;
    /// arr.aggregate(&mut sum, |item, sum| *sum += item);
    /// assert_eq!(sum, 7);
    /// ```
    pub fn aggregate<A, F>(&self, accumulator: &mut A, mut combine: F) where
        F: FnMut(&T, &mut A)
    {
        for item in self.as_slice() {
            combine(item, accumulator);
        }
    }

    /// Append an item to the back of the array.
    ///
    /// # Errors
    ///
    /// Returns `AllocationFailure` if the array could not grow, `item` is then dropped without being passed to the destroyer.
    ///
    /// # Time complexity
    ///
    /// Takes amortized *O*(1) time.
    pub fn append(&mut self, item: T) -> DArrayResult<()> {
        let len = self.len;
        self.try_fit(len.checked_add(1).ok_or(DArrayError::AllocationFailure)?)?;

        // SAFETY: `try_fit` made room for at least `len + 1` items
        unsafe { self.arr.as_mut_ptr().add(len).write(item) };
        self.len = len + 1;
        Ok(())
    }

    /// Insert an item at `index`, shifting all items after it to the right.
    ///
    /// `index` may be equal to the length, which appends the item.
    ///
    /// # Errors
    ///
    /// - `InvalidIndex` if `index > len`.
    /// - `AllocationFailure` if the array could not grow.
    ///
    /// In both cases `item` is dropped without being passed to the destroyer.
    pub fn insert(&mut self, index: usize, item: T) -> DArrayResult<()> {
        let len = self.len;
        if index > len {
            return Err(DArrayError::InvalidIndex);
        }
        self.try_fit(len.checked_add(1).ok_or(DArrayError::AllocationFailure)?)?;

        // SAFETY: `try_fit` made room for at least `len + 1` items, and `index <= len`
        unsafe {
            let ptr = self.arr.as_mut_ptr().add(index);
            if index < len {
                ptr::copy(ptr, ptr.add(1), len - index);
            }
            ptr.write(item);
        }
        self.len = len + 1;
        Ok(())
    }

    /// Get a reference to the item at `index`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidIndex` if `index >= len`.
    pub fn get(&self, index: usize) -> DArrayResult<&T> {
        self.as_slice().get(index).ok_or(DArrayError::InvalidIndex)
    }

    /// Get a mutable reference to the item at `index`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidIndex` if `index >= len`.
    pub fn get_mut(&mut self, index: usize) -> DArrayResult<&mut T> {
        self.as_mut_slice().get_mut(index).ok_or(DArrayError::InvalidIndex)
    }

    /// Remove and destroy the item at `index`, shifting all items after it to the left.
    ///
    /// The storage is then shrunk in place, if the storage refuses, the array keeps its larger buffer.
    ///
    /// # Errors
    ///
    /// Returns `InvalidIndex` if `index >= len`.
    pub fn pop(&mut self, index: usize) -> DArrayResult<()> {
        if index >= self.len {
            return Err(DArrayError::InvalidIndex);
        }
        self.remove_span(index, index + 1, release);
        Ok(())
    }

    /// Remove the item at `index` and hand it back to the caller, shifting all items after it to the left.
    ///
    /// The destroyer is not called, ownership of the item moves to the caller.
    ///
    /// # Errors
    ///
    /// Returns `InvalidIndex` if `index >= len`.
    pub fn take(&mut self, index: usize) -> DArrayResult<T> {
        if index >= self.len {
            return Err(DArrayError::InvalidIndex);
        }
        let mut taken = None;
        self.remove_span(index, index + 1, |_, item| taken = Some(item));
        taken.ok_or(DArrayError::InvalidIndex)
    }

    /// Remove and destroy all items in `start..end`, shifting the items after the range to the left.
    ///
    /// An empty range is a successful no-op.
    ///
    /// # Errors
    ///
    /// Returns `InvalidIndex` if `start > end` or `end > len`.
    pub fn pop_range(&mut self, start: usize, end: usize) -> DArrayResult<()> {
        if start > end || end > self.len {
            return Err(DArrayError::InvalidIndex);
        }
        if start != end {
            self.remove_span(start, end, release);
        }
        Ok(())
    }

    /// Get the index of the first item for which `cmp(item, needle)` returns `Ordering::Equal`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no item matches.
    pub fn search<Q, F>(&self, needle: &Q, mut cmp: F) -> DArrayResult<usize> where
        Q: ?Sized,
        F: FnMut(&T, &Q) -> Ordering
    {
        self.as_slice()
            .iter()
            .position(|item| cmp(item, needle) == Ordering::Equal)
            .ok_or(DArrayError::NotFound)
    }

    /// Sort the array in place with `cmp`.
    ///
    /// The sort is unstable and takes *O*(n log n) time on average, and *O*(n^2) in the worst case.
    /// It never allocates.
    pub fn sort<F>(&mut self, mut cmp: F) where
        F: FnMut(&T, &T) -> Ordering
    {
        sort::quicksort(self.as_mut_slice(), &mut cmp);
    }

    /// Reverse the order of the items in place.
    pub fn reverse(&mut self) {
        let items = self.as_mut_slice();
        let len = items.len();
        for idx in 0..len / 2 {
            items.swap(idx, len - 1 - idx);
        }
    }

    /// Collapse every run of adjacent items comparing `Ordering::Equal` into its first item, destroying the others.
    ///
    /// `cmp(prev, item)` is called once for every pair of neighbouring items, in their original order,
    /// so a run is a chain of neighbours that each compare equal to the item right before them.
    /// With a comparator that is not transitive, the first and last item of a run may differ.
    ///
    /// # Examples
    ///
    /// ```
    /// use darray_common::collections::DArray;
    /// use std::cmp::Ordering;
    ///
    /// let mut arr = DArray::new(None).unwrap();
    /// for i in [0, 1, 1, 0] {
    ///     arr.append(i).unwrap();
    /// }
    /// arr.unique(i32::cmp);
    /// assert_eq!(arr, [0, 1, 0]);
    ///
    /// // Neighbours at most 1 apart are merged, so the whole chain collapses
    /// let mut arr = DArray::new(None).unwrap();
    /// for i in [1, 2, 3, 7] {
    ///     arr.append(i).unwrap();
    /// }
    /// arr.unique(|a: &i32, b: &i32| if a.abs_diff(*b) <= 1 { Ordering::Equal } else { a.cmp(b) });
    /// assert_eq!(arr, [1, 7]);
    /// ```
    pub fn unique<F>(&mut self, mut cmp: F) where
        F: FnMut(&T, &T) -> Ordering
    {
        let len = self.len;
        if len <= 1 {
            return;
        }

        // INVARIANT: len >= read >= write >= 1, and write < read while `pending` is set
        struct FillGapOnDrop<'a, T, S: Storage, R: ReserveStrategy> {
            // Offset of the item that is compared with its predecessor next
            read:    usize,
            // Offset where the next kept item goes
            write:   usize,
            // The item at `read - 1` is a duplicate that was not destroyed yet
            pending: bool,
            arr:     &'a mut DArray<T, S, R>,
        }

        impl<T, S: Storage, R: ReserveStrategy> Drop for FillGapOnDrop<'_, T, S, R> {
            fn drop(&mut self) {
                // Only reached when `cmp` or the destroyer panicked, a pending duplicate is kept
                // SAFETY: the invariant keeps both ranges in bounds
                unsafe {
                    let ptr = self.arr.arr.as_mut_ptr();
                    let from = if self.pending { self.read - 1 } else { self.read };
                    let items_left = self.arr.len - from;
                    ptr::copy(ptr.add(from), ptr.add(self.write), items_left);
                    self.arr.len = self.write + items_left;
                }
            }
        }

        let mut gap = FillGapOnDrop { read: 1, write: 1, pending: false, arr: &mut *self };
        // SAFETY: the invariant keeps all offsets in bounds.
        //         The slot at `read - 1` still holds its original item: kept items only move to `write <= read - 1`,
        //         and a duplicate is only released after it was compared with its successor.
        unsafe {
            let start = gap.arr.arr.as_mut_ptr();
            while gap.read < len {
                let prev_ptr = start.add(gap.read - 1);
                let read_ptr = start.add(gap.read);
                let duplicate = cmp(&*prev_ptr, &*read_ptr) == Ordering::Equal;

                // Clear the flag before destroying, as the destroyer may panic
                if mem::take(&mut gap.pending) {
                    release(gap.arr.destroyer.as_ref(), prev_ptr.read());
                }
                if duplicate {
                    gap.pending = true;
                } else {
                    if gap.read != gap.write {
                        ptr::copy_nonoverlapping(read_ptr, start.add(gap.write), 1);
                    }
                    gap.write += 1;
                }
                gap.read += 1;
            }
            if mem::take(&mut gap.pending) {
                release(gap.arr.destroyer.as_ref(), start.add(len - 1).read());
            }
        }

        gap.arr.len = gap.write;
        mem::forget(gap);
        self.shrink_to_strategy();
    }

    /// Move all items out of `source` and insert them at `index`, in order.
    ///
    /// `source` is left empty, its destroyer is never called on the moved items.
    ///
    /// # Errors
    ///
    /// - `InvalidIndex` if `index > len`.
    /// - `AllocationFailure` if the array could not grow.
    ///
    /// On error both arrays are left unmodified.
    pub fn extend_at_owned<S2: Storage, R2: ReserveStrategy>(&mut self, index: usize, source: &mut DArray<T, S2, R2>) -> DArrayResult<()> {
        let len = self.len;
        if index > len {
            return Err(DArrayError::InvalidIndex);
        }
        let count = source.len;
        if count == 0 {
            return Ok(());
        }
        self.try_fit(len.checked_add(count).ok_or(DArrayError::AllocationFailure)?)?;

        // SAFETY: `try_fit` made room for `len + count` items, and both arrays are distinct
        unsafe {
            let ptr = self.arr.as_mut_ptr().add(index);
            ptr::copy(ptr, ptr.add(count), len - index);
            ptr::copy_nonoverlapping(source.arr.as_ptr(), ptr, count);
        }
        source.len = 0;
        self.len = len + count;
        Ok(())
    }

    /// Remove all items, destroying them.
    ///
    /// The capacity is left as is, it is only adjusted by the next operation changing the length.
    pub fn clear(&mut self) {
        let len = self.len;
        // Set the length first, so a panicking destroyer or `Drop` leaks the remaining items instead of releasing them twice
        self.len = 0;

        let ptr = self.arr.as_mut_ptr();
        match &self.destroyer {
            // SAFETY: items in `0..len` are initialized and no longer reachable
            Some(destroyer) => for idx in 0..len {
                destroyer.destroy(unsafe { ptr.add(idx).read() });
            },
            None => unsafe { ptr::drop_in_place(ptr::slice_from_raw_parts_mut(ptr, len)) },
        }
    }

    /// Destroy all items and release the backing storage.
    ///
    /// This is the same as dropping the array.
    pub fn destroy(self) {
        drop(self)
    }

    //--------------------------------------------------------------

    /// Make sure the array can hold `target_len` items, `target_len` may not be smaller than the current length.
    ///
    /// On failure the array is untouched.
    fn try_fit(&mut self, target_len: usize) -> DArrayResult<()> {
        debug_assert!(target_len >= self.len);
        let cur_cap = self.arr.capacity();
        let new_cap = R::calculate(cur_cap, target_len)?;
        if let Err(err) = self.arr.try_resize(new_cap) {
            // A refused shrink still leaves a buffer large enough for `target_len`
            if new_cap > cur_cap {
                return Err(err.into());
            }
        }
        Ok(())
    }

    /// Shrink the storage to the capacity the reserve strategy wants for the current length.
    ///
    /// This goes through the storage's `shrink`, without a second block. If it refuses, the current buffer is kept and the next operation changing the length tries again.
    fn shrink_to_strategy(&mut self) {
        if let Ok(new_cap) = R::calculate(self.arr.capacity(), self.len) {
            // The raw array already logged the failure
            _ = self.arr.try_resize(new_cap);
        }
    }

    /// Remove the items in `start..end`, passing each of them to `sink`, then close the gap and shrink the storage.
    fn remove_span<F>(&mut self, start: usize, end: usize, mut sink: F) where
        F: FnMut(Option<&Destroyer<T>>, T)
    {
        debug_assert!(start < end && end <= self.len);
        let tail = self.len - end;

        // If `sink` panics, the items after the current one are leaked instead of released twice
        self.len = start;
        // SAFETY: items in `start..end` are initialized and are each read exactly once, the tail is moved right after
        unsafe {
            let ptr = self.arr.as_mut_ptr();
            for idx in start..end {
                sink(self.destroyer.as_ref(), ptr.add(idx).read());
            }
            ptr::copy(ptr.add(end), ptr.add(start), tail);
        }
        self.len = start + tail;
        self.shrink_to_strategy();
    }
}

impl<T: Clone, S: Storage, R: ReserveStrategy> DArray<T, S, R> {
    /// Insert a copy of every item of `source` at `index`, in order.
    ///
    /// `source` is left unmodified. Items are copied with `Clone`: shared handles such as `Rc` share their item,
    /// references alias it, and owning handles such as `Box` copy it, so no item can be released twice.
    ///
    /// # Errors
    ///
    /// - `InvalidIndex` if `index > len`.
    /// - `AllocationFailure` if the array could not grow.
    ///
    /// On error the array is left unmodified.
    pub fn extend_at<S2: Storage, R2: ReserveStrategy>(&mut self, index: usize, source: &DArray<T, S2, R2>) -> DArrayResult<()> {
        let len = self.len;
        if index > len {
            return Err(DArrayError::InvalidIndex);
        }
        let count = source.len;
        if count == 0 {
            return Ok(());
        }
        self.try_fit(len.checked_add(count).ok_or(DArrayError::AllocationFailure)?)?;

        // SAFETY: `try_fit` made room for `len + count` items
        unsafe {
            let ptr = self.arr.as_mut_ptr().add(index);
            ptr::copy(ptr, ptr.add(count), len - index);
        }

        // Only `0..index` is valid while the copies are made, if a `clone` panics the gap gets closed again
        self.len = index;
        let mut state = guard((&mut *self, 0usize), |(this, filled)| unsafe {
            let ptr = this.arr.as_mut_ptr().add(index);
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(ptr, filled));
            ptr::copy(ptr.add(count), ptr, len - index);
            this.len = len;
        });

        for item in source.as_slice() {
            let copy = item.clone();
            let (this, filled) = &mut *state;
            // SAFETY: `index + filled` is inside the gap made above
            unsafe { this.arr.as_mut_ptr().add(index + *filled).write(copy) };
            *filled += 1;
        }

        let (this, _) = ScopeGuard::into_inner(state);
        this.len = len + count;
        Ok(())
    }

    /// Append a copy of every item of `source`, in order.
    ///
    /// See [`DArray::extend_at`].
    pub fn extend<S2: Storage, R2: ReserveStrategy>(&mut self, source: &DArray<T, S2, R2>) -> DArrayResult<()> {
        self.extend_at(self.len, source)
    }
}

impl<T, S: Storage + Clone, R: ReserveStrategy> DArray<T, S, R> {
    /// Create a new array with the same storage, capacity, and destroyer, filled with `cloner(item)` for every item.
    ///
    /// # Errors
    ///
    /// Returns `AllocationFailure` if the storage for the new array could not be allocated.
    pub fn clone_with<F>(&self, mut cloner: F) -> DArrayResult<Self> where
        F: FnMut(&T) -> T
    {
        let arr = RawArray::try_with_capacity_in(self.arr.capacity(), self.arr.storage().clone())?;
        let mut clone = Self { arr, len: 0, destroyer: self.destroyer.clone(), _phantom: PhantomData };
        for item in self.as_slice() {
            let copy = cloner(item);
            // SAFETY: the new array has the same capacity as `self`
            unsafe { clone.arr.as_mut_ptr().add(clone.len).write(copy) };
            clone.len += 1;
        }
        Ok(clone)
    }

    /// Create a new array with the same storage, capacity, and destroyer, holding a clone of every item.
    pub fn try_clone(&self) -> DArrayResult<Self> where
        T: Clone
    {
        self.clone_with(T::clone)
    }
}

impl<T, S: Storage, R: ReserveStrategy> Deref for DArray<T, S, R> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, S: Storage, R: ReserveStrategy> DerefMut for DArray<T, S, R> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, S: Storage, R: ReserveStrategy> IntoIterator for DArray<T, S, R> {
    type Item = T;
    type IntoIter = IntoIter<T, S>;

    fn into_iter(self) -> IntoIter<T, S> {
        let this = ManuallyDrop::new(self);
        // SAFETY: `this` is never used or dropped again, so every field is moved out exactly once
        unsafe {
            IntoIter {
                arr:       ptr::read(&this.arr),
                destroyer: ptr::read(&this.destroyer),
                start:     0,
                end:       this.len,
            }
        }
    }
}

impl<'a, T, S: Storage, R: ReserveStrategy> IntoIterator for &'a DArray<T, S, R> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> slice::Iter<'a, T> {
        self.as_slice().iter()
    }
}

impl<'a, T, S: Storage, R: ReserveStrategy> IntoIterator for &'a mut DArray<T, S, R> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> slice::IterMut<'a, T> {
        self.as_mut_slice().iter_mut()
    }
}

impl_slice_partial_eq_generic!([S0: Storage, S1: Storage, R0: ReserveStrategy, R1: ReserveStrategy] DArray<T, S0, R0>, DArray<U, S1, R1>);
impl_slice_partial_eq_generic!([S: Storage, R: ReserveStrategy] DArray<T, S, R>, &[U]);
impl_slice_partial_eq_generic!([S: Storage, R: ReserveStrategy] DArray<T, S, R>, [U]);
impl_slice_partial_eq_generic!([S: Storage, R: ReserveStrategy] [T], DArray<U, S, R>);
impl_slice_partial_eq_generic!([S: Storage, R: ReserveStrategy, const N: usize] DArray<T, S, R>, [U; N]);

impl<T: Eq, S: Storage, R: ReserveStrategy> Eq for DArray<T, S, R> {}

impl<T, S: Storage, R: ReserveStrategy> Drop for DArray<T, S, R> {
    fn drop(&mut self) {
        self.clear();
        // `RawArray` handles the deallocation
    }
}

impl<T: fmt::Debug, S: Storage, R: ReserveStrategy> fmt::Debug for DArray<T, S, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}

impl<T, S: Storage, R: ReserveStrategy> AsRef<[T]> for DArray<T, S, R> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, S: Storage, R: ReserveStrategy> AsMut<[T]> for DArray<T, S, R> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}
