use core::{
    alloc::Layout,
    ptr::NonNull,
    sync::atomic::{AtomicUsize, Ordering},
};
use std::sync::Arc;

use super::{AllocError, GlobalStorage, Storage};

/// Snapshot of the memory statistics of a [`TrackingStorage`].
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct MemoryStats {
    /// Bytes currently handed out.
    pub live_bytes:    usize,
    /// Highest value `live_bytes` has reached.
    pub peak_bytes:    usize,
    /// Number of successful allocations.
    pub allocations:   usize,
    /// Number of successful grows and shrinks.
    pub reallocations: usize,
    /// Number of deallocations.
    pub deallocations: usize,
    /// Number of requests refused, either by the limit or by the inner storage.
    pub failures:      usize,
}

#[derive(Debug)]
struct Counters {
    live_bytes:    AtomicUsize,
    peak_bytes:    AtomicUsize,
    allocations:   AtomicUsize,
    reallocations: AtomicUsize,
    deallocations: AtomicUsize,
    failures:      AtomicUsize,
    limit:         AtomicUsize,
}

impl Counters {
    fn new(limit: usize) -> Self {
        Self {
            live_bytes:    AtomicUsize::new(0),
            peak_bytes:    AtomicUsize::new(0),
            allocations:   AtomicUsize::new(0),
            reallocations: AtomicUsize::new(0),
            deallocations: AtomicUsize::new(0),
            failures:      AtomicUsize::new(0),
            limit:         AtomicUsize::new(limit),
        }
    }

    /// Check if `extra` bytes can be handed out while `released` bytes are given back.
    fn admit(&self, extra: usize, released: usize) -> Result<(), AllocError> {
        let live = self.live_bytes.load(Ordering::Relaxed);
        let needed = (live - released).saturating_add(extra);
        if needed > self.limit.load(Ordering::Relaxed) {
            self.failures.fetch_add(1, Ordering::Relaxed);
            Err(AllocError)
        } else {
            Ok(())
        }
    }

    fn record_live(&self, extra: usize, released: usize) {
        let live = self.live_bytes.load(Ordering::Relaxed) - released + extra;
        self.live_bytes.store(live, Ordering::Relaxed);
        self.peak_bytes.fetch_max(live, Ordering::Relaxed);
    }

    fn record_result<T>(&self, res: Result<T, AllocError>, counter: &AtomicUsize, extra: usize, released: usize) -> Result<T, AllocError> {
        match res {
            Ok(val) => {
                counter.fetch_add(1, Ordering::Relaxed);
                self.record_live(extra, released);
                Ok(val)
            },
            Err(err) => {
                self.failures.fetch_add(1, Ordering::Relaxed);
                Err(err)
            },
        }
    }
}

/// Storage wrapper keeping statistics about the memory handed out by an inner storage,
/// with an optional limit on the number of live bytes.
///
/// Clones share their statistics and limit, which makes it possible to track a container and all of its clones together.
/// The storage is intended to be used from one thread at a time, like the containers using it.
#[derive(Clone, Debug)]
pub struct TrackingStorage<S: Storage = GlobalStorage> {
    inner:    S,
    counters: Arc<Counters>,
}

impl TrackingStorage<GlobalStorage> {
    /// Create a tracking storage over the global allocator, without a limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tracking storage over the global allocator, refusing to have more than `limit` live bytes.
    pub fn with_limit(limit: usize) -> Self {
        let storage = Self::new();
        storage.set_limit(Some(limit));
        storage
    }
}

/// Track a default constructed inner storage, without a limit.
impl<S: Storage + Default> Default for TrackingStorage<S> {
    fn default() -> Self {
        Self::wrap(S::default())
    }
}

impl<S: Storage> TrackingStorage<S> {
    /// Track the memory handed out by `inner`.
    pub fn wrap(inner: S) -> Self {
        Self { inner, counters: Arc::new(Counters::new(usize::MAX)) }
    }

    /// Set the maximum number of live bytes, `None` removes the limit.
    ///
    /// Lowering the limit below the current live bytes does not free anything, it only refuses new requests.
    pub fn set_limit(&self, limit: Option<usize>) {
        self.counters.limit.store(limit.unwrap_or(usize::MAX), Ordering::Relaxed);
    }

    /// Get the maximum number of live bytes, if any.
    pub fn limit(&self) -> Option<usize> {
        match self.counters.limit.load(Ordering::Relaxed) {
            usize::MAX => None,
            limit => Some(limit),
        }
    }

    /// Get a snapshot of the current statistics.
    pub fn stats(&self) -> MemoryStats {
        let counters = &self.counters;
        MemoryStats {
            live_bytes:    counters.live_bytes.load(Ordering::Relaxed),
            peak_bytes:    counters.peak_bytes.load(Ordering::Relaxed),
            allocations:   counters.allocations.load(Ordering::Relaxed),
            reallocations: counters.reallocations.load(Ordering::Relaxed),
            deallocations: counters.deallocations.load(Ordering::Relaxed),
            failures:      counters.failures.load(Ordering::Relaxed),
        }
    }

    /// Get the inner storage.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

unsafe impl<S: Storage> Storage for TrackingStorage<S> {
    fn allocate(&mut self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        self.counters.admit(layout.size(), 0)?;
        let res = self.inner.allocate(layout);
        self.counters.record_result(res, &self.counters.allocations, layout.size(), 0)
    }

    unsafe fn deallocate(&mut self, ptr: NonNull<u8>, layout: Layout) {
        self.inner.deallocate(ptr, layout);
        self.counters.deallocations.fetch_add(1, Ordering::Relaxed);
        self.counters.record_live(0, layout.size());
    }

    unsafe fn grow(&mut self, ptr: NonNull<u8>, old_layout: Layout, new_layout: Layout) -> Result<NonNull<u8>, AllocError> {
        self.counters.admit(new_layout.size(), old_layout.size())?;
        let res = self.inner.grow(ptr, old_layout, new_layout);
        self.counters.record_result(res, &self.counters.reallocations, new_layout.size(), old_layout.size())
    }

    unsafe fn shrink(&mut self, ptr: NonNull<u8>, old_layout: Layout, new_layout: Layout) -> Result<NonNull<u8>, AllocError> {
        let res = self.inner.shrink(ptr, old_layout, new_layout);
        self.counters.record_result(res, &self.counters.reallocations, new_layout.size(), old_layout.size())
    }
}
