use crate::ffi::*;
use once_cell::sync::Lazy;
use std::hash::BuildHasherDefault;
use std::sync::{Mutex, MutexGuard};
use indexmap::IndexMap;
use ahash::AHasher;

type RegionMap = IndexMap<usize, size_t, BuildHasherDefault<AHasher>>;

/// The book of live synthesized regions: base address to the true
/// length of the anonymous allocation behind it. A struct rather than
/// a bare map so that tests can run private instances against the
/// same methods the process-wide one uses.
#[derive(Default)]
pub struct RegionBook {
    records: RegionMap,
}

impl RegionBook {
    /// A fresh allocation's address is always distinct from the
    /// still-live ones; a duplicate key means the book is corrupt.
    pub fn track(&mut self, addr: usize, len: size_t) {
        if self.records.insert(addr, len).is_some() {
            unsafe { graceful_exit("hpmmap: region tracked twice, book is corrupt."); }
        }
    }

    /// Lookup-and-remove. `None` means "not ours": the caller routes
    /// the deallocation through unchanged.
    pub fn untrack(&mut self, addr: usize) -> Option<size_t> {
        // Record order carries no meaning, so the cheap removal is fine.
        self.records.swap_remove(&addr)
    }

    /// Teardown: hands every remaining record to `release` and
    /// forgets it. Used when the layer is being unloaded and the
    /// application never unmapped everything it was given.
    pub fn drain_with<F: FnMut(usize, size_t)>(&mut self, mut release: F) {
        for (addr, len) in self.records.drain(..) {
            release(addr, len);
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// Process-wide instance. Insert, lookup-and-remove and drain are
// mutually exclusive under this one lock: no guarantee exists about
// which thread unmaps a given region.
static BOOK: Lazy<Mutex<RegionBook>> = Lazy::new(|| {
    Mutex::new(RegionBook::default())
});

fn book() -> MutexGuard<'static, RegionBook> {
    match BOOK.lock() {
        Ok(guard)   => guard,
        Err(_)      => unsafe { graceful_exit("hpmmap: poisoned region book mutex.") },
    }
}

pub fn track(addr: usize, len: size_t) {
    book().track(addr, len);
}

pub fn untrack(addr: usize) -> Option<size_t> {
    book().untrack(addr)
}

pub fn drain_with<F: FnMut(usize, size_t)>(release: F) {
    book().drain_with(release);
}
