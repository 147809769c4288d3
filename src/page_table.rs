//! Two-level page table
//!
//! The outer level only records which (process, region) pairs have an inner
//! table; the inner level maps (process, page) to a frame. Both levels are
//! flat maps. A lookup always checks the outer level first.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::pages_per_outer;
use crate::translation::{FrameIndex, PageKey, ProcessId};

#[derive(Debug, Clone)]
pub struct TwoLevelPageTable {
    // (pid, outer index) -> inner table present
    outer: BTreeSet<(ProcessId, u64)>,
    // (pid, page number) -> frame
    inner: BTreeMap<PageKey, FrameIndex>,
    pages_per_outer: u64,
    hits: u64,
    faults: u64,
}

impl TwoLevelPageTable {
    /// Create an empty table sized for `pages_per_process` virtual pages
    pub fn new(pages_per_process: usize) -> Self {
        TwoLevelPageTable {
            outer: BTreeSet::new(),
            inner: BTreeMap::new(),
            pages_per_outer: pages_per_outer(pages_per_process),
            hits: 0,
            faults: 0,
        }
    }

    /// Outer index of a page number
    #[inline]
    pub fn outer_index(&self, page: u64) -> u64 {
        page / self.pages_per_outer
    }

    pub fn pages_per_outer(&self) -> u64 {
        self.pages_per_outer
    }

    /// Resolve a page to its frame, or `None` on a page fault
    pub fn lookup(&mut self, key: PageKey) -> Option<FrameIndex> {
        let outer = (key.pid, self.outer_index(key.page));
        if !self.outer.contains(&outer) {
            self.faults += 1;
            return None;
        }

        match self.inner.get(&key) {
            Some(&frame) => {
                self.hits += 1;
                Some(frame)
            }
            None => {
                self.faults += 1;
                None
            }
        }
    }

    /// Map a page to a frame, creating the inner table if needed and
    /// overwriting any previous mapping for the page
    pub fn install(&mut self, key: PageKey, frame: FrameIndex) {
        let outer = (key.pid, self.outer_index(key.page));
        self.outer.insert(outer);
        self.inner.insert(key, frame);
    }

    /// Remove a page's inner mapping. The outer entry stays, so the
    /// presence invariant still holds. Returns the frame it mapped to.
    pub fn invalidate(&mut self, key: PageKey) -> Option<FrameIndex> {
        self.inner.remove(&key)
    }

    /// Current mapping without touching the counters
    pub fn get(&self, key: PageKey) -> Option<FrameIndex> {
        self.inner.get(&key).copied()
    }

    pub fn has_inner_table(&self, pid: ProcessId, outer_index: u64) -> bool {
        self.outer.contains(&(pid, outer_index))
    }

    /// Number of resident page mappings
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn faults(&self) -> u64 {
        self.faults
    }
}
