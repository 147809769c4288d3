//! Translation Lookaside Buffer
//!
//! Fully associative, fixed capacity, least-recently-used replacement. Recency
//! comes from a logical clock advanced once per `lookup` or `insert`, so ties
//! are impossible and eviction is deterministic.

use log::trace;

use crate::translation::{FrameIndex, PageKey};

/// One occupied TLB slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TlbEntry {
    pub key: PageKey,
    pub frame: FrameIndex,
    pub last_used: u64,
}

#[derive(Debug, Clone)]
pub struct Tlb {
    entries: Vec<Option<TlbEntry>>,
    clock: u64,
    hits: u64,
    misses: u64,
}

impl Tlb {
    /// Create an empty TLB; a capacity of 0 is treated as 1
    pub fn new(capacity: usize) -> Self {
        Tlb {
            entries: vec![None; capacity.max(1)],
            clock: 0,
            hits: 0,
            misses: 0,
        }
    }

    /// Look up a page. A hit refreshes the entry's recency.
    pub fn lookup(&mut self, key: PageKey) -> Option<FrameIndex> {
        self.clock += 1;
        let now = self.clock;

        match self.entries.iter_mut().flatten().find(|e| e.key == key) {
            Some(entry) => {
                self.hits += 1;
                entry.last_used = now;
                Some(entry.frame)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Insert a mapping, replacing (in order of preference) an entry for the
    /// same key, an empty slot, or the least recently used entry.
    pub fn insert(&mut self, key: PageKey, frame: FrameIndex) {
        self.clock += 1;
        let entry = TlbEntry { key, frame, last_used: self.clock };

        let slot = self
            .position_of(key)
            .or_else(|| self.entries.iter().position(Option::is_none))
            .unwrap_or_else(|| self.lru_slot());

        if let Some(old) = self.entries[slot] {
            if old.key != key {
                trace!("TLB evict {} (frame {}) for {}", old.key, old.frame, key);
            }
        }
        self.entries[slot] = Some(entry);
    }

    /// Drop the entry for `key`, if cached. Returns whether one was removed.
    pub fn invalidate(&mut self, key: PageKey) -> bool {
        match self.position_of(key) {
            Some(slot) => {
                self.entries[slot] = None;
                true
            }
            None => false,
        }
    }

    fn position_of(&self, key: PageKey) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.is_some_and(|e| e.key == key))
    }

    // First slot with the smallest timestamp wins. Only called when full.
    fn lru_slot(&self) -> usize {
        let mut victim = 0;
        let mut oldest = u64::MAX;
        for (i, entry) in self.entries.iter().enumerate() {
            if let Some(entry) = entry {
                if entry.last_used < oldest {
                    oldest = entry.last_used;
                    victim = i;
                }
            }
        }
        victim
    }

    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.entries.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, key: PageKey) -> bool {
        self.position_of(key).is_some()
    }

    pub fn entries(&self) -> impl Iterator<Item = &TlbEntry> {
        self.entries.iter().flatten()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
