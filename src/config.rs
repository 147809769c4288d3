//! Engine configuration, fixed at construction.

use crate::constants::*;

/// What happens to the displaced page when its frame is handed to another page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvictionMode {
    /// The displaced page keeps its page-table (and any TLB) entry. A later
    /// access to it resolves to the frame now owned by another page.
    #[default]
    Stale,
    /// The displaced page's page-table and TLB entries are removed, so its
    /// next access faults.
    Invalidate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimConfig {
    pub tlb_capacity: usize,
    pub frame_count: usize,
    pub pages_per_process: usize,
    pub eviction: EvictionMode,
}

impl SimConfig {
    /// Build a configuration, clamping every capacity to at least 1
    pub fn new(tlb_capacity: usize, frame_count: usize, pages_per_process: usize) -> Self {
        SimConfig {
            tlb_capacity: tlb_capacity.max(1),
            frame_count: frame_count.max(1),
            pages_per_process: pages_per_process.max(1),
            eviction: EvictionMode::Stale,
        }
    }

    pub fn with_eviction(mut self, eviction: EvictionMode) -> Self {
        self.eviction = eviction;
        self
    }

    /// Pages covered by one outer page-table entry: `max(1, floor(sqrt(pages)))`
    pub fn pages_per_outer(&self) -> u64 {
        pages_per_outer(self.pages_per_process)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig::new(DEFAULT_TLB_SIZE, DEFAULT_NUM_FRAMES, DEFAULT_PAGE_COUNT)
    }
}

pub(crate) fn pages_per_outer(pages_per_process: usize) -> u64 {
    (pages_per_process.max(1) as u64).isqrt().max(1)
}
