use std::fmt;

use log::trace;

use crate::config::SimConfig;
use crate::constants::*;
use crate::page_table::TwoLevelPageTable;
use crate::replacement::{ClockReplacer, ReplacementPolicy};
use crate::stats::Statistics;
use crate::tlb::Tlb;

pub type ProcessId = i32;
pub type FrameIndex = usize;

/// Identifies a virtual page across all processes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageKey {
    pub pid: ProcessId,
    pub page: u64,
}

impl PageKey {
    pub fn new(pid: ProcessId, page: u64) -> Self {
        PageKey { pid, page }
    }
}

impl fmt::Display for PageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(pid={}, page={})", self.pid, self.page)
    }
}

/// Represents the decomposed components of a Virtual Address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualAddress {
    pub va: u64,
    pub page: u64,
    pub offset: u64,
}

impl VirtualAddress {
    /// Decompose a raw VA into page number and offset
    pub fn from_raw(va: u64) -> Self {
        VirtualAddress {
            va,
            page: va >> OFFSET_BITS,
            offset: va & OFFSET_MASK,
        }
    }

    /// Physical address of this VA once its page lives in `frame`
    #[inline]
    pub fn physical(&self, frame: FrameIndex) -> u64 {
        frame as u64 * PAGE_SIZE + self.offset
    }
}

impl fmt::Display for VirtualAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VA({}) = (page={}, offset={})", self.va, self.page, self.offset)
    }
}

/// Result of an address translation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationResult {
    /// Served from the TLB
    TlbHit(u64),
    /// Served from the page table; the TLB has been refilled
    PageTableHit(u64),
    PageFault,
}

impl TranslationResult {
    pub fn physical_address(&self) -> Option<u64> {
        match *self {
            TranslationResult::TlbHit(pa) | TranslationResult::PageTableHit(pa) => Some(pa),
            TranslationResult::PageFault => None,
        }
    }

    pub fn is_fault(&self) -> bool {
        matches!(self, TranslationResult::PageFault)
    }
}

/// Resolves (process, virtual address) pairs through the TLB and the
/// two-level page table, and keeps the replacement policy's use bits current.
#[derive(Debug, Clone)]
pub struct AddressTranslator<P = ClockReplacer> {
    tlb: Tlb,
    page_table: TwoLevelPageTable,
    policy: P,
}

impl AddressTranslator<ClockReplacer> {
    /// Translator backed by a Clock replacer with `config.frame_count` frames
    pub fn new(config: &SimConfig) -> Self {
        Self::with_policy(config, ClockReplacer::new(config.frame_count))
    }
}

impl<P: ReplacementPolicy> AddressTranslator<P> {
    pub fn with_policy(config: &SimConfig, policy: P) -> Self {
        AddressTranslator {
            tlb: Tlb::new(config.tlb_capacity),
            page_table: TwoLevelPageTable::new(config.pages_per_process),
            policy,
        }
    }

    /// Translate `vaddr` for process `pid`.
    ///
    /// A page-table hit backfills the TLB. Any hit marks the frame as
    /// referenced. A fault leaves every structure untouched apart from the
    /// counters.
    pub fn translate(&mut self, pid: ProcessId, vaddr: u64) -> TranslationResult {
        let va = VirtualAddress::from_raw(vaddr);
        let key = PageKey::new(pid, va.page);

        if let Some(frame) = self.tlb.lookup(key) {
            self.policy.reference_frame(frame);
            return TranslationResult::TlbHit(va.physical(frame));
        }

        match self.page_table.lookup(key) {
            Some(frame) => {
                self.tlb.insert(key, frame);
                self.policy.reference_frame(frame);
                TranslationResult::PageTableHit(va.physical(frame))
            }
            None => {
                trace!("page fault on {} for {}", va, key);
                TranslationResult::PageFault
            }
        }
    }

    /// Record that `page` of process `pid` now lives in `frame`.
    /// The TLB is left alone; the next `translate` refills it.
    pub fn install_mapping(&mut self, pid: ProcessId, page: u64, frame: FrameIndex) {
        self.page_table.install(PageKey::new(pid, page), frame);
    }

    /// Forget a page entirely, from both the page table and the TLB
    pub fn invalidate(&mut self, key: PageKey) {
        self.page_table.invalidate(key);
        self.tlb.invalidate(key);
    }

    pub fn stats(&self) -> Statistics {
        Statistics {
            tlb_hits: self.tlb.hits(),
            tlb_misses: self.tlb.misses(),
            page_table_hits: self.page_table.hits(),
            page_faults: self.page_table.faults(),
        }
    }

    pub fn tlb(&self) -> &Tlb {
        &self.tlb
    }

    pub fn page_table(&self) -> &TwoLevelPageTable {
        &self.page_table
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn policy_mut(&mut self) -> &mut P {
        &mut self.policy
    }
}
