//! Trace driver
//!
//! Feeds accesses to an `AddressTranslator` and handles page faults the way a
//! kernel would: pick a frame with the replacement policy, install the
//! mapping, then resolve the access against the installed frame.

use log::{debug, info};

use crate::config::{EvictionMode, SimConfig};
use crate::replacement::{ClockReplacer, ReplacementPolicy};
use crate::stats::Statistics;
use crate::translation::{
    AddressTranslator, FrameIndex, PageKey, ProcessId, TranslationResult, VirtualAddress,
};

/// One line of an access trace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Access {
    pub pid: ProcessId,
    pub vaddr: u64,
}

impl Access {
    pub fn new(pid: ProcessId, vaddr: u64) -> Self {
        Access { pid, vaddr }
    }
}

/// How a single access was served
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessOutcome {
    TlbHit { physical: u64 },
    PageTableHit { physical: u64 },
    PageFault {
        physical: u64,
        frame: FrameIndex,
        evicted: Option<PageKey>,
    },
}

impl AccessOutcome {
    pub fn physical_address(&self) -> u64 {
        match *self {
            AccessOutcome::TlbHit { physical }
            | AccessOutcome::PageTableHit { physical }
            | AccessOutcome::PageFault { physical, .. } => physical,
        }
    }

    pub fn is_fault(&self) -> bool {
        matches!(self, AccessOutcome::PageFault { .. })
    }
}

#[derive(Debug)]
pub struct Simulator<P = ClockReplacer> {
    translator: AddressTranslator<P>,
    eviction: EvictionMode,
}

impl Simulator<ClockReplacer> {
    pub fn new(config: SimConfig) -> Self {
        Simulator {
            translator: AddressTranslator::new(&config),
            eviction: config.eviction,
        }
    }
}

impl<P: ReplacementPolicy> Simulator<P> {
    pub fn with_policy(config: SimConfig, policy: P) -> Self {
        Simulator {
            translator: AddressTranslator::with_policy(&config, policy),
            eviction: config.eviction,
        }
    }

    /// Serve one access, recovering from a page fault if needed
    pub fn access(&mut self, pid: ProcessId, vaddr: u64) -> AccessOutcome {
        match self.translator.translate(pid, vaddr) {
            TranslationResult::TlbHit(physical) => AccessOutcome::TlbHit { physical },
            TranslationResult::PageTableHit(physical) => AccessOutcome::PageTableHit { physical },
            TranslationResult::PageFault => self.handle_fault(pid, vaddr),
        }
    }

    fn handle_fault(&mut self, pid: ProcessId, vaddr: u64) -> AccessOutcome {
        let va = VirtualAddress::from_raw(vaddr);
        let key = PageKey::new(pid, va.page);

        let selection = self.translator.policy_mut().select_frame(key);
        if let (Some(old), EvictionMode::Invalidate) = (selection.evicted, self.eviction) {
            self.translator.invalidate(old);
        }
        self.translator.install_mapping(pid, va.page, selection.frame);
        debug!("page fault {} -> frame {}", key, selection.frame);

        // The page is resident now; the retry resolves straight to the frame
        // without a second round of counted lookups.
        AccessOutcome::PageFault {
            physical: va.physical(selection.frame),
            frame: selection.frame,
            evicted: selection.evicted,
        }
    }

    /// Serve every access of a trace in order
    pub fn run(&mut self, trace: &[Access]) -> Vec<AccessOutcome> {
        let outcomes: Vec<AccessOutcome> = trace
            .iter()
            .map(|access| self.access(access.pid, access.vaddr))
            .collect();

        let stats = self.stats();
        info!(
            "processed {} accesses: {} TLB hits ({:.1}%), {} page faults",
            trace.len(),
            stats.tlb_hits,
            stats.tlb_hit_rate() * 100.0,
            stats.page_faults
        );
        outcomes
    }

    pub fn stats(&self) -> Statistics {
        self.translator.stats()
    }

    pub fn translator(&self) -> &AddressTranslator<P> {
        &self.translator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trace(pairs: &[(i32, u64)]) -> Vec<Access> {
        pairs.iter().map(|&(pid, vaddr)| Access::new(pid, vaddr)).collect()
    }

    #[test]
    fn test_three_faults_two_frames() {
        // 2 frames, TLB of 1, 4 pages per process (2 pages per outer entry)
        let mut sim = Simulator::new(SimConfig::new(1, 2, 4));
        let outcomes = sim.run(&trace(&[(1, 0), (1, 4096), (1, 8192)]));

        let frames: Vec<FrameIndex> = outcomes
            .iter()
            .map(|o| match *o {
                AccessOutcome::PageFault { frame, .. } => frame,
                other => panic!("expected fault, got {:?}", other),
            })
            .collect();
        assert_eq!(frames, vec![0, 1, 0]);
        assert_eq!(outcomes[2].physical_address(), 0);

        assert_eq!(
            sim.stats(),
            Statistics { tlb_hits: 0, tlb_misses: 3, page_table_hits: 0, page_faults: 3 }
        );
    }

    #[test]
    fn test_fault_then_page_table_then_tlb() {
        let mut sim = Simulator::new(SimConfig::new(4, 4, 16));
        let outcomes = sim.run(&trace(&[(1, 10), (1, 20), (1, 30)]));

        assert!(outcomes[0].is_fault());
        assert_eq!(outcomes[1], AccessOutcome::PageTableHit { physical: 20 });
        assert_eq!(outcomes[2], AccessOutcome::TlbHit { physical: 30 });

        let stats = sim.stats();
        assert_eq!(stats.tlb_hits, 1);
        assert_eq!(stats.tlb_misses, 2);
        assert_eq!(stats.page_table_hits, 1);
        assert_eq!(stats.page_faults, 1);
    }

    #[test]
    fn test_stale_mode_returns_reused_frame() {
        let mut sim = Simulator::new(SimConfig::new(1, 2, 4));
        sim.run(&trace(&[(1, 0), (1, 4096), (1, 8192)]));

        // Page 0 was displaced from frame 0 but its mapping is still there
        let outcome = sim.access(1, 5);
        assert!(!outcome.is_fault());
        assert_eq!(outcome.physical_address(), 5);
    }

    #[test]
    fn test_invalidate_mode_refaults_displaced_page() {
        let config = SimConfig::new(1, 2, 4).with_eviction(EvictionMode::Invalidate);
        let mut sim = Simulator::new(config);
        let outcomes = sim.run(&trace(&[(1, 0), (1, 4096), (1, 8192)]));

        assert_eq!(
            outcomes[2],
            AccessOutcome::PageFault {
                physical: 0,
                frame: 0,
                evicted: Some(PageKey::new(1, 0)),
            }
        );
        assert!(sim.access(1, 5).is_fault());
    }

    #[test]
    fn test_debug_shows_translator_state() {
        let mut sim = Simulator::new(SimConfig::new(1, 2, 4));
        sim.access(1, 0);
        let dump = format!("{:?}", sim);
        assert!(dump.starts_with("Simulator"));
        assert!(dump.contains("translator"));
        assert!(dump.contains("Stale"));
    }

    #[test]
    fn test_empty_trace() {
        let mut sim = Simulator::new(SimConfig::default());
        assert!(sim.run(&[]).is_empty());
        assert_eq!(sim.stats(), Statistics::default());
    }
}
