use std::fmt;

/// Counters accumulated over one simulation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Statistics {
    pub tlb_hits: u64,
    pub tlb_misses: u64,
    pub page_table_hits: u64,
    pub page_faults: u64,
}

impl Statistics {
    /// Total accesses, each of which makes exactly one TLB lookup
    pub fn accesses(&self) -> u64 {
        self.tlb_hits + self.tlb_misses
    }

    /// Fraction of lookups served by the TLB, 0.0 when nothing was looked up
    pub fn tlb_hit_rate(&self) -> f64 {
        match self.accesses() {
            0 => 0.0,
            n => self.tlb_hits as f64 / n as f64,
        }
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Virtual Memory Statistics ===")?;
        writeln!(f, "TLB hits:        {}", self.tlb_hits)?;
        writeln!(f, "TLB misses:      {}", self.tlb_misses)?;
        writeln!(f, "Page table hits: {}", self.page_table_hits)?;
        write!(f, "Page faults:     {}", self.page_faults)
    }
}
