pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod logging;
pub mod page_table;
pub mod replacement;
pub mod simulator;
pub mod stats;
pub mod tlb;
pub mod translation;

// Re-export commonly used items for convenience
pub use config::{EvictionMode, SimConfig};
pub use constants::*;
pub use error::{Result, SimError};
pub use replacement::{ClockReplacer, FrameSelection, ReplacementPolicy};
pub use simulator::{Access, AccessOutcome, Simulator};
pub use stats::Statistics;
pub use translation::{AddressTranslator, PageKey, TranslationResult, VirtualAddress};
