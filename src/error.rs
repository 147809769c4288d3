//! Error types for the trace driver.
//!
//! The translation engine itself has no failure modes: TLB misses and page
//! faults are ordinary outcomes. Only the I/O collaborators around it can fail.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for driver operations
pub type Result<T> = std::result::Result<T, SimError>;

#[derive(Error, Debug)]
pub enum SimError {
    /// The trace file could not be opened or read
    #[error("Failed to read trace file {path}: {source}")]
    TraceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The per-access results could not be written
    #[error("Failed to write output file {path}: {source}")]
    ResultsWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The logger could not be installed
    #[error("Failed to initialise logging: {0}")]
    Logging(String),
}
