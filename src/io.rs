use std::fs;
use std::path::Path;

use log::warn;

use crate::error::{Result, SimError};
use crate::simulator::{Access, AccessOutcome};

/// Read an access trace from a file. Only failing to read the file is an error.
pub fn read_trace<P: AsRef<Path>>(path: P) -> Result<Vec<Access>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| SimError::TraceRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_trace(&content))
}

/// Parse `pid vaddr` pairs, one per line. Blank and malformed lines are
/// skipped; tokens after the pair are ignored.
pub fn parse_trace(content: &str) -> Vec<Access> {
    let mut accesses = Vec::new();
    let mut skipped = 0usize;

    for line in content.lines() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line) {
            Some(access) => accesses.push(access),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!("skipped {} malformed trace line(s)", skipped);
    }
    accesses
}

fn parse_line(line: &str) -> Option<Access> {
    let mut tokens = line.split_whitespace();
    let pid = tokens.next()?.parse().ok()?;
    let vaddr = tokens.next()?.parse().ok()?;
    Some(Access::new(pid, vaddr))
}

/// Write one physical address per line
pub fn write_results<P: AsRef<Path>>(path: P, outcomes: &[AccessOutcome]) -> Result<()> {
    let path = path.as_ref();
    let mut content: String = outcomes
        .iter()
        .map(|o| o.physical_address().to_string())
        .collect::<Vec<_>>()
        .join("\n");
    if !content.is_empty() {
        content.push('\n');
    }
    fs::write(path, content).map_err(|source| SimError::ResultsWrite {
        path: path.to_path_buf(),
        source,
    })
}
