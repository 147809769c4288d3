//! VM Simulator - Main Entry Point
//!
//! Replays a trace of `pid vaddr` lines through a TLB, a two-level page
//! table and a Clock frame replacer, then prints hit/miss/fault counters.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::info;

use vm_sim::constants::*;
use vm_sim::io::{read_trace, write_results};
use vm_sim::{logging, EvictionMode, SimConfig, Simulator};

/// Command-line configuration
#[derive(Parser, Debug)]
#[command(name = "vm-sim")]
#[command(about = "Simulate TLB, two-level page table and Clock replacement over an access trace")]
#[command(version)]
struct Cli {
    /// Trace file with one `pid vaddr` pair per line
    #[arg(default_value = DEFAULT_TRACE_PATH)]
    trace: PathBuf,

    /// Number of TLB entries
    #[arg(long, default_value_t = DEFAULT_TLB_SIZE)]
    tlb_size: usize,

    /// Virtual pages per process
    #[arg(long, default_value_t = DEFAULT_PAGE_COUNT)]
    pages: usize,

    /// Physical frames
    #[arg(long, default_value_t = DEFAULT_NUM_FRAMES)]
    frames: usize,

    /// Drop the displaced page's mappings when its frame is reused
    #[arg(long)]
    invalidate_on_evict: bool,

    /// Write the physical address of every access to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn config(&self) -> SimConfig {
        let eviction = if self.invalidate_on_evict {
            EvictionMode::Invalidate
        } else {
            EvictionMode::Stale
        };
        SimConfig::new(self.tlb_size, self.frames, self.pages).with_eviction(eviction)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

/// Main logic separated from main() for cleaner error handling
fn run(cli: &Cli) -> vm_sim::Result<()> {
    logging::init(cli.verbose)?;

    let config = cli.config();
    info!(
        "tlb={} frames={} pages/process={} (pages/outer={}) eviction={:?}",
        config.tlb_capacity,
        config.frame_count,
        config.pages_per_process,
        config.pages_per_outer(),
        config.eviction
    );

    let trace = read_trace(&cli.trace)?;
    info!("read {} accesses from {}", trace.len(), cli.trace.display());

    let mut sim = Simulator::new(config);
    let outcomes = sim.run(&trace);

    if let Some(output) = &cli.output {
        write_results(output, &outcomes)?;
        info!("results written to {}", output.display());
    }

    let stats = sim.stats();
    println!("{}", stats);
    println!("TLB hit rate:    {:.2}%", stats.tlb_hit_rate() * 100.0);
    println!("Simulation complete.");
    Ok(())
}
