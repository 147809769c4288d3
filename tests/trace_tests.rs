//! End-to-end tests driving the simulator from trace files.

use std::fs;

use tempfile::TempDir;
use vm_sim::io::{read_trace, write_results};
use vm_sim::{SimConfig, SimError, Simulator, Statistics};

fn write_trace(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("trace.txt");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_reference_scenario_from_file() {
    let dir = TempDir::new().unwrap();
    let path = write_trace(&dir, "1 0\n1 4096\n1 8192\n");

    let trace = read_trace(&path).unwrap();
    let mut sim = Simulator::new(SimConfig::new(1, 2, 4));
    let outcomes = sim.run(&trace);

    let addresses: Vec<u64> = outcomes.iter().map(|o| o.physical_address()).collect();
    assert_eq!(addresses, vec![0, 4096, 0]);
    assert_eq!(
        sim.stats(),
        Statistics { tlb_hits: 0, tlb_misses: 3, page_table_hits: 0, page_faults: 3 }
    );
}

#[test]
fn test_malformed_lines_do_not_reach_engine() {
    let dir = TempDir::new().unwrap();
    let path = write_trace(&dir, "# header\n1 0\n\nbad line\n1 100\n2\n");

    let trace = read_trace(&path).unwrap();
    assert_eq!(trace.len(), 2);

    let mut sim = Simulator::new(SimConfig::default());
    sim.run(&trace);
    let stats = sim.stats();
    assert_eq!(stats.page_faults, 1);
    assert_eq!(stats.page_table_hits, 1);
}

#[test]
fn test_missing_trace_file() {
    let dir = TempDir::new().unwrap();
    let err = read_trace(dir.path().join("absent.txt")).unwrap_err();
    assert!(matches!(err, SimError::TraceRead { .. }));
    assert!(err.to_string().contains("absent.txt"));
}

#[test]
fn test_results_written_one_per_line() {
    let dir = TempDir::new().unwrap();
    let trace = read_trace(write_trace(&dir, "1 5\n2 4100\n1 6\n")).unwrap();

    let mut sim = Simulator::new(SimConfig::new(4, 4, 16));
    let outcomes = sim.run(&trace);

    let out = dir.path().join("out.txt");
    write_results(&out, &outcomes).unwrap();
    // pid 1 page 0 -> frame 0, pid 2 page 1 -> frame 1
    assert_eq!(fs::read_to_string(&out).unwrap(), "5\n4100\n6\n");
}

#[test]
fn test_write_results_into_missing_directory() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("no_such_dir").join("out.txt");
    let err = write_results(&out, &[]).unwrap_err();
    assert!(matches!(err, SimError::ResultsWrite { .. }));
}

#[test]
fn test_working_set_fits_in_tlb() {
    // Four pages cycled many times: after the cold faults everything hits the TLB
    let mut content = String::new();
    for round in 0..10 {
        for page in 0..4u64 {
            content.push_str(&format!("1 {}\n", page * 4096 + round));
        }
    }
    let dir = TempDir::new().unwrap();
    let trace = read_trace(write_trace(&dir, &content)).unwrap();

    let mut sim = Simulator::new(SimConfig::new(4, 8, 64));
    sim.run(&trace);
    let stats = sim.stats();

    assert_eq!(stats.page_faults, 4);
    assert_eq!(stats.page_table_hits, 4);
    assert_eq!(stats.tlb_hits, 32);
    assert_eq!(stats.tlb_misses, 8);
}

#[test]
fn test_negative_pids_are_simulated() {
    let dir = TempDir::new().unwrap();
    let trace = read_trace(write_trace(&dir, "-2 0\n-2 4096\n5 0\n")).unwrap();
    assert_eq!(trace.len(), 3);

    let mut sim = Simulator::new(SimConfig::new(4, 4, 16));
    let outcomes = sim.run(&trace);

    let addresses: Vec<u64> = outcomes.iter().map(|o| o.physical_address()).collect();
    assert_eq!(addresses, vec![0, 4096, 2 * 4096]);
    let stats = sim.stats();
    assert_eq!(stats.tlb_misses, 3);
    assert_eq!(stats.page_faults, 3);
}
