//! Benchmark runner that produces JSON artifacts.
//!
//! Runs the headline comparisons (cached vs uncached range sums under the
//! hot workload, and hash vs splay fib memoization) and writes structured
//! results to `target/benchmarks/<run-id>/results.json`.
//!
//! Run with: `cargo bench --bench runner`

use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::Instant;

use chrono::Utc;
use memokit::ds::splay::SplayTree;
use memokit::memo::{HashMemo, fib};
use memokit::range_sum::{RangeSumCache, range_sum};
use memokit::traits::MemoTable;
use memokit::workload::{QueryOp, WorkloadSpec};
use serde::Serialize;

const SCHEMA_VERSION: u32 = 1;

// Headline workload parameters
const ARRAY_LEN: usize = 100_000;
const QUERIES: usize = 50_000;
const CAPACITY: usize = 1_000;
const SEED: u64 = 42;

const FIB_POINTS: [u32; 9] = [0, 25, 50, 75, 100, 125, 150, 175, 186];
const FIB_REPS: usize = 200;

fn main() {
    println!("=== memokit Benchmark Runner ===");
    println!("Schema version: {}", SCHEMA_VERSION);
    println!();

    let metadata = collect_metadata();
    println!("Run ID: {}", metadata.timestamp);
    println!(
        "Git commit: {}",
        metadata.git_commit.as_deref().unwrap_or("unknown")
    );
    println!("Rustc: {}", metadata.rustc_version);
    println!();

    println!("[1/2] Range-sum workload: cached vs uncached...");
    let range_sum_result = run_range_comparison();
    println!();

    println!("[2/2] Fibonacci memoization: hash vs splay...");
    let fib_rows = run_fib_sweep();
    println!();

    let artifact = BenchmarkArtifact {
        schema_version: SCHEMA_VERSION,
        metadata,
        range_sum: range_sum_result,
        fib: fib_rows,
    };

    let output_dir = create_output_directory(&artifact.metadata.timestamp);
    let output_path = output_dir.join("results.json");

    println!("Saving results to: {}", output_path.display());

    let json = serde_json::to_string_pretty(&artifact).expect("Failed to serialize results");
    fs::write(&output_path, json).expect("Failed to write results.json");

    println!("✓ Benchmark complete!");
    println!("  Output: {}", output_path.display());
}

// === Artifact schema ===

#[derive(Serialize)]
struct BenchmarkArtifact {
    schema_version: u32,
    metadata: RunMetadata,
    range_sum: RangeSumResult,
    fib: Vec<FibRow>,
}

#[derive(Serialize)]
struct RunMetadata {
    timestamp: String,
    git_commit: Option<String>,
    git_branch: Option<String>,
    git_dirty: bool,
    rustc_version: String,
    host_triple: String,
    cpu_model: Option<String>,
    config: RunConfig,
}

#[derive(Serialize)]
struct RunConfig {
    array_len: usize,
    queries: usize,
    capacity: usize,
    seed: u64,
}

#[derive(Serialize)]
struct RangeSumResult {
    uncached_ms: f64,
    cached_ms: f64,
    speedup: f64,
    queries: u64,
    hits: u64,
    misses: u64,
    updates: u64,
    invalidated: u64,
    hit_rate: f64,
    cached_entries_at_exit: usize,
}

#[derive(Serialize)]
struct FibRow {
    n: u32,
    hash_avg_ns: f64,
    hash_best_ns: f64,
    splay_avg_ns: f64,
    splay_best_ns: f64,
}

// === Benchmark sections ===

/// Same op stream against a bare array and against the cached pipeline.
///
/// Both passes fold their query results into a checksum; a mismatch means
/// stale data survived an invalidation and aborts the run.
fn run_range_comparison() -> RangeSumResult {
    let mut source = WorkloadSpec::new(ARRAY_LEN, SEED).generator();
    let values = source.initial_values();
    let ops = source.ops(QUERIES);

    let mut raw = values.clone();
    let start = Instant::now();
    let uncached_checksum = run_uncached(&mut raw, &ops);
    let uncached_ms = start.elapsed().as_secs_f64() * 1_000.0;

    let mut cache = RangeSumCache::try_new(values, CAPACITY).expect("capacity is non-zero");
    let start = Instant::now();
    let cached_checksum = run_cached(&mut cache, &ops);
    let cached_ms = start.elapsed().as_secs_f64() * 1_000.0;

    assert_eq!(
        uncached_checksum, cached_checksum,
        "cached and uncached query results disagree"
    );

    let stats = cache.stats();
    let speedup = uncached_ms / cached_ms.max(f64::EPSILON);

    println!("  {:<22} {:>14}", "array length", ARRAY_LEN);
    println!("  {:<22} {:>14}", "queries", QUERIES);
    println!("  {:<22} {:>14}", "cache capacity", CAPACITY);
    println!("  {:<22} {:>14}", "seed", SEED);
    println!();
    println!("  {:<22} {:>11.1} ms", "uncached", uncached_ms);
    println!("  {:<22} {:>11.1} ms", "cached", cached_ms);
    println!("  {:<22} {:>13.1}x", "speedup", speedup);
    println!();
    println!("  {:<22} {:>13.1}%", "hit rate", stats.hit_rate() * 100.0);
    println!("  {:<22} {:>14}", "hits", stats.hits);
    println!("  {:<22} {:>14}", "misses", stats.misses);
    println!("  {:<22} {:>14}", "updates", stats.updates);
    println!("  {:<22} {:>14}", "invalidated", stats.invalidated);
    println!("  {:<22} {:>14}", "cached at exit", cache.cached_entries());

    RangeSumResult {
        uncached_ms,
        cached_ms,
        speedup,
        queries: stats.queries,
        hits: stats.hits,
        misses: stats.misses,
        updates: stats.updates,
        invalidated: stats.invalidated,
        hit_rate: stats.hit_rate(),
        cached_entries_at_exit: cache.cached_entries(),
    }
}

fn run_uncached(values: &mut [u64], ops: &[QueryOp]) -> u64 {
    let mut checksum = 0u64;
    for op in ops {
        match *op {
            QueryOp::Update { index, value } => values[index] = value,
            QueryOp::Range { left, right } => {
                checksum = checksum.wrapping_add(range_sum(values, left, right));
            }
        }
    }
    checksum
}

fn run_cached(cache: &mut RangeSumCache, ops: &[QueryOp]) -> u64 {
    let mut checksum = 0u64;
    for op in ops {
        match *op {
            QueryOp::Update { index, value } => {
                cache.update(index, value).expect("workload ops are in bounds");
            }
            QueryOp::Range { left, right } => {
                let sum = cache.sum(left, right).expect("workload ops are in bounds");
                checksum = checksum.wrapping_add(sum);
            }
        }
    }
    checksum
}

/// Cold-table fib timings: fresh memo per repetition, both backends.
fn run_fib_sweep() -> Vec<FibRow> {
    println!(
        "  {:>5} {:>14} {:>14} {:>12}",
        "n", "hash avg", "splay avg", "splay/hash"
    );

    let rows: Vec<FibRow> = FIB_POINTS
        .iter()
        .map(|&n| {
            let (hash_avg_ns, hash_best_ns) = time_fib_cold(n, FIB_REPS, HashMemo::new);
            let (splay_avg_ns, splay_best_ns) = time_fib_cold(n, FIB_REPS, SplayTree::new);

            println!(
                "  {:>5} {:>11.0} ns {:>11.0} ns {:>11.2}x",
                n,
                hash_avg_ns,
                splay_avg_ns,
                splay_avg_ns / hash_avg_ns.max(f64::EPSILON)
            );

            FibRow {
                n,
                hash_avg_ns,
                hash_best_ns,
                splay_avg_ns,
                splay_best_ns,
            }
        })
        .collect();

    let ratios: Vec<f64> = rows
        .iter()
        .map(|row| row.splay_avg_ns / row.hash_avg_ns.max(f64::EPSILON))
        .collect();
    let mean = ratios.iter().sum::<f64>() / ratios.len() as f64;
    let best = ratios.iter().cloned().fold(f64::INFINITY, f64::min);
    let worst = ratios.iter().cloned().fold(0.0, f64::max);

    println!();
    println!("  {:<22} {:>13.2}x", "splay/hash mean", mean);
    println!("  {:<22} {:>13.2}x", "splay/hash best", best);
    println!("  {:<22} {:>13.2}x", "splay/hash worst", worst);

    rows
}

fn time_fib_cold<M, F>(n: u32, reps: usize, mut fresh: F) -> (f64, f64)
where
    M: MemoTable<u32, u128>,
    F: FnMut() -> M,
{
    let mut total_ns = 0.0;
    let mut best_ns = f64::INFINITY;
    for _ in 0..reps {
        let mut memo = fresh();
        let start = Instant::now();
        std::hint::black_box(fib(n, &mut memo));
        let elapsed_ns = start.elapsed().as_nanos() as f64;
        total_ns += elapsed_ns;
        best_ns = best_ns.min(elapsed_ns);
    }
    (total_ns / reps as f64, best_ns)
}

// === Environment metadata ===

/// Collect metadata about the benchmark run environment.
fn collect_metadata() -> RunMetadata {
    RunMetadata {
        timestamp: Utc::now().to_rfc3339(),
        git_commit: get_git_commit(),
        git_branch: get_git_branch(),
        git_dirty: is_git_dirty(),
        rustc_version: get_rustc_version(),
        host_triple: get_host_triple(),
        cpu_model: get_cpu_model(),
        config: RunConfig {
            array_len: ARRAY_LEN,
            queries: QUERIES,
            capacity: CAPACITY,
            seed: SEED,
        },
    }
}

/// Get the current git commit SHA.
fn get_git_commit() -> Option<String> {
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                String::from_utf8(output.stdout)
                    .ok()
                    .map(|s| s.trim().to_string())
            } else {
                None
            }
        })
}

/// Get the current git branch name.
fn get_git_branch() -> Option<String> {
    Command::new("git")
        .args(["rev-parse", "--abbrev-ref", "HEAD"])
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                String::from_utf8(output.stdout)
                    .ok()
                    .map(|s| s.trim().to_string())
            } else {
                None
            }
        })
}

/// Check if the git working directory has uncommitted changes.
fn is_git_dirty() -> bool {
    Command::new("git")
        .args(["status", "--porcelain"])
        .output()
        .ok()
        .map(|output| !output.stdout.is_empty())
        .unwrap_or(false)
}

/// Get the rustc version string.
fn get_rustc_version() -> String {
    Command::new("rustc")
        .args(["--version"])
        .output()
        .ok()
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Get the host triple.
fn get_host_triple() -> String {
    std::env::var("TARGET").unwrap_or_else(|_| {
        Command::new("rustc")
            .args(["-vV"])
            .output()
            .ok()
            .and_then(|output| String::from_utf8(output.stdout).ok())
            .and_then(|s| {
                s.lines()
                    .find(|line| line.starts_with("host: "))
                    .map(|line| line.trim_start_matches("host: ").to_string())
            })
            .unwrap_or_else(|| "unknown".to_string())
    })
}

/// Get the CPU model name (platform-specific).
fn get_cpu_model() -> Option<String> {
    #[cfg(target_os = "macos")]
    {
        Command::new("sysctl")
            .args(["-n", "machdep.cpu.brand_string"])
            .output()
            .ok()
            .and_then(|output| String::from_utf8(output.stdout).ok())
            .map(|s| s.trim().to_string())
    }
    #[cfg(target_os = "linux")]
    {
        fs::read_to_string("/proc/cpuinfo").ok().and_then(|content| {
            content
                .lines()
                .find(|line| line.starts_with("model name"))
                .and_then(|line| line.split(':').nth(1))
                .map(|s| s.trim().to_string())
        })
    }
    #[cfg(not(any(target_os = "macos", target_os = "linux")))]
    {
        None
    }
}

/// Create output directory for benchmark results.
fn create_output_directory(run_id: &str) -> PathBuf {
    // Use a simpler filename-safe version of the timestamp
    let safe_id = run_id.replace([':', '.'], "-");
    let dir = PathBuf::from("target").join("benchmarks").join(safe_id);

    fs::create_dir_all(&dir).expect("Failed to create output directory");
    dir
}
