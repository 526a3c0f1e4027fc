//! DHAT heap profiler for memokit.
//!
//! Run with: cargo run --bin dhat_profile --release --features dhat-heap
//! View results: Open dhat-heap.json in <https://nnethercote.github.io/dh_view/dh_view.html>

#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use memokit::ds::splay::SplayTree;
use memokit::memo::{HashMemo, MAX_FIB_N, fib};
use memokit::policy::lru::LruCache;
use memokit::range_sum::RangeSumCache;
use memokit::workload::WorkloadSpec;

/// Simple XorShift64 RNG for deterministic workloads.
struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    fn next_f64(&mut self) -> f64 {
        const SCALE: f64 = 1.0 / (u64::MAX as f64);
        (self.next_u64() as f64) * SCALE
    }
}

fn profile_range_sum() {
    println!("=== Profiling range-sum pipeline ===");
    let array_len = 100_000;
    let queries = 50_000;
    let capacity = 1_000;

    let mut source = WorkloadSpec::new(array_len, 42).generator();
    let values = source.initial_values();
    let mut cache = RangeSumCache::try_new(values, capacity).expect("capacity is non-zero");

    for op in source.ops(queries) {
        op.apply(&mut cache).expect("workload ops are in bounds");
    }

    let stats = cache.stats();
    println!(
        "  queries: {}  hit rate: {:.1}%  invalidated: {}",
        stats.queries,
        stats.hit_rate() * 100.0,
        stats.invalidated
    );
    println!("  Final cached entries: {}", cache.cached_entries());
}

fn profile_lru_churn() {
    println!("=== Profiling LRU churn ===");
    let capacity = 4096;
    let operations = 100_000;
    let universe = 16_384u64;

    let mut cache = LruCache::try_new(capacity).expect("capacity is non-zero");
    let mut rng = XorShift64::new(42);
    let hot_size = (universe as f64 * 0.1) as u64;

    // Warm up
    for i in 0..capacity as u64 {
        cache.insert(i, i);
    }

    // Hotset workload: 90% of accesses hit 10% of keys
    for _ in 0..operations {
        let key = if rng.next_f64() < 0.9 {
            rng.next_u64() % hot_size
        } else {
            hot_size + (rng.next_u64() % (universe - hot_size))
        };

        if cache.get(&key).is_none() {
            cache.insert(key, key);
        }
    }

    // Eviction churn: slot reuse should keep the arena flat
    for i in 0..operations as u64 {
        cache.insert(universe + i, i);
    }

    println!("  Final size: {}", cache.len());
}

fn profile_fib_tables() {
    println!("=== Profiling fib memo tables ===");

    let mut hashed = HashMemo::new();
    let mut splayed = SplayTree::new();

    let a = fib(MAX_FIB_N, &mut hashed);
    let b = fib(MAX_FIB_N, &mut splayed);
    assert_eq!(a, b);

    println!(
        "  fib({}) computed; hash entries: {}  splay nodes: {}",
        MAX_FIB_N,
        hashed.len(),
        splayed.len()
    );
}

fn profile_splay_spine() {
    println!("=== Profiling splay spine teardown ===");
    let size = 100_000u64;

    // Ascending inserts build a maximal spine; teardown is the interesting
    // allocation pattern (the worklist, not the nodes).
    let mut tree = SplayTree::new();
    for key in 0..size {
        tree.insert(key, key);
    }
    println!("  Built spine of {} nodes", tree.len());
    drop(tree);
    println!("  Teardown complete");
}

fn main() {
    let _profiler = dhat::Profiler::new_heap();

    println!("memokit DHAT Heap Profiling");
    println!("===========================\n");

    profile_range_sum();
    profile_lru_churn();
    profile_fib_tables();
    profile_splay_spine();

    println!("\n===========================");
    println!("Profiling complete!");
    println!(
        "View results: Open dhat-heap.json in <https://nnethercote.github.io/dh_view/dh_view.html>"
    );
}
