//! Seeded key streams shared by the criterion benches.
//!
//! Streams are pregenerated as `Vec<u64>` so the draw cost stays out of the
//! measured loops.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Zipf};

/// Uniform keys in `0..universe`.
pub fn uniform_keys(count: usize, universe: u64, seed: u64) -> Vec<u64> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..count).map(|_| rng.random_range(0..universe)).collect()
}

/// 90/10 hot/cold split: 90% of draws land in the first tenth of the
/// universe.
pub fn hotset_keys(count: usize, universe: u64, seed: u64) -> Vec<u64> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let hot = (universe / 10).max(1);
    (0..count)
        .map(|_| {
            if universe > hot && rng.random::<f64>() >= 0.9 {
                rng.random_range(hot..universe)
            } else {
                rng.random_range(0..hot)
            }
        })
        .collect()
}

/// Zipfian keys at YCSB-default skew (`theta = 0.99`).
pub fn zipf_keys(count: usize, universe: u64, seed: u64) -> Vec<u64> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let zipf = Zipf::new(universe as f64, 0.99).expect("valid zipf parameters");
    (0..count)
        .map(|_| {
            let sample: f64 = zipf.sample(&mut rng);
            (sample as u64).saturating_sub(1).min(universe - 1)
        })
        .collect()
}

/// Every key in `0..universe` exactly once, in a seeded shuffle.
pub fn shuffled_keys(universe: u64, seed: u64) -> Vec<u64> {
    let mut keys: Vec<u64> = (0..universe).collect();
    keys.shuffle(&mut SmallRng::seed_from_u64(seed));
    keys
}
