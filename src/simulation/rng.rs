//! Seedable random source for simulation runs
//!
//! Every run owns its own generator. A supplied seed gives bit-identical
//! output arrays across runs; no seed draws fresh entropy.

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// Build the generator for one simulation run.
pub fn seeded_rng(seed: Option<u64>) -> ChaCha20Rng {
    match seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = seeded_rng(Some(42));
        let mut b = seeded_rng(Some(42));
        for _ in 0..16 {
            assert_eq!(a.gen::<u64>(), b.gen::<u64>());
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = seeded_rng(Some(1));
        let mut b = seeded_rng(Some(2));
        let draws_a: Vec<u64> = (0..4).map(|_| a.gen()).collect();
        let draws_b: Vec<u64> = (0..4).map(|_| b.gen()).collect();
        assert_ne!(draws_a, draws_b);
    }
}
