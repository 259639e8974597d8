//! Presentation order generation.
//!
//! The traversal order over the catalog is a full permutation of `[0, N)`,
//! generated exactly once at session start. Variation between raters is
//! intentional, so the default source of randomness is unseeded; the seeded
//! constructor exists for reproducible runs and for tests.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Randomized permutation of `[0, n)`. `n == 0` yields an empty order.
pub fn presentation_order(n: usize) -> Vec<usize> {
    shuffled_indices(n, &mut rand::thread_rng())
}

/// Deterministic permutation of `[0, n)` for a fixed seed.
pub fn presentation_order_seeded(n: usize, seed: u64) -> Vec<usize> {
    shuffled_indices(n, &mut StdRng::seed_from_u64(seed))
}

fn shuffled_indices<R: Rng>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(rng);
    order
}

#[cfg(test)]
#[path = "../../tests/src_inline/session/order.rs"]
mod tests;
