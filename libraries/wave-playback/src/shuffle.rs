//! Seeded shuffle for collection play order
//!
//! Fisher-Yates over track indices, driven by a seeded `ChaCha12Rng` so that
//! the same seed and track count always yield the same order, independent of
//! the `rand` version or target platform.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

/// Computes play orders for playlists and albums
pub struct ShuffleEngine;

impl ShuffleEngine {
    /// Natural order `[0, 1, .., n)`
    pub fn identity(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    /// Seeded permutation of `[0..n)` with `pivot` placed at index `slot`
    ///
    /// `pivot` is the track currently playing and `slot` its position in the
    /// play order, so toggling shuffle never interrupts what the user hears.
    /// Out-of-range `pivot`/`slot` leave the raw shuffle untouched.
    pub fn permute(seed: i64, n: usize, pivot: usize, slot: usize) -> Vec<usize> {
        let mut order = Self::identity(n);
        let mut rng = ChaCha12Rng::seed_from_u64(seed as u64);
        order.shuffle(&mut rng);

        if slot < n {
            if let Some(at) = order.iter().position(|&track| track == pivot) {
                order.swap(at, slot);
            }
        }

        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn identity_is_natural_order() {
        assert_eq!(ShuffleEngine::identity(4), vec![0, 1, 2, 3]);
        assert!(ShuffleEngine::identity(0).is_empty());
    }

    #[test]
    fn permute_is_a_permutation() {
        let order = ShuffleEngine::permute(42, 20, 0, 0);
        let unique: HashSet<usize> = order.iter().copied().collect();
        assert_eq!(order.len(), 20);
        assert_eq!(unique.len(), 20);
        assert!(order.iter().all(|&i| i < 20));
    }

    #[test]
    fn same_seed_same_order() {
        let a = ShuffleEngine::permute(-7, 12, 3, 3);
        let b = ShuffleEngine::permute(-7, 12, 3, 3);
        assert_eq!(a, b);
    }

    #[test]
    fn known_seed_gives_known_order() {
        assert_eq!(
            ShuffleEngine::permute(42, 8, 0, 0),
            vec![0, 2, 5, 6, 4, 7, 3, 1]
        );
    }

    #[test]
    fn seeds_produce_different_orders() {
        let base = ShuffleEngine::permute(0, 10, 0, 0);
        let differs = (1..6).any(|seed| ShuffleEngine::permute(seed, 10, 0, 0) != base);
        assert!(differs, "five different seeds all gave the same order");
    }

    #[test]
    fn pivot_lands_on_slot() {
        for seed in 0..20 {
            let order = ShuffleEngine::permute(seed, 8, 5, 2);
            assert_eq!(order[2], 5, "seed {seed} moved the pivot");
        }
    }

    #[test]
    fn single_track_and_empty_orders() {
        assert_eq!(ShuffleEngine::permute(9, 1, 0, 0), vec![0]);
        assert!(ShuffleEngine::permute(9, 0, 0, 0).is_empty());
    }
}
