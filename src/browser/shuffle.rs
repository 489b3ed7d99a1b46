//! Shuffle engine: one uniformly random permutation per category.
//!
//! Runs exactly once, at outfit-browser construction. Wrap-around navigation
//! afterwards always walks the same fixed order; a reshuffle requires
//! restarting the client.

use rand::Rng;

/// Fisher-Yates permutation of `0..len`.
///
/// Walks from the last position down to 1, swapping each position with a
/// uniformly drawn earlier (or equal) one. The catalog itself is untouched;
/// callers navigate through the returned index order.
pub fn shuffled_indices<R: Rng>(len: usize, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).collect();
    for i in (1..len).rev() {
        let j = rng.gen_range(0..=i);
        order.swap(i, j);
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn produces_a_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        for len in [1usize, 2, 3, 17, 100] {
            let order = shuffled_indices(len, &mut rng);
            assert_eq!(order.len(), len);

            let mut sorted = order.clone();
            sorted.sort_unstable();
            let expected: Vec<usize> = (0..len).collect();
            assert_eq!(sorted, expected, "not a permutation for len {}", len);
        }
    }

    #[test]
    fn empty_input_yields_empty_order() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(shuffled_indices(0, &mut rng).is_empty());
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let a = shuffled_indices(20, &mut StdRng::seed_from_u64(42));
        let b = shuffled_indices(20, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_eventually_differ() {
        // Not a uniformity proof, just a sanity check that the swap loop
        // actually moves elements.
        let identity: Vec<usize> = (0..50).collect();
        let shuffled = shuffled_indices(50, &mut StdRng::seed_from_u64(1));
        assert_ne!(identity, shuffled);
    }
}
