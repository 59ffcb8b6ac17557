//! Unbiased random permutation and subset draws
//!
//! Both functions take the RNG explicitly so callers can seed it.

use rand::Rng;

use crate::error::{QuizError, QuizResult};

/// Return a uniformly shuffled copy of `items` (Fisher-Yates)
pub fn shuffle<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.random_range(0..=i);
        shuffled.swap(i, j);
    }
    shuffled
}

/// Draw `count` distinct elements from `items`, skipping anything equal to
/// `exclude`. The result order is random.
///
/// Uses a partial Fisher-Yates pass, so each `count`-subset (and each
/// ordering of it) is equally likely.
pub fn sample<T: Clone + PartialEq, R: Rng + ?Sized>(
    items: &[T],
    count: usize,
    exclude: Option<&T>,
    rng: &mut R,
) -> QuizResult<Vec<T>> {
    let mut pool: Vec<T> = match exclude {
        Some(excluded) => items.iter().filter(|item| *item != excluded).cloned().collect(),
        None => items.to_vec(),
    };

    if pool.len() < count {
        return Err(QuizError::InsufficientCatalog {
            available: pool.len(),
            required: count,
        });
    }

    for i in 0..count {
        let j = rng.random_range(i..pool.len());
        pool.swap(i, j);
    }
    pool.truncate(count);
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::collections::HashMap;

    #[test]
    fn test_shuffle_leaves_input_untouched() {
        let mut rng = Pcg32::seed_from_u64(7);
        let items = vec![1, 2, 3, 4, 5];
        let _ = shuffle(&items, &mut rng);
        assert_eq!(items, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_shuffle_empty_and_single() {
        let mut rng = Pcg32::seed_from_u64(7);
        assert!(shuffle::<u8, _>(&[], &mut rng).is_empty());
        assert_eq!(shuffle(&["only"], &mut rng), vec!["only"]);
    }

    #[test]
    fn test_shuffle_permutations_are_uniform() {
        let mut rng = Pcg32::seed_from_u64(2024);
        let trials = 12_000;
        let mut counts: HashMap<Vec<u8>, u32> = HashMap::new();
        for _ in 0..trials {
            *counts.entry(shuffle(&[0u8, 1, 2], &mut rng)).or_default() += 1;
        }
        // 3! permutations, ~2000 each
        assert_eq!(counts.len(), 6);
        for (perm, count) in &counts {
            assert!(
                (1700..=2300).contains(count),
                "permutation {perm:?} seen {count} times"
            );
        }
    }

    #[test]
    fn test_sample_respects_exclusion() {
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..200 {
            let drawn = sample(&[1, 2, 3, 4, 5], 3, Some(&3), &mut rng).unwrap();
            assert_eq!(drawn.len(), 3);
            assert!(!drawn.contains(&3));
        }
    }

    #[test]
    fn test_sample_fails_when_pool_too_small() {
        let mut rng = Pcg32::seed_from_u64(11);
        let err = sample(&[1, 2, 3], 3, Some(&1), &mut rng).unwrap_err();
        assert!(matches!(
            err,
            QuizError::InsufficientCatalog {
                available: 2,
                required: 3
            }
        ));
    }

    #[test]
    fn test_sample_exact_pool_returns_everything() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut drawn = sample(&[1, 2, 3, 4], 3, Some(&4), &mut rng).unwrap();
        drawn.sort_unstable();
        assert_eq!(drawn, vec![1, 2, 3]);
    }

    #[test]
    fn test_sample_members_are_uniform() {
        let mut rng = Pcg32::seed_from_u64(99);
        let items: Vec<u8> = (0..6).collect();
        let mut hits = [0u32; 6];
        let trials = 10_000;
        for _ in 0..trials {
            for x in sample(&items, 2, Some(&0), &mut rng).unwrap() {
                hits[x as usize] += 1;
            }
        }
        assert_eq!(hits[0], 0);
        // 5 candidates, 2 picks per trial => ~4000 each
        for (i, &h) in hits.iter().enumerate().skip(1) {
            assert!((3600..=4400).contains(&h), "item {i} drawn {h} times");
        }
    }

    proptest! {
        #[test]
        fn prop_shuffle_is_permutation(seed in any::<u64>(), items in prop::collection::vec(any::<u16>(), 0..32)) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut shuffled = shuffle(&items, &mut rng);
            let mut sorted = items.clone();
            shuffled.sort_unstable();
            sorted.sort_unstable();
            prop_assert_eq!(shuffled, sorted);
        }

        #[test]
        fn prop_sample_is_distinct_subset(seed in any::<u64>(), n in 1usize..24, k in 0usize..24) {
            let items: Vec<usize> = (0..n).collect();
            let excluded = n / 2;
            let mut rng = Pcg32::seed_from_u64(seed);
            match sample(&items, k, Some(&excluded), &mut rng) {
                Ok(drawn) => {
                    prop_assert!(k < n);
                    prop_assert_eq!(drawn.len(), k);
                    prop_assert!(!drawn.contains(&excluded));
                    let mut dedup = drawn.clone();
                    dedup.sort_unstable();
                    dedup.dedup();
                    prop_assert_eq!(dedup.len(), k);
                }
                Err(QuizError::InsufficientCatalog { available, required }) => {
                    prop_assert_eq!(available, n - 1);
                    prop_assert_eq!(required, k);
                    prop_assert!(k > n - 1);
                }
                Err(other) => prop_assert!(false, "unexpected error {other}"),
            }
        }
    }
}
