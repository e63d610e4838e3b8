// ============================================================
// Layer 4 — Train/Test Splitter
// ============================================================
// Shuffles the windows with a seeded RNG and moves the last
// `test_size` of them into the test split. Same data and seed
// always give the same split.
//
// Fails if there are not strictly more windows than test_size,
// since the training split would otherwise be empty.

use anyhow::Result;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::domain::error::FlowError;

/// Shuffle `samples` and split into (train, test) with |test| = test_size.
pub fn split_train_test<T>(mut samples: Vec<T>, test_size: usize, seed: u64) -> Result<(Vec<T>, Vec<T>)> {
    let total = samples.len();
    if total <= test_size {
        return Err(FlowError::InsufficientData { available: total, required: test_size }.into());
    }

    let mut rng = StdRng::seed_from_u64(seed);
    samples.shuffle(&mut rng);

    let test = samples.split_off(total - test_size);

    tracing::debug!(
        "Dataset split: {} training, {} test ({}% / {}%)",
        samples.len(),
        test.len(),
        (samples.len() * 100) / total,
        (test.len() * 100) / total,
    );

    Ok((samples, test))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_split_sizes() {
        let items: Vec<usize> = (0..100).collect();
        let (train, test)     = split_train_test(items, 20, 1).unwrap();
        assert_eq!(train.len(), 80);
        assert_eq!(test.len(),  20);
    }

    #[test]
    fn test_all_items_preserved() {
        let items: Vec<usize> = (0..50).collect();
        let (train, test)     = split_train_test(items, 7, 1).unwrap();
        let mut all: Vec<usize> = train.into_iter().chain(test).collect();
        all.sort_unstable();
        assert_eq!(all, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_same_seed_same_split() {
        let a = split_train_test((0..30).collect::<Vec<usize>>(), 10, 7).unwrap();
        let b = split_train_test((0..30).collect::<Vec<usize>>(), 10, 7).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_not_enough_samples() {
        let err = split_train_test((0..10).collect::<Vec<usize>>(), 10, 1).unwrap_err();
        assert_eq!(
            err.downcast_ref::<FlowError>(),
            Some(&FlowError::InsufficientData { available: 10, required: 10 })
        );
    }
}
