// ============================================================
// Layer 3 — Best Checkpoint Tracker
// ============================================================
// Greedy model selection over the report callbacks of one run.
//
//   first report        → adopt unconditionally, do NOT checkpoint
//   accuracy  > best    → adopt, checkpoint this iteration
//   accuracy <= best    → keep the current best, no checkpoint
//
// The first report only seeds the tracker: its iteration is
// recorded even though no checkpoint file exists for it. A later
// strictly better report is what produces the first file.
//
// Accuracy, TPR, FPR and iteration are stored together in one
// BestEval value so they are always from the same evaluation.

use serde::{Deserialize, Serialize};

use crate::domain::flow::Evaluation;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BestEval {
    pub accuracy:  f64,
    pub tpr:       f64,
    pub fpr:       f64,
    pub iteration: usize,
}

impl BestEval {
    pub fn from_evaluation(eval: &Evaluation, iteration: usize) -> Self {
        Self {
            accuracy: eval.accuracy,
            tpr:      eval.tpr,
            fpr:      eval.fpr,
            iteration,
        }
    }
}

/// What the caller must do after offering a result to the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BestDecision {
    /// First result of the run, recorded without a checkpoint
    Seeded,
    /// Strictly better than the previous best; save a checkpoint
    Improved,
    /// Not better; nothing changes
    Kept,
}

impl BestDecision {
    pub fn should_checkpoint(self) -> bool {
        matches!(self, BestDecision::Improved)
    }
}

#[derive(Debug, Clone, Default)]
pub struct BestTracker {
    best: Option<BestEval>,
}

impl BestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn best(&self) -> Option<&BestEval> {
        self.best.as_ref()
    }

    /// Offer a test evaluation taken at `iteration`.
    pub fn observe(&mut self, eval: &Evaluation, iteration: usize) -> BestDecision {
        match self.best {
            None => {
                self.best = Some(BestEval::from_evaluation(eval, iteration));
                BestDecision::Seeded
            }
            Some(current) if eval.accuracy > current.accuracy => {
                self.best = Some(BestEval::from_evaluation(eval, iteration));
                BestDecision::Improved
            }
            Some(_) => BestDecision::Kept,
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::flow::EvalPrefix;

    fn eval(accuracy: f64, tpr: f64, fpr: f64) -> Evaluation {
        Evaluation { prefix: EvalPrefix::Test, loss: 0.5, accuracy, tpr, fpr }
    }

    #[test]
    fn test_first_observation_seeds_without_checkpoint() {
        let mut tracker = BestTracker::new();
        // Even a terrible first result seeds the tracker
        let decision = tracker.observe(&eval(0.01, 0.0, 1.0), 2000);

        assert_eq!(decision, BestDecision::Seeded);
        assert!(!decision.should_checkpoint());
        assert_eq!(
            tracker.best(),
            Some(&BestEval { accuracy: 0.01, tpr: 0.0, fpr: 1.0, iteration: 2000 })
        );
    }

    #[test]
    fn test_strict_improvement_checkpoints() {
        let mut tracker = BestTracker::new();
        tracker.observe(&eval(0.80, 0.7, 0.1), 2000);
        let decision = tracker.observe(&eval(0.85, 0.9, 0.2), 4000);

        assert!(decision.should_checkpoint());
        assert_eq!(
            tracker.best(),
            Some(&BestEval { accuracy: 0.85, tpr: 0.9, fpr: 0.2, iteration: 4000 })
        );
    }

    #[test]
    fn test_equal_or_lower_accuracy_keeps_best() {
        let mut tracker = BestTracker::new();
        tracker.observe(&eval(0.80, 0.7, 0.1), 2000);

        assert_eq!(tracker.observe(&eval(0.80, 0.99, 0.0), 4000), BestDecision::Kept);
        assert_eq!(tracker.observe(&eval(0.40, 0.5, 0.5), 6000), BestDecision::Kept);

        // TPR/FPR of the later calls must not leak into the seed values
        assert_eq!(
            tracker.best(),
            Some(&BestEval { accuracy: 0.80, tpr: 0.7, fpr: 0.1, iteration: 2000 })
        );
    }

    #[test]
    fn test_best_iteration_is_argmax_over_reports() {
        let mut tracker = BestTracker::new();
        let accs = [(2000, 0.70), (4000, 0.90), (6000, 0.85), (8000, 0.91), (10000, 0.60)];
        let checkpoints: Vec<usize> = accs
            .iter()
            .filter(|(it, acc)| tracker.observe(&eval(*acc, 0.0, 0.0), *it).should_checkpoint())
            .map(|(it, _)| *it)
            .collect();

        assert_eq!(checkpoints, vec![4000, 8000]);
        assert_eq!(tracker.best().map(|b| b.iteration), Some(8000));
    }
}
