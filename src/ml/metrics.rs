// ============================================================
// Layer 5 — Classification Metrics
// ============================================================
// Confusion counts accumulated over evaluation batches.
//
//   accuracy = correct / total          (exact class match)
//   TPR      = TP / (TP + FN)           (malicious caught)
//   FPR      = FP / (FP + TN)           (benign flagged)
//
// Class 0 is the negative (benign) class; every other class is
// positive (malicious). A rate with an empty denominator is 0.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Confusion {
    pub correct:         usize,
    pub true_positives:  usize,
    pub false_positives: usize,
    pub true_negatives:  usize,
    pub false_negatives: usize,
}

impl Confusion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one batch of (prediction, label) pairs.
    pub fn add<P, L>(&mut self, predictions: P, labels: L)
    where
        P: IntoIterator<Item = i64>,
        L: IntoIterator<Item = i64>,
    {
        for (pred, label) in predictions.into_iter().zip(labels) {
            if pred == label {
                self.correct += 1;
            }
            match (pred != 0, label != 0) {
                (true, true)   => self.true_positives  += 1,
                (true, false)  => self.false_positives += 1,
                (false, false) => self.true_negatives  += 1,
                (false, true)  => self.false_negatives += 1,
            }
        }
    }

    pub fn total(&self) -> usize {
        self.true_positives + self.false_positives + self.true_negatives + self.false_negatives
    }

    pub fn accuracy(&self) -> f64 {
        ratio(self.correct, self.total())
    }

    pub fn tpr(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_negatives)
    }

    pub fn fpr(&self) -> f64 {
        ratio(self.false_positives, self.false_positives + self.true_negatives)
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}
