// ============================================================
// Layer 3 — Flow Domain Types
// ============================================================
// A flow sample is one classification unit: `n_steps` consecutive
// per-step feature vectors, flattened row-major, plus a class index.
//
//   steps = [s0_f0, s0_f1, ..., s0_fF, s1_f0, ..., sN_fF]
//
// A split is the (features, labels) pair handed to the model for
// training or evaluation. Both are immutable once produced.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowSample {
    /// Flattened [n_steps × n_features] sequence
    pub steps: Vec<f32>,

    /// 0 = benign, anything else = malicious
    pub label: usize,
}

impl FlowSample {
    pub fn new(steps: Vec<f32>, label: usize) -> Self {
        Self { steps, label }
    }

    pub fn is_malicious(&self) -> bool {
        self.label != 0
    }
}

/// One side of a train/test split.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowSplit {
    samples: Vec<FlowSample>,
}

impl FlowSplit {
    pub fn new(samples: Vec<FlowSample>) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &[FlowSample] {
        &self.samples
    }

    /// The first `n` samples (all of them if the split is shorter)
    pub fn head(&self, n: usize) -> &[FlowSample] {
        &self.samples[..n.min(self.samples.len())]
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn malicious_count(&self) -> usize {
        self.samples.iter().filter(|s| s.is_malicious()).count()
    }
}

/// Which metric stream an evaluation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvalPrefix {
    Train,
    Test,
}

impl EvalPrefix {
    pub fn as_str(self) -> &'static str {
        match self {
            EvalPrefix::Train => "train",
            EvalPrefix::Test  => "test",
        }
    }
}

/// Metrics summary of one evaluation, appended to a metric stream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub prefix:   EvalPrefix,
    pub loss:     f64,
    pub accuracy: f64,
    pub tpr:      f64,
    pub fpr:      f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split_of(labels: &[usize]) -> FlowSplit {
        FlowSplit::new(labels.iter().map(|&l| FlowSample::new(vec![0.0; 4], l)).collect())
    }

    #[test]
    fn test_head_clamps_to_length() {
        let split = split_of(&[0, 1, 1]);
        assert_eq!(split.head(2).len(), 2);
        assert_eq!(split.head(4096).len(), 3);
        assert!(split.head(0).is_empty());
    }

    #[test]
    fn test_malicious_count() {
        assert_eq!(split_of(&[0, 1, 2, 0]).malicious_count(), 2);
    }
}
