// ============================================================
// Layer 4 — Feature Preprocessor
// ============================================================
// Two jobs:
//
//   1. clean_value: turn one raw CSV field into a finite f32.
//      Flow exports contain "Infinity", "NaN" and empty cells
//      for degenerate flows; all of them become 0.
//
//   2. MinMaxScaler: per-feature min-max normalisation to [0, 1].
//      Fitted on the training split only, then applied to both
//      splits, so the test set never leaks into the statistics.
//      A feature that is constant in the training data maps to 0.
//
// Samples are flattened [n_steps × n_features], so feature f of
// step s lives at index s * n_features + f.

use crate::domain::flow::FlowSample;

/// Parse a raw CSV field, mapping anything non-finite to 0.
pub fn clean_value(raw: &str) -> f32 {
    match raw.trim().parse::<f32>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MinMaxScaler {
    mins: Vec<f32>,
    maxs: Vec<f32>,
}

impl MinMaxScaler {
    /// Compute per-feature minimum and maximum over every step of every sample.
    pub fn fit(samples: &[FlowSample], n_features: usize) -> Self {
        let mut mins = vec![f32::INFINITY; n_features];
        let mut maxs = vec![f32::NEG_INFINITY; n_features];

        for sample in samples {
            for step in sample.steps.chunks_exact(n_features) {
                for (f, &v) in step.iter().enumerate() {
                    mins[f] = mins[f].min(v);
                    maxs[f] = maxs[f].max(v);
                }
            }
        }

        // No data at all: make the scaler an identity-to-zero map
        for f in 0..n_features {
            if !mins[f].is_finite() || !maxs[f].is_finite() {
                mins[f] = 0.0;
                maxs[f] = 0.0;
            }
        }

        Self { mins, maxs }
    }

    pub fn n_features(&self) -> usize {
        self.mins.len()
    }

    /// Scale one value of feature `f` into [0, 1].
    pub fn scale(&self, f: usize, v: f32) -> f32 {
        let range = self.maxs[f] - self.mins[f];
        if range <= f32::EPSILON {
            0.0
        } else {
            ((v - self.mins[f]) / range).clamp(0.0, 1.0)
        }
    }

    /// Normalise every sample in place.
    pub fn transform(&self, samples: &mut [FlowSample]) {
        let n_features = self.n_features();
        for sample in samples.iter_mut() {
            for step in sample.steps.chunks_exact_mut(n_features) {
                for (f, v) in step.iter_mut().enumerate() {
                    *v = self.scale(f, *v);
                }
            }
        }
    }
}
