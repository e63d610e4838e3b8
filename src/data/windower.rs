// ============================================================
// Layer 4 — Flow Windower
// ============================================================
// Groups consecutive flow records into fixed-length sequences
// of n_steps rows, the unit the recurrent models classify.
//
//   records:  r0 r1 r2 r3 r4 r5 r6
//   n_steps = 3
//   windows:  [r0 r1 r2] [r3 r4 r5]      (r6 dropped: partial)
//
// A window is malicious (label 1) when any of its rows is
// malicious; otherwise it is benign (label 0).

use crate::data::loader::FlowRecord;
use crate::domain::{error::FlowError, flow::FlowSample};

pub struct Windower {
    n_steps: usize,
}

impl Windower {
    /// Non-overlapping windows of `n_steps` rows.
    pub fn new(n_steps: usize) -> Result<Self, FlowError> {
        if n_steps == 0 {
            return Err(FlowError::ZeroDimension("n_steps"));
        }
        Ok(Self { n_steps })
    }

    pub fn window(&self, records: &[FlowRecord]) -> Vec<FlowSample> {
        let mut samples = Vec::with_capacity(self.num_windows(records.len()));
        let mut start   = 0usize;

        while start + self.n_steps <= records.len() {
            let rows = &records[start..start + self.n_steps];

            let steps: Vec<f32> = rows
                .iter()
                .flat_map(|r| r.features.iter().copied())
                .collect();
            let label = usize::from(rows.iter().any(|r| r.label != 0));

            samples.push(FlowSample::new(steps, label));
            start += self.n_steps;
        }

        samples
    }

    /// How many full windows `record_count` rows produce
    pub fn num_windows(&self, record_count: usize) -> usize {
        record_count / self.n_steps
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn records(labels: &[usize]) -> Vec<FlowRecord> {
        labels
            .iter()
            .enumerate()
            .map(|(i, &label)| FlowRecord { features: vec![i as f32, 0.5], label })
            .collect()
    }

    #[test]
    fn test_non_overlapping_windows_drop_partial_tail() {
        let w       = Windower::new(3).unwrap();
        let samples = w.window(&records(&[0, 0, 0, 0, 1, 0, 0]));

        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].steps, vec![0.0, 0.5, 1.0, 0.5, 2.0, 0.5]);
        assert_eq!(samples[0].label, 0);
        // r4 is malicious → whole window is malicious
        assert_eq!(samples[1].label, 1);
    }

    #[test]
    fn test_window_count_matches_full_groups() {
        let w = Windower::new(2).unwrap();
        assert_eq!(w.window(&records(&[0, 0, 0, 0, 0])).len(), 2);
        assert_eq!(w.num_windows(5), 2);
    }

    #[test]
    fn test_too_few_records_gives_no_windows() {
        let w = Windower::new(22).unwrap();
        assert!(w.window(&records(&[0; 21])).is_empty());
        assert_eq!(w.num_windows(0), 0);
    }

    #[test]
    fn test_zero_steps_is_rejected() {
        assert_eq!(Windower::new(0).err(), Some(FlowError::ZeroDimension("n_steps")));
    }
}
