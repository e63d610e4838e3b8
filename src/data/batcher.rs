// ============================================================
// Layer 4 — Flow Batcher
// ============================================================
// Stacks a slice of FlowSamples into tensors for one forward pass.
//
//   Input:  N samples, each a flattened [n_steps × n_features] Vec
//   Output: features [N, n_steps, n_features]  (Float)
//           labels   [N]                       (Int)
//
// All samples have the same length by construction (the windower
// emits fixed-size windows), so batching is a flatten + reshape.

use burn::{prelude::*, tensor::TensorData};

use crate::domain::flow::FlowSample;

#[derive(Debug, Clone)]
pub struct FlowBatch<B: Backend> {
    /// [batch_size, n_steps, n_features]
    pub features: Tensor<B, 3>,

    /// [batch_size] class indices
    pub labels: Tensor<B, 1, Int>,
}

#[derive(Clone, Debug)]
pub struct FlowBatcher<B: Backend> {
    pub device:     B::Device,
    pub n_steps:    usize,
    pub n_features: usize,
}

impl<B: Backend> FlowBatcher<B> {
    pub fn new(device: B::Device, n_steps: usize, n_features: usize) -> Self {
        Self { device, n_steps, n_features }
    }

    pub fn batch(&self, items: &[FlowSample]) -> FlowBatch<B> {
        let batch_size = items.len();

        let flat: Vec<f32> = items
            .iter()
            .flat_map(|s| s.steps.iter().copied())
            .collect();
        let labels: Vec<i64> = items.iter().map(|s| s.label as i64).collect();

        let features = Tensor::<B, 3>::from_data(
            TensorData::new(flat, [batch_size, self.n_steps, self.n_features]),
            &self.device,
        );
        let labels = Tensor::<B, 1, Int>::from_data(
            TensorData::new(labels, [batch_size]),
            &self.device,
        );

        FlowBatch { features, labels }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    #[test]
    fn test_batch_shapes() {
        let device  = Default::default();
        let batcher = FlowBatcher::<NdArray>::new(device, 2, 3);
        let items   = vec![
            FlowSample::new(vec![0.0; 6], 0),
            FlowSample::new(vec![1.0; 6], 1),
        ];

        let batch = batcher.batch(&items);
        assert_eq!(batch.features.dims(), [2, 2, 3]);
        assert_eq!(batch.labels.dims(), [2]);

        let labels: Vec<i64> = batch.labels.into_data().iter::<i64>().collect();
        assert_eq!(labels, vec![0, 1]);
    }
}
