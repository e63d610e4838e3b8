use burn::data::dataset::Dataset;

use crate::domain::flow::FlowSample;

/// Borrowed view over flow samples for burn's Dataset API.
/// The trainer indexes it with a shuffled order to draw batches.
pub struct FlowDataset<'a> {
    samples: &'a [FlowSample],
}

impl<'a> FlowDataset<'a> {
    pub fn new(samples: &'a [FlowSample]) -> Self { Self { samples } }

    /// Collect the samples at `indices`, skipping out-of-range ones
    pub fn gather(&self, indices: &[usize]) -> Vec<FlowSample> {
        indices.iter().filter_map(|&i| self.get(i)).collect()
    }
}

impl Dataset<FlowSample> for FlowDataset<'_> {
    fn get(&self, index: usize) -> Option<FlowSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}
