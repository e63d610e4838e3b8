// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Turns a dataset's CSV exports into normalised train/test
// splits of flow windows.
//
//   {data_dir}/{iscx|isot}/*.csv
//       │
//       ▼
//   CsvFlowLoader     → one FlowRecord per CSV row
//       │
//       ▼
//   Windower          → n_steps consecutive rows per FlowSample
//       │
//       ▼
//   split_train_test  → seeded shuffle, last test_size windows = test
//       │
//       ▼
//   MinMaxScaler      → fitted on train, applied to train and test
//       │
//       ▼
//   FlowDataset / FlowBatcher → tensors for the training loop

use anyhow::Result;
use std::path::Path;

use crate::domain::{error::FlowError, flow::FlowSplit, kinds::DatasetKind};

/// Reads ISCX / ISOT CSV exports
pub mod loader;

/// Value cleaning and min-max normalisation
pub mod preprocessor;

/// Groups records into fixed-length sequences
pub mod windower;

/// Implements burn's Dataset trait over flow samples
pub mod dataset;

/// Stacks samples into tensor batches
pub mod batcher;

/// Seeded train/test split
pub mod splitter;

/// Load one dataset as (train, test), with `test_size` test windows
/// of `n_steps` steps each.
pub fn load_dataset(
    kind:       DatasetKind,
    data_dir:   impl AsRef<Path>,
    test_size:  usize,
    n_steps:    usize,
    n_features: usize,
    seed:       u64,
) -> Result<(FlowSplit, FlowSplit)> {
    if n_features == 0 {
        return Err(FlowError::ZeroDimension("n_features").into());
    }
    let windower = windower::Windower::new(n_steps)?;

    let records = loader::CsvFlowLoader::new(data_dir, kind, n_features).load_all()?;
    let windows = windower.window(&records);
    tracing::info!("Built {} windows of {} steps", windows.len(), n_steps);

    let (mut train, mut test) = splitter::split_train_test(windows, test_size, seed)?;

    let scaler = preprocessor::MinMaxScaler::fit(&train, n_features);
    scaler.transform(&mut train);
    scaler.transform(&mut test);

    let (train, test) = (FlowSplit::new(train), FlowSplit::new(test));
    tracing::info!(
        "Dataset '{}': {} train ({} malicious), {} test ({} malicious)",
        kind,
        train.len(),
        train.malicious_count(),
        test.len(),
        test.malicious_count(),
    );
    Ok((train, test))
}
