// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates one training run, strictly in this order:
//
//   Step 1: Log hyperparameters
//   Step 2: Pick the model architecture    (fails fast on bad name)
//   Step 3: Load the dataset               (fails fast on bad name)
//   Step 4: Build the model weights
//   Step 5: Train, reporting every s_report_interval iterations
//   Step 6: Print the best result and its checkpoint location
//   Step 7: Upload the best checkpoint
//
// Any error ends the run where it happens. Nothing is retried and
// nothing already written (checkpoints, metric rows) is removed.

use anyhow::Result;
use burn::backend::ndarray::NdArrayDevice;
use serde::{Deserialize, Serialize};

use crate::data::load_dataset;
use crate::domain::{
    best::BestEval,
    error::FlowError,
    flow::FlowSplit,
    kinds::{DatasetKind, ModelKind},
    traits::{BlobUploader, SummarySink, TrafficClassifier},
};
use crate::infra::{
    checkpoint::{checkpoint_path, CheckpointManager},
    metrics::SummaryWriter,
    uploader::{ObjectStoreUploader, StorageConfig},
};
use crate::ml::{reporter::Reporter, trainer::FlowClassifier};

// ─── Training Configuration ──────────────────────────────────────────────────
// All hyperparameters for a training run. Read-only once built.
// Storage credentials are kept out of it (see StorageConfig) so
// the config can be logged and written to disk as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    pub dataset:           String,
    pub model_name:        String,
    pub model_type:        String,
    pub s_batch:           usize,
    pub v_regularization:  f64,
    pub n_features:        usize,
    pub n_steps:           usize,
    pub h_gru:             usize,
    pub h_att:             usize,
    pub o_gru:             usize,
    pub h_dense:           usize,
    pub o_dense:           usize,
    pub h_dense2:          usize,
    pub o_dense2:          usize,
    pub n_classes:         usize,
    pub n_epochs:          usize,
    pub s_test:            usize,
    pub s_report_interval: usize,
    pub graphs_train_dir:  String,
    pub graphs_test_dir:   String,
    pub checkpoints_dir:   String,
    pub data_dir:          String,
    pub learning_rate:     f64,
    pub seed:              u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            dataset:           "blank".to_string(),
            model_name:        "default.model".to_string(),
            model_type:        "FlowAttModel".to_string(),
            s_batch:           128,
            v_regularization:  0.1,
            n_features:        77,
            n_steps:           22,
            h_gru:             64,
            h_att:             16,
            o_gru:             64,
            h_dense:           64,
            o_dense:           32,
            h_dense2:          32,
            o_dense2:          16,
            n_classes:         2,
            n_epochs:          10,
            s_test:            4096,
            s_report_interval: 2000,
            graphs_train_dir:  "graphs/train/".to_string(),
            graphs_test_dir:   "graphs/test/".to_string(),
            checkpoints_dir:   "checkpoints/".to_string(),
            data_dir:          "data".to_string(),
            learning_rate:     1e-3,
            seed:              1,
        }
    }
}

impl TrainConfig {
    /// `{model_name}:   key: value; key: value; ...` for the debug log
    pub fn describe(&self) -> String {
        let mut desc = format!("{}:   ", self.model_name);
        if let Ok(serde_json::Value::Object(map)) = serde_json::to_value(self) {
            for (key, value) in map {
                let value = match value {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                };
                desc.push_str(&format!("{key}: {value}; "));
            }
        }
        desc
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config:  TrainConfig,
    storage: StorageConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig, storage: StorageConfig) -> Self {
        Self { config, storage }
    }

    /// Execute the full run and return the best evaluation that was uploaded.
    pub fn execute(&self) -> Result<BestEval> {
        let cfg = &self.config;

        // ── Step 1: Log hyperparameters ───────────────────────────────────────
        tracing::debug!("Parameters {}", cfg.describe());

        // ── Step 2: Model architecture ────────────────────────────────────────
        let model_kind: ModelKind = cfg.model_type.parse()?;
        let mut model = FlowClassifier::new(model_kind, cfg.clone(), NdArrayDevice::default());

        // ── Step 3: Dataset ───────────────────────────────────────────────────
        let dataset_kind: DatasetKind = cfg.dataset.parse()?;
        let (train, test) = load_dataset(
            dataset_kind,
            &cfg.data_dir,
            cfg.s_test,
            cfg.n_steps,
            cfg.n_features,
            cfg.seed,
        )?;

        // ── Step 4: Build ─────────────────────────────────────────────────────
        model.initialize()?;
        CheckpointManager::new(cfg.checkpoints_dir.clone(), cfg.model_name.clone()).save_config(cfg)?;

        // ── Steps 5–7 ─────────────────────────────────────────────────────────
        let train_writer = SummaryWriter::new(&cfg.graphs_train_dir, &cfg.model_name)?;
        let test_writer  = SummaryWriter::new(&cfg.graphs_test_dir, &cfg.model_name)?;
        let uploader     = ObjectStoreUploader::new(self.storage.clone());

        train_and_upload(
            cfg,
            &mut model,
            &train,
            &test,
            (train_writer, test_writer),
            &uploader,
            &self.storage.container,
        )
    }
}

/// Train `model`, report the best result, then upload its checkpoint.
/// Upload is only reached if training returns successfully.
pub fn train_and_upload<S: SummarySink>(
    cfg:       &TrainConfig,
    model:     &mut dyn TrafficClassifier,
    train:     &FlowSplit,
    test:      &FlowSplit,
    writers:   (S, S),
    uploader:  &dyn BlobUploader,
    container: &str,
) -> Result<BestEval> {
    let (train_writer, test_writer) = writers;
    let mut reporter = Reporter::new(train, test, cfg.s_test, train_writer, test_writer);

    // ── Step 5: Train ─────────────────────────────────────────────────────────
    model.train(train, &mut reporter)?;

    // ── Step 6: Report the best result ────────────────────────────────────────
    println!("{}: training complete.", model.name());
    let best = *reporter
        .best()
        .ok_or_else(|| FlowError::NoBestCheckpoint(model.name().to_string()))?;
    println!(
        "Best test accuracy: {:.6}, test TPR: {}, test FPR: {}",
        best.accuracy, best.tpr, best.fpr
    );

    let location = checkpoint_path(&cfg.checkpoints_dir, &cfg.model_name, best.iteration);
    println!("Location of best save: {}", location.display());

    // ── Step 7: Upload ────────────────────────────────────────────────────────
    uploader.upload_file(container, &cfg.model_name, &location)?;
    Ok(best)
}
