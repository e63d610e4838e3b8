// ============================================================
// Layer 3 — Domain Errors
// ============================================================
// Typed errors for the conditions callers may want to match on.
// Everything else travels as anyhow::Error with context attached.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum FlowError {
    /// `model_type` is not one of the known architectures
    #[error("Invalid model type: '{0}' (expected FlowAttModel or FlowModel)")]
    InvalidModelType(String),

    /// `dataset` is not one of the known datasets
    #[error("Invalid dataset: '{0}' (expected iscx or isot)")]
    InvalidDataset(String),

    #[error("Invalid storage backend: '{0}' (expected azure or local)")]
    InvalidStorageBackend(String),

    /// train/evaluate/save called before initialize()
    #[error("Model '{0}' has not been initialized")]
    NotInitialized(String),

    /// n_steps or n_features was zero
    #[error("'{0}' must be greater than zero")]
    ZeroDimension(&'static str),

    #[error("Not enough flow windows: have {available}, need more than {required}")]
    InsufficientData { available: usize, required: usize },

    /// Training ended without a single report, so nothing can be uploaded
    #[error("Model '{0}' produced no evaluated checkpoint; check s_report_interval against n_epochs")]
    NoBestCheckpoint(String),

    #[error("Cannot evaluate '{0}' on an empty sample set")]
    EmptyBatch(String),
}
