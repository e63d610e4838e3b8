// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The seams between the orchestration and its collaborators.
// The application layer only talks to these traits, so the
// burn classifier, the CSV metric streams and the object store
// uploader can each be replaced by a fake in tests.
//
//   TrafficClassifier ← ml::trainer::FlowClassifier
//   ReportHook        ← ml::reporter::Reporter
//   SummarySink       ← infra::metrics::SummaryWriter
//   BlobUploader      ← infra::uploader::ObjectStoreUploader

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::domain::flow::{EvalPrefix, Evaluation, FlowSample, FlowSplit};

// ─── TrafficClassifier ────────────────────────────────────────────────────────
/// A trainable flow classifier.
pub trait TrafficClassifier {
    /// Model name used in logs, checkpoint names and the blob key
    fn name(&self) -> &str;

    /// Create the trainable parameters. Must be called before anything else.
    fn initialize(&mut self) -> Result<()>;

    /// Run the full training loop, calling `hook.report` every
    /// report interval with the current iteration.
    fn train(&mut self, train: &FlowSplit, hook: &mut dyn ReportHook) -> Result<()>;

    /// Evaluate the current parameters on `samples`.
    fn evaluate(&self, samples: &[FlowSample], prefix: EvalPrefix) -> Result<Evaluation>;

    /// Persist the current parameters as the checkpoint for `iteration`.
    /// Returns the path written.
    fn save(&self, iteration: usize) -> Result<PathBuf>;
}

// ─── ReportHook ───────────────────────────────────────────────────────────────
/// Called synchronously from inside the training loop.
pub trait ReportHook {
    fn report(&mut self, model: &dyn TrafficClassifier, iteration: usize) -> Result<()>;
}

// ─── SummarySink ──────────────────────────────────────────────────────────────
/// A metric stream (one for train, one for test).
pub trait SummarySink {
    fn add_summary(&mut self, summary: &Evaluation, iteration: usize) -> Result<()>;
}

// ─── BlobUploader ─────────────────────────────────────────────────────────────
/// Remote object storage for finished checkpoints.
pub trait BlobUploader {
    fn upload_file(&self, container: &str, blob_name: &str, local_path: &Path) -> Result<()>;
}
