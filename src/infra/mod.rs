// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// File and network side effects used by the other layers:
//
//   checkpoint.rs — checkpoint naming, weight serialisation,
//                   training config JSON
//
//   metrics.rs    — train/test metric streams (CSV rows per report)
//
//   uploader.rs   — best-checkpoint upload to Azure blob storage
//                   or a local directory, via object_store

/// Model checkpoint saving and loading
pub mod checkpoint;

/// Train/test metric streams
pub mod metrics;

/// Blob storage upload
pub mod uploader;
