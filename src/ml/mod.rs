// ============================================================
// Layer 5 — ML Layer (Burn)
// ============================================================
// All burn-specific code lives here and in data::batcher.
//
//   model.rs    — FlowNet: GRU trunk, optional additive attention
//                 pooling, two dense blocks, class logits
//
//   trainer.rs  — FlowClassifier: initialize / train / evaluate /
//                 save over Autodiff<NdArray>
//
//   metrics.rs  — confusion counts → accuracy, TPR, FPR
//
//   reporter.rs — the periodic report callback and best-checkpoint
//                 decision

/// FlowModel / FlowAttModel network definitions
pub mod model;

/// Training loop, evaluation and checkpointing
pub mod trainer;

/// Accuracy / TPR / FPR
pub mod metrics;

/// Report callback
pub mod reporter;
