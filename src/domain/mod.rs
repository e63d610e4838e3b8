// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types and traits describing the training run:
// which model and dataset were asked for, what a flow sample
// is, what an evaluation reports, and how the best checkpoint
// is picked.
//
// Rules for this layer:
//   - NO burn types
//   - NO file or network I/O
//   - Only structs, enums and traits

/// Errors callers may want to match on
pub mod error;

/// ModelKind / DatasetKind closed dispatch
pub mod kinds;

/// FlowSample, FlowSplit, Evaluation
pub mod flow;

/// Greedy best-checkpoint selection
pub mod best;

/// Seams to the classifier, metric streams and blob storage
pub mod traits;
