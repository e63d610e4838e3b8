// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates all the other layers to accomplish
// a specific goal (training, re-scoring or publishing a model).
//
// Rules for this layer:
//   - No ML math or model code here
//   - No direct CSV or blob access (that's Layer 4 and 6)
//   - Only workflow coordination
//
// The training run prints its final summary itself, so the
// summary lines appear before the upload starts.

// Train → report → checkpoint → upload
pub mod train_use_case;

// Restore a checkpoint and score the test split
pub mod evaluate_use_case;

// Upload an existing checkpoint
pub mod upload_use_case;
