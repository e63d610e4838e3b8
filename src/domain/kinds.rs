// ============================================================
// Layer 3 — Model and Dataset Kinds
// ============================================================
// Closed set of architectures and datasets the trainer knows.
// Both parse case-insensitively from the CLI strings, and any
// unknown name is rejected before a model or dataset is touched.
//
// Adding a variant forces every `match` on it to be revisited,
// which is the whole point of using enums instead of strings.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::domain::error::FlowError;

// ─── ModelKind ────────────────────────────────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelKind {
    /// GRU trunk followed by additive attention pooling over all steps
    FlowAtt,
    /// GRU trunk, classifies from the last step's hidden state
    Flow,
}

impl ModelKind {
    pub fn uses_attention(self) -> bool {
        matches!(self, ModelKind::FlowAtt)
    }
}

impl FromStr for ModelKind {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "flowattmodel" => Ok(ModelKind::FlowAtt),
            "flowmodel"    => Ok(ModelKind::Flow),
            _              => Err(FlowError::InvalidModelType(s.to_string())),
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelKind::FlowAtt => write!(f, "FlowAttModel"),
            ModelKind::Flow    => write!(f, "FlowModel"),
        }
    }
}

// ─── DatasetKind ──────────────────────────────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatasetKind {
    /// ISCX / CIC-IDS flow exports (CICFlowMeter CSV columns)
    Iscx,
    /// ISOT botnet flow exports
    Isot,
}

impl DatasetKind {
    /// Sub-directory of `data_dir` holding this dataset's CSV files
    pub fn dir_name(self) -> &'static str {
        match self {
            DatasetKind::Iscx => "iscx",
            DatasetKind::Isot => "isot",
        }
    }

    /// Name of the label column, compared case-insensitively
    pub fn label_column(self) -> &'static str {
        "label"
    }

    /// Label values (lowercase) that mean benign traffic
    pub fn benign_labels(self) -> &'static [&'static str] {
        match self {
            DatasetKind::Iscx => &["benign"],
            DatasetKind::Isot => &["normal", "benign", "0"],
        }
    }

    /// Identifier columns (lowercase) that are not features
    pub fn ignored_columns(self) -> &'static [&'static str] {
        match self {
            DatasetKind::Iscx => &[
                "flow id", "source ip", "src ip", "source port", "src port",
                "destination ip", "dst ip", "timestamp",
            ],
            DatasetKind::Isot => &[
                "flow_id", "src_ip", "dst_ip", "src_port", "timestamp",
                "start_time", "end_time",
            ],
        }
    }

    /// Map a raw label string to a class index: 0 benign, 1 malicious
    pub fn class_of(self, raw_label: &str) -> usize {
        let label = raw_label.trim().to_lowercase();
        if self.benign_labels().contains(&label.as_str()) { 0 } else { 1 }
    }
}

impl FromStr for DatasetKind {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "iscx" => Ok(DatasetKind::Iscx),
            "isot" => Ok(DatasetKind::Isot),
            _      => Err(FlowError::InvalidDataset(s.to_string())),
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}
