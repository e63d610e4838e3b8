// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Saves and restores FlowNet weights.
//
// File naming convention:
//   {checkpoints_dir}{model_name}-{iteration}
//
// The directory and the model name are concatenated as strings,
// with no separator inserted. `checkpoints/` + `default.model`
// gives `checkpoints/default.model-2000`, while `checkpoints` +
// `default.model` gives `checkpointsdefault.model-2000` in the
// current directory. A warning is logged for the second form.
//
// Weights are serialised with burn's NamedMpkBytesRecorder
// (MessagePack, full precision) and written to exactly that path.
// The file recorders are not used because they replace the path's
// extension, which would collapse `default.model-2000` and
// `default.model-4000` into the same `default.mpk` file.
//
// The training config is stored next to the checkpoints as
//   {checkpoints_dir}{model_name}.config.json

use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};
use burn::{
    prelude::*,
    record::{FullPrecisionSettings, NamedMpkBytesRecorder, Recorder},
};

use crate::application::train_use_case::TrainConfig;
use crate::ml::model::FlowNet;

type CheckpointRecorder = NamedMpkBytesRecorder<FullPrecisionSettings>;

/// `{dir}{model_name}-{iteration}`, by plain concatenation.
pub fn checkpoint_path(dir: &str, model_name: &str, iteration: usize) -> PathBuf {
    PathBuf::from(format!("{dir}{model_name}-{iteration}"))
}

pub struct CheckpointManager {
    dir:        String,
    model_name: String,
}

impl CheckpointManager {
    pub fn new(dir: impl Into<String>, model_name: impl Into<String>) -> Self {
        let dir = dir.into();
        if !dir.is_empty() && !dir.ends_with('/') && !dir.ends_with(std::path::MAIN_SEPARATOR) {
            tracing::warn!(
                "checkpoints_dir '{}' has no trailing separator; checkpoints will be named '{}<model>-<iteration>'",
                dir,
                dir
            );
        }
        Self { dir, model_name: model_name.into() }
    }

    pub fn checkpoint_path(&self, iteration: usize) -> PathBuf {
        checkpoint_path(&self.dir, &self.model_name, iteration)
    }

    pub fn config_path(&self) -> PathBuf {
        PathBuf::from(format!("{}{}.config.json", self.dir, self.model_name))
    }

    /// Write the model's weights as the checkpoint for `iteration`.
    pub fn save_model<B: Backend>(&self, model: &FlowNet<B>, iteration: usize) -> Result<PathBuf> {
        let path = self.checkpoint_path(iteration);
        ensure_parent(&path)?;

        let recorder = CheckpointRecorder::default();
        let bytes = <CheckpointRecorder as Recorder<B>>::record(&recorder, model.clone().into_record(), ())
            .with_context(|| format!("Failed to serialise checkpoint '{}'", path.display()))?;

        fs::write(&path, bytes)
            .with_context(|| format!("Failed to save checkpoint to '{}'", path.display()))?;

        tracing::debug!("Saved checkpoint: iteration {} → '{}'", iteration, path.display());
        Ok(path)
    }

    /// Load the checkpoint for `iteration` into `model`.
    /// The model must have the same architecture as the saved one.
    pub fn load_model<B: Backend>(
        &self,
        model:     FlowNet<B>,
        iteration: usize,
        device:    &B::Device,
    ) -> Result<FlowNet<B>> {
        let path  = self.checkpoint_path(iteration);
        let bytes = fs::read(&path).with_context(|| {
            format!("Cannot read checkpoint '{}'. Was this iteration saved?", path.display())
        })?;

        let recorder = CheckpointRecorder::default();
        let record = <CheckpointRecorder as Recorder<B>>::load(&recorder, bytes, device)
            .with_context(|| {
                format!("Checkpoint '{}' does not match the model architecture", path.display())
            })?;

        tracing::info!("Loaded checkpoint from '{}'", path.display());
        Ok(model.load_record(record))
    }

    pub fn save_config(&self, cfg: &TrainConfig) -> Result<PathBuf> {
        let path = self.config_path();
        ensure_parent(&path)?;

        let json = serde_json::to_string_pretty(cfg)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;

        tracing::debug!("Saved training config to '{}'", path.display());
        Ok(path)
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
            .with_context(|| format!("Cannot create directory '{}'", parent.display())),
        _ => Ok(()),
    }
}
