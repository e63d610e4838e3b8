// ============================================================
// Layer 2 — Upload Use Case
// ============================================================
// Pushes an already-saved checkpoint to blob storage without
// retraining. The blob is named after the model, so a re-upload
// overwrites whatever the last training run published.

use anyhow::Result;
use std::path::PathBuf;

use crate::domain::traits::BlobUploader;
use crate::infra::{
    checkpoint::checkpoint_path,
    uploader::{ObjectStoreUploader, StorageConfig},
};

pub struct UploadUseCase {
    checkpoints_dir: String,
    model_name:      String,
    iteration:       usize,
    storage:         StorageConfig,
}

impl UploadUseCase {
    pub fn new(checkpoints_dir: String, model_name: String, iteration: usize, storage: StorageConfig) -> Self {
        Self { checkpoints_dir, model_name, iteration, storage }
    }

    pub fn execute(&self) -> Result<PathBuf> {
        let uploader = ObjectStoreUploader::new(self.storage.clone());
        self.upload_with(&uploader)
    }

    fn upload_with(&self, uploader: &dyn BlobUploader) -> Result<PathBuf> {
        let path = checkpoint_path(&self.checkpoints_dir, &self.model_name, self.iteration);
        uploader.upload_file(&self.storage.container, &self.model_name, &path)?;
        Ok(path)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::uploader::StorageBackend;

    fn local_storage(root: &std::path::Path) -> StorageConfig {
        StorageConfig {
            backend: StorageBackend::Local,
            root:    root.display().to_string(),
            ..StorageConfig::default()
        }
    }

    #[test]
    fn test_uploads_checkpoint_under_model_name() {
        let dir  = tempfile::tempdir().unwrap();
        let ckpt = format!("{}/checkpoints/", dir.path().display());
        std::fs::create_dir_all(&ckpt).unwrap();
        std::fs::write(format!("{ckpt}flow.model-6000"), b"weights").unwrap();

        let blobs = dir.path().join("blobs");
        let path  = UploadUseCase::new(ckpt.clone(), "flow.model".to_string(), 6000, local_storage(&blobs))
            .execute()
            .unwrap();

        assert_eq!(path, PathBuf::from(format!("{ckpt}flow.model-6000")));
        let uploaded = std::fs::read(blobs.join("models").join("flow.model")).unwrap();
        assert_eq!(uploaded, b"weights");
    }

    #[test]
    fn test_missing_checkpoint_fails() {
        let dir   = tempfile::tempdir().unwrap();
        let ckpt  = format!("{}/checkpoints/", dir.path().display());
        let blobs = dir.path().join("blobs");

        let result = UploadUseCase::new(ckpt, "flow.model".to_string(), 2000, local_storage(&blobs)).execute();
        assert!(result.is_err());
    }
}
