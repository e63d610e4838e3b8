// ============================================================
// Layer 6 — Blob Uploader
// ============================================================
// Pushes a finished checkpoint to object storage.
//
//   azure → Azure Blob Storage, account name + access key
//   local → a directory tree: {root}/{container}/{blob_name}
//
// The store is built at upload time, so missing credentials only
// surface once training has finished and the checkpoint is
// already on local disk.
//
// object_store is async; the upload runs on a current-thread
// tokio runtime created for the call.

use anyhow::{Context, Result};
use object_store::{
    azure::MicrosoftAzureBuilder, local::LocalFileSystem, path::Path as ObjectPath, ObjectStore,
    PutPayload,
};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, str::FromStr, sync::Arc};

use crate::domain::{error::FlowError, traits::BlobUploader};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageBackend {
    Azure,
    Local,
}

impl FromStr for StorageBackend {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "azure" | "blob" => Ok(StorageBackend::Azure),
            "local" | "file" => Ok(StorageBackend::Local),
            _ => Err(FlowError::InvalidStorageBackend(s.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend:    StorageBackend,
    pub account:    Option<String>,
    pub access_key: Option<String>,
    /// Root directory for the local backend
    pub root:       String,
    pub container:  String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend:    StorageBackend::Azure,
            account:    None,
            access_key: None,
            root:       "blobs".to_string(),
            container:  "models".to_string(),
        }
    }
}

pub struct ObjectStoreUploader {
    config: StorageConfig,
}

impl ObjectStoreUploader {
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    fn build_store(&self, container: &str) -> Result<Arc<dyn ObjectStore>> {
        match self.config.backend {
            StorageBackend::Azure => {
                let account = self.config.account.as_deref()
                    .context("Storage account required (--storage_account or AZURE_STORAGE_ACCOUNT)")?;
                let key = self.config.access_key.as_deref()
                    .context("Storage key required (--storage_key or AZURE_STORAGE_KEY)")?;

                let store = MicrosoftAzureBuilder::new()
                    .with_account(account)
                    .with_access_key(key)
                    .with_container_name(container)
                    .build()
                    .context("Failed to build Azure blob store")?;
                Ok(Arc::new(store))
            }
            StorageBackend::Local => {
                let root = Path::new(&self.config.root).join(container);
                fs::create_dir_all(&root)
                    .with_context(|| format!("Cannot create '{}'", root.display()))?;
                let store = LocalFileSystem::new_with_prefix(&root)
                    .with_context(|| format!("Cannot open local store at '{}'", root.display()))?;
                Ok(Arc::new(store))
            }
        }
    }
}

impl BlobUploader for ObjectStoreUploader {
    fn upload_file(&self, container: &str, blob_name: &str, local_path: &Path) -> Result<()> {
        let bytes = fs::read(local_path)
            .with_context(|| format!("Cannot read '{}' for upload", local_path.display()))?;
        let size  = bytes.len();
        let store = self.build_store(container)?;
        let location = ObjectPath::from(blob_name);

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to start upload runtime")?;
        runtime
            .block_on(store.put(&location, PutPayload::from(bytes)))
            .with_context(|| format!("Failed to upload '{}' to {}/{}", local_path.display(), container, blob_name))?;

        tracing::info!(
            "Uploaded '{}' ({} bytes) to {:?} container '{}' as '{}'",
            local_path.display(),
            size,
            self.config.backend,
            container,
            blob_name
        );
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_parsing() {
        assert_eq!("Azure".parse::<StorageBackend>(), Ok(StorageBackend::Azure));
        assert_eq!("local".parse::<StorageBackend>(), Ok(StorageBackend::Local));
        assert!("s3".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn test_local_upload_writes_blob() {
        let dir  = tempfile::tempdir().unwrap();
        let src  = dir.path().join("default.model-4000");
        fs::write(&src, b"weights").unwrap();

        let uploader = ObjectStoreUploader::new(StorageConfig {
            backend: StorageBackend::Local,
            root:    dir.path().join("blobs").display().to_string(),
            ..StorageConfig::default()
        });
        uploader.upload_file("models", "default.model", &src).unwrap();

        let uploaded = fs::read(dir.path().join("blobs/models/default.model")).unwrap();
        assert_eq!(uploaded, b"weights");
    }

    #[test]
    fn test_missing_local_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let uploader = ObjectStoreUploader::new(StorageConfig {
            backend: StorageBackend::Local,
            root:    dir.path().display().to_string(),
            ..StorageConfig::default()
        });
        assert!(uploader
            .upload_file("models", "m", &dir.path().join("missing"))
            .is_err());
    }

    #[test]
    fn test_azure_without_credentials_fails() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("ckpt");
        fs::write(&src, b"w").unwrap();

        let uploader = ObjectStoreUploader::new(StorageConfig::default());
        let err = uploader.upload_file("models", "m", &src).unwrap_err();
        assert!(err.to_string().contains("Storage account required"));
    }
}
