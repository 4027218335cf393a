//! Model artifact persistence on top of `object_store`.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use bytes::Bytes;
use object_store::ObjectStore;
use object_store::local::LocalFileSystem;
use object_store::path::Path as ObjectStorePath;
use tracing::debug;

use crate::ModelError;

/// Fetch-by-id storage for serialized classifier blobs.
pub struct ArtifactStore {
    store: Arc<dyn ObjectStore>,
}

impl ArtifactStore {
    /// Creates a store rooted at the given base directory, creating the
    /// directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or used.
    pub fn new(base_path: &Path) -> Result<Self> {
        std::fs::create_dir_all(base_path)
            .with_context(|| format!("Failed to create artifact directory {}", base_path.display()))?;

        let store =
            LocalFileSystem::new_with_prefix(base_path).context("Failed to create artifact store")?;

        Ok(Self {
            store: Arc::new(store),
        })
    }

    /// Fetches an artifact's bytes by id.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::ArtifactMissing`] if no artifact exists under
    /// the id, or [`ModelError::Store`] for any other store failure.
    pub async fn fetch(&self, artifact_id: &str) -> Result<Bytes, ModelError> {
        let path = ObjectStorePath::from(artifact_id);

        debug!(artifact_id, "Fetching model artifact");

        match self.store.get(&path).await {
            Ok(result) => result
                .bytes()
                .await
                .map_err(|e| ModelError::Store(e.to_string())),
            Err(object_store::Error::NotFound { .. }) => {
                Err(ModelError::ArtifactMissing(artifact_id.to_string()))
            }
            Err(e) => Err(ModelError::Store(e.to_string())),
        }
    }

    /// Stores an artifact's bytes under an id, replacing any previous
    /// version.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Store`] if the write fails.
    pub async fn put(&self, artifact_id: &str, bytes: Bytes) -> Result<(), ModelError> {
        let path = ObjectStorePath::from(artifact_id);

        debug!(artifact_id, bytes = bytes.len(), "Storing model artifact");

        self.store
            .put(&path, bytes.into())
            .await
            .map_err(|e| ModelError::Store(e.to_string()))?;

        Ok(())
    }
}
