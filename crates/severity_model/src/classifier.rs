//! The severity classifier capability.

use serde::{Deserialize, Serialize};
use severity_structs::Severity;
use smartcore::ensemble::random_forest_classifier::RandomForestClassifier;
use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::{ArtifactStore, ModelError};

type Forest = RandomForestClassifier<f64, u32, DenseMatrix<f64>, Vec<u32>>;

/// A fitted severity classifier.
///
/// Loaded once per process and shared read-only across attempts. Callers
/// guarantee the input vector's shape and order via the schema registry;
/// the classifier exposes nothing beyond `predict`.
#[derive(Serialize, Deserialize)]
pub struct SeverityClassifier {
    forest: Forest,
}

impl SeverityClassifier {
    pub(crate) const fn new(forest: Forest) -> Self {
        Self { forest }
    }

    /// Fetches and decodes the classifier from the artifact store.
    ///
    /// # Errors
    ///
    /// Returns an error if the artifact is missing or corrupt.
    pub async fn load(store: &ArtifactStore, artifact_id: &str) -> Result<Self, ModelError> {
        let bytes = store.fetch(artifact_id).await?;
        Self::from_bytes(artifact_id, &bytes)
    }

    /// Decodes a classifier from its serialized artifact bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::ArtifactCorrupt`] if decoding fails.
    pub fn from_bytes(artifact_id: &str, bytes: &[u8]) -> Result<Self, ModelError> {
        bincode::deserialize(bytes).map_err(|e| ModelError::ArtifactCorrupt {
            artifact_id: artifact_id.to_string(),
            reason: e.to_string(),
        })
    }

    /// Serializes the classifier into artifact bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ModelError> {
        bincode::serialize(self).map_err(|e| ModelError::Store(e.to_string()))
    }

    /// Predicts the severity class for one assembled feature vector.
    ///
    /// # Errors
    ///
    /// Returns an error if inference fails or the model emits a class
    /// outside 1..=4.
    pub fn predict(&self, features: &[f64]) -> Result<Severity, ModelError> {
        let input = DenseMatrix::from_2d_vec(&vec![features.to_vec()])
            .map_err(|e| ModelError::Predict(e.to_string()))?;

        let classes = self
            .forest
            .predict(&input)
            .map_err(|e| ModelError::Predict(e.to_string()))?;

        let class = classes
            .first()
            .copied()
            .ok_or_else(|| ModelError::Predict("classifier returned no prediction".to_string()))?;

        Severity::from_class(class).ok_or(ModelError::UnmappedClass(class))
    }
}
