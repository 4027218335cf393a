//! The ordered feature-name registry shared by training and inference.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Name of the label column, which must never appear in the registry.
pub const LABEL_COLUMN: &str = "Severity";

/// Errors raised while loading or validating the feature schema.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read feature schema: {0}")]
    Csv(#[from] csv::Error),

    #[error("feature schema is empty")]
    Empty,

    #[error("feature schema must not contain the label column '{LABEL_COLUMN}'")]
    ContainsLabel,
}

/// The ordered list of model input feature names.
///
/// Loaded once per session and read-only afterwards. The column order here
/// dictates the order of every feature vector handed to the classifier.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    features: Vec<String>,
}

/// A row of the feature schema CSV.
#[derive(Debug, Deserialize)]
struct FeatureRow {
    #[serde(rename = "Feature")]
    feature: String,
}

impl SchemaRegistry {
    /// Loads the registry from a CSV file with a `Feature` column.
    ///
    /// A leading unnamed index column, as written by common dataframe
    /// tooling, is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, holds no features, or
    /// still contains the label column.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let mut reader = csv::Reader::from_path(path)?;

        let mut features = Vec::new();
        for row in reader.deserialize::<FeatureRow>() {
            features.push(row?.feature);
        }

        Self::from_features(features)
    }

    /// Builds a registry from an in-memory feature list, applying the same
    /// validation as [`SchemaRegistry::load`].
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty or contains the label column.
    pub fn from_features(features: Vec<String>) -> Result<Self, RegistryError> {
        if features.is_empty() {
            return Err(RegistryError::Empty);
        }

        if features.iter().any(|name| name == LABEL_COLUMN) {
            return Err(RegistryError::ContainsLabel);
        }

        Ok(Self { features })
    }

    /// Returns the feature names in model input order.
    #[must_use]
    pub fn features(&self) -> &[String] {
        &self.features
    }

    /// Returns the number of features.
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Returns true if the registry holds no features.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    fn write_schema(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_preserves_order() {
        let file = write_schema("Feature\nStart_Hour\nStart_Lat\nTemperature(F)\n");
        let registry = SchemaRegistry::load(file.path()).unwrap();
        assert_eq!(
            registry.features(),
            ["Start_Hour", "Start_Lat", "Temperature(F)"]
        );
    }

    #[test]
    fn test_load_ignores_index_column() {
        let file = write_schema(",Feature\n0,Start_Hour\n1,Traffic_Signal\n");
        let registry = SchemaRegistry::load(file.path()).unwrap();
        assert_eq!(registry.features(), ["Start_Hour", "Traffic_Signal"]);
    }

    #[test]
    fn test_empty_schema_is_rejected() {
        let file = write_schema("Feature\n");
        assert!(matches!(
            SchemaRegistry::load(file.path()),
            Err(RegistryError::Empty)
        ));
    }

    #[test]
    fn test_label_column_is_rejected() {
        let file = write_schema("Feature\nStart_Hour\nSeverity\n");
        assert!(matches!(
            SchemaRegistry::load(file.path()),
            Err(RegistryError::ContainsLabel)
        ));
    }
}
