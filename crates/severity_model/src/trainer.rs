//! Offline trainer producing the classifier artifact.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use feature_assembler::SchemaRegistry;
use smartcore::ensemble::random_forest_classifier::RandomForestClassifier;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::model_selection::train_test_split;
use tracing::info;

use crate::{ArtifactStore, Dataset, Hyperparameters, SeverityClassifier};

/// Default fraction of the dataset used for training.
pub const DEFAULT_TRAIN_FRACTION: f32 = 0.8;

/// Options for a training run.
#[derive(Debug, Clone)]
pub struct TrainOptions {
    /// Fraction of samples used for fitting; the rest is held out for
    /// evaluation
    pub train_fraction: f32,

    /// Artifact id the fitted model is stored under
    pub artifact_id: String,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            train_fraction: DEFAULT_TRAIN_FRACTION,
            artifact_id: "severity_model.bin".to_string(),
        }
    }
}

/// Summary of a completed training run.
#[derive(Debug, Clone)]
pub struct TrainReport {
    /// Total samples in the dataset
    pub samples: usize,

    /// Encoded feature count (registry order)
    pub feature_count: usize,

    /// Accuracy on the held-out split
    pub test_accuracy: f64,

    /// Artifact id the model was stored under
    pub artifact_id: String,
}

/// Fits the severity classifier and persists it to the artifact store.
///
/// Loads the prepared dataset and hyperparameter table, one-hot encodes
/// categoricals, reorders the columns to the schema registry, fits a random
/// forest with the given hyperparameters, evaluates the held-out split, and
/// stores the serialized model.
///
/// # Errors
///
/// Returns an error if any input file is unusable, the dataset does not
/// cover the registry's columns, or fitting/persisting fails.
pub async fn train(
    dataset_path: &Path,
    params_path: &Path,
    registry: &SchemaRegistry,
    store: &ArtifactStore,
    options: &TrainOptions,
) -> Result<TrainReport> {
    let hyperparams = Hyperparameters::load(params_path)?;
    let dataset = Dataset::load(dataset_path)?;

    info!(
        samples = dataset.rows.len(),
        encoded_features = dataset.feature_names.len(),
        "Loaded training dataset"
    );

    let rows = dataset
        .reorder(registry)
        .context("dataset columns do not cover the feature schema")?;

    let x = DenseMatrix::from_2d_vec(&rows).map_err(|e| anyhow!("invalid feature matrix: {e}"))?;
    let y = dataset.labels.clone();

    let test_size = 1.0 - options.train_fraction;
    let (x_train, x_test, y_train, y_test) =
        train_test_split(&x, &y, test_size, true, Some(hyperparams.seed()));

    info!(
        train_samples = y_train.len(),
        test_samples = y_test.len(),
        seed = hyperparams.seed(),
        "Fitting random forest"
    );

    let forest = RandomForestClassifier::fit(&x_train, &y_train, hyperparams.forest_parameters()?)
        .map_err(|e| anyhow!("failed to fit random forest: {e}"))?;

    let predictions = forest
        .predict(&x_test)
        .map_err(|e| anyhow!("failed to evaluate held-out split: {e}"))?;

    let correct = predictions
        .iter()
        .zip(y_test.iter())
        .filter(|(predicted, actual)| predicted == actual)
        .count();
    let test_accuracy = if y_test.is_empty() {
        0.0
    } else {
        correct as f64 / y_test.len() as f64
    };

    info!(test_accuracy, "Evaluated held-out split");

    let classifier = SeverityClassifier::new(forest);
    let bytes = classifier.to_bytes()?;
    store.put(&options.artifact_id, bytes.into()).await?;

    Ok(TrainReport {
        samples: dataset.rows.len(),
        feature_count: registry.len(),
        test_accuracy,
        artifact_id: options.artifact_id.clone(),
    })
}
