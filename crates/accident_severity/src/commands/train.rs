//! Train command - fits the severity classifier from a prepared dataset.

use std::path::Path;

use anyhow::{Context, Result, bail};
use config::Config;
use feature_assembler::SchemaRegistry;
use severity_model::{ArtifactStore, TrainOptions, train};
use tracing::info;

/// Runs the train command.
///
/// # Errors
///
/// Returns an error if the inputs are unusable or training fails.
pub async fn run(
    config: &Config,
    dataset: &Path,
    params: &Path,
    train_fraction: f32,
    artifact_id: Option<String>,
) -> Result<()> {
    if !(train_fraction > 0.0 && train_fraction < 1.0) {
        bail!("train fraction must be between 0 and 1, got {train_fraction}");
    }

    let registry = SchemaRegistry::load(&config.feature_schema_path).with_context(|| {
        format!(
            "Failed to load feature schema from {}",
            config.feature_schema_path.display()
        )
    })?;

    let store = ArtifactStore::new(&config.model_base_path)?;

    let options = TrainOptions {
        train_fraction,
        artifact_id: artifact_id.unwrap_or_else(|| config.model_artifact_id.clone()),
    };

    let report = train(dataset, params, &registry, &store, &options).await?;

    info!(
        samples = report.samples,
        features = report.feature_count,
        test_accuracy = report.test_accuracy,
        artifact_id = %report.artifact_id,
        "Training complete"
    );

    Ok(())
}
