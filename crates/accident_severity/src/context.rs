//! Application context constructed once at startup.

use anyhow::{Context, Result};
use config::Config;
use enrichment::{GeocodeClient, OverpassClient, TimezoneResolver, WeatherClient};
use feature_assembler::SchemaRegistry;
use prediction_log::PredictionLog;
use severity_model::{ArtifactStore, SeverityClassifier};
use tracing::info;

/// Everything a prediction attempt needs, built once and reused: the schema
/// registry, the loaded classifier, the enrichment clients, and the log.
pub struct AppContext {
    pub registry: SchemaRegistry,
    pub classifier: SeverityClassifier,
    pub geocoder: GeocodeClient,
    pub weather: WeatherClient,
    pub overpass: OverpassClient,
    pub timezone: TimezoneResolver,
    pub log: PredictionLog,
}

impl AppContext {
    /// Loads the schema registry and classifier and builds the enrichment
    /// clients from the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema or model artifact cannot be loaded,
    /// the weather API key is missing, or a client cannot be created.
    pub async fn initialize(config: &Config) -> Result<Self> {
        let registry = SchemaRegistry::load(&config.feature_schema_path).with_context(|| {
            format!(
                "Failed to load feature schema from {}",
                config.feature_schema_path.display()
            )
        })?;
        info!(features = registry.len(), "Loaded feature schema");

        let store = ArtifactStore::new(&config.model_base_path)?;
        let classifier = SeverityClassifier::load(&store, &config.model_artifact_id).await?;
        info!(artifact_id = %config.model_artifact_id, "Loaded severity classifier");

        let api_key = config.require_weather_api_key()?.to_string();

        Ok(Self {
            registry,
            classifier,
            geocoder: GeocodeClient::new(&config.geocoder_base_url)?,
            weather: WeatherClient::new(&config.weather_base_url, api_key)?,
            overpass: OverpassClient::new(&config.overpass_base_url)?,
            timezone: TimezoneResolver::new(),
            log: PredictionLog::new(config.prediction_log_path.clone()),
        })
    }
}
