//! Application configuration loaded from environment variables.

use std::path::PathBuf;

use anyhow::Context;

const DEFAULT_WEATHER_BASE_URL: &str = "https://api.openweathermap.org";
const DEFAULT_GEOCODER_BASE_URL: &str = "https://nominatim.openstreetmap.org";
const DEFAULT_OVERPASS_BASE_URL: &str = "https://overpass-api.de";
const DEFAULT_MODEL_BASE_PATH: &str = "./artifacts";
const DEFAULT_MODEL_ARTIFACT_ID: &str = "severity_model.bin";
const DEFAULT_FEATURE_SCHEMA_PATH: &str = "model_features.csv";
const DEFAULT_PREDICTION_LOG_PATH: &str = "prediction_log.csv";

/// Application configuration, built once at process start and passed down
/// to the enrichment and prediction pipeline.
#[derive(Debug, Clone)]
pub struct Config {
    /// OpenWeatherMap API key, if set
    weather_api_key: Option<String>,

    /// Base URL of the weather service
    pub weather_base_url: String,

    /// Base URL of the reverse geocoder
    pub geocoder_base_url: String,

    /// Base URL of the geospatial feature store
    pub overpass_base_url: String,

    /// Base directory of the model artifact store
    pub model_base_path: PathBuf,

    /// Artifact id of the serialized classifier
    pub model_artifact_id: String,

    /// Path to the ordered feature schema CSV
    pub feature_schema_path: PathBuf,

    /// Path to the prediction log CSV
    pub prediction_log_path: PathBuf,
}

impl Config {
    /// Loads configuration from environment variables, reading a `.env`
    /// file first if one is present.
    ///
    /// Environment variables (all optional at load time):
    /// - `OPENWEATHER_API_KEY`: API key for the weather provider; required
    ///   before a prediction can run, see [`Config::require_weather_api_key`]
    /// - `WEATHER_BASE_URL`: weather service base URL
    /// - `GEOCODER_BASE_URL`: reverse geocoder base URL
    /// - `OVERPASS_BASE_URL`: geospatial feature store base URL
    /// - `MODEL_BASE_PATH`: base directory for model artifacts (default: `./artifacts`)
    /// - `MODEL_ARTIFACT_ID`: artifact id of the classifier (default: `severity_model.bin`)
    /// - `FEATURE_SCHEMA_PATH`: feature schema CSV (default: `model_features.csv`)
    /// - `PREDICTION_LOG_PATH`: prediction log CSV (default: `prediction_log.csv`)
    #[must_use]
    pub fn from_env() -> Self {
        // Load .env file
        dotenvy::dotenv().ok();

        Self {
            weather_api_key: std::env::var("OPENWEATHER_API_KEY").ok(),
            weather_base_url: env_or("WEATHER_BASE_URL", DEFAULT_WEATHER_BASE_URL),
            geocoder_base_url: env_or("GEOCODER_BASE_URL", DEFAULT_GEOCODER_BASE_URL),
            overpass_base_url: env_or("OVERPASS_BASE_URL", DEFAULT_OVERPASS_BASE_URL),
            model_base_path: std::env::var("MODEL_BASE_PATH")
                .map_or_else(|_| PathBuf::from(DEFAULT_MODEL_BASE_PATH), PathBuf::from),
            model_artifact_id: env_or("MODEL_ARTIFACT_ID", DEFAULT_MODEL_ARTIFACT_ID),
            feature_schema_path: std::env::var("FEATURE_SCHEMA_PATH")
                .map_or_else(|_| PathBuf::from(DEFAULT_FEATURE_SCHEMA_PATH), PathBuf::from),
            prediction_log_path: std::env::var("PREDICTION_LOG_PATH")
                .map_or_else(|_| PathBuf::from(DEFAULT_PREDICTION_LOG_PATH), PathBuf::from),
        }
    }

    /// Returns the weather API key.
    ///
    /// # Errors
    ///
    /// Returns an error if `OPENWEATHER_API_KEY` was not set.
    pub fn require_weather_api_key(&self) -> anyhow::Result<&str> {
        self.weather_api_key
            .as_deref()
            .context("OPENWEATHER_API_KEY environment variable not set")
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).map_or_else(|_| default.to_string(), |value| value)
}
