//! Current-weather client for an OpenWeatherMap-compatible service.

use core::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use severity_structs::{
    Coordinate, LookupError, WeatherSnapshot, pressure_hpa_to_inhg, visibility_meters_to_miles,
};
use tracing::debug;

/// Client-level request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for fetching the current weather at a coordinate.
pub struct WeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
}

/// Response from the `data/2.5/weather` endpoint with `units=imperial`.
#[derive(Debug, Clone, Deserialize)]
struct CurrentWeatherResponse {
    main: WeatherMain,

    /// Visibility in meters; the provider omits it at some stations
    visibility: Option<f64>,

    wind: WeatherWind,
}

#[derive(Debug, Clone, Deserialize)]
struct WeatherMain {
    /// Temperature (°F with imperial units)
    temp: f64,

    /// Perceived temperature (°F with imperial units)
    feels_like: f64,

    /// Pressure (hPa regardless of unit system)
    pressure: f64,

    /// Relative humidity (%)
    humidity: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct WeatherWind {
    /// Wind speed (mph with imperial units)
    speed: f64,
}

impl WeatherClient {
    /// Creates a new client for the given weather service base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(base_url: &str, api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Fetches the current weather at a coordinate.
    ///
    /// Performs the pressure (hPa → inHg) and visibility (m → mi) unit
    /// conversions before returning.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::ServiceUnavailable`] on any non-200 response
    /// and [`LookupError::NoData`] if the station reported no visibility.
    pub async fn current(&self, coord: Coordinate) -> Result<WeatherSnapshot, LookupError> {
        let url = format!(
            "{}/data/2.5/weather?lat={}&lon={}&appid={}&units=imperial",
            self.base_url, coord.lat, coord.lon, self.api_key
        );

        debug!(%coord, "Fetching current weather");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| LookupError::ServiceUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::ServiceUnavailable(format!(
                "weather service returned status {status}"
            )));
        }

        let data: CurrentWeatherResponse = response
            .json()
            .await
            .map_err(|e| LookupError::ServiceUnavailable(e.to_string()))?;

        snapshot_from(data)
    }
}

fn snapshot_from(data: CurrentWeatherResponse) -> Result<WeatherSnapshot, LookupError> {
    let Some(visibility_m) = data.visibility else {
        return Err(LookupError::NoData);
    };

    Ok(WeatherSnapshot {
        temperature_f: data.main.temp,
        wind_chill_f: data.main.feels_like,
        pressure_in: pressure_hpa_to_inhg(data.main.pressure),
        visibility_mi: visibility_meters_to_miles(visibility_m),
        humidity_pct: data.main.humidity,
        wind_speed_mph: data.wind.speed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_converts_units() {
        let raw = r#"{
            "main": {"temp": 72.0, "feels_like": 70.5, "pressure": 1013, "humidity": 50},
            "visibility": 10000,
            "wind": {"speed": 5.0}
        }"#;

        let data: CurrentWeatherResponse = serde_json::from_str(raw).unwrap();
        let snapshot = snapshot_from(data).unwrap();

        assert!((snapshot.pressure_in - 29.92).abs() < 0.01);
        assert!((snapshot.visibility_mi - 6.21).abs() < 0.01);
        assert!((snapshot.temperature_f - 72.0).abs() < f64::EPSILON);
        assert!((snapshot.wind_chill_f - 70.5).abs() < f64::EPSILON);
        assert!((snapshot.humidity_pct - 50.0).abs() < f64::EPSILON);
        assert!((snapshot.wind_speed_mph - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_visibility_is_no_data() {
        let raw = r#"{
            "main": {"temp": 72.0, "feels_like": 70.5, "pressure": 1013, "humidity": 50},
            "wind": {"speed": 5.0}
        }"#;

        let data: CurrentWeatherResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(snapshot_from(data), Err(LookupError::NoData));
    }
}
