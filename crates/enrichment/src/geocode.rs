//! Reverse geocoding client for a Nominatim-compatible service.

use core::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use severity_structs::{Address, Coordinate, LookupError};
use tracing::debug;

/// Identifying User-Agent required by the Nominatim usage policy.
const USER_AGENT: &str = "accident-severity/0.1";

/// Client-level request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for reverse-geocoding coordinates into street addresses.
pub struct GeocodeClient {
    client: Client,
    base_url: String,
}

/// Response from the `/reverse` endpoint (`format=jsonv2`).
#[derive(Debug, Clone, Deserialize)]
struct ReverseResponse {
    /// Structured address components, absent when nothing was found
    address: Option<ReverseAddress>,

    /// Error message for unresolvable coordinates (e.g. open ocean)
    error: Option<String>,
}

/// Address components of a reverse geocoding result.
#[derive(Debug, Clone, Deserialize)]
struct ReverseAddress {
    house_number: Option<String>,
    road: Option<String>,
    city: Option<String>,
    town: Option<String>,
    state: Option<String>,
    postcode: Option<String>,
}

impl GeocodeClient {
    /// Creates a new client for the given geocoder base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Reverse-geocodes a coordinate into a street address.
    ///
    /// Partial addresses (missing house number or street) are valid results;
    /// a coordinate the service cannot resolve at all is
    /// [`LookupError::NoData`].
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::ServiceUnavailable`] if the request fails and
    /// [`LookupError::NoData`] if the service had no address for the point.
    pub async fn reverse(&self, coord: Coordinate) -> Result<Address, LookupError> {
        let url = format!(
            "{}/reverse?format=jsonv2&lat={}&lon={}",
            self.base_url, coord.lat, coord.lon
        );

        debug!(%coord, "Reverse geocoding");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| LookupError::ServiceUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::ServiceUnavailable(format!(
                "geocoder returned status {status}"
            )));
        }

        let data: ReverseResponse = response
            .json()
            .await
            .map_err(|e| LookupError::ServiceUnavailable(e.to_string()))?;

        address_from(data)
    }
}

fn address_from(data: ReverseResponse) -> Result<Address, LookupError> {
    if let Some(error) = data.error {
        debug!(error = %error, "Geocoder had no result");
        return Err(LookupError::NoData);
    }

    let Some(parts) = data.address else {
        return Err(LookupError::NoData);
    };

    Ok(Address {
        house_number: parts.house_number,
        road: parts.road,
        // Smaller places report a town instead of a city
        city: parts.city.or(parts.town),
        state: parts.state,
        postcode: parts.postcode,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_full_address() {
        let raw = r#"{
            "place_id": 133408616,
            "display_name": "9201, University City Boulevard, Charlotte, North Carolina, 28223, United States",
            "address": {
                "house_number": "9201",
                "road": "University City Boulevard",
                "city": "Charlotte",
                "state": "North Carolina",
                "postcode": "28223",
                "country_code": "us"
            }
        }"#;

        let data: ReverseResponse = serde_json::from_str(raw).unwrap();
        let address = address_from(data).unwrap();

        assert_eq!(address.house_number.as_deref(), Some("9201"));
        assert_eq!(address.road.as_deref(), Some("University City Boulevard"));
        assert_eq!(address.city.as_deref(), Some("Charlotte"));
        assert_eq!(address.postcode.as_deref(), Some("28223"));
    }

    #[test]
    fn test_partial_address_is_valid() {
        let raw = r#"{
            "place_id": 1,
            "address": {
                "road": "Rural Route 4",
                "town": "Midland",
                "state": "North Carolina"
            }
        }"#;

        let data: ReverseResponse = serde_json::from_str(raw).unwrap();
        let address = address_from(data).unwrap();

        assert_eq!(address.house_number, None);
        assert_eq!(address.city.as_deref(), Some("Midland"));
    }

    #[test]
    fn test_unresolvable_coordinate_is_no_data() {
        let raw = r#"{"error": "Unable to geocode"}"#;

        let data: ReverseResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(address_from(data), Err(LookupError::NoData));
    }
}
