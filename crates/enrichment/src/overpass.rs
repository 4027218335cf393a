//! Geospatial feature queries against an Overpass-compatible service.

use core::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use severity_structs::{Coordinate, LookupError};
use tracing::debug;

/// Search radius for traffic signals around the selected point.
const TRAFFIC_SIGNAL_RADIUS_METERS: f64 = 400.0;

/// Search radius used to decide whether the point is on a road.
const ROAD_RADIUS_METERS: f64 = 15.0;

/// Client-level request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for presence queries against the geospatial feature store.
pub struct OverpassClient {
    client: Client,
    base_url: String,
}

/// Response from the Overpass interpreter endpoint.
#[derive(Debug, Clone, Deserialize)]
struct OverpassResponse {
    /// Matching elements; an empty list is a valid, non-error result
    elements: Vec<OverpassElement>,
}

/// A single matched map element.
#[derive(Debug, Clone, Deserialize)]
struct OverpassElement {
    /// Element kind ("node", "way", "relation")
    #[serde(rename = "type")]
    element_type: String,

    /// OSM element id
    id: u64,
}

impl OverpassClient {
    /// Creates a new client for the given Overpass base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Returns whether any traffic-signal node exists within 400 m of the
    /// coordinate. An empty result set is a valid `false`, not a failure.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::ServiceUnavailable`] if the query itself fails.
    pub async fn traffic_signal_nearby(&self, coord: Coordinate) -> Result<bool, LookupError> {
        self.any_elements(&traffic_signal_query(coord)).await
    }

    /// Returns whether any road way passes within 15 m of the coordinate.
    /// An empty result set is a valid `false`, not a failure.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::ServiceUnavailable`] if the query itself fails.
    pub async fn is_road(&self, coord: Coordinate) -> Result<bool, LookupError> {
        self.any_elements(&road_query(coord)).await
    }

    async fn any_elements(&self, query: &str) -> Result<bool, LookupError> {
        let url = format!("{}/api/interpreter", self.base_url);

        debug!(query, "Running geospatial query");

        let response = self
            .client
            .post(&url)
            .form(&[("data", query)])
            .send()
            .await
            .map_err(|e| LookupError::ServiceUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::ServiceUnavailable(format!(
                "geospatial service returned status {status}"
            )));
        }

        let data: OverpassResponse = response
            .json()
            .await
            .map_err(|e| LookupError::ServiceUnavailable(e.to_string()))?;

        if let Some(element) = data.elements.first() {
            debug!(
                element_type = %element.element_type,
                id = element.id,
                "Query matched"
            );
        }

        Ok(!data.elements.is_empty())
    }
}

fn traffic_signal_query(coord: Coordinate) -> String {
    format!(
        "[out:json];node(around:{TRAFFIC_SIGNAL_RADIUS_METERS},{},{})[\"highway\"=\"traffic_signals\"];out 1;",
        coord.lat, coord.lon
    )
}

fn road_query(coord: Coordinate) -> String {
    format!(
        "[out:json];way(around:{ROAD_RADIUS_METERS},{},{})[\"highway\"];out 1;",
        coord.lat, coord.lon
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_traffic_signal_query_uses_400m_radius() {
        let query = traffic_signal_query(Coordinate::new(35.2286, -80.8348));
        assert!(query.contains("around:400,35.2286,-80.8348"));
        assert!(query.contains("traffic_signals"));
    }

    #[test]
    fn test_road_query_uses_15m_radius() {
        let query = road_query(Coordinate::new(35.2286, -80.8348));
        assert!(query.contains("way(around:15,35.2286,-80.8348)"));
    }

    #[test]
    fn test_empty_element_list_parses_as_no_matches() {
        let raw = r#"{"version": 0.6, "elements": []}"#;
        let data: OverpassResponse = serde_json::from_str(raw).unwrap();
        assert!(data.elements.is_empty());
    }

    #[test]
    fn test_matching_node_parses() {
        let raw = r#"{
            "elements": [
                {"type": "node", "id": 4212498137, "lat": 35.2291, "lon": -80.8340,
                 "tags": {"highway": "traffic_signals"}}
            ]
        }"#;

        let data: OverpassResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(data.elements.len(), 1);
        assert_eq!(data.elements[0].element_type, "node");
        assert_eq!(data.elements[0].id, 4_212_498_137);
    }
}
