//! Per-attempt enrichment context.

use chrono::DateTime;
use chrono_tz::Tz;
use severity_structs::{Address, Coordinate, LookupError, WeatherSnapshot};
use tracing::warn;

use crate::{GeocodeClient, OverpassClient, TimezoneResolver, WeatherClient};

/// All enrichment results for one prediction attempt.
///
/// Each lookup runs exactly once per attempt; downstream consumers read the
/// captured results instead of re-fetching. Per-lookup failures are held
/// here so the admission gate can turn the combination into one targeted
/// refusal.
#[derive(Debug, Clone)]
pub struct EnrichmentContext {
    /// Reverse-geocoded address, or why it could not be resolved
    pub address: Result<Address, LookupError>,

    /// Weather snapshot, or why it could not be fetched
    pub weather: Result<WeatherSnapshot, LookupError>,

    /// Current time in the coordinate's timezone, or why the zone is unknown
    pub local_time: Result<DateTime<Tz>, LookupError>,

    /// Whether a traffic signal exists near the point
    pub traffic_signal: bool,

    /// Whether the point lies on a road
    pub is_road: bool,
}

/// Runs every enrichment lookup once for the coordinate, sequentially.
///
/// The two boolean lookups degrade to `false` if their query fails: the
/// attempt then resolves to a road-gate refusal or a signal-free record
/// rather than aborting outright.
pub async fn enrich(
    coord: Coordinate,
    geocoder: &GeocodeClient,
    weather: &WeatherClient,
    overpass: &OverpassClient,
    timezone: &TimezoneResolver,
) -> EnrichmentContext {
    let address = geocoder.reverse(coord).await;
    let snapshot = weather.current(coord).await;
    let local_time = timezone.local_time(coord);

    let traffic_signal = match overpass.traffic_signal_nearby(coord).await {
        Ok(found) => found,
        Err(error) => {
            warn!(%error, "Traffic signal lookup failed, assuming none nearby");
            false
        }
    };

    let is_road = match overpass.is_road(coord).await {
        Ok(found) => found,
        Err(error) => {
            warn!(%error, "Road lookup failed, treating point as off-road");
            false
        }
    };

    EnrichmentContext {
        address,
        weather: snapshot,
        local_time,
        traffic_signal,
        is_road,
    }
}
