//! Weather snapshot and the unit conversions applied to raw provider data.

use serde::{Deserialize, Serialize};

/// Conversion factor from hectopascals to inches of mercury
/// (1 hPa = 1/33.8639 inHg).
pub const HPA_TO_INHG: f64 = 0.02953;

/// Meters per statute mile.
pub const METERS_PER_MILE: f64 = 1609.34;

/// Weather conditions at a coordinate, captured once per prediction attempt.
///
/// Values are stored in the units the model was trained on: imperial
/// temperatures and wind speed straight from the provider, pressure and
/// visibility converted from the provider's metric units.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct WeatherSnapshot {
    /// Air temperature (°F)
    pub temperature_f: f64,

    /// Perceived "feels like" temperature (°F)
    pub wind_chill_f: f64,

    /// Atmospheric pressure (inHg)
    pub pressure_in: f64,

    /// Visibility (miles)
    pub visibility_mi: f64,

    /// Relative humidity (%)
    pub humidity_pct: f64,

    /// Wind speed (mph)
    pub wind_speed_mph: f64,
}

/// Converts atmospheric pressure from hectopascals to inches of mercury.
#[must_use]
pub fn pressure_hpa_to_inhg(pressure_hpa: f64) -> f64 {
    pressure_hpa * HPA_TO_INHG
}

/// Converts visibility from meters to statute miles.
#[must_use]
pub fn visibility_meters_to_miles(visibility_m: f64) -> f64 {
    visibility_m / METERS_PER_MILE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pressure_conversion_standard_atmosphere() {
        let inhg = pressure_hpa_to_inhg(1013.25);
        assert!((inhg - 29.92).abs() < 0.01);
    }

    #[test]
    fn test_visibility_conversion_ten_kilometers() {
        let miles = visibility_meters_to_miles(10_000.0);
        assert!((miles - 6.21).abs() < 0.01);
    }
}
