//! Named-feature construction and projection onto the schema registry.

use chrono::{DateTime, Datelike, Timelike};
use chrono_tz::Tz;
use severity_structs::{Address, Coordinate, WeatherSnapshot};
use thiserror::Error;

/// Errors raised while projecting a bundle onto the registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssembleError {
    /// The registry names a feature the bundle never built. This indicates
    /// drift between the trainer and inference builds, not a runtime
    /// condition to recover from.
    #[error("feature '{0}' is required by the schema registry but was never built")]
    SchemaMismatch(String),
}

/// The named features built for one admitted prediction attempt.
///
/// The bundle is a superset of what any one trained model consumes; the
/// registry's projection selects and orders the columns the classifier
/// actually expects.
#[derive(Debug, Clone)]
pub struct FeatureBundle {
    values: Vec<(String, f64)>,
}

impl FeatureBundle {
    /// Builds the feature superset from the attempt's captured context.
    ///
    /// Both day-of-month (`Start_Day`) and day-of-week (`Start_DayOfWeek`,
    /// Monday = 0) are built; the registry decides which one the model
    /// consumes. The traffic-signal flag is exposed under both its raw and
    /// dummy-encoded column names for the same reason.
    #[must_use]
    pub fn from_parts(
        coord: Coordinate,
        local_time: &DateTime<Tz>,
        weather: &WeatherSnapshot,
        address: &Address,
        traffic_signal: bool,
    ) -> Self {
        let signal = if traffic_signal { 1.0 } else { 0.0 };

        let mut values = vec![
            ("Start_Year".to_string(), f64::from(local_time.year())),
            ("Start_Month".to_string(), f64::from(local_time.month())),
            ("Start_Day".to_string(), f64::from(local_time.day())),
            (
                "Start_DayOfWeek".to_string(),
                f64::from(local_time.weekday().num_days_from_monday()),
            ),
            ("Start_Hour".to_string(), f64::from(local_time.hour())),
            ("Start_Lat".to_string(), coord.lat),
            ("Start_Lng".to_string(), coord.lon),
            ("Temperature(F)".to_string(), weather.temperature_f),
            ("Wind_Chill(F)".to_string(), weather.wind_chill_f),
            ("Pressure(in)".to_string(), weather.pressure_in),
            ("Visibility(mi)".to_string(), weather.visibility_mi),
            ("Humidity(%)".to_string(), weather.humidity_pct),
            ("Wind_Speed(mph)".to_string(), weather.wind_speed_mph),
            ("Traffic_Signal".to_string(), signal),
            ("Traffic_Signal_True".to_string(), signal),
        ];

        // Zipcode is only usable as a feature where it is numeric
        if let Some(zipcode) = address.postcode.as_ref().and_then(|p| p.parse().ok()) {
            values.push(("Zipcode".to_string(), zipcode));
        }

        Self { values }
    }

    /// Returns the value of a named feature, if it was built.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(feature, _)| feature == name)
            .map(|(_, value)| *value)
    }

    /// Projects the bundle onto the registry, emitting values in exactly
    /// the registry's column order.
    ///
    /// # Errors
    ///
    /// Returns [`AssembleError::SchemaMismatch`] if the registry names a
    /// feature the bundle does not carry.
    pub fn project(&self, registry: &crate::SchemaRegistry) -> Result<Vec<f64>, AssembleError> {
        registry
            .features()
            .iter()
            .map(|name| {
                self.get(name)
                    .ok_or_else(|| AssembleError::SchemaMismatch(name.clone()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;
    use severity_structs::{pressure_hpa_to_inhg, visibility_meters_to_miles};

    use super::*;
    use crate::SchemaRegistry;

    fn charlotte() -> Coordinate {
        Coordinate::new(35.2286, -80.8348)
    }

    fn sample_time() -> DateTime<Tz> {
        // A Wednesday
        chrono_tz::America::New_York
            .with_ymd_and_hms(2024, 10, 16, 14, 30, 0)
            .unwrap()
    }

    fn sample_weather() -> WeatherSnapshot {
        WeatherSnapshot {
            temperature_f: 72.0,
            wind_chill_f: 70.5,
            pressure_in: pressure_hpa_to_inhg(1013.0),
            visibility_mi: visibility_meters_to_miles(10_000.0),
            humidity_pct: 50.0,
            wind_speed_mph: 5.0,
        }
    }

    fn sample_address() -> Address {
        Address {
            postcode: Some("28223".to_string()),
            ..Address::default()
        }
    }

    fn sample_bundle() -> FeatureBundle {
        FeatureBundle::from_parts(
            charlotte(),
            &sample_time(),
            &sample_weather(),
            &sample_address(),
            true,
        )
    }

    #[test]
    fn test_projection_follows_registry_order() {
        let registry = SchemaRegistry::from_features(vec![
            "Start_Hour".to_string(),
            "Start_Lat".to_string(),
            "Temperature(F)".to_string(),
        ])
        .unwrap();

        let vector = sample_bundle().project(&registry).unwrap();
        assert_eq!(vector, vec![14.0, 35.2286, 72.0]);
    }

    #[test]
    fn test_missing_feature_is_schema_mismatch() {
        let registry = SchemaRegistry::from_features(vec![
            "Start_Hour".to_string(),
            "Precipitation(in)".to_string(),
        ])
        .unwrap();

        assert_eq!(
            sample_bundle().project(&registry),
            Err(AssembleError::SchemaMismatch("Precipitation(in)".to_string()))
        );
    }

    #[test]
    fn test_calendar_features() {
        let bundle = sample_bundle();
        assert_eq!(bundle.get("Start_Year"), Some(2024.0));
        assert_eq!(bundle.get("Start_Month"), Some(10.0));
        assert_eq!(bundle.get("Start_Day"), Some(16.0));
        assert_eq!(bundle.get("Start_DayOfWeek"), Some(2.0));
        assert_eq!(bundle.get("Start_Hour"), Some(14.0));
    }

    #[test]
    fn test_traffic_signal_has_both_column_names() {
        let bundle = sample_bundle();
        assert_eq!(bundle.get("Traffic_Signal"), Some(1.0));
        assert_eq!(bundle.get("Traffic_Signal_True"), Some(1.0));

        let without = FeatureBundle::from_parts(
            charlotte(),
            &sample_time(),
            &sample_weather(),
            &sample_address(),
            false,
        );
        assert_eq!(without.get("Traffic_Signal"), Some(0.0));
    }

    #[test]
    fn test_numeric_zipcode_is_a_feature() {
        assert_eq!(sample_bundle().get("Zipcode"), Some(28223.0));

        let non_numeric = FeatureBundle::from_parts(
            charlotte(),
            &sample_time(),
            &sample_weather(),
            &Address {
                postcode: Some("EC1A 1BB".to_string()),
                ..Address::default()
            },
            true,
        );
        assert_eq!(non_numeric.get("Zipcode"), None);
    }

    #[test]
    fn test_pressure_feature_matches_converted_units() {
        let pressure = sample_bundle().get("Pressure(in)").unwrap();
        assert!((pressure - 29.92).abs() < 0.01);
    }
}
