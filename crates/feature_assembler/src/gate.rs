//! Admission gate deciding whether an attempt may reach the classifier.

use chrono::DateTime;
use chrono_tz::Tz;
use enrichment::EnrichmentContext;
use severity_structs::{Address, WeatherSnapshot};
use thiserror::Error;

/// Why a prediction attempt was refused.
///
/// A refusal is the expected outcome of an incomplete enrichment, rendered
/// to the user as a targeted message; it never aborts the process.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum Refusal {
    #[error("the selected point is not on a road; pick a point on or next to a roadway")]
    NotARoad,

    #[error("no timezone could be resolved for the selected point")]
    TimezoneUnresolvable,

    #[error("weather data could not be retrieved for the selected point")]
    WeatherUnavailable,

    #[error("no address could be resolved for the selected point")]
    AddressUnavailable,
}

/// Borrowed view of a context that passed the admission gate.
///
/// Holding this type proves every required enrichment succeeded.
#[derive(Debug, Clone, Copy)]
pub struct AdmittedContext<'a> {
    pub address: &'a Address,
    pub weather: &'a WeatherSnapshot,
    pub local_time: &'a DateTime<Tz>,
    pub traffic_signal: bool,
}

/// Checks the admission rule over a full enrichment context.
///
/// All of the following must hold: the point is on a road, the timezone
/// resolved, the weather resolved, and the address resolved. The road gate
/// wins over every other failure so the user is told to move the point
/// before being told about flaky lookups.
///
/// # Errors
///
/// Returns the first applicable [`Refusal`].
pub fn admission_gate(context: &EnrichmentContext) -> Result<AdmittedContext<'_>, Refusal> {
    if !context.is_road {
        return Err(Refusal::NotARoad);
    }

    let local_time = context
        .local_time
        .as_ref()
        .map_err(|_| Refusal::TimezoneUnresolvable)?;
    let weather = context
        .weather
        .as_ref()
        .map_err(|_| Refusal::WeatherUnavailable)?;
    let address = context
        .address
        .as_ref()
        .map_err(|_| Refusal::AddressUnavailable)?;

    Ok(AdmittedContext {
        address,
        weather,
        local_time,
        traffic_signal: context.traffic_signal,
    })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;
    use severity_structs::{
        Coordinate, LookupError, pressure_hpa_to_inhg, visibility_meters_to_miles,
    };

    use super::*;
    use crate::{FeatureBundle, SchemaRegistry};

    fn resolved_context() -> EnrichmentContext {
        EnrichmentContext {
            address: Ok(Address::default()),
            weather: Ok(WeatherSnapshot {
                temperature_f: 72.0,
                wind_chill_f: 70.5,
                pressure_in: 29.91,
                visibility_mi: 6.21,
                humidity_pct: 50.0,
                wind_speed_mph: 5.0,
            }),
            local_time: Ok(chrono_tz::America::New_York
                .with_ymd_and_hms(2024, 10, 16, 14, 30, 0)
                .unwrap()),
            traffic_signal: true,
            is_road: true,
        }
    }

    #[test]
    fn test_fully_resolved_context_is_admitted() {
        let context = resolved_context();
        let admitted = admission_gate(&context).unwrap();
        assert!(admitted.traffic_signal);
    }

    #[test]
    fn test_off_road_point_is_refused() {
        let context = EnrichmentContext {
            is_road: false,
            ..resolved_context()
        };
        assert_eq!(admission_gate(&context).unwrap_err(), Refusal::NotARoad);
    }

    #[test]
    fn test_road_gate_wins_over_other_failures() {
        let context = EnrichmentContext {
            address: Err(LookupError::NoData),
            weather: Err(LookupError::ServiceUnavailable("status 503".to_string())),
            is_road: false,
            ..resolved_context()
        };
        assert_eq!(admission_gate(&context).unwrap_err(), Refusal::NotARoad);
    }

    #[test]
    fn test_failed_weather_is_refused() {
        let context = EnrichmentContext {
            weather: Err(LookupError::ServiceUnavailable("status 503".to_string())),
            ..resolved_context()
        };
        assert_eq!(
            admission_gate(&context).unwrap_err(),
            Refusal::WeatherUnavailable
        );
    }

    #[test]
    fn test_failed_address_is_refused() {
        let context = EnrichmentContext {
            address: Err(LookupError::NoData),
            ..resolved_context()
        };
        assert_eq!(
            admission_gate(&context).unwrap_err(),
            Refusal::AddressUnavailable
        );
    }

    #[test]
    fn test_admitted_context_assembles_an_ordered_vector() {
        let coord = Coordinate::new(35.2286, -80.8348);
        let context = EnrichmentContext {
            weather: Ok(WeatherSnapshot {
                temperature_f: 72.0,
                wind_chill_f: 70.5,
                pressure_in: pressure_hpa_to_inhg(1013.0),
                visibility_mi: visibility_meters_to_miles(10_000.0),
                humidity_pct: 50.0,
                wind_speed_mph: 5.0,
            }),
            ..resolved_context()
        };

        let admitted = admission_gate(&context).unwrap();
        let bundle = FeatureBundle::from_parts(
            coord,
            admitted.local_time,
            admitted.weather,
            admitted.address,
            admitted.traffic_signal,
        );

        let registry = SchemaRegistry::from_features(vec![
            "Start_Lat".to_string(),
            "Start_Lng".to_string(),
            "Pressure(in)".to_string(),
            "Traffic_Signal".to_string(),
        ])
        .unwrap();

        let vector = bundle.project(&registry).unwrap();
        assert_eq!(vector[0], 35.2286);
        assert_eq!(vector[1], -80.8348);
        assert!((vector[2] - 29.92).abs() < 0.01);
        assert_eq!(vector[3], 1.0);
    }

    #[test]
    fn test_unresolved_timezone_is_refused() {
        let context = EnrichmentContext {
            local_time: Err(LookupError::NoData),
            ..resolved_context()
        };
        assert_eq!(
            admission_gate(&context).unwrap_err(),
            Refusal::TimezoneUnresolvable
        );
    }
}
