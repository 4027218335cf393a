//! Predict command - one-shot or interactive severity prediction.

use std::io::BufRead as _;

use anyhow::Result;
use config::Config;
use enrichment::enrich;
use feature_assembler::{FeatureBundle, admission_gate};
use prediction_log::PredictionLogEntry;
use severity_structs::{Coordinate, Severity};
use tracing::{error, info, warn};

use crate::context::AppContext;

/// Runs the predict command.
///
/// With a coordinate given, runs a single prediction attempt. Without one,
/// reads "lat lon" lines from stdin in a loop, reusing the loaded model,
/// schema, and HTTP clients across attempts.
///
/// # Errors
///
/// Returns an error if the application context cannot be initialized or
/// stdin cannot be read. Per-attempt failures are reported and do not end
/// the session.
pub async fn run(config: &Config, coord: Option<(f64, f64)>) -> Result<()> {
    let ctx = AppContext::initialize(config).await?;

    if let Some((lat, lon)) = coord {
        predict_once(&ctx, Coordinate::new(lat, lon)).await;
        return Ok(());
    }

    println!("Enter coordinates as \"lat lon\" (blank line to exit):");

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();

        if trimmed.is_empty() {
            break;
        }

        match parse_coordinate(trimmed) {
            Some(coord) => predict_once(&ctx, coord).await,
            None => println!("Could not parse \"{trimmed}\"; expected \"lat lon\""),
        }
    }

    Ok(())
}

/// Runs one prediction attempt for a coordinate.
///
/// Refusals and per-attempt faults are printed or logged and leave the
/// process (and the cached model) usable for the next attempt.
async fn predict_once(ctx: &AppContext, coord: Coordinate) {
    info!(%coord, "Starting prediction attempt");

    let context = enrich(coord, &ctx.geocoder, &ctx.weather, &ctx.overpass, &ctx.timezone).await;

    let admitted = match admission_gate(&context) {
        Ok(admitted) => admitted,
        Err(refusal) => {
            println!("No prediction: {refusal}");
            return;
        }
    };

    let bundle = FeatureBundle::from_parts(
        coord,
        admitted.local_time,
        admitted.weather,
        admitted.address,
        admitted.traffic_signal,
    );

    let features = match bundle.project(&ctx.registry) {
        Ok(features) => features,
        Err(e) => {
            error!(error = %e, "Feature schema drift between training and inference");
            return;
        }
    };

    let severity = match ctx.classifier.predict(&features) {
        Ok(severity) => severity,
        Err(e) => {
            error!(error = %e, "Prediction failed");
            return;
        }
    };

    print_report(coord, &admitted, severity);

    let local_time = admitted.local_time.format("%Y-%m-%d %H:%M %Z").to_string();
    let entry = PredictionLogEntry {
        prediction: severity.label().to_string(),
        local_time,
        latitude: format!("{:.5}", coord.lat),
        longitude: format!("{:.5}", coord.lon),
        temperature_f: admitted.weather.temperature_f,
        pressure_in: admitted.weather.pressure_in,
        visibility_mi: admitted.weather.visibility_mi,
        humidity_pct: admitted.weather.humidity_pct,
        wind_speed_mph: admitted.weather.wind_speed_mph,
        traffic_signal: admitted.traffic_signal,
    };

    if let Err(e) = ctx.log.append(entry) {
        warn!(error = %e, "Failed to append to the prediction log");
    }
}

fn print_report(
    coord: Coordinate,
    admitted: &feature_assembler::AdmittedContext<'_>,
    severity: Severity,
) {
    let weather = admitted.weather;

    println!();
    println!("Location:       {} {coord}", admitted.address);
    println!(
        "Local time:     {}",
        admitted.local_time.format("%Y-%m-%d %H:%M %Z")
    );
    println!("Temperature:    {:.2} F", weather.temperature_f);
    println!("Wind chill:     {:.2} F", weather.wind_chill_f);
    println!("Pressure:       {:.2} inHg", weather.pressure_in);
    println!("Visibility:     {:.2} mi", weather.visibility_mi);
    println!("Humidity:       {:.2} %", weather.humidity_pct);
    println!("Wind speed:     {:.2} mph", weather.wind_speed_mph);
    println!(
        "Traffic signal: {}",
        if admitted.traffic_signal { "yes" } else { "no" }
    );
    println!(
        "Severity:       \x1b[{}m{}\x1b[0m",
        severity.ansi_color(),
        severity.label()
    );
    println!();
}

/// Parses a "lat lon" (or "lat,lon") input line.
fn parse_coordinate(input: &str) -> Option<Coordinate> {
    let mut parts = input.split([',', ' ']).filter(|part| !part.is_empty());

    let lat = parts.next()?.parse().ok()?;
    let lon = parts.next()?.parse().ok()?;

    if parts.next().is_some() {
        return None;
    }

    Some(Coordinate::new(lat, lon))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinate_accepts_space_and_comma() {
        assert_eq!(
            parse_coordinate("35.2286 -80.8348"),
            Some(Coordinate::new(35.2286, -80.8348))
        );
        assert_eq!(
            parse_coordinate("35.2286, -80.8348"),
            Some(Coordinate::new(35.2286, -80.8348))
        );
    }

    #[test]
    fn test_parse_coordinate_rejects_garbage() {
        assert_eq!(parse_coordinate("one two"), None);
        assert_eq!(parse_coordinate("35.2286"), None);
        assert_eq!(parse_coordinate("35.2 -80.8 12.0"), None);
    }
}
