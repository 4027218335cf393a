//! Append-only CSV log of completed predictions.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// One completed prediction.
///
/// Entries are created on success, never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PredictionLogEntry {
    /// Predicted severity label
    pub prediction: String,

    /// Local time of the attempt, in the coordinate's timezone
    pub local_time: String,

    /// Latitude, formatted for display
    pub latitude: String,

    /// Longitude, formatted for display
    pub longitude: String,

    /// Temperature (°F)
    pub temperature_f: f64,

    /// Pressure (inHg)
    pub pressure_in: f64,

    /// Visibility (miles)
    pub visibility_mi: f64,

    /// Humidity (%)
    pub humidity_pct: f64,

    /// Wind speed (mph)
    pub wind_speed_mph: f64,

    /// Whether a traffic signal was found near the point
    pub traffic_signal: bool,
}

/// Flat-file prediction log.
///
/// The log is read fully, appended one row, and rewritten fully; there is
/// no partial-append guarantee and a single writer is assumed.
pub struct PredictionLog {
    path: PathBuf,
}

impl PredictionLog {
    /// Creates a log handle for the given CSV path. The file itself is
    /// created on first append.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Reads every entry in the log. A missing file is an empty log.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read or parsed.
    pub fn read_all(&self) -> Result<Vec<PredictionLogEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&self.path)
            .with_context(|| format!("Failed to read prediction log {}", self.path.display()))?;

        reader
            .deserialize()
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to parse prediction log")
    }

    /// Appends one entry, rewriting the whole file.
    ///
    /// # Errors
    ///
    /// Returns an error if the log cannot be read back or written.
    pub fn append(&self, entry: PredictionLogEntry) -> Result<()> {
        let mut entries = self.read_all()?;
        entries.push(entry);

        let mut writer = csv::Writer::from_path(&self.path)
            .with_context(|| format!("Failed to write prediction log {}", self.path.display()))?;

        for entry in &entries {
            writer.serialize(entry)?;
        }

        writer.flush().context("Failed to flush prediction log")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(label: &str) -> PredictionLogEntry {
        PredictionLogEntry {
            prediction: label.to_string(),
            local_time: "2024-10-16 14:30 EDT".to_string(),
            latitude: "35.22862".to_string(),
            longitude: "-80.83446".to_string(),
            temperature_f: 72.0,
            pressure_in: 29.91,
            visibility_mi: 6.21,
            humidity_pct: 50.0,
            wind_speed_mph: 5.0,
            traffic_signal: true,
        }
    }

    #[test]
    fn test_missing_file_reads_as_empty_log() {
        let dir = tempfile::tempdir().unwrap();
        let log = PredictionLog::new(dir.path().join("log.csv"));
        assert!(log.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_append_preserves_prior_rows() {
        let dir = tempfile::tempdir().unwrap();
        let log = PredictionLog::new(dir.path().join("log.csv"));

        log.append(entry("Moderate")).unwrap();
        log.append(entry("SEVERE")).unwrap();

        let entries = log.read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].prediction, "Moderate");
        assert_eq!(entries[1].prediction, "SEVERE");
    }

    #[test]
    fn test_rewrite_keeps_a_single_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.csv");
        let log = PredictionLog::new(path.clone());

        log.append(entry("Minor")).unwrap();
        log.append(entry("Major")).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let header_lines = content
            .lines()
            .filter(|line| line.starts_with("prediction,"))
            .count();
        assert_eq!(header_lines, 1);
    }
}
