//! Offline coordinate-to-timezone resolution.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use severity_structs::{Coordinate, LookupError};
use tzf_rs::DefaultFinder;

/// Resolves IANA timezones for coordinates from bundled timezone-boundary
/// data; no network access is involved.
pub struct TimezoneResolver {
    finder: DefaultFinder,
}

impl TimezoneResolver {
    /// Creates a resolver with the bundled timezone boundary data.
    #[must_use]
    pub fn new() -> Self {
        Self {
            finder: DefaultFinder::new(),
        }
    }

    /// Resolves the IANA timezone containing the coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::NoData`] when no zone covers the coordinate.
    pub fn resolve(&self, coord: Coordinate) -> Result<Tz, LookupError> {
        let name = self.finder.get_tz_name(coord.lon, coord.lat);
        if name.is_empty() {
            return Err(LookupError::NoData);
        }

        name.parse::<Tz>().map_err(|_| LookupError::NoData)
    }

    /// Returns the current time expressed in the coordinate's timezone.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::NoData`] when no zone covers the coordinate.
    pub fn local_time(&self, coord: Coordinate) -> Result<DateTime<Tz>, LookupError> {
        let tz = self.resolve(coord)?;
        Ok(Utc::now().with_timezone(&tz))
    }
}

impl Default for TimezoneResolver {
    fn default() -> Self {
        Self::new()
    }
}
