//! Context enrichment: resolves the signals the severity model needs from a
//! raw coordinate.
//!
//! Each lookup is independent and may fail on its own; results are gathered
//! once per prediction attempt into an [`EnrichmentContext`] and reused from
//! there, never re-fetched.

mod context;
mod geocode;
mod overpass;
mod timezone;
mod weather;

pub use context::*;
pub use geocode::*;
pub use overpass::*;
pub use timezone::*;
pub use weather::*;
