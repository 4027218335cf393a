use thiserror::Error;

/// Failure modes of a single enrichment lookup.
///
/// Each lookup fails independently; failures are captured per attempt and
/// surfaced as a targeted refusal at the admission gate rather than raised
/// to the user as a fault.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    /// The external call failed or timed out.
    #[error("external service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The service responded but had nothing for this location.
    #[error("no data found for this location")]
    NoData,
}
