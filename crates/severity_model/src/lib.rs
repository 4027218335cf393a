//! Severity classifier, model artifact persistence, and the offline trainer.
//!
//! Inference code treats the classifier as a black box: load it once, call
//! `predict`. The trainer owns everything about how the artifact is produced.

mod artifact;
mod classifier;
mod dataset;
mod hyperparams;
mod trainer;

pub use artifact::*;
pub use classifier::*;
pub use dataset::*;
pub use hyperparams::*;
pub use trainer::*;

use thiserror::Error;

/// Errors raised while loading or invoking the classifier.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The artifact does not exist in the store.
    #[error("model artifact '{0}' not found")]
    ArtifactMissing(String),

    /// The artifact exists but could not be decoded.
    #[error("model artifact '{artifact_id}' could not be decoded: {reason}")]
    ArtifactCorrupt { artifact_id: String, reason: String },

    /// The artifact store itself failed.
    #[error("artifact store error: {0}")]
    Store(String),

    /// The classifier rejected the input or failed internally.
    #[error("classifier failed: {0}")]
    Predict(String),

    /// The classifier produced a class outside the known severity range.
    #[error("classifier produced unmapped class {0}")]
    UnmappedClass(u32),
}
