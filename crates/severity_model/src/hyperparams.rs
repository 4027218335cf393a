//! Random-forest hyperparameters loaded from an external parameter table.

use core::fmt;
use core::str::FromStr;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Deserializer};
use smartcore::ensemble::random_forest_classifier::RandomForestClassifierParameters;
use smartcore::tree::decision_tree_classifier::SplitCriterion;
use tracing::warn;

/// Seed used when the parameter table leaves `random_state` unset.
const DEFAULT_RANDOM_STATE: u64 = 42;

/// Hyperparameters for the random forest, read from a single-row CSV.
///
/// A literal `null` (or empty) cell means "use the library default": the
/// corresponding parameter is simply never set on the forest.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Hyperparameters {
    #[serde(default, deserialize_with = "null_as_none")]
    pub n_estimators: Option<u16>,

    #[serde(default, deserialize_with = "null_as_none")]
    pub criterion: Option<String>,

    #[serde(default, deserialize_with = "null_as_none")]
    pub max_depth: Option<u16>,

    #[serde(default, deserialize_with = "null_as_none")]
    pub min_samples_split: Option<usize>,

    #[serde(default, deserialize_with = "null_as_none")]
    pub min_samples_leaf: Option<usize>,

    #[serde(default, deserialize_with = "null_as_none")]
    pub max_features: Option<usize>,

    #[serde(default, deserialize_with = "null_as_none")]
    pub bootstrap: Option<bool>,

    #[serde(default, deserialize_with = "null_as_none")]
    pub random_state: Option<u64>,
}

impl Hyperparameters {
    /// Loads hyperparameters from the first data row of a CSV file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, has no data row, or a
    /// cell fails to parse.
    pub fn load(path: &Path) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path)
            .with_context(|| format!("Failed to read hyperparameters from {}", path.display()))?;

        reader
            .deserialize()
            .next()
            .context("hyperparameter file has no data row")?
            .context("Failed to parse hyperparameter row")
    }

    /// Returns the random seed, shared by the train/test split and the
    /// forest for reproducibility.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.random_state.unwrap_or(DEFAULT_RANDOM_STATE)
    }

    /// Converts the table into forest parameters, leaving every `null`
    /// hyperparameter at the library default.
    ///
    /// # Errors
    ///
    /// Returns an error on an unknown split criterion.
    pub fn forest_parameters(&self) -> Result<RandomForestClassifierParameters> {
        let mut params = RandomForestClassifierParameters::default().with_seed(self.seed());

        if let Some(n_trees) = self.n_estimators {
            params = params.with_n_trees(n_trees);
        }
        if let Some(criterion) = &self.criterion {
            params = params.with_criterion(parse_criterion(criterion)?);
        }
        if let Some(max_depth) = self.max_depth {
            params = params.with_max_depth(max_depth);
        }
        if let Some(min_samples_split) = self.min_samples_split {
            params = params.with_min_samples_split(min_samples_split);
        }
        if let Some(min_samples_leaf) = self.min_samples_leaf {
            params = params.with_min_samples_leaf(min_samples_leaf);
        }
        if let Some(max_features) = self.max_features {
            params = params.with_m(max_features);
        }
        if self.bootstrap == Some(false) {
            // The forest implementation always bootstraps its samples
            warn!("bootstrap=false is not supported by the random forest; ignoring");
        }

        Ok(params)
    }
}

fn parse_criterion(name: &str) -> Result<SplitCriterion> {
    match name.to_lowercase().as_str() {
        "gini" => Ok(SplitCriterion::Gini),
        "entropy" | "log_loss" => Ok(SplitCriterion::Entropy),
        other => bail!("unknown split criterion '{other}'"),
    }
}

/// Deserializes a cell, mapping empty and literal `null` values to `None`.
fn null_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;

    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) if value.eq_ignore_ascii_case("null") => Ok(None),
        Some(value) => value
            .parse::<T>()
            .or_else(|_| value.to_lowercase().parse::<T>())
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
