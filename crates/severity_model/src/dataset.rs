//! Prepared-dataset loading and one-hot encoding for the offline trainer.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result, bail};
use feature_assembler::{AssembleError, LABEL_COLUMN, SchemaRegistry};

/// An encoded training dataset: numeric feature rows plus severity labels.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Encoded feature column names, numeric columns first, then the
    /// one-hot dummies appended per categorical source column
    pub feature_names: Vec<String>,

    /// One encoded row per sample, in `feature_names` order
    pub rows: Vec<Vec<f64>>,

    /// Severity label per sample
    pub labels: Vec<u32>,
}

impl Dataset {
    /// Loads and encodes a prepared dataset CSV with a `Severity` label
    /// column.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, has no label column,
    /// or holds no rows.
    pub fn load(path: &Path) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path)
            .with_context(|| format!("Failed to read dataset from {}", path.display()))?;

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
        }

        Self::from_table(headers, rows)
    }

    /// Encodes an in-memory table: drops a leading index column, separates
    /// the label, keeps numeric/boolean columns as-is, and one-hot encodes
    /// everything else drop-first with `{column}_{value}` names.
    ///
    /// # Errors
    ///
    /// Returns an error if the label column is missing or unparsable, or
    /// the table is empty.
    pub fn from_table(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        let (headers, rows) = drop_index_column(headers, rows);

        if rows.is_empty() {
            bail!("dataset has no rows");
        }

        let Some(label_index) = headers.iter().position(|h| h == LABEL_COLUMN) else {
            bail!("dataset has no '{LABEL_COLUMN}' column");
        };

        let labels = rows
            .iter()
            .map(|row| {
                let raw = &row[label_index];
                raw.parse::<f64>()
                    .map(|value| value as u32)
                    .with_context(|| format!("invalid severity label '{raw}'"))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut feature_names = Vec::new();
        let mut columns: Vec<Vec<f64>> = Vec::new();
        let mut categorical = Vec::new();

        for (index, name) in headers.iter().enumerate() {
            if index == label_index {
                continue;
            }

            let values: Vec<&str> = rows.iter().map(|row| row[index].as_str()).collect();

            if let Some(numeric) = parse_numeric_column(&values) {
                feature_names.push(name.clone());
                columns.push(numeric);
            } else {
                categorical.push((name.clone(), values));
            }
        }

        // Dummy columns go after the numeric ones, one block per source
        // column, with the lexicographically first category dropped
        for (name, values) in categorical {
            let distinct: BTreeSet<&str> = values.iter().copied().collect();

            for category in distinct.iter().skip(1) {
                feature_names.push(format!("{name}_{category}"));
                columns.push(
                    values
                        .iter()
                        .map(|value| if value == category { 1.0 } else { 0.0 })
                        .collect(),
                );
            }
        }

        let rows = (0..rows.len())
            .map(|row| columns.iter().map(|column| column[row]).collect())
            .collect();

        Ok(Self {
            feature_names,
            rows,
            labels,
        })
    }

    /// Reorders every row to the registry's column order.
    ///
    /// # Errors
    ///
    /// Returns [`AssembleError::SchemaMismatch`] if the registry names a
    /// column the encoded dataset does not have; the trainer and the
    /// schema file have drifted apart.
    pub fn reorder(&self, registry: &SchemaRegistry) -> Result<Vec<Vec<f64>>, AssembleError> {
        let indices = registry
            .features()
            .iter()
            .map(|feature| {
                self.feature_names
                    .iter()
                    .position(|name| name == feature)
                    .ok_or_else(|| AssembleError::SchemaMismatch(feature.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(self
            .rows
            .iter()
            .map(|row| indices.iter().map(|&index| row[index]).collect())
            .collect())
    }
}

/// Drops the unnamed index column dataframe tooling writes as column zero.
fn drop_index_column(
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
) -> (Vec<String>, Vec<Vec<String>>) {
    let has_index = matches!(headers.first().map(String::as_str), Some("" | "Unnamed: 0"));
    if !has_index {
        return (headers, rows);
    }

    let headers = headers.into_iter().skip(1).collect();
    let rows = rows
        .into_iter()
        .map(|row| row.into_iter().skip(1).collect())
        .collect();

    (headers, rows)
}

/// Parses a column as numeric if every value is a number or boolean.
fn parse_numeric_column(values: &[&str]) -> Option<Vec<f64>> {
    values.iter().map(|value| parse_numeric(value)).collect()
}

fn parse_numeric(value: &str) -> Option<f64> {
    match value {
        "True" | "true" => Some(1.0),
        "False" | "false" => Some(0.0),
        _ => value.parse().ok(),
    }
}
