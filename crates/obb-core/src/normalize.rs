//! Provider row to [`HistoricalBar`] normalization.
//!
//! Recognized upstream column names are listed in [`COLUMN_MAP`]. Matching is
//! case-insensitive and ignores surrounding whitespace; any column not listed
//! is dropped. Column order in the upstream table does not matter.

use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

use crate::domain::{BarField, HistoricalBar};
use crate::provider::RawSeries;
use crate::ValidationError;

/// Case-folded upstream column name to canonical bar field.
pub const COLUMN_MAP: &[(&str, BarField)] = &[
    ("date", BarField::Date),
    ("datetime", BarField::Date),
    ("timestamp", BarField::Date),
    ("open", BarField::Open),
    ("high", BarField::High),
    ("low", BarField::Low),
    ("close", BarField::Close),
    ("volume", BarField::Volume),
];

/// Canonical field for an upstream column name, if recognized.
pub fn canonical_field(column: &str) -> Option<BarField> {
    let folded = column.trim().to_lowercase();
    COLUMN_MAP
        .iter()
        .find(|(name, _)| *name == folded)
        .map(|(_, field)| *field)
}

/// Failure to normalize one upstream row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("row {row}: {source}")]
pub struct RowError {
    pub row: usize,
    #[source]
    pub source: ValidationError,
}

/// Convert every row of `series` into a bar, preserving row order.
///
/// When several upstream columns map to the same field, the first one in
/// upstream column order wins.
pub fn normalize_series(series: &RawSeries) -> Result<Vec<HistoricalBar>, RowError> {
    let mut selected: Vec<(usize, BarField)> = Vec::with_capacity(BarField::ALL.len());
    for (index, column) in series.columns.iter().enumerate() {
        if let Some(field) = canonical_field(column) {
            if !selected.iter().any(|(_, existing)| *existing == field) {
                selected.push((index, field));
            }
        }
    }

    series
        .rows
        .iter()
        .enumerate()
        .map(|(row_index, row)| {
            let cells: BTreeMap<BarField, Value> = selected
                .iter()
                .filter_map(|(index, field)| row.get(*index).map(|cell| (*field, cell.clone())))
                .collect();

            HistoricalBar::from_values(&cells).map_err(|source| RowError {
                row: row_index,
                source,
            })
        })
        .collect()
}
