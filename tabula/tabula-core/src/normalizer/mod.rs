//! Turns a raw model reply into an ordered [`Dataset`].
//!
//! Models do not hold to one output format. A reply may be clean JSON, JSON
//! buried in prose or a code fence, a JSON array cut off by the output token
//! limit, or a pipe-delimited table with or without a header row. Each shape
//! is handled by one strategy; strategies run in a fixed order and the first
//! one producing at least one row wins.

mod json;
mod table;

use serde::{Deserialize, Serialize};

use crate::contracts::{Dataset, Record};
use crate::errors::TabulaError;

pub use json::{ARRAY_PROPERTY_PREFERENCE, dataset_to_json};
pub use table::{DELIMITER, HEADER_KEYWORDS, STANDARD_COLUMNS};

/// Which strategy recovered the rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseStrategy {
    JsonExtraction,
    TruncatedJsonRepair,
    PipeTable,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedReply {
    pub rows: Dataset,
    pub strategy: ParseStrategy,
}

type Strategy = fn(&str) -> Option<Dataset>;

const STRATEGIES: [(ParseStrategy, Strategy); 3] = [
    (ParseStrategy::JsonExtraction, json::extract),
    (ParseStrategy::TruncatedJsonRepair, json::repair_truncated),
    (ParseStrategy::PipeTable, table::parse),
];

/// Runs the strategy chain over `raw`.
///
/// Fails with [`TabulaError::EmptyReply`] on blank input and with
/// [`TabulaError::UnparsableResponse`] when no strategy yields a row. Never
/// returns an empty dataset.
pub fn normalize(raw: &str) -> Result<NormalizedReply, TabulaError> {
    if raw.trim().is_empty() {
        return Err(TabulaError::EmptyReply);
    }

    for (strategy, run) in STRATEGIES {
        match run(raw) {
            Some(mut rows) if !rows.is_empty() => {
                reconcile(&mut rows);
                tracing::debug!(?strategy, rows = rows.len(), "normalized model reply");
                return Ok(NormalizedReply { rows, strategy });
            }
            _ => tracing::debug!(?strategy, "strategy produced no rows"),
        }
    }

    Err(TabulaError::unparsable(raw))
}

/// Union of all column names, in first-seen order.
pub fn columns(rows: &Dataset) -> Vec<String> {
    let mut seen = Record::new();
    for row in rows {
        for key in row.keys() {
            if !seen.contains_key(key) {
                seen.insert(key.clone(), String::new());
            }
        }
    }
    seen.into_keys().collect()
}

/// Gives every row the same columns, in the same order. Absent cells become `""`.
pub fn reconcile(rows: &mut Dataset) {
    let columns = columns(rows);
    for row in rows.iter_mut() {
        let mut aligned = Record::with_capacity(columns.len());
        for column in &columns {
            let value = row.shift_remove(column).unwrap_or_default();
            aligned.insert(column.clone(), value);
        }
        *row = aligned;
    }
}
