//! The statistical operations: categorical summary, group-wise
//! prevalence, chi-squared independence test, and numeric comparison
//! across disease groups. Each function borrows the `DataFrame`
//! read-only and returns an owned derived table.

mod comparison;
mod frequency;
mod independence;
mod prevalence;

pub use comparison::analyze_relationship;
pub use frequency::summarize_categorical;
pub use independence::{chi_squared_test, contingency_table, ChiSquaredResult, ContingencyTable};
pub use prevalence::disease_prevalence;

use crate::datatypes::{AnyValue, DataFrameError, DataType, SeriesError};
use std::cmp::Ordering;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Column not found: '{name}'")]
    ColumnNotFound { name: String },
    #[error("Column '{name}' is not numeric (dtype {dtype})")]
    NotNumeric { name: String, dtype: DataType },
    #[error("Degenerate contingency table: {rows} row(s) x {cols} column(s), need at least 2x2")]
    DegenerateTable { rows: usize, cols: usize },
    #[error(transparent)]
    DataFrame(#[from] DataFrameError),
    #[error(transparent)]
    Series(#[from] SeriesError),
}

/// Ascending group-key order; incomparable keys keep their
/// first-appearance order (the sort is stable).
pub(crate) fn sort_groups_ascending<T>(groups: &mut [(AnyValue, T)]) {
    groups.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
}
