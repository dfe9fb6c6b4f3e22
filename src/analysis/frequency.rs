use super::AnalysisError;
use crate::datatypes::{AnyValue, DataFrame};

/// Occurrence count per distinct value of `column`, sorted by
/// descending count. Ties keep first-appearance order; missing values
/// are not counted, so the counts sum to the column's non-missing
/// length.
pub fn summarize_categorical(
    df: &DataFrame,
    column: &str,
) -> Result<Vec<(AnyValue, usize)>, AnalysisError> {
    let groups = df.group_indices(column)?;

    let mut counts: Vec<(AnyValue, usize)> = groups
        .into_iter()
        .map(|(value, rows)| (value, rows.len()))
        .collect();

    counts.sort_by(|a, b| b.1.cmp(&a.1));

    Ok(counts)
}
