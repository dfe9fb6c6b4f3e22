use super::{sort_groups_ascending, AnalysisError};
use crate::datatypes::{AnyValue, DataFrame, DataType, Series};
use crate::stats::Welford;

/// Mean and sample standard deviation (n − 1) of a numeric column per
/// disease-status group, keys ascending. A single-observation group
/// has an undefined standard deviation and reports NaN.
///
/// The output columns are always labeled "Age Mean" and "Age Std",
/// whatever the numeric column actually holds. Historical quirk of
/// this analysis, kept on purpose.
pub fn analyze_relationship(
    df: &DataFrame,
    numerical_col: &str,
    disease_col: &str,
) -> Result<DataFrame, AnalysisError> {
    let numeric = df
        .column(numerical_col)
        .ok_or_else(|| AnalysisError::ColumnNotFound {
            name: numerical_col.to_string(),
        })?;

    if !numeric.dtype().is_numeric() && *numeric.dtype() != DataType::Null {
        return Err(AnalysisError::NotNumeric {
            name: numerical_col.to_string(),
            dtype: numeric.dtype().clone(),
        });
    }

    let mut groups = df.group_indices(disease_col)?;
    sort_groups_ascending(&mut groups);

    if groups.is_empty() {
        return Ok(DataFrame::new(vec![
            Series::empty(disease_col, DataType::Null),
            Series::empty("Age Mean", DataType::Float64),
            Series::empty("Age Std", DataType::Float64),
        ])?);
    }

    let mut statuses = Vec::with_capacity(groups.len());
    let mut means = Vec::with_capacity(groups.len());
    let mut stds = Vec::with_capacity(groups.len());

    for (status, rows) in groups {
        let mut acc = Welford::new();
        for &row in &rows {
            if let Some(v) = numeric.get(row).and_then(AnyValue::to_f64) {
                if v.is_finite() {
                    acc.update(v);
                }
            }
        }

        statuses.push(status);
        means.push(AnyValue::Float64(acc.mean().unwrap_or(f64::NAN)));
        stds.push(AnyValue::Float64(acc.sample_std().unwrap_or(f64::NAN)));
    }

    Ok(DataFrame::new(vec![
        Series::new(disease_col, statuses)?,
        Series::new("Age Mean", means)?,
        Series::new("Age Std", stds)?,
    ])?)
}
