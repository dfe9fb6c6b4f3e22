use super::{sort_groups_ascending, AnalysisError};
use crate::datatypes::{AnyValue, DataFrame, DataType, Series};
use crate::stats::Welford;

/// Mean of the disease column per education level, one output row per
/// level present in the data, keys ascending. Missing disease values
/// are ignored; a level whose disease values are all missing gets NaN.
///
/// The output keeps the input column names, so for a 0/1 disease
/// column the second column reads as a prevalence rate.
pub fn disease_prevalence(
    df: &DataFrame,
    education_col: &str,
    disease_col: &str,
) -> Result<DataFrame, AnalysisError> {
    let disease = df
        .column(disease_col)
        .ok_or_else(|| AnalysisError::ColumnNotFound {
            name: disease_col.to_string(),
        })?;

    if !disease.dtype().is_numeric()
        && *disease.dtype() != DataType::Boolean
        && *disease.dtype() != DataType::Null
    {
        return Err(AnalysisError::NotNumeric {
            name: disease_col.to_string(),
            dtype: disease.dtype().clone(),
        });
    }

    let mut groups = df.group_indices(education_col)?;
    sort_groups_ascending(&mut groups);

    if groups.is_empty() {
        return Ok(DataFrame::new(vec![
            Series::empty(education_col, DataType::Null),
            Series::empty(disease_col, DataType::Float64),
        ])?);
    }

    let mut levels = Vec::with_capacity(groups.len());
    let mut means = Vec::with_capacity(groups.len());

    for (level, rows) in groups {
        let mut acc = Welford::new();
        for &row in &rows {
            if let Some(v) = disease.get(row).and_then(AnyValue::to_f64) {
                if v.is_finite() {
                    acc.update(v);
                }
            }
        }

        levels.push(level);
        means.push(AnyValue::Float64(acc.mean().unwrap_or(f64::NAN)));
    }

    Ok(DataFrame::new(vec![
        Series::new(education_col, levels)?,
        Series::new(disease_col, means)?,
    ])?)
}
