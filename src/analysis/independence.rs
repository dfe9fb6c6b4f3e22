use super::AnalysisError;
use crate::datatypes::{AnyValue, DataFrame};
use crate::stats::special::chi_squared_sf;
use std::collections::HashMap;

/// Cross-tabulated counts of two categorical columns. Label order is
/// first appearance in the data; rows with a missing value in either
/// column are excluded.
#[derive(Debug, Clone)]
pub struct ContingencyTable {
    pub row_labels: Vec<AnyValue>,
    pub col_labels: Vec<AnyValue>,
    /// counts[r][c] for (row_labels[r], col_labels[c]).
    pub counts: Vec<Vec<u64>>,
}

impl ContingencyTable {
    pub fn n_rows(&self) -> usize {
        self.row_labels.len()
    }

    pub fn n_cols(&self) -> usize {
        self.col_labels.len()
    }

    pub fn grand_total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChiSquaredResult {
    pub statistic: f64,
    pub p_value: f64,
    pub dof: usize,
}

pub fn contingency_table(
    df: &DataFrame,
    row_col: &str,
    col_col: &str,
) -> Result<ContingencyTable, AnalysisError> {
    let rows = df
        .column(row_col)
        .ok_or_else(|| AnalysisError::ColumnNotFound {
            name: row_col.to_string(),
        })?;
    let cols = df
        .column(col_col)
        .ok_or_else(|| AnalysisError::ColumnNotFound {
            name: col_col.to_string(),
        })?;

    let mut row_labels: Vec<AnyValue> = Vec::new();
    let mut col_labels: Vec<AnyValue> = Vec::new();
    let mut row_slots: HashMap<AnyValue, usize> = HashMap::new();
    let mut col_slots: HashMap<AnyValue, usize> = HashMap::new();
    let mut cells: HashMap<(usize, usize), u64> = HashMap::new();

    for i in 0..df.height() {
        let (Some(r), Some(c)) = (rows.get(i), cols.get(i)) else {
            continue;
        };
        if r.is_missing() || c.is_missing() {
            continue;
        }

        let ri = *row_slots.entry(r.clone()).or_insert_with(|| {
            row_labels.push(r.clone());
            row_labels.len() - 1
        });
        let ci = *col_slots.entry(c.clone()).or_insert_with(|| {
            col_labels.push(c.clone());
            col_labels.len() - 1
        });

        *cells.entry((ri, ci)).or_insert(0) += 1;
    }

    let mut counts = vec![vec![0u64; col_labels.len()]; row_labels.len()];
    for ((ri, ci), n) in cells {
        counts[ri][ci] = n;
    }

    Ok(ContingencyTable {
        row_labels,
        col_labels,
        counts,
    })
}

/// Pearson chi-squared test of independence between two categorical
/// columns. Applies the Yates continuity correction on 2x2 tables
/// (one degree of freedom), matching the usual library default.
///
/// Fails with `DegenerateTable` when fewer than two distinct values
/// are present on either axis.
pub fn chi_squared_test(
    df: &DataFrame,
    education_col: &str,
    disease_col: &str,
) -> Result<ChiSquaredResult, AnalysisError> {
    let table = contingency_table(df, education_col, disease_col)?;

    let n_rows = table.n_rows();
    let n_cols = table.n_cols();
    if n_rows < 2 || n_cols < 2 {
        return Err(AnalysisError::DegenerateTable {
            rows: n_rows,
            cols: n_cols,
        });
    }

    let row_totals: Vec<f64> = table
        .counts
        .iter()
        .map(|row| row.iter().sum::<u64>() as f64)
        .collect();
    let col_totals: Vec<f64> = (0..n_cols)
        .map(|c| table.counts.iter().map(|row| row[c]).sum::<u64>() as f64)
        .collect();
    let grand_total = table.grand_total() as f64;

    let dof = (n_rows - 1) * (n_cols - 1);
    let correction = dof == 1;

    let mut statistic = 0.0;
    for r in 0..n_rows {
        for c in 0..n_cols {
            let expected = row_totals[r] * col_totals[c] / grand_total;
            let mut observed = table.counts[r][c] as f64;
            if correction {
                // Shift observed toward expected by half a count, never
                // past it.
                let diff = expected - observed;
                observed += diff.signum() * diff.abs().min(0.5);
            }
            let diff = observed - expected;
            statistic += diff * diff / expected;
        }
    }

    let p_value = chi_squared_sf(statistic, dof as f64);

    Ok(ChiSquaredResult {
        statistic,
        p_value,
        dof,
    })
}
