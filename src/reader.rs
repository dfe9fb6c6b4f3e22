use crate::datatypes::{AnyValue, DataFrame, DataFrameError, DataType, Series, SeriesError};
use csv::{ReaderBuilder, Trim};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Series(#[from] SeriesError),
    #[error(transparent)]
    DataFrame(#[from] DataFrameError),
}

/// Loads a CSV file (header row required) into a `DataFrame`, inferring
/// one dtype per column.
///
/// A missing file is the one recoverable case: it is logged and
/// surfaced as `Ok(None)`, so callers must check for the absent
/// dataset. Any other failure (ragged rows, IO errors, unreadable
/// data) is fatal and propagates as `Err`.
pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Option<DataFrame>, ReadError> {
    let path = path.as_ref();

    if !path.exists() {
        log::warn!("file not found: {}", path.display());
        return Ok(None);
    }

    log::info!("loading {}", path.display());

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_path(path)?;

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record = record?;
        for (i, field) in record.iter().enumerate() {
            cells[i].push(field.to_string());
        }
    }

    let mut columns = Vec::with_capacity(headers.len());
    for (name, column) in headers.iter().zip(&cells) {
        columns.push(build_series(name, column)?);
    }

    let df = DataFrame::new(columns)?;

    let (rows, cols) = df.shape();
    log::info!("loaded {} rows x {} columns", rows, cols);
    log::info!("columns: {:?}", df.column_names());
    for series in df.columns() {
        log::info!("  {}: {} ({} non-null)", series.name(), series.dtype(), series.count_valid());
    }

    Ok(Some(df))
}

fn build_series(name: &str, cells: &[String]) -> Result<Series, SeriesError> {
    if cells.is_empty() {
        return Ok(Series::empty(name, DataType::Null));
    }

    let dtype = infer_dtype(cells);
    let data = cells.iter().map(|cell| parse_cell(cell, &dtype)).collect();
    Series::new(name, data)
}

/// Narrowest dtype every non-empty cell fits: Boolean before Int64
/// before Float64, String as the fallback.
fn infer_dtype(cells: &[String]) -> DataType {
    let mut seen_any = false;
    let mut all_int = true;
    let mut all_float = true;
    let mut all_bool = true;

    for cell in cells {
        if cell.is_empty() {
            continue;
        }
        seen_any = true;
        all_int &= cell.parse::<i64>().is_ok();
        all_float &= cell.parse::<f64>().is_ok();
        all_bool &= cell.eq_ignore_ascii_case("true") || cell.eq_ignore_ascii_case("false");
    }

    if !seen_any {
        DataType::Null
    } else if all_bool {
        DataType::Boolean
    } else if all_int {
        DataType::Int64
    } else if all_float {
        DataType::Float64
    } else {
        DataType::String
    }
}

fn parse_cell(cell: &str, dtype: &DataType) -> AnyValue {
    if cell.is_empty() {
        return AnyValue::Null;
    }

    // Inference already proved every non-empty cell parses, so the
    // fallbacks below are unreachable.
    match dtype {
        DataType::Boolean => AnyValue::Boolean(cell.eq_ignore_ascii_case("true")),
        DataType::Int64 => cell.parse::<i64>().map(AnyValue::Int64).unwrap_or(AnyValue::Null),
        DataType::Float64 => cell.parse::<f64>().map(AnyValue::Float64).unwrap_or(AnyValue::Null),
        DataType::String | DataType::Null => AnyValue::String(cell.to_string()),
    }
}
