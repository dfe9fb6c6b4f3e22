use crate::datatypes::series::{AnyValue, Series, SeriesError};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::ops::Index;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct DataFrame {
    columns: Vec<Series>,
}

#[derive(Debug, Error)]
pub enum DataFrameError {
    #[error("Column lengths mismatch: expected {expected}, found {found} for column '{column}'")]
    LengthMismatch {
        expected: usize,
        found: usize,
        column: String,
    },
    #[error("Duplicate column name: '{name}'")]
    DuplicateColumn { name: String },
    #[error("Column not found: '{name}'")]
    ColumnNotFound { name: String },
    #[error("Series error: {0}")]
    SeriesError(#[from] SeriesError),
}

impl DataFrame {
    pub fn new(columns: Vec<Series>) -> Result<Self, DataFrameError> {
        if columns.is_empty() {
            return Ok(DataFrame {
                columns: Vec::new(),
            });
        }

        let mut seen = HashSet::new();
        if let Some(dup) = columns.iter().find(|c| !seen.insert(c.name().to_string())) {
            return Err(DataFrameError::DuplicateColumn {
                name: dup.name().to_string(),
            });
        }

        if let Some(first) = columns.first() {
            let expected = first.len();

            if let Some(col) = columns.iter().find(|c| c.len() != expected) {
                return Err(DataFrameError::LengthMismatch {
                    expected,
                    found: col.len(),
                    column: col.name().to_string(),
                });
            }
        }

        Ok(DataFrame { columns })
    }

    pub fn empty() -> Self {
        DataFrame {
            columns: Vec::new(),
        }
    }

    pub fn height(&self) -> usize {
        if self.columns.is_empty() {
            return 0;
        }

        self.columns[0].len()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.height(), self.width())
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<&Series> {
        self.columns.iter().find(|s| s.name() == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|s| s.name()).collect()
    }

    pub fn columns(&self) -> &[Series] {
        self.columns.as_slice()
    }

    /// Row indices per distinct value of `key`, groups in first-appearance
    /// order. Rows with a missing key (null or NaN) belong to no group.
    pub fn group_indices(&self, key: &str) -> Result<Vec<(AnyValue, Vec<usize>)>, DataFrameError> {
        let series = self
            .column(key)
            .ok_or_else(|| DataFrameError::ColumnNotFound {
                name: key.to_string(),
            })?;

        let mut groups: Vec<(AnyValue, Vec<usize>)> = Vec::new();
        let mut slots: HashMap<AnyValue, usize> = HashMap::new();

        for (row, value) in series.iter().enumerate() {
            if value.is_missing() {
                continue;
            }

            match slots.get(value) {
                Some(&slot) => groups[slot].1.push(row),
                None => {
                    slots.insert(value.clone(), groups.len());
                    groups.push((value.clone(), vec![row]));
                }
            }
        }

        Ok(groups)
    }
}

impl fmt::Display for DataFrame {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "empty DataFrame");
        }

        for s in &self.columns {
            write!(f, "[{}]", s.name())?;
            for value in s.iter().take(10) {
                write!(f, "[{}]", value)?;
            }
            if s.len() > 10 {
                write!(f, "...")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl Index<&str> for DataFrame {
    type Output = Series;

    fn index(&self, column_name: &str) -> &Self::Output {
        self.column(column_name).unwrap_or_else(|| {
            panic!(
                "{}",
                DataFrameError::ColumnNotFound {
                    name: column_name.to_string()
                }
            )
        })
    }
}
