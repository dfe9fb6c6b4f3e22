use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Index;
use thiserror::Error;

#[derive(Debug, Clone)]
pub enum AnyValue {
    Null,
    Int64(i64),
    Float64(f64),
    String(String),
    Boolean(bool),
}

impl AnyValue {
    pub fn is_null(&self) -> bool {
        self.data_type() == DataType::Null
    }

    /// Null, or a float NaN. Grouping and aggregation skip these.
    pub fn is_missing(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Float64(v) => v.is_nan(),
            _ => false,
        }
    }

    pub fn data_type(&self) -> DataType {
        match self {
            Self::Null => DataType::Null,
            Self::Int64(_) => DataType::Int64,
            Self::Float64(_) => DataType::Float64,
            Self::String(_) => DataType::String,
            Self::Boolean(_) => DataType::Boolean,
        }
    }

    /// Numeric view of the value; booleans count as 0/1 so that a
    /// true/false disease column can still be averaged.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Self::Int64(v) => Some(*v as f64),
            Self::Float64(v) => Some(*v),
            Self::Boolean(v) => Some(if *v { 1.0 } else { 0.0 }),
            _ => None,
        }
    }
}

impl From<i64> for AnyValue {
    fn from(item: i64) -> Self {
        AnyValue::Int64(item)
    }
}

impl From<f64> for AnyValue {
    fn from(item: f64) -> Self {
        AnyValue::Float64(item)
    }
}

impl From<String> for AnyValue {
    fn from(item: String) -> Self {
        AnyValue::String(item)
    }
}

impl From<&str> for AnyValue {
    fn from(item: &str) -> Self {
        AnyValue::String(item.to_string())
    }
}

impl From<bool> for AnyValue {
    fn from(item: bool) -> Self {
        AnyValue::Boolean(item)
    }
}

impl fmt::Display for AnyValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Int64(v) => write!(f, "{}", v),
            Self::Float64(v) => write!(f, "{}", v),
            Self::String(v) => write!(f, "{}", v),
            Self::Boolean(v) => write!(f, "{}", v),
        }
    }
}

impl Hash for AnyValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            AnyValue::Null => 0.hash(state),
            AnyValue::Int64(v) => v.hash(state),
            // Normalize -0.0 so the hash agrees with ==.
            AnyValue::Float64(v) => (v + 0.0).to_bits().hash(state),
            AnyValue::String(v) => v.hash(state),
            AnyValue::Boolean(v) => v.hash(state),
        }
    }
}

impl Eq for AnyValue {}

impl PartialEq for AnyValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (AnyValue::Null, AnyValue::Null) => true,
            (AnyValue::Int64(a), AnyValue::Int64(b)) => a == b,
            (AnyValue::Float64(a), AnyValue::Float64(b)) => a == b,
            (AnyValue::String(a), AnyValue::String(b)) => a == b,
            (AnyValue::Boolean(a), AnyValue::Boolean(b)) => a == b,
            _ => false,
        }
    }
}

impl PartialOrd for AnyValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        use std::cmp::Ordering;

        match (self, other) {
            (AnyValue::Null, AnyValue::Null) => Some(Ordering::Equal),
            (AnyValue::Null, _) => Some(Ordering::Less),
            (_, AnyValue::Null) => Some(Ordering::Greater),

            (AnyValue::Int64(a), AnyValue::Int64(b)) => a.partial_cmp(b),
            (AnyValue::Float64(a), AnyValue::Float64(b)) => a.partial_cmp(b),
            (AnyValue::String(a), AnyValue::String(b)) => a.partial_cmp(b),
            (AnyValue::Boolean(a), AnyValue::Boolean(b)) => a.partial_cmp(b),

            (AnyValue::Int64(a), AnyValue::Float64(b)) => (*a as f64).partial_cmp(b),
            (AnyValue::Float64(a), AnyValue::Int64(b)) => a.partial_cmp(&(*b as f64)),

            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Series {
    name: String,
    data: Vec<AnyValue>,
    dtype: DataType,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DataType {
    Int64,
    Float64,
    String,
    Boolean,
    Null,
}

impl DataType {
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Int64 | Self::Float64)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Null => write!(f, "Null"),
            Self::Int64 => write!(f, "Int64"),
            Self::Float64 => write!(f, "Float64"),
            Self::String => write!(f, "String"),
            Self::Boolean => write!(f, "Boolean"),
        }
    }
}

#[derive(Debug, Error)]
pub enum SeriesError {
    #[error("Mixed types in series: expected {expected:?}, found {found:?}")]
    MixedTypes { expected: DataType, found: DataType },
    #[error("Empty series not allowed")]
    EmptyData,
    #[error("Index {index} out of bounds for series of length {length}")]
    OutOfBounds { index: usize, length: usize },
}

impl Series {
    pub fn new(name: &str, data: Vec<AnyValue>) -> Result<Self, SeriesError> {
        if data.is_empty() {
            return Err(SeriesError::EmptyData);
        }

        let mut dtype = None;
        for value in &data {
            if !value.is_null() {
                dtype = Some(value.data_type());
                break;
            }
        }

        let mut dtype = dtype.unwrap_or(DataType::Null);

        for value in &data {
            if !value.is_null() {
                let current_type = value.data_type();
                if !Self::are_types_compatible(&dtype, &current_type) {
                    return Err(SeriesError::MixedTypes {
                        expected: dtype,
                        found: current_type,
                    });
                }

                if dtype == DataType::Int64 && current_type == DataType::Float64 {
                    dtype = DataType::Float64;
                }
            }
        }

        Ok(Series {
            name: name.to_string(),
            data,
            dtype,
        })
    }

    pub fn empty(name: &str, dtype: DataType) -> Self {
        Series {
            name: name.to_string(),
            data: vec![],
            dtype,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn dtype(&self) -> &DataType {
        &self.dtype
    }

    pub fn get(&self, index: usize) -> Option<&AnyValue> {
        self.data.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<AnyValue> {
        self.data.iter()
    }

    /// Number of non-missing values in the column.
    pub fn count_valid(&self) -> usize {
        self.data.iter().filter(|v| !v.is_missing()).count()
    }

    fn are_types_compatible(expected: &DataType, found: &DataType) -> bool {
        if expected == found {
            return true;
        }

        matches!(
            (expected, found),
            (DataType::Int64, DataType::Float64) | (DataType::Float64, DataType::Int64)
        )
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Series: {} [{}; {}]",
            self.name(),
            self.dtype(),
            self.len()
        )
    }
}

impl Index<usize> for Series {
    type Output = AnyValue;

    fn index(&self, index: usize) -> &Self::Output {
        if index >= self.len() {
            panic!(
                "{}",
                SeriesError::OutOfBounds {
                    index,
                    length: self.len()
                }
            );
        }
        &self.data[index]
    }
}
