pub mod dataframe;
pub mod series;

pub use dataframe::{DataFrame, DataFrameError};
pub use series::{AnyValue, DataType, Series, SeriesError};
