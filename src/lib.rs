//! Exploratory analysis of education level vs. disease prevalence in
//! tabular CSV data: load, categorical summary, group-wise prevalence,
//! bar-chart rendering, chi-squared independence test, and numeric
//! comparison across disease-status groups.

pub mod analysis;
pub mod datatypes;
pub mod plot;
pub mod reader;
pub mod stats;

pub use analysis::{
    analyze_relationship, chi_squared_test, contingency_table, disease_prevalence,
    summarize_categorical, AnalysisError, ChiSquaredResult, ContingencyTable,
};
pub use datatypes::{AnyValue, DataFrame, DataType, Series};
pub use plot::{plot_prevalence, render_bar_chart, PlotError};
pub use reader::{read_csv, ReadError};
