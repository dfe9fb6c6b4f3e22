use crate::datatypes::{AnyValue, DataFrame};
use comfy_table::{presets::ASCII_MARKDOWN, Cell, CellAlignment, ContentArrangement, Table};
use std::io;
use thiserror::Error;

pub const DEFAULT_TITLE: &str = "Disease Prevalence by Education Level";

const BAR_WIDTH: usize = 40;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("Column not found: '{name}'")]
    ColumnNotFound { name: String },
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Renders a categorical bar chart (x = category, y = value) to the
/// given writer: title line, then one row per category with a bar
/// scaled to the largest value. The input frame is not modified.
pub fn render_bar_chart<W: io::Write>(
    df: &DataFrame,
    x_col: &str,
    y_col: &str,
    title: Option<&str>,
    out: &mut W,
) -> Result<(), PlotError> {
    let x = df.column(x_col).ok_or_else(|| PlotError::ColumnNotFound {
        name: x_col.to_string(),
    })?;
    let y = df.column(y_col).ok_or_else(|| PlotError::ColumnNotFound {
        name: y_col.to_string(),
    })?;

    let values: Vec<f64> = y
        .iter()
        .map(|v| v.to_f64().unwrap_or(f64::NAN))
        .collect();
    let max = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);

    let mut table = Table::new();
    table.load_preset(ASCII_MARKDOWN);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Education Level", "", "Disease Prevalence"]);

    for (label, value) in x.iter().zip(&values) {
        let bar_len = if max > 0.0 && value.is_finite() {
            ((value / max) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };

        table.add_row(vec![
            Cell::new(label.to_string()),
            Cell::new("#".repeat(bar_len)),
            Cell::new(format!("{value:.3}")).set_alignment(CellAlignment::Right),
        ]);
    }

    writeln!(out, "{}", title.unwrap_or(DEFAULT_TITLE))?;
    writeln!(out, "{table}")?;

    Ok(())
}

/// Convenience wrapper writing the chart to stdout.
pub fn plot_prevalence(
    df: &DataFrame,
    x_col: &str,
    y_col: &str,
    title: Option<&str>,
) -> Result<(), PlotError> {
    let mut stdout = io::stdout().lock();
    render_bar_chart(df, x_col, y_col, title, &mut stdout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatypes::Series;

    fn prevalence_frame() -> DataFrame {
        DataFrame::new(vec![
            Series::new(
                "education",
                vec![AnyValue::from("College"), AnyValue::from("HS")],
            )
            .unwrap(),
            Series::new(
                "disease",
                vec![AnyValue::Float64(1.0), AnyValue::Float64(0.5)],
            )
            .unwrap(),
        ])
        .unwrap()
    }

    fn render_to_string(df: &DataFrame, title: Option<&str>) -> String {
        let mut buf = Vec::new();
        render_bar_chart(df, "education", "disease", title, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_default_title_and_axis_labels() {
        let out = render_to_string(&prevalence_frame(), None);

        assert!(out.starts_with(DEFAULT_TITLE));
        assert!(out.contains("Education Level"));
        assert!(out.contains("Disease Prevalence"));
    }

    #[test]
    fn test_custom_title() {
        let out = render_to_string(&prevalence_frame(), Some("Prevalence by Degree"));

        assert!(out.starts_with("Prevalence by Degree"));
        assert!(!out.contains(DEFAULT_TITLE));
    }

    #[test]
    fn test_bars_scale_with_values() {
        let out = render_to_string(&prevalence_frame(), None);

        // College has the maximum (1.0): a full-width bar. HS (0.5)
        // gets half of it.
        assert!(out.contains(&"#".repeat(BAR_WIDTH)));
        assert!(out.contains(&"#".repeat(BAR_WIDTH / 2)));
        assert!(out.contains("1.000"));
        assert!(out.contains("0.500"));
    }

    #[test]
    fn test_input_not_mutated() {
        let df = prevalence_frame();
        let before = format!("{df}");
        let _ = render_to_string(&df, None);
        assert_eq!(format!("{df}"), before);
    }

    #[test]
    fn test_unknown_column_fails() {
        let df = prevalence_frame();
        let mut buf = Vec::new();

        assert!(matches!(
            render_bar_chart(&df, "education", "rate", None, &mut buf),
            Err(PlotError::ColumnNotFound { .. })
        ));
    }
}
