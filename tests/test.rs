use epitab::{
    analyze_relationship, chi_squared_test, contingency_table, disease_prevalence, read_csv,
    render_bar_chart, summarize_categorical, AnalysisError, AnyValue, DataType,
};
use std::io::Write;

/* ---------- fixture ---------- */

const SURVEY_CSV: &str = "\
education,disease,age
HS,1,34
HS,0,41
College,1,29
College,0,33
College,0,27
Grad,0,52
Grad,0,48
HS,1,39
HS,0,45
Grad,1,61
";

fn write_csv(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/* ---------- loader ---------- */

#[test]
fn load_reports_shape_and_schema() {
    let file = write_csv(SURVEY_CSV);
    let df = read_csv(file.path()).unwrap().expect("dataset present");

    assert_eq!(df.shape(), (10, 3));
    assert_eq!(df.column_names(), vec!["education", "disease", "age"]);
    assert_eq!(*df["education"].dtype(), DataType::String);
    assert_eq!(*df["disease"].dtype(), DataType::Int64);
    assert_eq!(*df["age"].dtype(), DataType::Int64);
}

#[test]
fn load_missing_file_yields_sentinel() {
    let result = read_csv("/no/such/dir/survey.csv").unwrap();
    assert!(result.is_none());
}

/* ---------- full pipeline ---------- */

#[test]
fn frequency_counts_sum_to_non_missing_rows() {
    let file = write_csv(SURVEY_CSV);
    let df = read_csv(file.path()).unwrap().unwrap();

    let counts = summarize_categorical(&df, "education").unwrap();

    assert_eq!(counts[0], (AnyValue::from("HS"), 4));
    let total: usize = counts.iter().map(|(_, c)| c).sum();
    assert_eq!(total, df["education"].count_valid());

    // Descending counts.
    for pair in counts.windows(2) {
        assert!(pair[0].1 >= pair[1].1);
    }
}

#[test]
fn prevalence_matches_hand_computation() {
    let file = write_csv(SURVEY_CSV);
    let df = read_csv(file.path()).unwrap().unwrap();

    let result = disease_prevalence(&df, "education", "disease").unwrap();

    // One row per level present, keys ascending.
    assert_eq!(result.height(), 3);
    let levels: Vec<String> = result["education"].iter().map(|v| v.to_string()).collect();
    assert_eq!(levels, vec!["College", "Grad", "HS"]);

    let rates: Vec<f64> = result["disease"]
        .iter()
        .map(|v| v.to_f64().unwrap())
        .collect();
    assert!((rates[0] - 1.0 / 3.0).abs() < 1e-12); // College: 1 of 3
    assert!((rates[1] - 1.0 / 3.0).abs() < 1e-12); // Grad: 1 of 3
    assert!((rates[2] - 0.5).abs() < 1e-12); // HS: 2 of 4

    for r in rates {
        assert!((0.0..=1.0).contains(&r));
    }
}

#[test]
fn end_to_end_three_row_example() {
    let file = write_csv("education,disease\nHS,1\nHS,0\nCollege,1\n");
    let df = read_csv(file.path()).unwrap().unwrap();

    let prevalence = disease_prevalence(&df, "education", "disease").unwrap();
    assert_eq!(prevalence["education"][0], AnyValue::from("College"));
    assert_eq!(prevalence["disease"][0], AnyValue::Float64(1.0));
    assert_eq!(prevalence["education"][1], AnyValue::from("HS"));
    assert_eq!(prevalence["disease"][1], AnyValue::Float64(0.5));

    let counts = summarize_categorical(&df, "education").unwrap();
    assert_eq!(counts, vec![(AnyValue::from("HS"), 2), (AnyValue::from("College"), 1)]);
}

#[test]
fn independence_test_on_survey() {
    let file = write_csv(SURVEY_CSV);
    let df = read_csv(file.path()).unwrap().unwrap();

    let table = contingency_table(&df, "education", "disease").unwrap();
    assert_eq!(table.n_rows(), 3);
    assert_eq!(table.n_cols(), 2);
    assert_eq!(table.grand_total(), 10);

    let result = chi_squared_test(&df, "education", "disease").unwrap();
    assert_eq!(result.dof, (3 - 1) * (2 - 1));
    assert!(result.statistic >= 0.0);
    assert!((0.0..=1.0).contains(&result.p_value));
}

#[test]
fn independence_test_degenerate_table_fails() {
    let file = write_csv("education,disease\nHS,1\nHS,0\n");
    let df = read_csv(file.path()).unwrap().unwrap();

    assert!(matches!(
        chi_squared_test(&df, "education", "disease"),
        Err(AnalysisError::DegenerateTable { .. })
    ));
}

#[test]
fn comparison_partitions_cover_all_rows() {
    let file = write_csv(SURVEY_CSV);
    let df = read_csv(file.path()).unwrap().unwrap();

    let result = analyze_relationship(&df, "age", "disease").unwrap();

    assert_eq!(result.column_names(), vec!["disease", "Age Mean", "Age Std"]);
    assert_eq!(result.height(), 2);

    let groups = df.group_indices("disease").unwrap();
    let total: usize = groups.iter().map(|(_, rows)| rows.len()).sum();
    assert_eq!(total, df["age"].count_valid());

    // disease = 0: ages 41, 33, 27, 52, 48, 45 -> mean 41.
    assert_eq!(result["disease"][0], AnyValue::Int64(0));
    assert!((result["Age Mean"][0].to_f64().unwrap() - 41.0).abs() < 1e-12);
    // disease = 1: ages 34, 29, 39, 61 -> mean 40.75.
    assert!((result["Age Mean"][1].to_f64().unwrap() - 40.75).abs() < 1e-12);
}

#[test]
fn chart_renders_from_loaded_prevalence() {
    let file = write_csv(SURVEY_CSV);
    let df = read_csv(file.path()).unwrap().unwrap();
    let prevalence = disease_prevalence(&df, "education", "disease").unwrap();

    let mut buf = Vec::new();
    render_bar_chart(&prevalence, "education", "disease", None, &mut buf).unwrap();
    let out = String::from_utf8(buf).unwrap();

    assert!(out.contains("Disease Prevalence by Education Level"));
    for level in ["College", "Grad", "HS"] {
        assert!(out.contains(level), "missing {level} in chart output");
    }
}

/* ---------- missing data across the pipeline ---------- */

#[test]
fn pipeline_handles_missing_cells() {
    let file = write_csv(
        "education,disease,age\n\
         HS,1,34\n\
         ,0,29\n\
         HS,,41\n\
         College,0,\n\
         College,1,50\n",
    );
    let df = read_csv(file.path()).unwrap().unwrap();

    // Null education row is not counted or grouped.
    let counts = summarize_categorical(&df, "education").unwrap();
    let total: usize = counts.iter().map(|(_, c)| c).sum();
    assert_eq!(total, 4);

    // HS prevalence uses only its one non-missing disease value.
    let prevalence = disease_prevalence(&df, "education", "disease").unwrap();
    assert_eq!(prevalence["education"][1], AnyValue::from("HS"));
    assert_eq!(prevalence["disease"][1], AnyValue::Float64(1.0));

    // Contingency table drops rows missing either key.
    let table = contingency_table(&df, "education", "disease").unwrap();
    assert_eq!(table.grand_total(), 3);
}
