use epitab::{
    analyze_relationship, chi_squared_test, disease_prevalence, plot_prevalence, read_csv,
    summarize_categorical,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let mut args = std::env::args().skip(1);
    let path = args.next().unwrap_or_else(|| "data/health_survey.csv".to_string());
    let education_col = args.next().unwrap_or_else(|| "education".to_string());
    let disease_col = args.next().unwrap_or_else(|| "disease".to_string());
    let numerical_col = args.next().unwrap_or_else(|| "age".to_string());

    let Some(df) = read_csv(&path)? else {
        eprintln!("no dataset at {path}");
        return Ok(());
    };

    println!("== Education level frequencies ==");
    for (level, count) in summarize_categorical(&df, &education_col)? {
        println!("{level}: {count}");
    }

    println!("\n== Disease prevalence by education level ==");
    let prevalence = disease_prevalence(&df, &education_col, &disease_col)?;
    println!("{prevalence}");
    plot_prevalence(&prevalence, &education_col, &disease_col, None)?;

    println!("== Chi-squared test of independence ==");
    let test = chi_squared_test(&df, &education_col, &disease_col)?;
    println!(
        "statistic = {:.4}, p-value = {:.4}, dof = {}",
        test.statistic, test.p_value, test.dof
    );

    println!("\n== {numerical_col} by disease status ==");
    let comparison = analyze_relationship(&df, &numerical_col, &disease_col)?;
    println!("{comparison}");

    Ok(())
}
