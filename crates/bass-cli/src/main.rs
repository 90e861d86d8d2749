//! BASS report CLI

use anyhow::{bail, Context, Result};
use bass_polars::{
    aggregates_to_frame, anova_to_frame, column_names, load_csv, DashboardConfig, DatasetInfo,
    ReportExt, Selection, MAX_GROUPING,
};
use clap::{Parser, Subcommand};
use polars::prelude::DataFrame;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bass-report")]
#[command(about = "Descriptive statistics, ANOVA and charts for the BASS dataset")]
#[command(version)]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    /// Dataset (CSV with a header row)
    #[arg(short, long, global = true, default_value = "bass_data.csv")]
    data: PathBuf,

    /// Dashboard configuration (JSON); built-in defaults when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Number of rows and columns in the dataset
    Info,

    /// Analysis variables and grouping options
    Variables,

    /// Describe a variable, fit the ANOVA and lay out the bar chart
    Report {
        /// Variable to analyse. Defaults to the configured default variable.
        target: Option<String>,

        /// Grouping column (repeat for two)
        #[arg(short, long = "group")]
        groups: Vec<String>,

        /// Group by the version column first
        #[arg(long)]
        by_version: bool,

        /// Keep only rows where COLUMN equals VALUE
        #[arg(long, value_name = "COLUMN=VALUE", value_parser = parse_filter)]
        filter: Option<(String, String)>,

        /// Put the second grouping column on the x-axis
        #[arg(long)]
        swap: bool,

        /// Write the bar chart as SVG
        #[arg(long)]
        chart: Option<PathBuf>,

        /// Print the report as JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// "mean (SD)" of every analysis variable, overall and per group
    Summary {
        /// Grouping column. Defaults to the configured summary column.
        #[arg(long)]
        group_by: Option<String>,

        /// Variables to include. Defaults to every analysis variable.
        variables: Vec<String>,
    },

    /// Scatterplot of two variables with Pearson r
    Scatter {
        /// x variable. Defaults to the configured scatter variable.
        #[arg(long)]
        x: Option<String>,

        #[arg(long)]
        y: String,

        /// Write the scatterplot as SVG
        #[arg(long)]
        chart: Option<PathBuf>,
    },
}

fn parse_filter(s: &str) -> std::result::Result<(String, String), String> {
    match s.split_once('=') {
        Some((column, value)) if !column.trim().is_empty() => {
            Ok((column.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected COLUMN=VALUE, got '{s}'")),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level.as_str()));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    let config = match &cli.config {
        Some(path) => DashboardConfig::from_json_file(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => DashboardConfig::default(),
    };
    let df = load_csv(&cli.data).with_context(|| format!("loading {}", cli.data.display()))?;

    match cli.command {
        Commands::Info => cmd_info(&df),
        Commands::Variables => cmd_variables(&df, &config),
        Commands::Report { target, groups, by_version, filter, swap, chart, json } => {
            let target = match target {
                Some(t) => t,
                None => config.default_variable(&df)?,
            };
            let mut grouping = Vec::with_capacity(MAX_GROUPING);
            if by_version {
                grouping.push(config.version_column.clone());
            }
            grouping.extend(groups);

            let mut selection = grouping
                .into_iter()
                .fold(Selection::new(target), |s, g| s.group_by(g))
                .swapped(swap);
            if let Some((column, value)) = filter {
                selection = selection.with_filter(column, value);
            }
            cmd_report(&df, &config, &selection, chart.as_ref(), json)
        }
        Commands::Summary { group_by, variables } => {
            let group_by = group_by.unwrap_or_else(|| config.summary_group_by.clone());
            let variables = if variables.is_empty() {
                config.analysis_variables(&df)
            } else {
                variables
            };
            cmd_summary(&df, &variables, &group_by)
        }
        Commands::Scatter { x, y, chart } => {
            let x = match x.or_else(|| config.default_scatter_x.clone()) {
                Some(x) => x,
                None => bail!("no x variable given and none configured"),
            };
            cmd_scatter(&df, &x, &y, chart.as_ref())
        }
    }
}

fn cmd_info(df: &DataFrame) -> Result<()> {
    let info = DatasetInfo::of(df);
    println!("Number of rows: {}", info.rows);
    println!("Number of columns: {}", info.columns);
    Ok(())
}

fn cmd_variables(df: &DataFrame, config: &DashboardConfig) -> Result<()> {
    println!("Analysis variables:");
    for variable in config.analysis_variables(df) {
        println!("  {variable}");
    }

    let columns = column_names(df);
    println!("Grouping options:");
    for option in &config.grouping_options {
        let marker = if columns.contains(&option.column) { "" } else { " (not in dataset)" };
        println!("  {} - {}{marker}", option.column, option.label);
    }
    Ok(())
}

fn cmd_report(
    df: &DataFrame,
    config: &DashboardConfig,
    selection: &Selection,
    chart: Option<&PathBuf>,
    json: bool,
) -> Result<()> {
    let report = df.report(selection)?;

    if let (Some(path), Some(spec)) = (chart, &report.chart) {
        bass_viz::render_bar_chart(spec, path)?;
        info!(path = %path.display(), "bar chart written");
    } else if chart.is_some() {
        bail!("a bar chart needs at least one grouping column");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", selection.target);
    println!("{}\n", config.describe_variable(&selection.target));
    println!("Descriptive statistics");
    println!("{}", report.descriptives.to_frame()?);

    if let Some(anova) = &report.anova {
        let labels: Vec<&str> = selection
            .grouping
            .iter()
            .map(|g| config.grouping_label(g))
            .collect();
        println!("\nANOVA by {}", labels.join(", "));
        println!("{}", anova_to_frame(anova)?);
    }
    if !selection.grouping.is_empty() {
        println!("\nMeans and standard errors");
        println!("{}", aggregates_to_frame(&selection.grouping, &report.aggregates)?);
    }
    Ok(())
}

fn cmd_summary(df: &DataFrame, variables: &[String], group_by: &str) -> Result<()> {
    let variables: Vec<&str> = variables.iter().map(String::as_str).collect();
    let table = df.summary_table(&variables, group_by)?;
    println!("{}", table.to_frame()?);
    Ok(())
}

fn cmd_scatter(df: &DataFrame, x: &str, y: &str, chart: Option<&PathBuf>) -> Result<()> {
    let spec = df.scatter(x, y)?;
    match spec.pearson_r {
        Some(r) => println!("{}: r = {r:.3} (n = {})", spec.title, spec.n),
        None => println!("{}: r undefined (n = {})", spec.title, spec.n),
    }
    if let Some(path) = chart {
        bass_viz::render_scatter(&spec, path)?;
        info!(path = %path.display(), "scatterplot written");
    }
    Ok(())
}
