//! CLI entry point for the pellet production trends tool.
//!
//! Provides subcommands for exporting chart-ready weekly series, listing the
//! filterable facets of a production table, and printing summary statistics.

use anyhow::Result;
use clap::{Parser, Subcommand};
use pellet_trends::loader::load_records;
use pellet_trends::output::{print_json, print_pretty, write_chart_csv, write_chart_json};
use pellet_trends::pipeline::runner;
use pellet_trends::pipeline::types::{
    Facets, FilterSelection, MonthKeyFormat, PipelineOutcome, YearPolicy,
};
use pellet_trends::record::summarize;
use std::ffi::OsStr;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "pellet_trends")]
#[command(about = "A tool to chart weekly pellet plant production metrics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter, aggregate, and co-scale the table, then export chart-ready series
    Chart {
        /// Path to the production CSV (default: $PELLET_DATA, then datos_pellet.csv)
        #[arg(value_name = "CSV")]
        input: Option<String>,

        /// CSV file to write the chart rows to
        #[arg(short, long, default_value = "chart.csv")]
        output: String,

        /// Also write the full chart payload as JSON to this path
        #[arg(long)]
        json: Option<String>,

        /// Years to include (default: governed by --year-policy)
        #[arg(short = 'y', long, value_delimiter = ',')]
        years: Option<Vec<i32>>,

        /// Food types to include (default: all observed)
        #[arg(short = 't', long = "food-types", value_delimiter = ',')]
        food_types: Option<Vec<String>>,

        /// Months to include, written in the selected month format (default: all observed)
        #[arg(short = 'm', long, value_delimiter = ',')]
        months: Option<Vec<String>>,

        /// Year selection used when --years is omitted
        #[arg(long, value_enum, default_value = "latest")]
        year_policy: YearPolicy,

        /// Month label format used for filtering and axis labels
        #[arg(long, value_enum, default_value = "abbreviated")]
        month_format: MonthKeyFormat,
    },
    /// List the distinct years, food types, and months present in the table
    Facets {
        /// Path to the production CSV (default: $PELLET_DATA, then datos_pellet.csv)
        #[arg(value_name = "CSV")]
        input: Option<String>,

        /// Month label format for the listed months
        #[arg(long, value_enum, default_value = "abbreviated")]
        month_format: MonthKeyFormat,
    },
    /// Print per-metric summary statistics for the raw table
    Summary {
        /// Path to the production CSV (default: $PELLET_DATA, then datos_pellet.csv)
        #[arg(value_name = "CSV")]
        input: Option<String>,

        /// Print the summary as JSON instead of log lines
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/pellet_trends.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("pellet_trends.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Chart {
            input,
            output,
            json,
            years,
            food_types,
            months,
            year_policy,
            month_format,
        } => run_chart(
            input,
            &output,
            json,
            years,
            food_types,
            months,
            year_policy,
            month_format,
        )?,
        Commands::Facets {
            input,
            month_format,
        } => list_facets(input, month_format)?,
        Commands::Summary { input, json } => print_summary(input, json)?,
    }

    Ok(())
}

/// Resolves the input table path: explicit argument, then the PELLET_DATA
/// environment variable, then the conventional file name.
fn resolve_input(input: Option<String>) -> String {
    input
        .or_else(|| std::env::var("PELLET_DATA").ok())
        .unwrap_or_else(|| "datos_pellet.csv".to_string())
}

/// Runs one full recomputation for the resolved selection and exports the
/// chart-ready series.
#[tracing::instrument(skip_all, fields(output = %output))]
#[allow(clippy::too_many_arguments)]
fn run_chart(
    input: Option<String>,
    output: &str,
    json: Option<String>,
    years: Option<Vec<i32>>,
    food_types: Option<Vec<String>>,
    months: Option<Vec<String>>,
    year_policy: YearPolicy,
    month_format: MonthKeyFormat,
) -> Result<()> {
    let input = resolve_input(input);
    let records = load_records(&input)?;
    info!(rows = records.len(), input, "Production table loaded");

    let facets = Facets::from_records(&records, month_format);
    let selection =
        FilterSelection::resolve(&facets, years, food_types, months, year_policy, month_format);
    info!(
        years = selection.years.len(),
        food_types = selection.food_types.len(),
        months = selection.months.len(),
        "Selection resolved"
    );

    match runner::run(&records, &selection) {
        PipelineOutcome::EmptySelection => {
            warn!("No rows match the selected filters");
        }
        PipelineOutcome::Chart(chart) => {
            print_pretty(&chart);
            write_chart_csv(output, &chart)?;
            if let Some(json_path) = &json {
                write_chart_json(json_path, &chart)?;
            }
            info!(weeks = chart.points.len(), output, "Chart series written");
        }
    }

    Ok(())
}

/// Lists the distinct filterable values of the table.
fn list_facets(input: Option<String>, month_format: MonthKeyFormat) -> Result<()> {
    let input = resolve_input(input);
    let records = load_records(&input)?;
    let facets = Facets::from_records(&records, month_format);

    for year in &facets.years {
        info!(year, "Year");
    }
    for food_type in &facets.food_types {
        info!(%food_type, "Food type");
    }
    for month in &facets.months {
        info!(%month, "Month");
    }

    info!(
        rows = records.len(),
        years = facets.years.len(),
        food_types = facets.food_types.len(),
        months = facets.months.len(),
        "Facet summary"
    );

    Ok(())
}

/// Prints per-metric summary statistics for the raw table.
fn print_summary(input: Option<String>, json: bool) -> Result<()> {
    let input = resolve_input(input);
    let records = load_records(&input)?;
    let table = summarize(&records);

    if json {
        print_json(&table)?;
        return Ok(());
    }

    info!(
        rows = table.rows,
        total_tons = table.total_tons,
        input,
        "Production table loaded"
    );
    for metric in &table.metrics {
        info!(
            metric = metric.metric,
            mean = metric.mean,
            stddev = metric.stddev,
            min = metric.min,
            max = metric.max,
            "Metric summary"
        );
    }

    Ok(())
}
