//! CLI entry point for column profiling.

use anyhow::{Result, anyhow};
use clap::{Parser, ValueEnum};
use dotenv::dotenv;
use lex_profiling::{
    ProfileConfig, ProfileReport, SortBy, SummaryWriter, TableProfiler, load_table, output_path,
};
use std::path::PathBuf;
use tracing::{error, info};

/// CLI-compatible sort order enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliSortBy {
    /// Ascending by value (alphabetical / numeric)
    Index,
    /// Descending by count
    Value,
}

impl From<CliSortBy> for SortBy {
    fn from(cli: CliSortBy) -> Self {
        match cli {
            CliSortBy::Index => SortBy::Index,
            CliSortBy::Value => SortBy::Value,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    author = "Lex Machina Team",
    version,
    about = "Column-by-column data profiling",
    long_about = "Infers the type of every column in a table and summarizes its values\n\
                  as exact value counts or ten equal-width frequency bins.\n\n\
                  EXAMPLES:\n  \
                  # Percentages, sorted alphabetically\n  \
                  lex-profiling -i data.csv\n\n  \
                  # Raw counts, most frequent first\n  \
                  lex-profiling -i data.csv --counts --sort-by value\n\n  \
                  # Print the report as JSON\n  \
                  lex-profiling -i data.tsv --json"
)]
struct Args {
    /// Path to the table to profile (.csv, .tsv, .txt, .xls or .xlsx)
    #[arg(short, long)]
    input: PathBuf,

    /// Output directory (defaults to the input's directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Row order of value-count summaries
    #[arg(long, value_enum, default_value = "index")]
    sort_by: CliSortBy,

    /// Report raw counts instead of fractions of the row count
    #[arg(long)]
    counts: bool,

    /// Empty columns between side-by-side summaries
    #[arg(long, default_value = "1")]
    spacer: usize,

    /// Prefix of the written file name
    #[arg(long, default_value = "profiled_")]
    prefix: String,

    /// JSON configuration file; replaces the sort, count, spacer and prefix flags
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Keep profiling when a column fails, listing failures at the end
    #[arg(long)]
    lenient: bool,

    /// Print the report as JSON to stdout instead of writing a sheet
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show warnings and errors)
    #[arg(short, long)]
    quiet: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is disabled so stdout only carries JSON.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    dotenv().ok();

    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    if !args.input.exists() && args.input.extension().is_some() {
        return Err(anyhow!("Input file not found: {}", args.input.display()));
    }

    let mut config = match args.config {
        Some(ref file) => {
            info!("Loading configuration from: {}", file.display());
            ProfileConfig::from_json_file(file)?
        }
        None => ProfileConfig::builder()
            .sort_by(args.sort_by.into())
            .normalize(!args.counts)
            .spacer_columns(args.spacer)
            .output_prefix(&args.prefix)
            .build()?,
    };

    if let Some(ref dir) = args.output {
        config.output_dir = Some(dir.clone());
    }

    let data = load_table(&args.input)?;

    let profiler = TableProfiler::new(config.clone());
    let result = if args.lenient {
        profiler.profile_lenient(&data)
    } else {
        profiler.profile(&data)
    };

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            error!("Profiling failed: {}", e);
            return Err(anyhow!("Profiling failed: {}", e));
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let path = output_path(&args.input, &config);
    SummaryWriter::from_config(&config).write(&report, &path)?;

    if !args.quiet {
        print_column_overview(&report);
    }
    println!("file saved: {}", path.display());

    if !report.failures.is_empty() {
        info!("{} column(s) could not be profiled", report.failures.len());
    }

    Ok(())
}

/// Print one line per profiled column, plus any lenient-mode failures.
///
/// Uses `println!` intentionally: this is the command's primary output.
fn print_column_overview(report: &ProfileReport) {
    println!(
        "{:<24} {:<10} {:<14} {:<8} {:<8}",
        "Column", "Type", "Mode", "Rows", "Missing"
    );
    println!("{}", "-".repeat(68));

    for column in &report.columns {
        println!(
            "{:<24} {:<10} {:<14} {:<8} {:<8}",
            truncate_str(&column.name, 23),
            column.column_type,
            format!("{:?}", column.summary.mode),
            column.row_count,
            column.missing_count
        );
    }

    for failure in &report.failures {
        println!("  ! {} [{}]: {}", failure.column, failure.code, failure.message);
    }
    println!();
}

/// Truncate a string to max length (in characters) with ellipsis
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
