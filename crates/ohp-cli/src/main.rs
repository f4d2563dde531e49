mod config;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use ohp_core::{mergesort, ColumnPolicy, Table};
use ohp_csv::{OutputLayout, SaveOptions};

#[derive(Parser)]
#[command(
    name = "ohp",
    version,
    about = "Interview exercises: CSV outer joins, least squares, sqrt and merge sort"
)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Left outer join of two or more CSV files
    Join {
        /// Input files; the first one is the pivot table
        #[arg(required = true)]
        csvs: Vec<PathBuf>,

        /// Name of the join column
        #[arg(long)]
        on: String,

        /// Join operator (only "left" is supported)
        #[arg(long, default_value = "left")]
        operator: String,

        /// Output file, overwritten if it exists
        #[arg(short, long)]
        save_as: Option<PathBuf>,

        /// Output layout
        #[arg(short, long)]
        layout: Option<CliLayout>,

        /// Filler for sentinel rows when nothing matches
        #[arg(short, long)]
        placeholder: Option<String>,

        /// Prefix output columns with their source table name
        #[arg(long)]
        prefix_columns: bool,

        /// Print the merged table as JSON
        #[arg(long)]
        json: bool,
    },

    /// Least-squares linear regression over an x,y CSV file
    Regress {
        /// Two-column CSV file with a header line
        csv: PathBuf,

        /// Print the fit as JSON
        #[arg(long)]
        json: bool,
    },

    /// Square root by Newton's method
    Sqrt {
        #[arg(allow_negative_numbers = true)]
        n: f64,

        /// Decimal digits of precision
        #[arg(short, long)]
        precision: Option<u32>,
    },

    /// Merge sort a list of numbers
    Sort {
        #[arg(allow_negative_numbers = true)]
        values: Vec<f64>,
    },

    /// Show the resolved configuration
    Config,
}

#[derive(Clone, Copy, ValueEnum)]
enum CliLayout {
    Csv,
    Flattened,
}

impl From<CliLayout> for OutputLayout {
    fn from(val: CliLayout) -> Self {
        match val {
            CliLayout::Csv => OutputLayout::Csv,
            CliLayout::Flattened => OutputLayout::Flattened,
        }
    }
}

/// `RUST_LOG` directives when set, WARN otherwise.
fn log_filter(directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(directives)
}

fn main() -> Result<()> {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(&directives))
        .init();

    let cli = Cli::parse();
    let cfg = config::load_config(cli.config.as_deref())?;
    tracing::debug!("config: {}", config::show_config_path(cli.config.as_deref()));

    match cli.command {
        Commands::Join {
            csvs,
            on,
            operator,
            save_as,
            layout,
            placeholder,
            prefix_columns,
            json,
        } => {
            let mut options = cfg.join_options();
            if let Some(p) = placeholder {
                options.placeholder = p;
            }
            if prefix_columns {
                options.columns = ColumnPolicy::Prefix;
            }
            let save = SaveOptions {
                path: save_as.unwrap_or_else(|| PathBuf::from(&cfg.join.save_as)),
                layout: layout.map_or(cfg.output.layout, Into::into),
                create_dirs: true,
            };
            cmd_join(&csvs, &on, &operator, &save, &options, json)
        }
        Commands::Regress { csv, json } => cmd_regress(&csv, json),
        Commands::Sqrt { n, precision } => {
            cmd_sqrt(n, precision.unwrap_or(cfg.numeric.precision))
        }
        Commands::Sort { values } => cmd_sort(&values),
        Commands::Config => cmd_config(&cfg, cli.config.as_deref()),
    }
}

fn cmd_join(
    csvs: &[PathBuf],
    on: &str,
    operator: &str,
    save: &SaveOptions,
    options: &ohp_core::JoinOptions,
    json: bool,
) -> Result<()> {
    let merged = ohp_csv::join(csvs, on, operator, save, options).context("join failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&merged)?);
    } else {
        print_table(&merged);
    }
    eprintln!(
        "{} rows written to {}",
        merged.values.len(),
        save.path.display()
    );
    Ok(())
}

fn cmd_regress(csv: &Path, json: bool) -> Result<()> {
    let fit = ohp_csv::lslr(csv).with_context(|| format!("regression over {}", csv.display()))?;
    if json {
        println!("{}", serde_json::to_string_pretty(&fit)?);
    } else {
        println!("{fit}");
        println!("samples: {}", fit.samples);
    }
    Ok(())
}

fn cmd_sqrt(n: f64, precision: u32) -> Result<()> {
    let root = ohp_core::sqrt(n, precision)?;
    println!("{root:.prec$}", prec = precision as usize);
    Ok(())
}

fn cmd_sort(values: &[f64]) -> Result<()> {
    let sorted = mergesort(values);
    let out: Vec<String> = sorted.iter().map(|v| v.to_string()).collect();
    println!("{}", out.join(" "));
    Ok(())
}

fn cmd_config(cfg: &config::Config, explicit: Option<&Path>) -> Result<()> {
    println!("Config: {}", config::show_config_path(explicit));
    println!();
    println!("[join]");
    println!("  placeholder = {}", cfg.join.placeholder);
    println!("  prefix_columns = {}", cfg.join.prefix_columns);
    println!("  save_as = {}", cfg.join.save_as);
    println!();
    println!("[output]");
    println!("  layout = {}", cfg.output.layout);
    println!();
    println!("[numeric]");
    println!("  precision = {}", cfg.numeric.precision);
    Ok(())
}

fn print_table(table: &Table) {
    println!("{}", ohp_csv::render(&table.to_rows(), OutputLayout::Csv));
}
