mod commands;

use crate::commands::{allocate, export, matrix, sample, AllocateArgs};
use clap::{Parser, Subcommand};
use dhondt::config::{CliOverrides, SimulatorConfig};
use dhondt::formats::ExportFormat;
use dhondt::logging::init_tracing;
use dhondt::simulator::{self, Result};
use std::path::PathBuf;

#[derive(Parser)]
#[clap(name = "dhondt", about = "D'Hondt seat allocation simulator")]
struct Opts {
    /// TOML configuration file
    #[clap(long, global = true)]
    config: Option<PathBuf>,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Allocate seats and print the report.
    Allocate {
        /// Vote table (.csv, .json, .xlsx, optionally .gz); defaults to the configured table
        input: Option<PathBuf>,
        /// Seats to allocate
        #[clap(long, short)]
        seats: Option<i64>,
        /// Print the report as JSON instead of text
        #[clap(long)]
        json: bool,
        /// Also write the JSON report to this file
        #[clap(long, short)]
        output: Option<PathBuf>,
        /// Keep the chart in input order
        #[clap(long)]
        unordered: bool,
    },
    /// Print the quotient matrix with the top cells marked.
    Matrix {
        /// Vote table; defaults to the configured table
        input: Option<PathBuf>,
        /// Number of divisors (and highlighted cells)
        #[clap(long, short)]
        divisors: Option<i64>,
    },
    /// Normalize a vote table and export it as CSV or JSON.
    Export {
        /// Vote table to read
        input: PathBuf,
        /// Output file
        output: PathBuf,
        /// csv or json; guessed from the output extension when omitted
        #[clap(long, short)]
        format: Option<ExportFormat>,
    },
    /// Print the built-in sample table.
    Sample {
        /// csv or json
        #[clap(long, short, default_value = "csv")]
        format: ExportFormat,
    },
}

fn load_config(path: Option<&PathBuf>, overrides: CliOverrides) -> Result<SimulatorConfig> {
    simulator::load_config(path.map(|p| p.as_path()), &overrides)
}

fn run(opts: Opts) -> Result<()> {
    let config_path = opts.config.as_ref();

    match opts.command {
        Command::Allocate {
            input,
            seats,
            json,
            output,
            unordered,
        } => {
            let overrides = CliOverrides {
                ordered_chart: if unordered { Some(false) } else { None },
                ..Default::default()
            };
            let config = load_config(config_path, overrides)?;
            allocate(
                config,
                AllocateArgs {
                    input,
                    seats,
                    json,
                    output,
                },
            )?;
        }
        Command::Matrix { input, divisors } => {
            let overrides = CliOverrides {
                matrix_divisors: divisors,
                ..Default::default()
            };
            let config = load_config(config_path, overrides)?;
            matrix(&config, input.as_deref())?;
        }
        Command::Export {
            input,
            output,
            format,
        } => {
            export(&input, &output, format)?;
        }
        Command::Sample { format } => {
            let config = load_config(config_path, CliOverrides::default())?;
            sample(&config, format)?;
        }
    }

    Ok(())
}

fn main() {
    init_tracing();
    let opts = Opts::parse();

    if let Err(e) = run(opts) {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}
