use super::load_parties;
use colored::*;
use dhondt::config::SimulatorConfig;
use dhondt::reports::render::{render, RenderOptions};
use dhondt::simulator::{Result, Simulator};
use dhondt::util::write_serialized;
use std::path::PathBuf;

pub struct AllocateArgs {
    pub input: Option<PathBuf>,
    pub seats: Option<i64>,
    pub json: bool,
    pub output: Option<PathBuf>,
}

pub fn allocate(config: SimulatorConfig, args: AllocateArgs) -> Result<()> {
    let mut simulator = Simulator::new(config);

    if let Some(input) = &args.input {
        eprintln!("📋 Reading {}", input.display().to_string().bright_cyan());
        simulator.set_parties(load_parties(input)?);
    }

    let seats = args.seats.unwrap_or(simulator.config().seats);
    let report = simulator.run(seats)?;

    if let Some(output) = &args.output {
        write_serialized(output, &report).map_err(dhondt::formats::FormatError::from)?;
        eprintln!(
            "✅ Report written to {}",
            output.display().to_string().bright_green()
        );
    }

    if args.json {
        println!("{}", report.to_json()?);
    } else if args.output.is_none() {
        let options = RenderOptions {
            ordered_chart: simulator.config().ordered_chart,
            show_matrix: true,
        };
        print!("{}", render(&report, &options));
    }

    Ok(())
}
