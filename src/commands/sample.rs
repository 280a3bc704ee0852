use dhondt::config::SimulatorConfig;
use dhondt::formats::ExportFormat;
use dhondt::simulator::Result;

/// Print the configured starting table.
pub fn sample(config: &SimulatorConfig, format: ExportFormat) -> Result<()> {
    print!("{}", format.render(&config.parties)?);
    if format == ExportFormat::Json {
        println!();
    }
    Ok(())
}
