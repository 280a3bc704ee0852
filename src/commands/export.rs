use super::load_parties;
use colored::*;
use dhondt::formats::{write_table, ExportFormat};
use dhondt::simulator::Result;
use std::path::Path;

/// Normalize `input` and write its (name, votes) pairs to `output`.
pub fn export(input: &Path, output: &Path, format: Option<ExportFormat>) -> Result<()> {
    let parties = load_parties(input)?;
    let format = format.unwrap_or_else(|| ExportFormat::for_path(output));
    write_table(output, &parties, format)?;

    eprintln!(
        "✅ Exported {} rows to {}",
        parties.len().to_string().bright_yellow(),
        output.display().to_string().bright_green()
    );
    Ok(())
}
