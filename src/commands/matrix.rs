use super::load_parties;
use dhondt::config::SimulatorConfig;
use dhondt::reports::QuotientMatrix;
use dhondt::simulator::Result;
use itertools::Itertools;
use std::path::Path;

/// Print the quotient matrix as tab-separated text, marking the top cells.
pub fn matrix(config: &SimulatorConfig, input: Option<&Path>) -> Result<()> {
    let parties = match input {
        Some(input) => load_parties(input)?,
        None => config.parties.clone(),
    };
    let matrix = QuotientMatrix::build(&parties, config.matrix_divisors)?;

    let header = std::iter::once("Partido".to_string())
        .chain(matrix.divisors.iter().map(|d| format!("÷{}", d)))
        .join("\t");
    println!("{}", header);

    for row in &matrix.rows {
        let cells = row
            .cells
            .iter()
            .map(|c| {
                if c.highlighted {
                    format!("*{}", c.display)
                } else {
                    c.display.to_string()
                }
            })
            .join("\t");
        println!("{}\t{}", row.name, cells);
    }
    Ok(())
}
