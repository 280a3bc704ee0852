mod allocate;
mod export;
mod matrix;
mod sample;

pub use allocate::{allocate, AllocateArgs};
pub use export::export;
pub use matrix::matrix;
pub use sample::sample;

use dhondt::formats::read_table;
use dhondt::model::Party;
use dhondt::normalizers::normalize;
use dhondt::simulator::Result;
use std::path::Path;

/// Read and normalize a vote table from disk.
fn load_parties(input: &Path) -> Result<Vec<Party>> {
    let table = read_table(input)?;
    Ok(normalize(&table))
}
