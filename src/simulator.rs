use crate::config::{CliOverrides, ConfigError, SimulatorConfig};
use crate::formats::FormatError;
use crate::model::{Party, RawTable};
use crate::normalizers::normalize;
use crate::reports::{ReportError, SimulationReport};
use crate::tabulator::{allocate, AllocationError};
use instant::Instant;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum SimulatorError {
    #[error("Seat count {seats} is outside 1..={max}")]
    SeatsOutOfRange { seats: i64, max: i64 },
    #[error(transparent)]
    Allocation(#[from] AllocationError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, SimulatorError>;

/// Resolve the session configuration: defaults, then `path`, then `overrides`.
pub fn load_config(path: Option<&Path>, overrides: &CliOverrides) -> Result<SimulatorConfig> {
    Ok(SimulatorConfig::load(path, overrides)?)
}

/// Holds the vote table being edited between runs.
///
/// Every run recomputes from the current table; nothing is cached.
#[derive(Debug, Clone)]
pub struct Simulator {
    config: SimulatorConfig,
    parties: Vec<Party>,
}

impl Simulator {
    pub fn new(config: SimulatorConfig) -> Self {
        let parties = config.parties.clone();
        Self { config, parties }
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    pub fn parties(&self) -> &[Party] {
        &self.parties
    }

    /// Restore the configured starting table.
    pub fn reset(&mut self) {
        self.parties = self.config.parties.clone();
    }

    /// Replace the table with a normalized copy of `table`.
    pub fn submit(&mut self, table: &RawTable) -> &[Party] {
        self.parties = normalize(table);
        &self.parties
    }

    pub fn set_parties(&mut self, parties: Vec<Party>) {
        self.parties = parties;
    }

    pub fn run(&self, seats: i64) -> Result<SimulationReport> {
        if !(1..=self.config.max_seats).contains(&seats) {
            return Err(SimulatorError::SeatsOutOfRange {
                seats,
                max: self.config.max_seats,
            });
        }

        let start = Instant::now();
        let allocation = allocate(&self.parties, seats)?;
        let report = SimulationReport::build(&self.parties, &allocation, self.config.matrix_divisors)?;

        tracing::info!(
            rows = self.parties.len(),
            seats,
            elapsed_us = start.elapsed().as_micros() as u64,
            "simulation complete"
        );
        Ok(report)
    }

    /// Run with the configured seat count.
    pub fn run_default(&self) -> Result<SimulationReport> {
        self.run(self.config.seats)
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(SimulatorConfig::default())
    }
}
