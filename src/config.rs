//! Simulator configuration: compiled defaults, an optional TOML file, then
//! command-line overrides.

use crate::model::party::sample_parties;
use crate::model::Party;
use crate::reports::matrix::DEFAULT_DIVISORS;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_SEATS: i64 = 4;
pub const DEFAULT_MAX_SEATS: i64 = 200;
/// Hard ceiling on `max_seats` so the quotient table stays small.
pub const SEATS_CEILING: i64 = 10_000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read config {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Invalid TOML in {path}: {message}")]
    Parse { path: String, message: String },
    #[error("Invalid config value for {field}: {message}")]
    Invalid { field: String, message: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Seats to allocate when none is given on the command line.
    pub seats: i64,
    pub max_seats: i64,
    /// Number of divisors shown (and highlighted) in the quotient matrix.
    pub matrix_divisors: i64,
    pub ordered_chart: bool,
    /// Table restored by a reset.
    pub parties: Vec<Party>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            seats: DEFAULT_SEATS,
            max_seats: DEFAULT_MAX_SEATS,
            matrix_divisors: DEFAULT_DIVISORS,
            ordered_chart: true,
            parties: sample_parties(),
        }
    }
}

/// Values given on the command line; `None` keeps the file/default value.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub seats: Option<i64>,
    pub matrix_divisors: Option<i64>,
    pub ordered_chart: Option<bool>,
}

impl SimulatorConfig {
    /// Load from `path` when given, apply overrides and validate.
    pub fn load(path: Option<&Path>, overrides: &CliOverrides) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    pub fn apply_overrides(&mut self, overrides: &CliOverrides) {
        if let Some(seats) = overrides.seats {
            self.seats = seats;
        }
        if let Some(divisors) = overrides.matrix_divisors {
            self.matrix_divisors = divisors;
        }
        if let Some(ordered) = overrides.ordered_chart {
            self.ordered_chart = ordered;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=SEATS_CEILING).contains(&self.max_seats) {
            return Err(ConfigError::Invalid {
                field: "max_seats".to_string(),
                message: format!("must be between 1 and {}", SEATS_CEILING),
            });
        }
        if !(1..=self.max_seats).contains(&self.seats) {
            return Err(ConfigError::Invalid {
                field: "seats".to_string(),
                message: format!("must be between 1 and {}", self.max_seats),
            });
        }
        if !(1..=self.max_seats).contains(&self.matrix_divisors) {
            return Err(ConfigError::Invalid {
                field: "matrix_divisors".to_string(),
                message: format!("must be between 1 and {}", self.max_seats),
            });
        }
        if let Some(p) = self.parties.iter().find(|p| p.votes < 0) {
            return Err(ConfigError::Invalid {
                field: "parties".to_string(),
                message: format!("{:?} has negative votes", p.name),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = SimulatorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.seats, 4);
        assert_eq!(config.parties.len(), 5);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = SimulatorConfig::from_toml(
            r#"
            seats = 7

            [[parties]]
            name = "Uno"
            votes = 10

            [[parties]]
            Partido = "Dos"
            Votos = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.seats, 7);
        assert_eq!(config.max_seats, DEFAULT_MAX_SEATS);
        assert_eq!(
            config.parties,
            vec![Party::new("Uno", 10), Party::new("Dos", 5)]
        );
    }

    #[test]
    fn rejects_out_of_range_values() {
        let config = SimulatorConfig {
            seats: 201,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { ref field, .. }) if field == "seats"
        ));

        let config = SimulatorConfig {
            matrix_divisors: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn cli_overrides_win() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seats = 9\nordered_chart = true").unwrap();

        let overrides = CliOverrides {
            seats: Some(3),
            ordered_chart: Some(false),
            ..Default::default()
        };
        let config = SimulatorConfig::load(Some(file.path()), &overrides).unwrap();
        assert_eq!(config.seats, 3);
        assert!(!config.ordered_chart);
    }

    #[test]
    fn bad_toml_is_parse_error() {
        assert!(matches!(
            SimulatorConfig::from_toml("seats = \"many\""),
            Err(ConfigError::Parse { .. })
        ));
    }
}
