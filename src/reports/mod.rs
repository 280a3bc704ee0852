use crate::model::{party::total_votes, Party};
use crate::tabulator::{Allocation, AllocationError, QuotientEntry};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod colors;
pub mod matrix;
pub mod render;
pub mod summary;

pub use matrix::QuotientMatrix;
pub use summary::{PartyResult, Winner};

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Allocation error: {0}")]
    Allocation(#[from] AllocationError),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type ReportResult<T> = std::result::Result<T, ReportError>;

/// The smallest winning quotient and who holds it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Distributor {
    pub party: String,
    pub divisor: i64,
    pub quotient: f64,
}

/// Everything a front end needs to display one simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationReport {
    pub seats: i64,
    pub total_votes: i128,
    pub distributor: Option<Distributor>,
    pub results: Vec<PartyResult>,
    pub winners: Vec<Winner>,
    pub quotients: Vec<QuotientEntry>,
    pub matrix: QuotientMatrix,
    pub generated_at: DateTime<Utc>,
}

impl SimulationReport {
    pub fn build(
        parties: &[Party],
        allocation: &Allocation,
        matrix_divisors: i64,
    ) -> ReportResult<Self> {
        let results = summary::party_results(parties, allocation);
        let winners = summary::winners(&results);
        let matrix = QuotientMatrix::build(parties, matrix_divisors)?;
        let distributor = allocation.distributor().map(|q| Distributor {
            party: q.party.clone(),
            divisor: q.divisor,
            quotient: q.quotient,
        });

        Ok(Self {
            seats: allocation.seats,
            total_votes: total_votes(parties),
            distributor,
            results,
            winners,
            quotients: allocation.quotients.clone(),
            matrix,
            generated_at: Utc::now(),
        })
    }

    pub fn to_json(&self) -> ReportResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
