use super::colors::color_for;
use crate::model::{party::total_votes, Party};
use crate::normalizers::round_half_even;
use crate::tabulator::Allocation;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One row of the results table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyResult {
    pub row: usize,
    pub name: String,
    pub votes: i64,
    pub percentage: f64,
    pub seats: i64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Winner {
    pub name: String,
    pub seats: i64,
}

/// Share of the vote in percent, rounded half to even at two decimals. Zero
/// when nobody voted.
pub fn percentage(votes: i64, total_votes: i128) -> f64 {
    if total_votes <= 0 {
        return 0.0;
    }
    let raw = votes as f64 / total_votes as f64 * 100.0;
    round_half_even(raw * 100.0) / 100.0
}

/// Per-row results in input order.
pub fn party_results(parties: &[Party], allocation: &Allocation) -> Vec<PartyResult> {
    let total = total_votes(parties);
    parties
        .iter()
        .enumerate()
        .map(|(row, p)| PartyResult {
            row,
            name: p.name.clone(),
            votes: p.votes,
            percentage: percentage(p.votes, total),
            seats: allocation.seats_for(row),
            color: color_for(&p.name).hex(),
        })
        .collect()
}

/// Results sorted by votes, highest first. Equal votes keep input order.
pub fn by_votes(results: &[PartyResult]) -> Vec<&PartyResult> {
    results
        .iter()
        .sorted_by(|a, b| b.votes.cmp(&a.votes))
        .collect()
}

/// Rows that won at least one seat, most seats first, then by name.
pub fn winners(results: &[PartyResult]) -> Vec<Winner> {
    results
        .iter()
        .filter(|r| r.seats > 0)
        .sorted_by(|a, b| b.seats.cmp(&a.seats).then_with(|| a.name.cmp(&b.name)))
        .map(|r| Winner {
            name: r.name.clone(),
            seats: r.seats,
        })
        .collect()
}

fn chart_cmp(a: &PartyResult, b: &PartyResult) -> Ordering {
    b.votes
        .cmp(&a.votes)
        .then_with(|| b.seats.cmp(&a.seats))
        .then_with(|| a.name.cmp(&b.name))
}

/// Bar order for the chart: input order, or by votes, seats and name.
pub fn chart_order(results: &[PartyResult], ordered: bool) -> Vec<&PartyResult> {
    if ordered {
        results.iter().sorted_by(|a, b| chart_cmp(a, b)).collect()
    } else {
        results.iter().collect()
    }
}

/// Integer with `.` as the thousands separator, e.g. `212.609`.
pub fn format_thousands(n: impl Into<i128>) -> String {
    let n = n.into();
    let digits = n.unsigned_abs().to_string();
    let grouped = digits
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .join(".");
    if n < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
