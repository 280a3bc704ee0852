//! Coerces arbitrary tabular input into validated party rows.
use crate::model::{Party, RawTable, RawValue};
use lazy_static::lazy_static;
use regex::Regex;

pub const NAME_COLUMN: &str = "Partido";
pub const VOTES_COLUMN: &str = "Votos";

lazy_static! {
    static ref NUMERIC_RX: Regex =
        Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?$").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Name,
    Votes,
}

fn canonical_column(header: &str) -> Option<Column> {
    match header.trim().to_lowercase().as_str() {
        "partido" | "party" => Some(Column::Name),
        "votos" | "voto" | "votes" => Some(Column::Votes),
        _ => None,
    }
}

/// Locate the name and vote columns; the first matching header wins.
fn resolve_columns(headers: &[String]) -> (Option<usize>, Option<usize>) {
    let mut name_col = None;
    let mut votes_col = None;
    for (i, header) in headers.iter().enumerate() {
        match canonical_column(header) {
            Some(Column::Name) if name_col.is_none() => name_col = Some(i),
            Some(Column::Votes) if votes_col.is_none() => votes_col = Some(i),
            _ => {}
        }
    }
    (name_col, votes_col)
}

pub fn coerce_name(value: &RawValue) -> String {
    match value {
        RawValue::Empty => String::new(),
        other => other.to_string(),
    }
}

/// Non-numeric and non-finite values become 0, negatives are clipped to 0,
/// and fractions are rounded half to even.
pub fn coerce_votes(value: &RawValue) -> i64 {
    let raw = match value {
        RawValue::Number(n) => *n,
        RawValue::Text(s) => {
            let s = s.trim();
            if NUMERIC_RX.is_match(s) {
                s.parse::<f64>().unwrap_or(0.0)
            } else {
                0.0
            }
        }
        RawValue::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        RawValue::Empty => 0.0,
    };

    if !raw.is_finite() || raw <= 0.0 {
        return 0;
    }
    round_half_even(raw) as i64
}

pub(crate) fn round_half_even(x: f64) -> f64 {
    if (x - x.trunc()).abs() == 0.5 {
        2.0 * (x / 2.0).round()
    } else {
        x.round()
    }
}

/// Normalize a raw table into party rows. Never fails: missing columns
/// default to an empty name or zero votes and extra columns are ignored.
pub fn normalize(table: &RawTable) -> Vec<Party> {
    let (name_col, votes_col) = resolve_columns(&table.headers);

    if name_col.is_none() {
        tracing::warn!(headers = ?table.headers, "no party name column found");
    }
    if votes_col.is_none() {
        tracing::warn!(headers = ?table.headers, "no votes column found");
    }

    let parties: Vec<Party> = (0..table.len())
        .map(|row| {
            let name = name_col
                .map(|c| coerce_name(table.cell(row, c)))
                .unwrap_or_default();
            let votes = votes_col
                .map(|c| coerce_votes(table.cell(row, c)))
                .unwrap_or(0);
            Party { name, votes }
        })
        .collect();

    tracing::debug!(rows = parties.len(), "normalized vote table");
    parties
}

/// Normalize in-memory (name, raw vote) records.
pub fn normalize_records<I, N>(records: I) -> Vec<Party>
where
    I: IntoIterator<Item = (N, RawValue)>,
    N: Into<String>,
{
    records
        .into_iter()
        .map(|(name, votes)| Party {
            name: name.into(),
            votes: coerce_votes(&votes),
        })
        .collect()
}
