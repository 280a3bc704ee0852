use crate::model::Party;
use crate::normalizers::round_half_even;
use crate::tabulator::{self, allocate};
use serde::{Deserialize, Serialize};

pub const DEFAULT_DIVISORS: i64 = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixCell {
    pub divisor: i64,
    pub quotient: f64,
    /// Quotient rounded to the nearest integer for display.
    pub display: i64,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixRow {
    pub name: String,
    pub cells: Vec<MatrixCell>,
}

/// Quotients for divisors `1..=n` with the global top `n` cells marked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotientMatrix {
    pub divisors: Vec<i64>,
    pub rows: Vec<MatrixRow>,
}

impl QuotientMatrix {
    /// The highlighted cells are exactly the winners of an `n`-seat
    /// allocation, so ties at the boundary follow the allocator's order.
    pub fn build(parties: &[Party], n: i64) -> tabulator::Result<Self> {
        let ranking = allocate(parties, n)?;
        let width = n.max(0) as usize;

        let mut rows: Vec<MatrixRow> = parties
            .iter()
            .map(|p| MatrixRow {
                name: p.name.clone(),
                cells: Vec::with_capacity(width),
            })
            .collect();
        let mut grid: Vec<Vec<Option<MatrixCell>>> = vec![vec![None; width]; parties.len()];

        for entry in &ranking.quotients {
            grid[entry.row][(entry.divisor - 1) as usize] = Some(MatrixCell {
                divisor: entry.divisor,
                quotient: entry.quotient,
                display: round_half_even(entry.quotient) as i64,
                highlighted: entry.won,
            });
        }
        for (row, cells) in rows.iter_mut().zip(grid) {
            row.cells = cells.into_iter().flatten().collect();
        }

        Ok(Self {
            divisors: (1..=n.max(0)).collect(),
            rows,
        })
    }

    pub fn highlighted(&self) -> impl Iterator<Item = (&str, &MatrixCell)> {
        self.rows.iter().flat_map(|r| {
            r.cells
                .iter()
                .filter(|c| c.highlighted)
                .map(move |c| (r.name.as_str(), c))
        })
    }
}
