use super::{AllocationError, Result};
use crate::model::Party;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::convert::TryFrom;

/// One (row, divisor) quotient together with its place in the global ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotientEntry {
    pub row: usize,
    pub party: String,
    pub votes: i64,
    pub divisor: i64,
    pub quotient: f64,
    pub rank: usize,
    pub won: bool,
}

impl QuotientEntry {
    /// Exact comparison of `votes / divisor` without going through floats.
    fn cmp_quotient(&self, other: &Self) -> Ordering {
        let lhs = self.votes as i128 * other.divisor as i128;
        let rhs = other.votes as i128 * self.divisor as i128;
        lhs.cmp(&rhs)
    }
}

/// Result of a D'Hondt allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    pub seats: i64,
    /// Seats won, indexed by input row.
    pub seats_won: Vec<i64>,
    /// Every quotient entry in ranking order.
    pub quotients: Vec<QuotientEntry>,
}

impl Allocation {
    fn empty(rows: usize, seats: i64) -> Self {
        Self {
            seats,
            seats_won: vec![0; rows],
            quotients: Vec::new(),
        }
    }

    pub fn seats_for(&self, row: usize) -> i64 {
        self.seats_won.get(row).copied().unwrap_or(0)
    }

    pub fn total_seats(&self) -> i64 {
        self.seats_won.iter().sum()
    }

    pub fn winning_entries(&self) -> impl Iterator<Item = &QuotientEntry> {
        self.quotients.iter().filter(|q| q.won)
    }

    /// The last quotient that still wins a seat (the "cifra repartidora").
    pub fn distributor(&self) -> Option<&QuotientEntry> {
        self.winning_entries().last()
    }

    pub fn entry(&self, row: usize, divisor: i64) -> Option<&QuotientEntry> {
        self.quotients
            .iter()
            .find(|q| q.row == row && q.divisor == divisor)
    }

    /// (name, seats) pairs in input order.
    pub fn seats_by_party<'a>(&'a self, parties: &'a [Party]) -> Vec<(&'a str, i64)> {
        parties
            .iter()
            .enumerate()
            .map(|(row, p)| (p.name.as_str(), self.seats_for(row)))
            .collect()
    }
}

/// Allocate `seats` among `parties` with the D'Hondt method.
///
/// Quotients that compare equal keep their generation order, so an earlier
/// row beats a later one and a smaller divisor beats a larger one. A
/// non-positive seat count or an empty table yields an all-zero allocation.
pub fn allocate(parties: &[Party], seats: i64) -> Result<Allocation> {
    if parties.is_empty() || seats <= 0 {
        return Ok(Allocation::empty(parties.len(), seats.max(0)));
    }

    if let Some((row, party)) = parties.iter().enumerate().find(|(_, p)| p.votes < 0) {
        return Err(AllocationError::InvalidArgument(format!(
            "row {} ({:?}) has negative votes: {}",
            row, party.name, party.votes
        )));
    }

    let too_large = || {
        AllocationError::InvalidArgument(format!(
            "quotient table of {} rows x {} seats is too large",
            parties.len(),
            seats
        ))
    };
    let total_entries = usize::try_from(seats)
        .ok()
        .and_then(|s| s.checked_mul(parties.len()))
        .ok_or_else(too_large)?;

    let mut quotients: Vec<QuotientEntry> = Vec::new();
    quotients
        .try_reserve_exact(total_entries)
        .map_err(|_| too_large())?;
    for (row, party) in parties.iter().enumerate() {
        for divisor in 1..=seats {
            quotients.push(QuotientEntry {
                row,
                party: party.name.clone(),
                votes: party.votes,
                divisor,
                quotient: party.votes as f64 / divisor as f64,
                rank: 0,
                won: false,
            });
        }
    }

    // sort_by is stable: ties keep (row, divisor) generation order
    quotients.sort_by(|a, b| b.cmp_quotient(a));

    let mut seats_won = vec![0i64; parties.len()];
    for (i, entry) in quotients.iter_mut().enumerate() {
        entry.rank = i + 1;
        entry.won = entry.rank as i64 <= seats;
        if entry.won {
            seats_won[entry.row] += 1;
        }
    }

    tracing::debug!(
        rows = parties.len(),
        seats,
        entries = quotients.len(),
        "allocated seats"
    );

    Ok(Allocation {
        seats,
        seats_won,
        quotients,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parties(rows: &[(&str, i64)]) -> Vec<Party> {
        rows.iter().map(|(n, v)| Party::new(*n, *v)).collect()
    }

    #[test]
    fn tie_goes_to_earlier_row() {
        let input = parties(&[("A", 100), ("B", 50), ("C", 10)]);
        let result = allocate(&input, 3).unwrap();

        assert_eq!(result.seats_won, vec![2, 1, 0]);

        let top: Vec<_> = result
            .winning_entries()
            .map(|q| (q.party.as_str(), q.divisor))
            .collect();
        assert_eq!(top, vec![("A", 1), ("A", 2), ("B", 1)]);
    }

    #[test]
    fn all_zero_votes_fill_first_row() {
        let input = parties(&[("X", 0), ("Y", 0)]);
        let result = allocate(&input, 2).unwrap();
        assert_eq!(result.seats_won, vec![2, 0]);
        assert_eq!(result.total_seats(), 2);
    }

    #[test]
    fn zero_seats_is_empty_result() {
        let input = parties(&[("A", 10), ("B", 5)]);
        let result = allocate(&input, 0).unwrap();
        assert_eq!(result.seats_won, vec![0, 0]);
        assert!(result.quotients.is_empty());
        assert!(result.distributor().is_none());

        let negative = allocate(&input, -3).unwrap();
        assert_eq!(negative.seats_won, vec![0, 0]);
        assert!(negative.quotients.is_empty());
    }

    #[test]
    fn empty_table_is_empty_result() {
        let result = allocate(&[], 5).unwrap();
        assert!(result.seats_won.is_empty());
        assert!(result.quotients.is_empty());
    }

    #[test]
    fn negative_votes_are_rejected() {
        let input = parties(&[("A", 10), ("B", -1)]);
        assert!(matches!(
            allocate(&input, 2),
            Err(AllocationError::InvalidArgument(_))
        ));
    }

    #[test]
    fn single_party_wins_everything() {
        let result = allocate(&parties(&[("Solo", 7)]), 5).unwrap();
        assert_eq!(result.seats_won, vec![5]);
        assert_eq!(result.quotients.len(), 5);
    }

    #[test]
    fn quotient_table_has_rows_times_seats_entries() {
        let input = parties(&[("A", 9), ("B", 8), ("C", 7), ("D", 1)]);
        let result = allocate(&input, 3).unwrap();
        assert_eq!(result.quotients.len(), 12);
        let ranks: Vec<_> = result.quotients.iter().map(|q| q.rank).collect();
        assert_eq!(ranks, (1..=12).collect::<Vec<_>>());
        assert_eq!(result.winning_entries().count(), 3);
        assert_eq!(result.seats_won, vec![1, 1, 1, 0]);
    }

    #[test]
    fn duplicate_names_are_independent_rows() {
        let input = parties(&[("A", 100), ("A", 100)]);
        let result = allocate(&input, 2).unwrap();
        assert_eq!(result.seats_won, vec![1, 1]);
        assert_eq!(result.seats_by_party(&input), vec![("A", 1), ("A", 1)]);
    }

    #[test]
    fn distributor_is_last_winning_quotient() {
        let input = parties(&[
            ("Fuerza Popular", 71758),
            ("Peru Libre", 42691),
            ("Renovación", 36004),
            ("Accion Popular", 33212),
            ("Podemos Perú", 28944),
        ]);
        let result = allocate(&input, 4).unwrap();
        // 71758, 42691, 36004, 35879
        assert_eq!(result.seats_won, vec![2, 1, 1, 0, 0]);
        let cutoff = result.distributor().unwrap();
        assert_eq!(cutoff.row, 0);
        assert_eq!(cutoff.divisor, 2);
        assert_eq!(cutoff.quotient, 35879.0);
    }

    #[test]
    fn exact_ordering_for_close_quotients() {
        // 7/3 = 2.333.. and 14/6 = 2.333.. must tie exactly
        let input = parties(&[("A", 7), ("B", 14)]);
        let result = allocate(&input, 6).unwrap();
        let a3 = result.entry(0, 3).unwrap();
        let b6 = result.entry(1, 6).unwrap();
        assert!(a3.rank < b6.rank);
    }

    #[test]
    fn huge_seat_count_is_rejected() {
        let input = parties(&[("A", 1), ("B", 1)]);
        assert!(matches!(
            allocate(&input, i64::MAX),
            Err(AllocationError::InvalidArgument(_))
        ));
    }

    #[test]
    fn unallocatable_table_is_rejected() {
        // rows x seats fits in usize but not in memory
        let input = parties(&[("A", 1)]);
        assert!(matches!(
            allocate(&input, i64::MAX / 2),
            Err(AllocationError::InvalidArgument(_))
        ));
    }
}
