use serde::{Deserialize, Serialize};

/// A single row of the vote table.
///
/// Rows are identified by their position in the input, not by name: two
/// rows with the same name are still two independent competitors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    #[serde(rename = "Partido", alias = "name")]
    pub name: String,
    #[serde(rename = "Votos", alias = "votes")]
    pub votes: i64,
}

impl Party {
    pub fn new(name: impl Into<String>, votes: i64) -> Self {
        Self {
            name: name.into(),
            votes,
        }
    }
}

/// Built-in dataset used when no input has been submitted yet.
pub fn sample_parties() -> Vec<Party> {
    vec![
        Party::new("Fuerza Popular", 71758),
        Party::new("Peru Libre", 42691),
        Party::new("Renovación", 36004),
        Party::new("Accion Popular", 33212),
        Party::new("Podemos Perú", 28944),
    ]
}

/// Sum of all votes in the table, widened so saturated rows still add up.
pub fn total_votes(parties: &[Party]) -> i128 {
    parties.iter().map(|p| i128::from(p.votes)).sum()
}
