use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// An issued voting code and whether it has been spent.
///
/// A voter only ever moves from unused to used; the server never reverts it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voter {
    pub id: String,
    pub code: String,
    #[serde(alias = "hasVoted")]
    pub has_voted: bool,
    #[serde(default, alias = "votedAt", skip_serializing_if = "Option::is_none")]
    pub voted_at: Option<NaiveDateTime>,
}

/// Counts shown above the list of issued codes.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct VoterSummary {
    pub issued: usize,
    pub used: usize,
    pub active: usize,
}

impl VoterSummary {
    pub fn of(voters: &[Voter]) -> Self {
        let used = voters.iter().filter(|voter| voter.has_voted).count();
        Self {
            issued: voters.len(),
            used,
            active: voters.len() - used,
        }
    }
}
