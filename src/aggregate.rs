//! Ranking and percentages for election results.
//!
//! Both the live results view and the admin results tab run the raw payload
//! through [`tally`]; it is pure, so the two always agree.

use std::fmt::{Display, Formatter};

use serde::Serialize;

use crate::model::common::{CandidateId, ElectionResults, Position};

/// One candidate's place in a position's ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCandidate {
    pub candidate_id: CandidateId,
    pub name: String,
    pub vote_count: u64,
    /// Share of the position's votes, from 0 to 100. Exactly 0 when the
    /// position has no votes at all.
    pub percentage: f64,
}

impl RankedCandidate {
    /// The percentage to one decimal place, e.g. `60.0%`.
    pub fn percentage_display(&self) -> String {
        format!("{:.1}%", self.percentage)
    }
}

/// Totals and ranking for a single position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionTally {
    pub position: Position,
    pub total_votes: u64,
    /// Descending by vote count. Candidates with equal counts stay in the
    /// order the server listed them.
    pub ranking: Vec<RankedCandidate>,
}

impl PositionTally {
    /// The first-ranked candidate, shown with emphasis.
    pub fn leader(&self) -> Option<&RankedCandidate> {
        self.ranking.first()
    }
}

/// `vote_count / total * 100`, or 0 if nobody has voted.
pub fn percentage(vote_count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        vote_count as f64 * 100.0 / total as f64
    }
}

/// Rank the candidates of one position.
pub fn tally_position(results: &ElectionResults) -> PositionTally {
    let total_votes = results.candidates.iter().map(|c| c.vote_count).sum();

    let mut ranking: Vec<RankedCandidate> = results
        .candidates
        .iter()
        .map(|c| RankedCandidate {
            candidate_id: c.candidate_id.clone(),
            name: c.name.clone(),
            vote_count: c.vote_count,
            percentage: percentage(c.vote_count, total_votes),
        })
        .collect();
    // `sort_by` is stable, which is the tie-break.
    ranking.sort_by(|a, b| b.vote_count.cmp(&a.vote_count));

    PositionTally {
        position: results.position,
        total_votes,
        ranking,
    }
}

/// Rank every position, keeping the order of the payload.
pub fn tally(results: &[ElectionResults]) -> Vec<PositionTally> {
    results.iter().map(tally_position).collect()
}

impl Display for PositionTally {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.position)?;
        writeln!(f, "  Total votes: {}", self.total_votes)?;
        if self.ranking.is_empty() {
            return writeln!(f, "  No candidates");
        }
        for (rank, candidate) in self.ranking.iter().enumerate() {
            writeln!(
                f,
                "{} {}. {}: {} vote{} ({})",
                if rank == 0 { "*" } else { " " },
                rank + 1,
                candidate.name,
                candidate.vote_count,
                if candidate.vote_count != 1 { "s" } else { "" },
                candidate.percentage_display(),
            )?;
        }
        Ok(())
    }
}
