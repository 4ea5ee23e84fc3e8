use std::collections::BTreeMap;

use crate::{
    error::{Error, Result},
    model::common::{Candidate, CandidateId, Position, Vote, VoteSubmission},
};

/// Collects one candidate per position before a ballot is cast.
///
/// The completeness check is a convenience for the voter; the server
/// validates the submission again on its own.
#[derive(Debug, Clone, Default)]
pub struct BallotComposer {
    choices: BTreeMap<Position, CandidateId>,
}

impl BallotComposer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose `candidate` for `position`, replacing any earlier choice, which
    /// is returned.
    pub fn choose(
        &mut self,
        position: Position,
        candidate: &Candidate,
    ) -> Result<Option<CandidateId>> {
        if candidate.position != position {
            return Err(Error::WrongPosition {
                candidate: candidate.name.clone(),
                position,
            });
        }
        Ok(self.choices.insert(position, candidate.id.clone()))
    }

    pub fn choice(&self, position: Position) -> Option<&str> {
        self.choices.get(&position).map(String::as_str)
    }

    /// Number of positions with a choice.
    pub fn voted(&self) -> usize {
        self.choices.len()
    }

    /// Positions still without a choice, in ballot order.
    pub fn missing(&self) -> Vec<Position> {
        Position::ALL
            .into_iter()
            .filter(|position| !self.choices.contains_key(position))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.choices.len() == Position::COUNT
    }

    /// Build the submission for `voting_code`, or fail with
    /// [`Error::IncompleteBallot`] unless every position has a choice.
    pub fn submission(&self, voting_code: &str) -> Result<VoteSubmission> {
        if !self.is_complete() {
            return Err(Error::IncompleteBallot {
                voted: self.voted(),
                required: Position::COUNT,
            });
        }
        let votes = self
            .choices
            .iter()
            .map(|(position, candidate_id)| Vote {
                position: *position,
                candidate_id: candidate_id.clone(),
            })
            .collect();
        Ok(VoteSubmission {
            voting_code: voting_code.to_string(),
            votes,
        })
    }
}
