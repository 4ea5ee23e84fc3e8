use serde::{Deserialize, Serialize};

use crate::model::common::{candidate::CandidateId, position::Position};

/// A choice of one candidate for one position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub position: Position,
    pub candidate_id: CandidateId,
}

/// A full ballot, sent together with the voting code that authorises it.
///
/// Only [`BallotComposer`](crate::ballot::BallotComposer) builds these, so a
/// submission always carries exactly one vote per position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteSubmission {
    pub voting_code: String,
    pub votes: Vec<Vote>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn wire_format() {
        let submission = VoteSubmission {
            voting_code: "K7Q2ZP4M".to_string(),
            votes: vec![Vote {
                position: Position::Auditor,
                candidate_id: "c9".to_string(),
            }],
        };
        assert_eq!(
            json!(submission),
            json!({
                "votingCode": "K7Q2ZP4M",
                "votes": [{ "position": "Auditor", "candidateId": "c9" }],
            })
        );
    }
}
