use serde::{Deserialize, Serialize};

use crate::model::common::{candidate::CandidateId, position::Position};

/// Raw vote counts for one position, as served by `GET /votes/results`.
///
/// Read-only on the client: ranking and percentages are derived by
/// [`aggregate`](crate::aggregate), never written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionResults {
    pub position: Position,
    pub candidates: Vec<CandidateResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateResult {
    pub candidate_id: CandidateId,
    pub name: String,
    pub vote_count: u64,
}
