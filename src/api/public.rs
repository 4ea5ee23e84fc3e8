use crate::{
    error::Result,
    model::common::{Candidate, ElectionResults, ElectionSettings},
};

use super::ApiClient;

impl ApiClient {
    /// `GET /candidates`: every candidate, for every position.
    pub async fn candidates(&self) -> Result<Vec<Candidate>> {
        self.get_json("/candidates").await
    }

    /// `GET /votes/results`: raw vote counts, one entry per position.
    pub async fn results(&self) -> Result<Vec<ElectionResults>> {
        self.get_json("/votes/results").await
    }

    /// `GET /election/settings`: the voting window.
    pub async fn settings(&self) -> Result<ElectionSettings> {
        self.get_json("/election/settings").await
    }
}
