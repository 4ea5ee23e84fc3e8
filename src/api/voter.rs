use crate::{
    error::Result,
    model::{api::Ack, common::VoteSubmission},
};

use super::ApiClient;

impl ApiClient {
    /// `POST /votes/submit`: cast a complete ballot. The server spends the
    /// voting code, so this is never retried.
    pub async fn submit_ballot(&self, submission: &VoteSubmission) -> Result<Ack> {
        self.post_for_ack("/votes/submit", submission).await
    }
}
