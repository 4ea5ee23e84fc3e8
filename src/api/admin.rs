use crate::{
    error::Result,
    model::{
        api::{Ack, ExportFormat, GenerateCodesRequest, GeneratedCodes},
        common::{Candidate, NewCandidate, Voter},
    },
};

use super::ApiClient;

impl ApiClient {
    /// `GET /admin/voters`: every issued code, oldest first.
    pub async fn voters(&self) -> Result<Vec<Voter>> {
        self.get_json("/admin/voters").await
    }

    /// `POST /admin/candidates`.
    pub async fn add_candidate(&self, candidate: &NewCandidate) -> Result<Candidate> {
        self.post_json("/admin/candidates", candidate).await
    }

    /// `DELETE /admin/candidates/<id>`.
    pub async fn remove_candidate(&self, id: &str) -> Result<Ack> {
        self.delete_for_ack(&format!("/admin/candidates/{id}")).await
    }

    /// `POST /admin/voters/generate`. The batch size is not checked here; see
    /// [`AdminConsole::generate_codes`](crate::admin::AdminConsole::generate_codes).
    pub async fn generate_codes(&self, count: u32) -> Result<Vec<String>> {
        let generated: GeneratedCodes = self
            .post_json("/admin/voters/generate", &GenerateCodesRequest { count })
            .await?;
        Ok(generated.codes)
    }

    /// `GET /admin/export/<format>`, as opaque bytes.
    pub async fn export_results(&self, format: ExportFormat) -> Result<Vec<u8>> {
        self.get_bytes(&format!("/admin/export/{format}")).await
    }
}
