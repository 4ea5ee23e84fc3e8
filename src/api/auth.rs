use crate::{
    error::Result,
    model::api::{Ack, AdminCredentials, VerifyCodeRequest},
};

use super::ApiClient;

impl ApiClient {
    /// `POST /auth/verify`: check that a voting code exists and is unused.
    /// A refused code is a successful call with `success: false`.
    pub async fn verify_code(&self, code: &str) -> Result<Ack> {
        let request = VerifyCodeRequest {
            code: code.to_string(),
        };
        self.post_json("/auth/verify", &request).await
    }

    /// `POST /admin/login`. Bad credentials are a successful call with
    /// `success: false`.
    pub async fn admin_login(&self, credentials: &AdminCredentials) -> Result<Ack> {
        self.post_json("/admin/login", credentials).await
    }
}
