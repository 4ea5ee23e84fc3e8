//! Who is using the client right now.
//!
//! A [`Session`] plays the part of a browser tab's session storage: a small
//! key/value store holding `votingCode` and `adminAuth`. It lives exactly as
//! long as the value does and is never written to disk. Views receive it as an
//! argument instead of reaching for global state.

use std::collections::HashMap;

use log::info;

use crate::{
    api::ApiClient,
    error::{Error, Result},
    model::api::AdminCredentials,
};

/// Key holding the voter's one-time code.
pub const VOTING_CODE_KEY: &str = "votingCode";
/// Key holding `"true"` once an administrator has signed in.
pub const ADMIN_AUTH_KEY: &str = "adminAuth";

/// The session states. Voter and admin sign-ins exclude each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    /// Holds the verified code, which is sent again with the ballot.
    VoterAuthenticated(String),
    /// Only a flag; credentials are not retained.
    AdminAuthenticated,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    store: HashMap<&'static str, String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        if self.is_admin() {
            SessionState::AdminAuthenticated
        } else if let Some(code) = self.voting_code() {
            SessionState::VoterAuthenticated(code.to_string())
        } else {
            SessionState::Anonymous
        }
    }

    pub fn voting_code(&self) -> Option<&str> {
        self.store.get(VOTING_CODE_KEY).map(String::as_str)
    }

    /// Store a verified voting code, ending any admin sign-in.
    pub fn set_voting_code(&mut self, code: impl Into<String>) {
        self.store.remove(ADMIN_AUTH_KEY);
        self.store.insert(VOTING_CODE_KEY, code.into());
    }

    pub fn clear_voting_code(&mut self) {
        self.store.remove(VOTING_CODE_KEY);
    }

    pub fn is_admin(&self) -> bool {
        self.store.get(ADMIN_AUTH_KEY).map(String::as_str) == Some("true")
    }

    /// Mark an administrator as signed in, dropping any voting code.
    pub fn set_admin(&mut self) {
        self.store.remove(VOTING_CODE_KEY);
        self.store.insert(ADMIN_AUTH_KEY, "true".to_string());
    }

    pub fn clear_admin(&mut self) {
        self.store.remove(ADMIN_AUTH_KEY);
    }

    /// Forget everything, as closing the tab would.
    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// Verify a voting code with the server and, if it is accepted, keep it.
    ///
    /// The code is trimmed and upper-cased first. A refused code leaves the
    /// session untouched and returns [`Error::Rejected`].
    pub async fn sign_in_voter(&mut self, api: &ApiClient, code: &str) -> Result<()> {
        let code = normalise_code(code);
        if code.is_empty() {
            return Err(Error::BadRequest("Voting code is empty".to_string()));
        }
        let ack = api.verify_code(&code).await?;
        if !ack.is_success() {
            return Err(Error::Rejected(
                ack.message
                    .unwrap_or_else(|| "Invalid voting code".to_string()),
            ));
        }
        info!("Voting code accepted");
        self.set_voting_code(code);
        Ok(())
    }

    /// Sign an administrator in. Refused credentials return [`Error::Rejected`].
    pub async fn sign_in_admin(
        &mut self,
        api: &ApiClient,
        credentials: &AdminCredentials,
    ) -> Result<()> {
        let ack = api.admin_login(credentials).await?;
        if !ack.is_success() {
            return Err(Error::Rejected(
                ack.message
                    .unwrap_or_else(|| "Invalid credentials".to_string()),
            ));
        }
        info!("Admin {} signed in", credentials.username);
        self.set_admin();
        Ok(())
    }

    pub fn sign_out_admin(&mut self) {
        if self.is_admin() {
            info!("Admin signed out");
        }
        self.clear_admin();
    }
}

/// Codes are case-insensitive; the server stores them upper case.
pub fn normalise_code(code: &str) -> String {
    code.trim().to_uppercase()
}
