use std::path::{Path, PathBuf};

use log::warn;

use crate::{
    admin::AdminConsole,
    aggregate::PositionTally,
    api::ApiClient,
    config::Config,
    download,
    error::{Error, Result},
    model::{
        api::{AdminCredentials, ExportFormat},
        common::{Candidate, NewCandidate, Voter, VoterSummary},
    },
    session::Session,
};

use super::{Notice, Page};

pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const LOGIN_FAILED: &str = "Login failed. Please try again.";
pub const ADD_FAILED: &str = "Failed to add candidate";
pub const REMOVE_FAILED: &str = "Failed to remove candidate";
pub const GENERATE_FAILED: &str = "Failed to generate voter codes";
pub const NO_CODES: &str = "No voting codes have been generated yet";

fn export_failed(format: ExportFormat) -> String {
    format!("Failed to export to {format}")
}

/// The administrator page: a login form until the session is signed in, then
/// the candidates, voters and results tabs.
#[derive(Debug)]
pub struct AdminView {
    download_dir: PathBuf,
    candidates: Vec<Candidate>,
    voters: Vec<Voter>,
    results: Vec<PositionTally>,
    generated: Vec<String>,
}

impl AdminView {
    pub fn new(config: &Config) -> Self {
        Self::with_download_dir(config.download_dir())
    }

    pub fn with_download_dir(download_dir: impl Into<PathBuf>) -> Self {
        Self {
            download_dir: download_dir.into(),
            candidates: Vec::new(),
            voters: Vec::new(),
            results: Vec::new(),
            generated: Vec::new(),
        }
    }

    /// Sign in and load every tab.
    pub async fn login(
        &mut self,
        api: &ApiClient,
        session: &mut Session,
        credentials: &AdminCredentials,
    ) -> std::result::Result<Page, Notice> {
        match session.sign_in_admin(api, credentials).await {
            Ok(()) => {}
            Err(err @ Error::Rejected(_)) => {
                return Err(Notice::failure(INVALID_CREDENTIALS, &err))
            }
            Err(err) => return Err(Notice::failure(LOGIN_FAILED, &err)),
        }
        self.reload(api, session).await;
        Ok(Page::Admin)
    }

    pub fn logout(&mut self, session: &mut Session) {
        session.sign_out_admin();
        *self = Self::with_download_dir(std::mem::take(&mut self.download_dir));
    }

    /// Refresh every tab. A tab that fails to load keeps its previous
    /// contents; the failure is only logged.
    pub async fn reload(&mut self, api: &ApiClient, session: &Session) {
        self.reload_candidates(api, session).await;
        self.reload_voters(api, session).await;
        self.reload_results(api, session).await;
    }

    async fn reload_candidates(&mut self, api: &ApiClient, session: &Session) {
        match console(api, session) {
            Ok(console) => match console.candidates().await {
                Ok(candidates) => self.candidates = candidates,
                Err(err) => warn!("Failed to load candidates ({err})"),
            },
            Err(err) => warn!("Failed to load candidates ({err})"),
        }
    }

    async fn reload_voters(&mut self, api: &ApiClient, session: &Session) {
        match console(api, session) {
            Ok(console) => match console.voters().await {
                Ok(voters) => self.voters = voters,
                Err(err) => warn!("Failed to load voters ({err})"),
            },
            Err(err) => warn!("Failed to load voters ({err})"),
        }
    }

    async fn reload_results(&mut self, api: &ApiClient, session: &Session) {
        match console(api, session) {
            Ok(console) => match console.results().await {
                Ok(results) => self.results = results,
                Err(err) => warn!("Failed to load results ({err})"),
            },
            Err(err) => warn!("Failed to load results ({err})"),
        }
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn voters(&self) -> &[Voter] {
        &self.voters
    }

    pub fn voter_summary(&self) -> VoterSummary {
        VoterSummary::of(&self.voters)
    }

    pub fn results(&self) -> &[PositionTally] {
        &self.results
    }

    /// The most recently generated batch of codes.
    pub fn generated(&self) -> &[String] {
        &self.generated
    }

    pub async fn add_candidate(
        &mut self,
        api: &ApiClient,
        session: &Session,
        candidate: &NewCandidate,
    ) -> std::result::Result<Notice, Notice> {
        let added = async { console(api, session)?.add_candidate(candidate).await }
            .await
            .map_err(|err| Notice::failure(ADD_FAILED, &err))?;
        self.reload_candidates(api, session).await;
        Ok(Notice::success(format!("{} added successfully!", added.name)))
    }

    /// Remove a candidate once `confirm` agrees. Declining gives `Ok(None)`.
    pub async fn remove_candidate(
        &mut self,
        api: &ApiClient,
        session: &Session,
        candidate: &Candidate,
        confirm: impl FnOnce(&str) -> bool,
    ) -> std::result::Result<Option<Notice>, Notice> {
        let removed = async {
            console(api, session)?
                .remove_candidate(candidate, confirm)
                .await
        }
        .await
        .map_err(|err| Notice::failure(REMOVE_FAILED, &err))?;
        if !removed {
            return Ok(None);
        }
        self.reload_candidates(api, session).await;
        Ok(Some(Notice::success(format!(
            "{} removed successfully!",
            candidate.name
        ))))
    }

    pub async fn generate_codes(
        &mut self,
        api: &ApiClient,
        session: &Session,
        count: u32,
    ) -> std::result::Result<Notice, Notice> {
        let codes = async { console(api, session)?.generate_codes(count).await }
            .await
            .map_err(|err| Notice::failure(GENERATE_FAILED, &err))?;
        let notice = Notice::success(format!("Generated {} voting codes!", codes.len()));
        self.generated = codes;
        self.reload_voters(api, session).await;
        Ok(notice)
    }

    /// Save the last generated batch to the download directory.
    pub fn save_codes(&self) -> std::result::Result<PathBuf, Notice> {
        if self.generated.is_empty() {
            return Err(Notice::Failure(NO_CODES.to_string()));
        }
        download::save_codes(&self.download_dir, &self.generated).map_err(|err| {
            Notice::failure(format!("Failed to save {}", download::CODES_FILE_NAME), &err)
        })
    }

    /// Download the results in `format` and save them to the download
    /// directory.
    pub async fn export(
        &self,
        api: &ApiClient,
        session: &Session,
        format: ExportFormat,
    ) -> std::result::Result<PathBuf, Notice> {
        export_to(api, session, format, &self.download_dir)
            .await
            .map_err(|err| Notice::failure(export_failed(format), &err))
    }
}

fn console<'a>(api: &'a ApiClient, session: &Session) -> Result<AdminConsole<'a>> {
    AdminConsole::open(api, session)
}

async fn export_to(
    api: &ApiClient,
    session: &Session,
    format: ExportFormat,
    dir: &Path,
) -> Result<PathBuf> {
    let bytes = console(api, session)?.export(format).await?;
    download::save_export(dir, format, &bytes)
}
