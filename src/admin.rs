//! Administrator console operations.
//!
//! Each operation is a single API call. Nothing here is batched or
//! transactional, and re-issuing an add or remove only has the same effect
//! the server gives it.

use log::info;

use crate::{
    aggregate::{self, PositionTally},
    api::ApiClient,
    error::{Error, Result},
    model::{
        api::ExportFormat,
        common::{Candidate, NewCandidate, Voter},
    },
    session::Session,
};

/// Smallest batch of voting codes that may be requested.
pub const MIN_CODE_BATCH: u32 = 1;
/// Largest batch of voting codes that may be requested.
pub const MAX_CODE_BATCH: u32 = 1000;

/// Check a requested batch size before anything is sent.
pub fn check_code_count(count: u32) -> Result<u32> {
    if (MIN_CODE_BATCH..=MAX_CODE_BATCH).contains(&count) {
        Ok(count)
    } else {
        Err(Error::CodeCount(count))
    }
}

/// The question put to the user before a candidate is removed.
pub fn removal_prompt(candidate: &Candidate) -> String {
    format!("Remove {} from {}?", candidate.name, candidate.position)
}

/// API access for a signed-in administrator.
#[derive(Debug, Clone, Copy)]
pub struct AdminConsole<'a> {
    api: &'a ApiClient,
}

impl<'a> AdminConsole<'a> {
    /// Open the console, provided the session belongs to an administrator.
    pub fn open(api: &'a ApiClient, session: &Session) -> Result<Self> {
        if !session.is_admin() {
            return Err(Error::Unauthorized(
                "admin sign-in required".to_string(),
            ));
        }
        Ok(Self { api })
    }

    pub async fn candidates(&self) -> Result<Vec<Candidate>> {
        self.api.candidates().await
    }

    pub async fn add_candidate(&self, candidate: &NewCandidate) -> Result<Candidate> {
        if candidate.name.trim().is_empty() {
            return Err(Error::BadRequest("Candidate name is empty".to_string()));
        }
        let added = self.api.add_candidate(candidate).await?;
        info!("Added candidate {} for {}", added.name, added.position);
        Ok(added)
    }

    /// Remove `candidate` if `confirm` agrees to [`removal_prompt`]. Returns
    /// whether a removal was made; declining sends nothing.
    pub async fn remove_candidate(
        &self,
        candidate: &Candidate,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Result<bool> {
        if !confirm(&removal_prompt(candidate)) {
            return Ok(false);
        }
        self.api.remove_candidate(&candidate.id).await?;
        info!("Removed candidate {} ({})", candidate.name, candidate.id);
        Ok(true)
    }

    pub async fn voters(&self) -> Result<Vec<Voter>> {
        self.api.voters().await
    }

    /// Issue `count` new voting codes; `count` must lie between
    /// [`MIN_CODE_BATCH`] and [`MAX_CODE_BATCH`].
    pub async fn generate_codes(&self, count: u32) -> Result<Vec<String>> {
        let count = check_code_count(count)?;
        let codes = self.api.generate_codes(count).await?;
        info!("Generated {} voting codes", codes.len());
        Ok(codes)
    }

    pub async fn export(&self, format: ExportFormat) -> Result<Vec<u8>> {
        self.api.export_results(format).await
    }

    /// The results tab, ranked the same way as the public results.
    pub async fn results(&self) -> Result<Vec<PositionTally>> {
        Ok(aggregate::tally(&self.api.results().await?))
    }
}

#[cfg(test)]
mod tests {
    use crate::{mock::MockApi, model::common::Position};

    use super::*;

    #[test]
    fn code_count_bounds() {
        assert!(matches!(check_code_count(0), Err(Error::CodeCount(0))));
        assert_eq!(check_code_count(1).unwrap(), 1);
        assert_eq!(check_code_count(1000).unwrap(), 1000);
        assert!(matches!(check_code_count(1001), Err(Error::CodeCount(1001))));
    }

    #[test]
    fn prompt() {
        let candidate = Candidate::example("c1", "Alice", Position::VicePresident);
        assert_eq!(removal_prompt(&candidate), "Remove Alice from Vice President?");
    }

    #[client_test]
    async fn requires_admin(api: ApiClient, session: Session) {
        assert!(matches!(
            AdminConsole::open(&api, &session),
            Err(Error::Unauthorized(_))
        ));
    }

    #[client_test(admin)]
    async fn out_of_range_batches_not_sent(api: ApiClient, mock: MockApi, session: Session) {
        let console = AdminConsole::open(&api, &session).unwrap();
        let before = mock.requests();

        assert!(matches!(
            console.generate_codes(0).await,
            Err(Error::CodeCount(0))
        ));
        assert!(matches!(
            console.generate_codes(1001).await,
            Err(Error::CodeCount(1001))
        ));
        assert_eq!(mock.requests(), before);

        assert_eq!(console.generate_codes(5).await.unwrap().len(), 5);
        assert_eq!(mock.requests(), before + 1);
    }

    #[client_test(admin)]
    async fn declined_removal_not_sent(api: ApiClient, mock: MockApi, session: Session) {
        let console = AdminConsole::open(&api, &session).unwrap();
        let alice = mock.add_candidate("Alice", Position::President);
        let before = mock.requests();

        let mut asked = None;
        let removed = console
            .remove_candidate(&alice, |prompt| {
                asked = Some(prompt.to_string());
                false
            })
            .await
            .unwrap();
        assert!(!removed);
        assert_eq!(asked.as_deref(), Some("Remove Alice from President?"));
        assert_eq!(mock.requests(), before);
        assert_eq!(mock.candidates().len(), 1);

        assert!(console.remove_candidate(&alice, |_| true).await.unwrap());
        assert!(mock.candidates().is_empty());
    }

    #[client_test(admin)]
    async fn blank_name_not_sent(api: ApiClient, mock: MockApi, session: Session) {
        let console = AdminConsole::open(&api, &session).unwrap();
        let before = mock.requests();
        let blank = NewCandidate::new("  ", Position::Auditor, None);
        assert!(matches!(
            console.add_candidate(&blank).await,
            Err(Error::BadRequest(_))
        ));
        assert_eq!(mock.requests(), before);
    }

    #[client_test(admin)]
    async fn results_tab(api: ApiClient, mock: MockApi, session: Session) {
        let console = AdminConsole::open(&api, &session).unwrap();
        mock.add_candidate("Alice", Position::President);
        let bob = mock.add_candidate("Bob", Position::President);
        mock.record_vote(&bob);

        let tallies = console.results().await.unwrap();
        assert_eq!(tallies, aggregate::tally(&api.results().await.unwrap()));
        let president = &tallies[0];
        assert_eq!(president.total_votes, 1);
        assert_eq!(president.leader().map(|c| c.name.as_str()), Some("Bob"));
    }
}
