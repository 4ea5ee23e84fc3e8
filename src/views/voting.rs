use std::collections::BTreeMap;

use log::info;

use crate::{
    api::ApiClient,
    ballot::BallotComposer,
    model::common::{candidate, Candidate, Position},
    session::Session,
};

use super::{Notice, Page};

pub const LOAD_FAILED: &str = "Failed to load candidates";
pub const INCOMPLETE: &str = "Please vote for all positions before submitting";
pub const SUBMIT_FAILED: &str = "Failed to submit votes. Please try again.";
pub const UNKNOWN_CANDIDATE: &str = "That candidate is not on the ballot";

/// The ballot page.
#[derive(Debug)]
pub struct VotingView {
    candidates: Vec<Candidate>,
    ballot: BallotComposer,
    error: Option<Notice>,
}

impl VotingView {
    /// Open the ballot. Without a voting code in the session the voter is
    /// sent back to code entry, and nothing is requested.
    ///
    /// If the candidates cannot be loaded the page still opens, empty, with
    /// [`LOAD_FAILED`] as its error.
    pub async fn enter(api: &ApiClient, session: &Session) -> Result<Self, Page> {
        if session.voting_code().is_none() {
            info!("No voting code in session, redirecting to code entry");
            return Err(Page::Login);
        }
        let (candidates, error) = match api.candidates().await {
            Ok(candidates) => (candidates, None),
            Err(err) => (Vec::new(), Some(Notice::failure(LOAD_FAILED, &err))),
        };
        Ok(Self {
            candidates,
            ballot: BallotComposer::new(),
            error,
        })
    }

    /// Candidates grouped by position, every position present.
    pub fn groups(&self) -> BTreeMap<Position, Vec<&Candidate>> {
        candidate::by_position(&self.candidates)
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn ballot(&self) -> &BallotComposer {
        &self.ballot
    }

    /// The error currently shown, if any.
    pub fn error(&self) -> Option<&Notice> {
        self.error.as_ref()
    }

    /// Pick the candidate with `candidate_id` for `position`.
    pub fn choose(&mut self, position: Position, candidate_id: &str) -> Result<(), Notice> {
        let candidate = self
            .candidates
            .iter()
            .find(|candidate| candidate.id == candidate_id)
            .ok_or_else(|| Notice::Failure(UNKNOWN_CANDIDATE.to_string()))?;
        self.ballot
            .choose(position, candidate)
            .map_err(|err| Notice::failure(UNKNOWN_CANDIDATE, &err))?;
        Ok(())
    }

    /// Cast the ballot. An incomplete ballot is refused before anything is
    /// sent. On success the spent code is dropped from the session.
    pub async fn submit(&mut self, api: &ApiClient, session: &mut Session) -> Result<Page, Notice> {
        let result = self.try_submit(api, session).await;
        self.error = result.as_ref().err().cloned();
        result
    }

    async fn try_submit(&self, api: &ApiClient, session: &mut Session) -> Result<Page, Notice> {
        let Some(code) = session.voting_code() else {
            return Err(Notice::Failure(SUBMIT_FAILED.to_string()));
        };
        let submission = self
            .ballot
            .submission(code)
            .map_err(|err| Notice::failure(INCOMPLETE, &err))?;
        api.submit_ballot(&submission)
            .await
            .map_err(|err| Notice::failure(SUBMIT_FAILED, &err))?;

        info!("Ballot submitted");
        session.clear_voting_code();
        Ok(Page::Confirmation)
    }
}

#[cfg(test)]
mod tests {
    use crate::mock::MockApi;

    use super::*;

    #[client_test]
    async fn no_code_redirects(api: ApiClient, mock: MockApi, session: Session) {
        mock.seed_full_slate();
        let entered = VotingView::enter(&api, &session).await;
        assert!(matches!(entered, Err(Page::Login)));
        assert_eq!(mock.requests(), 0);
    }

    #[client_test(voter)]
    async fn full_ballot(api: ApiClient, mock: MockApi, mut session: Session) {
        let slate = mock.seed_full_slate();
        let mut view = VotingView::enter(&api, &session).await.unwrap();
        assert_eq!(view.candidates(), &slate[..]);
        assert!(view.error().is_none());
        assert!(view.groups().values().all(|group| group.len() == 1));

        for candidate in &slate {
            view.choose(candidate.position, &candidate.id).unwrap();
        }
        assert_eq!(view.submit(&api, &mut session).await, Ok(Page::Confirmation));
        assert_eq!(session.voting_code(), None);
        assert!(slate.iter().all(|c| mock.vote_count(&c.id) == 1));
    }

    #[client_test(voter)]
    async fn incomplete_ballot_not_sent(api: ApiClient, mock: MockApi, mut session: Session) {
        let slate = mock.seed_full_slate();
        let mut view = VotingView::enter(&api, &session).await.unwrap();
        for candidate in &slate[..6] {
            view.choose(candidate.position, &candidate.id).unwrap();
        }
        let before = mock.requests();

        let notice = view.submit(&api, &mut session).await.unwrap_err();
        assert_eq!(notice.message(), INCOMPLETE);
        assert_eq!(view.error(), Some(&notice));
        assert_eq!(mock.requests(), before);
        assert!(session.voting_code().is_some());
    }

    #[client_test(voter)]
    async fn unknown_candidate(api: ApiClient, mock: MockApi, session: Session) {
        let slate = mock.seed_full_slate();
        let mut view = VotingView::enter(&api, &session).await.unwrap();

        let notice = view.choose(Position::President, "nobody").unwrap_err();
        assert_eq!(notice.message(), UNKNOWN_CANDIDATE);
        // A real candidate, but for another position.
        assert!(view.choose(Position::President, &slate[1].id).is_err());
        assert_eq!(view.ballot().voted(), 0);
    }

    #[client_test(voter)]
    async fn load_failure(api: ApiClient, mock: MockApi, session: Session) {
        mock.set_failing(true);
        let view = VotingView::enter(&api, &session).await.unwrap();
        assert!(view.candidates().is_empty());
        assert_eq!(view.error().map(Notice::message), Some(LOAD_FAILED));
    }

    #[client_test(voter)]
    async fn submit_failure_can_retry(api: ApiClient, mock: MockApi, mut session: Session) {
        let slate = mock.seed_full_slate();
        let mut view = VotingView::enter(&api, &session).await.unwrap();
        for candidate in &slate {
            view.choose(candidate.position, &candidate.id).unwrap();
        }

        mock.set_failing(true);
        let notice = view.submit(&api, &mut session).await.unwrap_err();
        assert_eq!(notice.message(), SUBMIT_FAILED);
        assert!(session.voting_code().is_some());

        mock.set_failing(false);
        assert_eq!(view.submit(&api, &mut session).await, Ok(Page::Confirmation));
        assert!(view.error().is_none());
    }
}
