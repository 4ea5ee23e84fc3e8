use crate::{api::ApiClient, error::Error, session::Session};

use super::{Notice, Page};

pub const INVALID_CODE: &str = "Invalid or already used voting code";
pub const VERIFY_FAILED: &str = "Unable to verify code. Please try again.";

/// Submit the voting code form. On success the code is kept in the session
/// and the voter moves on to the ballot.
pub async fn submit(api: &ApiClient, session: &mut Session, code: &str) -> Result<Page, Notice> {
    match session.sign_in_voter(api, code).await {
        Ok(()) => Ok(Page::Voting),
        Err(err @ (Error::Rejected(_) | Error::BadRequest(_))) => {
            Err(Notice::failure(INVALID_CODE, &err))
        }
        Err(err) => Err(Notice::failure(VERIFY_FAILED, &err)),
    }
}
