use reqwest::StatusCode;
use thiserror::Error;

use crate::model::common::Position;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The request never got a response: connection, timeout or body decoding.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("Unexpected response {status} from {path}")]
    Status { status: StatusCode, path: String },
    /// The server refused a voting code or admin credentials.
    #[error("Rejected: {0}")]
    Rejected(String),
    #[error("Incomplete ballot: {voted} of {required} positions voted")]
    IncompleteBallot { voted: usize, required: usize },
    #[error("Candidate {candidate} is not standing for {position}")]
    WrongPosition {
        candidate: String,
        position: Position,
    },
    #[error("Cannot generate {0} codes, the batch size must be between {min} and {max}",
        min = crate::admin::MIN_CODE_BATCH, max = crate::admin::MAX_CODE_BATCH)]
    CodeCount(u32),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] figment::Error),
}

impl Error {
    /// Did the server answer with this status?
    pub fn is_status(&self, wanted: StatusCode) -> bool {
        matches!(self, Error::Status { status, .. } if *status == wanted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            Error::CodeCount(0).to_string(),
            "Cannot generate 0 codes, the batch size must be between 1 and 1000"
        );
        assert_eq!(
            Error::IncompleteBallot {
                voted: 6,
                required: 7
            }
            .to_string(),
            "Incomplete ballot: 6 of 7 positions voted"
        );
        let err = Error::Status {
            status: StatusCode::NOT_FOUND,
            path: "/admin/candidates/c1".to_string(),
        };
        assert!(err.is_status(StatusCode::NOT_FOUND));
        assert!(!err.is_status(StatusCode::BAD_REQUEST));
    }
}
