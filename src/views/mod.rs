//! Controllers for the pages of the client.
//!
//! A view turns a user action into API calls and keeps whatever state the page
//! shows. Failures never escape a view as errors: the cause is logged and the
//! user gets a fixed [`Notice`], leaving the page ready to try again.

use std::fmt::{Display, Formatter};

use log::warn;

use crate::error::Error;

pub mod admin;
pub mod confirmation;
pub mod login;
pub mod results;
pub mod voting;

/// The pages, and where a view sends the user next.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Page {
    /// Voting code entry; also the home page.
    Login,
    Voting,
    Results,
    Confirmation,
    Admin,
}

/// A message shown to the user after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Failure(String),
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Notice::Success(message.into())
    }

    /// A failure shown as `message`, with the underlying cause logged.
    pub fn failure(message: impl Into<String>, cause: &Error) -> Self {
        let message = message.into();
        warn!("{message} ({cause})");
        Notice::Failure(message)
    }

    pub fn message(&self) -> &str {
        match self {
            Notice::Success(message) | Notice::Failure(message) => message,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Notice::Failure(_))
    }
}

impl Display for Notice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}
