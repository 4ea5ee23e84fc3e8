//! Client for the alumni election API: voting code sign-in, ballot casting,
//! live results and the administrator console.

#[cfg(test)]
#[macro_use]
extern crate client_test;

pub mod admin;
pub mod aggregate;
pub mod api;
pub mod ballot;
pub mod config;
pub mod download;
pub mod error;
pub mod logging;
pub mod model;
pub mod scheduled_task;
pub mod session;
pub mod views;

#[cfg(test)]
mod mock;

pub use api::ApiClient;
pub use config::Config;
pub use error::{Error, Result};
pub use session::Session;
