//! Types exchanged with the election API.
//!
//! - [`common`] holds the election domain: positions, candidates, voters,
//!   ballots, results and settings.
//! - [`api`] holds request and response bodies that only exist on the wire.

pub mod api;
pub mod common;
