//! Request and response bodies.
//!
//! Field names follow what the server sends, which is not uniform: ballot and
//! results bodies are camelCase, everything else snake_case.

pub mod admin;
pub mod auth;

pub use admin::{AdminCredentials, ExportFormat, GenerateCodesRequest, GeneratedCodes};
pub use auth::{Ack, VerifyCodeRequest};
