use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Config file read from the working directory.
pub const CONFIG_FILE: &str = "Election.toml";

/// Prefix of environment variables that override the config file.
pub const ENV_PREFIX: &str = "ELECTION_";

/// Client configuration, derived from built-in defaults, then `Election.toml`,
/// then `ELECTION_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    api_url: String,
    poll_interval: u64,
    max_in_flight_polls: usize,
    request_timeout: u64,
    download_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:8000/api".to_string(),
            poll_interval: 5,
            max_in_flight_polls: 1,
            request_timeout: 30,
            download_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// The layered configuration sources.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Load the configuration from all sources.
    pub fn load() -> Result<Self> {
        Ok(Self::figment().extract()?)
    }

    /// Base URL of the election API, without a trailing slash.
    /// Configured via `ELECTION_API_URL`.
    pub fn api_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }

    /// Time between two polls of the live results.
    /// Configured in seconds via `ELECTION_POLL_INTERVAL`.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval.max(1))
    }

    /// Polls allowed to be outstanding at once; further ticks are skipped.
    /// Configured via `ELECTION_MAX_IN_FLIGHT_POLLS`.
    pub fn max_in_flight_polls(&self) -> usize {
        self.max_in_flight_polls.max(1)
    }

    /// Limit on a single API request, including reading the body.
    /// Configured in seconds via `ELECTION_REQUEST_TIMEOUT`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout.max(1))
    }

    /// Where exports and code batches are saved.
    /// Configured via `ELECTION_DOWNLOAD_DIR`.
    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_download_dir(mut self, download_dir: impl Into<PathBuf>) -> Self {
        self.download_dir = download_dir.into();
        self
    }
}
