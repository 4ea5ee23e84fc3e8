use std::fmt::{Display, Formatter};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::{error, info, warn, LevelFilter};
use log4rs::{
    append::console::{ConsoleAppender, Target},
    config::{Appender, Config, Deserializers, Root},
    encode::pattern::PatternEncoder,
};
use reqwest::{Method, StatusCode};

/// Log config read by the binary, relative to the working directory.
pub const LOG_CONFIG_FILE: &str = "log4rs.yaml";

/// A unique identifier for a particular API request.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub struct RequestId(pub usize);

impl Display for RequestId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl RequestId {
    /// Atomically get the next ID. This wraps around back to zero if you somehow exceed a usize.
    pub fn next() -> RequestId {
        static REQUEST_ID_COUNTER: AtomicUsize = AtomicUsize::new(0);
        RequestId(REQUEST_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// Log an outgoing request.
pub fn request(id: RequestId, method: &Method, path: &str) {
    info!("->req{id} {method} {path}");
}

/// Log the response to a request, at a level matching its status class.
pub fn response(id: RequestId, status: StatusCode, path: &str) {
    let log_msg = format!("<-rsp{id} {status} {path}");
    if status.is_server_error() {
        error!("{log_msg}");
    } else if status.is_client_error() {
        warn!("{log_msg}");
    } else {
        info!("{log_msg}");
    }
}

/// Log a request that got no response at all.
pub fn no_response(id: RequestId, path: &str, err: &reqwest::Error) {
    warn!("<-rsp{id} FAILED {path}: {err}");
}

/// Initialise logging from `path` if it exists, otherwise log warnings and
/// above to stderr.
pub fn init(path: impl AsRef<Path>) -> Result<(), String> {
    let path = path.as_ref();
    if path.exists() {
        log4rs::init_file(path, Deserializers::default()).map_err(|e| e.to_string())?;
        info!("Initialised logging from {}", path.display());
        return Ok(());
    }

    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{h({l})} {m}{n}")))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Warn))
        .map_err(|e| e.to_string())?;
    log4rs::init_config(config).map_err(|e| e.to_string())?;
    Ok(())
}
