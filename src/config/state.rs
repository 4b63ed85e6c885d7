// Application state module
// Immutable per-process state shared by every connection

use hyper::body::Bytes;

use super::types::Config;

/// Application state
pub struct AppState {
    pub config: Config,
    /// Pre-built 400 body, cloned per response without copying
    pub error_body: Bytes,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            error_body: build_error_body(),
        }
    }

    pub const fn access_log(&self) -> bool {
        self.config.logging.access_log
    }
}

/// JSON body for every rejected redirect
fn build_error_body() -> Bytes {
    Bytes::from(serde_json::json!({ "error": "Invalid redirect URL" }).to_string())
}
