use std::{path::PathBuf, time::Duration};

use serde::Deserialize;

use crate::Error;

/// Environment variable holding the store base URL.
pub const BASE_URL_VAR: &str = "DORM_MOVE_BASE_URL";
/// Environment variable holding the request timeout in seconds.
pub const TIMEOUT_VAR: &str = "DORM_MOVE_TIMEOUT_SECS";

/// Describing the client configuration.
///
/// Resolve it once at start-up and pass it to [`crate::Context::new`].
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the store, such as `http://127.0.0.1:3001`.
    pub base_url: String,
    /// Request timeout in seconds. Requests wait indefinitely if unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// File backing [`crate::session::FileSessionStore`].
    #[serde(default)]
    pub session_file: Option<PathBuf>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: None,
            session_file: None,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// The file-backed session store, if a session file is configured.
    pub fn session_store(&self) -> Option<crate::session::FileSessionStore> {
        self.session_file
            .clone()
            .map(crate::session::FileSessionStore::new)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, Error> {
        toml::from_str(s).map_err(|err| Error::Config(err.to_string()))
    }

    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|err| Error::Config(format!("{}: {err}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Reads [`BASE_URL_VAR`] and [`TIMEOUT_VAR`].
    ///
    /// # Errors
    ///
    /// - Errors if the base URL variable is unset.
    /// - Errors if the timeout is not a whole number of seconds.
    pub fn from_env() -> Result<Self, Error> {
        let base_url = std::env::var(BASE_URL_VAR)
            .map_err(|_| Error::Config(format!("{BASE_URL_VAR} is not set")))?;

        let timeout_secs = match std::env::var(TIMEOUT_VAR) {
            Ok(value) => Some(
                value
                    .parse()
                    .map_err(|_| Error::Config(format!("{TIMEOUT_VAR} is not a number")))?,
            ),
            Err(_) => None,
        };

        Ok(Self {
            base_url,
            timeout_secs,
            session_file: None,
        })
    }
}
