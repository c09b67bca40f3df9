//! Client for the dorm-move board store.
//!
//! Every accessor is a method on [`Context`], which carries the one
//! configured base URL. Accessors never catch errors; failures reach the
//! caller as [`Error`].

mod account;
mod application;
pub mod config;
pub mod listing;
mod misc;
mod post;
pub mod raw;
pub mod session;
pub mod slot;

use std::fmt::{Formatter, Write};

pub use config::ClientConfig;
pub use dorm_move_shared::{
    account::{handle::*, User},
    application::{handle::*, Application, ApplicationStatus},
    post::{handle::*, MoveDetails, Post, PostStatus, PostType},
    validate::{FieldError, FieldErrorKind},
    Building, Stats,
};

/// Connection to one store, cheap to clone.
#[derive(Debug, Clone)]
pub struct Context {
    req_client: reqwest::Client,
    /// Base URL without a trailing slash.
    url_prefix: String,
}

impl Context {
    /// Creates a context from a resolved configuration.
    ///
    /// # Errors
    ///
    /// - Errors if the base URL is not an absolute http(s) URL.
    /// - Errors if the underlying HTTP client could not be built.
    pub fn new(config: &ClientConfig) -> Result<Self, Error> {
        let url = reqwest::Url::parse(&config.base_url)
            .map_err(|err| Error::Config(format!("base url {:?}: {err}", config.base_url)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "base url scheme {:?} is not http or https",
                url.scheme()
            )));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            req_client: builder.build()?,
            url_prefix: config.base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// The base URL every request is sent to.
    pub fn base_url(&self) -> &str {
        &self.url_prefix
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("request failed: {0}")]
    Status(ResponseError),
    #[error("malformed response body: {0}")]
    Decode(serde_json::Error),
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("invalid form: {}", display_fields(.0))]
    Validation(Vec<FieldError>),
    #[error("superseded by a newer request")]
    Superseded,
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("session store error: {0}")]
    Session(std::io::Error),
}

impl Error {
    /// The HTTP status of a [`Error::Status`] error.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Error::Status(err) => Some(err.status_code),
            _ => None,
        }
    }
}

fn display_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A non-success response.
#[derive(Debug)]
pub struct ResponseError {
    pub status_code: reqwest::StatusCode,
    /// The `error` field of the response body, if any.
    pub error: Option<String>,
}

impl std::fmt::Display for ResponseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.status_code.as_str())?;

        if let Some(msg) = self.status_code.canonical_reason() {
            f.write_char(' ')?;
            f.write_str(msg)?;
        }

        if let Some(ref msg) = self.error {
            f.write_str(": ")?;
            f.write_str(msg)?;
        }

        Ok(())
    }
}

impl std::error::Error for ResponseError {}
