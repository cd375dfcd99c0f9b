//! Error taxonomy shared by every remote and local operation

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the API client and the local settings store
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    /// A label, id or alias did not resolve
    #[error("{0}")]
    #[diagnostic(code(paas::not_found))]
    NotFound(String),

    /// The session is missing, invalid or expired
    #[error("Authentication failed: {0}")]
    #[diagnostic(
        code(paas::authentication),
        help("Sign in again, or set PAAS_SESSION_TOKEN to a valid session token")
    )]
    Authentication(String),

    /// The invocation lacks a required association or permission
    #[error("{0}")]
    #[diagnostic(code(paas::authorization))]
    Authorization(String),

    /// The API rejected the request payload
    #[error("Invalid request: {0}")]
    #[diagnostic(code(paas::validation))]
    Validation(String),

    /// The API answered with an unexpected status
    #[error("Server error ({status}): {message}")]
    #[diagnostic(code(paas::server))]
    Server { status: u16, message: String },

    /// Network or (de)serialization failure
    #[error("Transport error: {0}")]
    #[diagnostic(code(paas::transport))]
    Transport(String),

    /// The settings file could not be read, parsed or written
    #[error("Could not {action} settings file {}: {message}", .path.display())]
    #[diagnostic(code(paas::local_state))]
    LocalState {
        action: &'static str,
        path: PathBuf,
        message: String,
    },
}

impl Error {
    pub(crate) fn local_state(
        action: &'static str,
        path: impl Into<PathBuf>,
        err: impl std::fmt::Display,
    ) -> Self {
        Error::LocalState {
            action,
            path: path.into(),
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Transport(format!("malformed response body: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
