//! Error taxonomy for remote calls.
//!
//! Remote faults are typed rather than swallowed so callers can tell
//! "zero records" apart from "the remote call failed". Page handlers
//! decide how much of that to surface.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, OdooError>;

#[derive(Debug, Error)]
pub enum OdooError {
    #[error("authentication failed for {username}@{database}")]
    AuthFailed { database: String, username: String },

    #[error("remote fault: {message}")]
    Fault { code: Option<i64>, message: String },

    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("decode: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid server URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),
}
