//! Error type shared by the board crate.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid coordinate: {0}")]
    InvalidCoord(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Match service rejected the request ({status}): {detail}")]
    Rejected {
        status: reqwest::StatusCode,
        detail: String,
    },

    #[error("JSON error: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
