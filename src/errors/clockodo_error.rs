//! Failures of a single round trip to the Clockodo API.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClockodoError {
    /// The API answered with a non-success status.
    #[error("Clockodo API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Clockodo API request timed out")]
    Timeout,

    /// Connection, TLS or protocol failure below HTTP.
    #[error("Clockodo API transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The response body did not have the expected shape.
    #[error("Unexpected Clockodo API response for {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The request could not be built (bad parameters or URL).
    #[error("Invalid Clockodo API request: {0}")]
    Request(String),
}

impl From<reqwest::Error> for ClockodoError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return ClockodoError::Timeout;
        }
        ClockodoError::Transport(err)
    }
}

pub type ClockodoResult<T> = Result<T, ClockodoError>;
