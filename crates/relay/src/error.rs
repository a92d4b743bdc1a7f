use thiserror::Error;
use types::OrderError;

/// Failures talking to the relay or decoding what it returned.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The relay answered with a non-success status.
    #[error("relay returned an error: {0}")]
    Api(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Order(#[from] OrderError),
}
