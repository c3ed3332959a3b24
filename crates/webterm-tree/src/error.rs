//! Tree error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TreeError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Host API error: {0}")]
    Api(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Host API returned no tree data")]
    EmptyResponse,
}
