//! Tab error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TabError {
    #[error("Session not found: {0}")]
    NotFound(String),
}
