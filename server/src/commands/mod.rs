//! HTTP commands
//!
//! These handlers bridge the browser page to the Rust core.
//! Every response is a `CommandResult` envelope.

pub mod file_manager;
pub mod tabs;
pub mod tree;
pub mod views;

use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CommandResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for CommandResult<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => CommandResult::ok(data),
            Err(e) => CommandResult::err(e.to_string()),
        }
    }
}

impl<T: Serialize> IntoResponse for CommandResult<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
