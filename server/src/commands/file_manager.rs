//! File manager commands
use axum::extract::{Path, State};

use webterm_core::ConsoleView;

use super::CommandResult;
use crate::state::AppState;

/// POST /api/views/:view/file-manager
pub async fn open_file_manager(
    State(state): State<AppState>,
    Path(view_id): Path<String>,
) -> CommandResult<ConsoleView> {
    state
        .with_view_mut(&view_id, |console| {
            console.open_file_manager()?;
            Ok(console.snapshot())
        })
        .into()
}

/// DELETE /api/views/:view/file-manager
pub async fn close_file_manager(
    State(state): State<AppState>,
    Path(view_id): Path<String>,
) -> CommandResult<ConsoleView> {
    state
        .with_view_mut(&view_id, |console| {
            console.close_file_manager();
            Ok(console.snapshot())
        })
        .into()
}
