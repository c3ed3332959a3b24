//! Session tab commands
use axum::extract::{Path, State};

use webterm_core::{ConsoleView, TerminalBinding};

use super::CommandResult;
use crate::state::AppState;

/// POST /api/views/:view/tabs/:session/select
pub async fn select_tab(
    State(state): State<AppState>,
    Path((view_id, session_id)): Path<(String, String)>,
) -> CommandResult<ConsoleView> {
    state
        .with_view_mut(&view_id, |console| {
            console.select_tab(&session_id);
            Ok(console.snapshot())
        })
        .into()
}

/// DELETE /api/views/:view/tabs/:session
pub async fn close_tab(
    State(state): State<AppState>,
    Path((view_id, session_id)): Path<(String, String)>,
) -> CommandResult<ConsoleView> {
    state
        .with_view_mut(&view_id, |console| {
            console.close_tab(&session_id);
            Ok(console.snapshot())
        })
        .into()
}

/// GET /api/views/:view/tabs/:session
pub async fn get_terminal(
    State(state): State<AppState>,
    Path((view_id, session_id)): Path<(String, String)>,
) -> CommandResult<TerminalBinding> {
    state
        .with_view(&view_id, |console| console.terminal(&session_id))
        .into()
}
