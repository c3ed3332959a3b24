//! View lifecycle commands
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use serde::Serialize;

use webterm_core::ConsoleView;

use super::CommandResult;
use crate::state::AppState;

/// Header carrying the caller's token; grants are looked up server side
pub const TOKEN_HEADER: &str = "x-token";

#[derive(Debug, Serialize)]
pub struct MountInfo {
    pub view_id: String,
    pub view: ConsoleView,
}

/// POST /api/views
///
/// Any request body is ignored.
pub async fn mount_view(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> CommandResult<MountInfo> {
    let token = headers
        .get(TOKEN_HEADER)
        .and_then(|value| value.to_str().ok());
    let permissions = state.permissions_for(token);

    let view_id = match state.mount(permissions) {
        Ok(id) => id,
        Err(e) => return CommandResult::err(e.to_string()),
    };

    state.spawn_tree_fetch(view_id.clone());

    match state.with_view(&view_id, |console| Ok(console.snapshot())) {
        Ok(view) => CommandResult::ok(MountInfo { view_id, view }),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

/// GET /api/views/:view
pub async fn get_view(
    State(state): State<AppState>,
    Path(view_id): Path<String>,
) -> CommandResult<ConsoleView> {
    state
        .with_view(&view_id, |console| Ok(console.snapshot()))
        .into()
}

/// DELETE /api/views/:view
pub async fn unmount_view(
    State(state): State<AppState>,
    Path(view_id): Path<String>,
) -> CommandResult<()> {
    state.unmount(&view_id);
    CommandResult::ok(())
}
