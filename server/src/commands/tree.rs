//! Host tree commands
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use webterm_core::{Activation, ConsoleView, SessionTab};

use super::CommandResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ActivateRequest {
    pub key: String,
    /// Click count reported by the browser (`event.detail`)
    #[serde(default = "default_clicks")]
    pub clicks: u32,
}

fn default_clicks() -> u32 {
    1
}

#[derive(Debug, Serialize)]
pub struct ActivateInfo {
    pub opened: Option<SessionTab>,
    pub view: ConsoleView,
}

/// POST /api/views/:view/search
pub async fn set_search(
    State(state): State<AppState>,
    Path(view_id): Path<String>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> CommandResult<ConsoleView> {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return CommandResult::err(rejection.body_text()),
    };

    state
        .with_view_mut(&view_id, |console| {
            console.set_search(payload.value);
            Ok(console.snapshot())
        })
        .into()
}

/// POST /api/views/:view/activate
pub async fn activate_node(
    State(state): State<AppState>,
    Path(view_id): Path<String>,
    payload: Result<Json<ActivateRequest>, JsonRejection>,
) -> CommandResult<ActivateInfo> {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return CommandResult::err(rejection.body_text()),
    };
    let activation = Activation::from_click_count(payload.clicks);

    state
        .with_view_mut(&view_id, |console| {
            let opened = console.activate_node(&payload.key, activation);
            Ok(ActivateInfo {
                opened,
                view: console.snapshot(),
            })
        })
        .into()
}
