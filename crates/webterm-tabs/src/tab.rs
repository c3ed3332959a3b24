//! Session tab data structure

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use webterm_tree::TreeNode;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTab {
    /// Host this terminal is connected to
    pub host_id: String,
    /// Unique per open, even for the same host
    pub session_id: String,
    /// Tab label, copied from the tree node at open time
    pub title: String,
    /// When the tab was opened
    pub opened_at: DateTime<Utc>,
}

impl SessionTab {
    pub fn open(node: &TreeNode) -> Self {
        Self {
            host_id: node.id.clone(),
            session_id: Uuid::new_v4().to_string(),
            title: node.title.clone(),
            opened_at: Utc::now(),
        }
    }
}

/// What the terminal component needs to attach to one session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalBinding {
    pub host_id: String,
    pub session_id: String,
    /// Only the active session's terminal is shown and focused
    pub visible: bool,
}

impl TerminalBinding {
    pub fn for_tab(tab: &SessionTab, active_id: Option<&str>) -> Self {
        Self {
            host_id: tab.host_id.clone(),
            session_id: tab.session_id.clone(),
            visible: active_id == Some(tab.session_id.as_str()),
        }
    }
}
