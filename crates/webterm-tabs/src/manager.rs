//! Tab Manager
//!
//! Owns the open sessions of one view, in open order, and the active
//! session id. Unknown ids are ignored everywhere: the tab strip may
//! deliver a close for a tab that is already gone.

use webterm_tree::TreeNode;

use crate::activation::Activation;
use crate::error::TabError;
use crate::tab::{SessionTab, TerminalBinding};
use crate::Result;

#[derive(Debug, Default)]
pub struct TabManager {
    tabs: Vec<SessionTab>,
    active_id: Option<String>,
}

impl TabManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new session for `node` and bring it to front.
    ///
    /// Only a double activation on a host leaf qualifies; anything else
    /// returns `None` and leaves the state untouched.
    pub fn open(&mut self, node: &TreeNode, activation: Activation) -> Option<SessionTab> {
        if !node.is_leaf || !activation.opens_session() {
            return None;
        }

        let tab = SessionTab::open(node);
        self.tabs.push(tab.clone());
        self.active_id = Some(tab.session_id.clone());

        tracing::info!(
            session_id = %tab.session_id,
            host_id = %tab.host_id,
            open_count = self.tabs.len(),
            "Opened terminal session"
        );

        Some(tab)
    }

    /// Close a session. The tab that slides into the closed position becomes
    /// active, falling back to the new last tab, or none.
    pub fn close(&mut self, session_id: &str) -> Option<SessionTab> {
        let index = self.position(session_id)?;
        let removed = self.tabs.remove(index);

        self.active_id = self
            .tabs
            .get(index)
            .or_else(|| index.checked_sub(1).and_then(|i| self.tabs.get(i)))
            .map(|tab| tab.session_id.clone());

        tracing::info!(
            session_id = %removed.session_id,
            active_id = ?self.active_id,
            open_count = self.tabs.len(),
            "Closed terminal session"
        );

        Some(removed)
    }

    /// Bring a session to front. The tab strip only emits ids it renders,
    /// so the id is trusted as-is.
    pub fn select(&mut self, session_id: &str) {
        tracing::debug!(session_id = %session_id, "Selected terminal session");
        self.active_id = Some(session_id.to_string());
    }

    /// Host of the active session, for the file manager to open against
    pub fn file_manager_target(&self) -> Option<&str> {
        self.active_tab().map(|tab| tab.host_id.as_str())
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    pub fn active_tab(&self) -> Option<&SessionTab> {
        let active_id = self.active_id.as_deref()?;
        self.tabs.iter().find(|tab| tab.session_id == active_id)
    }

    pub fn get_tab(&self, session_id: &str) -> Result<&SessionTab> {
        self.tabs
            .iter()
            .find(|tab| tab.session_id == session_id)
            .ok_or_else(|| TabError::NotFound(session_id.to_string()))
    }

    pub fn tabs(&self) -> &[SessionTab] {
        &self.tabs
    }

    pub fn terminal_bindings(&self) -> Vec<TerminalBinding> {
        self.tabs
            .iter()
            .map(|tab| TerminalBinding::for_tab(tab, self.active_id()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    fn position(&self, session_id: &str) -> Option<usize> {
        self.tabs.iter().position(|tab| tab.session_id == session_id)
    }
}
