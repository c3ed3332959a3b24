//! Console view state container
//!
//! One `Console` exists per mounted launcher page. It owns the host tree,
//! the search box, the session tabs and the file manager panel, and
//! applies UI events to them one at a time.

use webterm_access::{Capability, PermissionSet};
use webterm_tabs::{Activation, SessionTab, TabManager, TerminalBinding};
use webterm_tree::{expand_all, filter_tree, find_node, toggle_expanded, TreeNode};

use crate::config::Config;
use crate::error::CoreError;
use crate::file_manager::FileManagerPanel;
use crate::view::{ButtonState, ConsoleView, TreeItem, IDLE_BANNER};
use crate::Result;

pub struct Console {
    page_title: String,
    leave_prompt: String,
    permissions: PermissionSet,
    /// Tree request still in flight
    fetching: bool,
    /// Tree as fetched, plus fold state
    raw_tree: Vec<TreeNode>,
    /// Derived from `raw_tree` and `search`
    display_tree: Vec<TreeNode>,
    search: Option<String>,
    tabs: TabManager,
    file_manager: FileManagerPanel,
}

impl Console {
    /// Mount a launcher page for a user holding `permissions`.
    pub fn mount(config: &Config, permissions: PermissionSet) -> Result<Self> {
        if !permissions.allows(Capability::ConsoleView) {
            return Err(CoreError::PermissionDenied(Capability::ConsoleView));
        }

        Ok(Self {
            page_title: config.page_title.clone(),
            leave_prompt: config.leave_prompt.clone(),
            permissions,
            fetching: true,
            raw_tree: Vec::new(),
            display_tree: Vec::new(),
            search: None,
            tabs: TabManager::new(),
            file_manager: FileManagerPanel::default(),
        })
    }

    /// Apply the outcome of the host tree request. A failed request leaves
    /// the tree empty.
    pub fn finish_tree_fetch(&mut self, result: webterm_tree::Result<Vec<TreeNode>>) {
        match result {
            Ok(nodes) => {
                self.raw_tree = expand_all(&nodes);
            }
            Err(e) => {
                tracing::warn!("Failed to fetch host tree: {}", e);
                self.raw_tree.clear();
            }
        }
        self.fetching = false;
        self.refresh_display_tree();
    }

    pub fn set_search(&mut self, value: Option<String>) {
        self.search = value;
        self.refresh_display_tree();
    }

    fn refresh_display_tree(&mut self) {
        self.display_tree = filter_tree(&self.raw_tree, self.search.as_deref());
    }

    /// Handle an activation on the tree node at `key`.
    ///
    /// A double activation opens a session on a host, or folds/unfolds a
    /// group. Returns the opened session, if any.
    pub fn activate_node(&mut self, key: &str, activation: Activation) -> Option<SessionTab> {
        let node = find_node(&self.display_tree, key)?.clone();

        if node.is_leaf {
            return self.tabs.open(&node, activation);
        }

        if activation == Activation::Double && toggle_expanded(&mut self.raw_tree, key).is_some() {
            self.refresh_display_tree();
        }
        None
    }

    pub fn close_tab(&mut self, session_id: &str) -> Option<SessionTab> {
        self.tabs.close(session_id)
    }

    pub fn select_tab(&mut self, session_id: &str) {
        self.tabs.select(session_id);
    }

    /// Point the file manager at the active session's host.
    ///
    /// Returns the host id, or `None` when no open session is active.
    pub fn open_file_manager(&mut self) -> Result<Option<String>> {
        if !self.permissions.allows(Capability::ConsoleList) {
            return Err(CoreError::PermissionDenied(Capability::ConsoleList));
        }

        let Some(host_id) = self.tabs.file_manager_target().map(str::to_string) else {
            return Ok(None);
        };

        self.file_manager.open(host_id.clone());
        Ok(Some(host_id))
    }

    pub fn close_file_manager(&mut self) {
        self.file_manager.close();
    }

    /// Attach info for the terminal component of one session
    pub fn terminal(&self, session_id: &str) -> Result<TerminalBinding> {
        let tab = self.tabs.get_tab(session_id)?;
        Ok(TerminalBinding::for_tab(tab, self.tabs.active_id()))
    }

    pub fn tabs(&self) -> &TabManager {
        &self.tabs
    }

    pub fn display_tree(&self) -> &[TreeNode] {
        &self.display_tree
    }

    pub fn is_fetching(&self) -> bool {
        self.fetching
    }

    pub fn file_manager(&self) -> &FileManagerPanel {
        &self.file_manager
    }

    /// Prompt for the browser's before-unload hook
    pub fn leave_prompt(&self) -> &str {
        &self.leave_prompt
    }

    pub fn snapshot(&self) -> ConsoleView {
        ConsoleView {
            page_title: self.page_title.clone(),
            fetching: self.fetching,
            search: self.search.clone(),
            tree: self.display_tree.iter().map(TreeItem::from).collect(),
            tabs: self.tabs.tabs().to_vec(),
            active_id: self.tabs.active_id().map(str::to_string),
            terminals: self.tabs.terminal_bindings(),
            file_manager: self.file_manager.clone(),
            file_manager_button: ButtonState {
                shown: self.permissions.allows(Capability::ConsoleList),
                enabled: self.tabs.active_id().is_some(),
            },
            banner: self.tabs.is_empty().then(|| IDLE_BANNER.to_string()),
            leave_prompt: self.leave_prompt.clone(),
        }
    }
}
