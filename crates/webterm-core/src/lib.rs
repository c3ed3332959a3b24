//! webterm Core
//!
//! Central coordination layer for the terminal launcher.
//! Rust owns all state; the browser page only renders `ConsoleView`s.

mod config;
mod console;
mod error;
mod file_manager;
mod view;

pub use config::Config;
pub use console::Console;
pub use error::CoreError;
pub use file_manager::FileManagerPanel;
pub use view::{ButtonState, ConsoleView, TreeItem, IDLE_BANNER};

// Re-export core components
pub use webterm_access::{Capability, PermissionSet};
pub use webterm_tabs::{Activation, SessionTab, TabError, TabManager, TerminalBinding};
pub use webterm_tree::{NodeIcon, TreeClient, TreeError, TreeNode};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
