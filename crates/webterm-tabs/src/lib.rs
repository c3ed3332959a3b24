//! webterm Session Tabs
//!
//! Every terminal session opened from the host tree lives in a tab.
//! Tabs are only ever "open" (in the collection) or gone; the manager
//! tracks open order and which tab is in front.

mod activation;
mod error;
mod manager;
mod tab;

pub use activation::Activation;
pub use error::TabError;
pub use manager::TabManager;
pub use tab::{SessionTab, TerminalBinding};

pub type Result<T> = std::result::Result<T, TabError>;
