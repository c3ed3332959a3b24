//! Core error types

use thiserror::Error;

use webterm_access::Capability;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Tree error: {0}")]
    Tree(#[from] webterm_tree::TreeError),

    #[error("Tab error: {0}")]
    Tab(#[from] webterm_tabs::TabError),

    #[error("Permission denied: {0}")]
    PermissionDenied(Capability),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("View not mounted: {0}")]
    NotMounted(String),
}
