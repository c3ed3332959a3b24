//! webterm Host Tree
//!
//! The host/group tree shown in the launcher sidebar:
//! - `TreeNode` model as returned by the host listing endpoint
//! - search filter deriving the display tree
//! - HTTP client fetching the tree once per mounted view

mod client;
mod error;
mod filter;
mod node;

pub use client::TreeClient;
pub use error::TreeError;
pub use filter::{expand_all, filter_tree, find_node, matches_search, toggle_expanded};
pub use node::{NodeIcon, TreeNode};

pub type Result<T> = std::result::Result<T, TreeError>;
