//! webterm Access Control
//!
//! The console view and its file manager button are each behind a
//! capability code granted to the signed-in user:
//! - `host.console.view`: the whole launcher page
//! - `host.console.list`: opening the file manager for a session

mod permissions;

pub use permissions::{Capability, PermissionSet};
