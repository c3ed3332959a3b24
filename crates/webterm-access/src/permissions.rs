//! Permission management
//!
//! | Capability   | Code                | Gates                |
//! | ConsoleView  | `host.console.view` | Launcher page        |
//! | ConsoleList  | `host.console.list` | File manager button  |

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    ConsoleView,
    ConsoleList,
}

impl Capability {
    pub fn code(&self) -> &'static str {
        match self {
            Capability::ConsoleView => "host.console.view",
            Capability::ConsoleList => "host.console.list",
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Codes granted to the current user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSet {
    /// Superusers pass every check
    #[serde(default)]
    pub is_supper: bool,
    #[serde(default)]
    pub permissions: BTreeSet<String>,
}

impl PermissionSet {
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            is_supper: false,
            permissions: codes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn superuser() -> Self {
        Self {
            is_supper: true,
            permissions: BTreeSet::new(),
        }
    }

    /// Check a code expression. `a|b` passes if either alternative is
    /// granted; an empty expression always passes.
    pub fn has_permission(&self, expr: &str) -> bool {
        if self.is_supper || expr.is_empty() {
            return true;
        }
        expr.split('|')
            .map(str::trim)
            .any(|code| self.permissions.contains(code))
    }

    pub fn allows(&self, capability: Capability) -> bool {
        let allowed = self.has_permission(capability.code());
        if !allowed {
            tracing::debug!(capability = %capability, "Capability not granted");
        }
        allowed
    }

    pub fn grant(&mut self, code: impl Into<String>) {
        self.permissions.insert(code.into());
    }

    pub fn revoke(&mut self, code: &str) {
        self.permissions.remove(code);
    }
}
