//! File manager panel state
//!
//! The panel itself is an external component; the console only decides
//! which host it is pointed at and whether it is shown.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileManagerPanel {
    pub host_id: Option<String>,
    pub visible: bool,
}

impl FileManagerPanel {
    pub fn open(&mut self, host_id: String) {
        tracing::info!(host_id = %host_id, "Opened file manager");
        self.host_id = Some(host_id);
        self.visible = true;
    }

    /// Hide the panel. The last host is kept so reopening is cheap for the
    /// component.
    pub fn close(&mut self) {
        self.visible = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_close() {
        let mut panel = FileManagerPanel::default();
        assert!(!panel.visible);

        panel.open("7".to_string());
        assert_eq!(panel.host_id.as_deref(), Some("7"));
        assert!(panel.visible);

        panel.close();
        assert!(!panel.visible);
        assert_eq!(panel.host_id.as_deref(), Some("7"));
    }
}
