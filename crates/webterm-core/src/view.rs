//! Serializable page model handed to the browser

use serde::{Deserialize, Serialize};

use webterm_tabs::{SessionTab, TerminalBinding};
use webterm_tree::{NodeIcon, TreeNode};

use crate::file_manager::FileManagerPanel;

/// Shown in the terminal area while no session is open
pub const IDLE_BANNER: &str = r"
                 __    __
 _      _____   / /_  / /____  _________ ___
| | /| / / _ \ / __ \/ __/ _ \/ ___/ __ `__ \
| |/ |/ /  __// /_/ / /_/  __/ /  / / / / / /
|__/|__/\___//_.___/\__/\___/_/  /_/ /_/ /_/
";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeItem {
    pub key: String,
    pub id: String,
    pub title: String,
    pub is_leaf: bool,
    pub expanded: bool,
    pub icon: NodeIcon,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeItem>>,
}

impl From<&TreeNode> for TreeItem {
    fn from(node: &TreeNode) -> Self {
        Self {
            key: node.key.clone(),
            id: node.id.clone(),
            title: node.title.clone(),
            is_leaf: node.is_leaf,
            expanded: node.expanded,
            icon: node.icon(),
            children: node
                .children
                .as_ref()
                .map(|children| children.iter().map(TreeItem::from).collect()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonState {
    /// Rendered at all
    pub shown: bool,
    /// Clickable
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleView {
    pub page_title: String,
    /// Tree request still in flight
    pub fetching: bool,
    pub search: Option<String>,
    pub tree: Vec<TreeItem>,
    pub tabs: Vec<SessionTab>,
    pub active_id: Option<String>,
    pub terminals: Vec<TerminalBinding>,
    pub file_manager: FileManagerPanel,
    pub file_manager_button: ButtonState,
    pub banner: Option<String>,
    pub leave_prompt: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_item_keys_match_tree_node() {
        let node = TreeNode::group("1", "prod", vec![TreeNode::leaf("7", "web-01")]);

        let node_json = serde_json::to_value(&node).unwrap();
        let item_json = serde_json::to_value(TreeItem::from(&node)).unwrap();

        for (key, value) in node_json.as_object().unwrap() {
            if key != "children" {
                assert_eq!(&item_json[key], value, "{key}");
            }
        }
        assert_eq!(item_json["children"][0]["is_leaf"], true);
        assert_eq!(item_json["icon"], "folder");
    }
}
