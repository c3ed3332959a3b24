//! Tree node data structure
//!
//! A node is either a group (folder) holding nested nodes, or a host leaf.
//! The host API sends ids as numbers for hosts and strings for group keys,
//! so both are accepted and kept as strings.

use serde::{Deserialize, Deserializer, Serialize};

/// Read from the host API in camelCase (`isLeaf`), written in snake_case
/// like every other model sent to the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct TreeNode {
    /// Unique key within the tree (a host may sit under several groups)
    #[serde(default, deserialize_with = "string_or_number")]
    pub key: String,
    /// Host identity for leaves, group identity for folders
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    /// Display label
    pub title: String,
    /// True for hosts
    #[serde(default)]
    pub is_leaf: bool,
    /// Nested nodes, only present on groups
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeNode>>,
    /// Whether the group is currently unfolded in the sidebar
    #[serde(default)]
    pub expanded: bool,
}

impl TreeNode {
    pub fn leaf(id: impl Into<String>, title: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            key: id.clone(),
            id,
            title: title.into(),
            is_leaf: true,
            children: None,
            expanded: false,
        }
    }

    pub fn group(key: impl Into<String>, title: impl Into<String>, children: Vec<TreeNode>) -> Self {
        let key = key.into();
        Self {
            id: key.clone(),
            key,
            title: title.into(),
            is_leaf: false,
            children: Some(children),
            expanded: false,
        }
    }

    /// Override the tree key, e.g. when the same host is listed twice
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Fill whichever of `key`/`id` the API left out from the other,
    /// recursively.
    pub fn normalize(&mut self) {
        if self.key.is_empty() {
            self.key = self.id.clone();
        }
        if self.id.is_empty() {
            self.id = self.key.clone();
        }
        if let Some(children) = self.children.as_mut() {
            for child in children {
                child.normalize();
            }
        }
    }

    pub fn icon(&self) -> NodeIcon {
        NodeIcon::for_node(self)
    }
}

/// Sidebar icon for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeIcon {
    Server,
    FolderOpen,
    Folder,
}

impl NodeIcon {
    pub fn for_node(node: &TreeNode) -> Self {
        if node.is_leaf {
            NodeIcon::Server
        } else if node.expanded {
            NodeIcon::FolderOpen
        } else {
            NodeIcon::Folder
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(i64),
        Float(f64),
        Null(()),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(n) => n.to_string(),
        Raw::Null(()) => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_api_shape() {
        let json = r#"[
            {"key": 1, "title": "prod", "children": [
                {"id": 7, "key": "1_7", "title": "web-01", "isLeaf": true}
            ]}
        ]"#;

        let mut nodes: Vec<TreeNode> = serde_json::from_str(json).unwrap();
        nodes.iter_mut().for_each(TreeNode::normalize);

        let group = &nodes[0];
        assert_eq!(group.key, "1");
        assert_eq!(group.id, "1");
        assert!(!group.is_leaf);

        let host = &group.children.as_ref().unwrap()[0];
        assert_eq!(host.id, "7");
        assert_eq!(host.key, "1_7");
        assert!(host.is_leaf);
        assert!(host.children.is_none());
    }

    #[test]
    fn test_icons() {
        let mut group = TreeNode::group("g", "Group", vec![]);
        assert_eq!(group.icon(), NodeIcon::Folder);
        group.expanded = true;
        assert_eq!(group.icon(), NodeIcon::FolderOpen);
        assert_eq!(TreeNode::leaf("1", "h").icon(), NodeIcon::Server);
    }

    #[test]
    fn test_leaf_serializes_snake_case() {
        let value = serde_json::to_value(TreeNode::leaf("3", "db")).unwrap();
        assert_eq!(value["is_leaf"], true);
        assert!(value.get("isLeaf").is_none());
        assert!(value.get("children").is_none());
    }
}
