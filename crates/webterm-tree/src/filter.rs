//! Search filter and tree helpers
//!
//! The display tree is always derived from the raw tree. An empty search
//! shows the raw tree as-is; any other search flattens it into the matching
//! hosts, in depth-first order.

use crate::node::TreeNode;

/// Case-insensitive substring test used by the host search.
pub fn matches_search(title: &str, search: &str) -> bool {
    title.to_lowercase().contains(&search.to_lowercase())
}

/// Derive the display tree for `search`.
pub fn filter_tree(raw: &[TreeNode], search: Option<&str>) -> Vec<TreeNode> {
    match search {
        Some(search) if !search.is_empty() => {
            let mut matched = Vec::new();
            collect_matches(raw, search, &mut matched);
            matched
        }
        _ => raw.to_vec(),
    }
}

fn collect_matches(nodes: &[TreeNode], search: &str, out: &mut Vec<TreeNode>) {
    for node in nodes {
        if let Some(children) = &node.children {
            collect_matches(children, search, out);
        } else if node.is_leaf && matches_search(&node.title, search) {
            out.push(node.clone());
        }
    }
}

/// Copy of `raw` with every group unfolded.
pub fn expand_all(raw: &[TreeNode]) -> Vec<TreeNode> {
    raw.iter()
        .cloned()
        .map(|mut node| {
            if let Some(children) = node.children.take() {
                node.children = Some(expand_all(&children));
                node.expanded = true;
            }
            node
        })
        .collect()
}

pub fn find_node<'a>(nodes: &'a [TreeNode], key: &str) -> Option<&'a TreeNode> {
    for node in nodes {
        if node.key == key {
            return Some(node);
        }
        if let Some(found) = node.children.as_deref().and_then(|c| find_node(c, key)) {
            return Some(found);
        }
    }
    None
}

fn find_node_mut<'a>(nodes: &'a mut [TreeNode], key: &str) -> Option<&'a mut TreeNode> {
    for node in nodes {
        if node.key == key {
            return Some(node);
        }
        if let Some(found) = node.children.as_deref_mut().and_then(|c| find_node_mut(c, key)) {
            return Some(found);
        }
    }
    None
}

/// Fold or unfold the group at `key`. Returns the new state, or `None` if
/// `key` is not a group.
pub fn toggle_expanded(nodes: &mut [TreeNode], key: &str) -> Option<bool> {
    let node = find_node_mut(nodes, key)?;
    if node.is_leaf {
        return None;
    }
    node.expanded = !node.expanded;
    tracing::debug!(key = %key, expanded = node.expanded, "Toggled group");
    Some(node.expanded)
}
