use std::collections::{BTreeMap, BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::error::TreeError;

/// A single permission node in an account tree.
///
/// Nodes form a fixed three-tier forest via id references: `parent`
/// points at the owning node, `children` lists direct descendants in
/// display order. The flat [`NodeStore`] owns every node; relations are
/// always ids, never nested ownership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier, stable for the process lifetime.
    pub id: String,

    /// Display label. Search matches against this, case-insensitively.
    pub label: String,

    /// Selection state.
    pub checked: bool,

    /// True iff some but not all eligible descendants are checked.
    /// Derived, never set directly by a user action; always false for
    /// leaves.
    #[serde(default)]
    pub indeterminate: bool,

    /// A disabled node cannot be toggled and is excluded from its
    /// parent's active-child aggregation.
    pub disabled: bool,

    /// Ordered child ids. `None` for leaves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<String>>,

    /// Owning node id (`None` for roots).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    /// Tier: 1 = category, 2 = sub-category, 3 = terminal permission.
    pub level: u8,
}

impl Node {
    /// A node is a leaf when it has no children entry (or an empty one).
    pub fn is_leaf(&self) -> bool {
        self.children.as_ref().is_none_or(|c| c.is_empty())
    }

    /// Child ids in declared order; empty slice for leaves.
    pub fn child_ids(&self) -> &[String] {
        self.children.as_deref().unwrap_or(&[])
    }
}

/// Flat id-indexed arena holding every node of every tree.
///
/// All algorithms operate by id lookup against this map. Iteration
/// order is the id order of the underlying `BTreeMap`, which makes
/// whole-store scans (e.g. search matching) deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeStore {
    nodes: BTreeMap<String, Node>,
}

impl NodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Node)> {
        self.nodes.iter()
    }

    /// Insert a new node. Rejects duplicate ids — the store is built
    /// exactly once from seed data, so a duplicate is a seed defect.
    pub fn insert(&mut self, node: Node) -> Result<(), TreeError> {
        if self.nodes.contains_key(&node.id) {
            return Err(TreeError::DuplicateNode(node.id));
        }
        self.nodes.insert(node.id.clone(), node);
        Ok(())
    }

    /// Merge a partial mapping of updated nodes, as returned by the
    /// propagation passes. Existing entries are overwritten.
    pub fn merge(&mut self, updates: BTreeMap<String, Node>) {
        for (id, node) in updates {
            self.nodes.insert(id, node);
        }
    }

    /// Check the structural invariants against the given root list:
    /// every child/parent id resolves, parent back-references agree
    /// with the child lists, and each node is reachable from exactly
    /// one root (the mapping is a forest).
    pub fn validate(&self, roots: &[String]) -> Result<(), TreeError> {
        for (id, node) in &self.nodes {
            if let Some(parent_id) = &node.parent
                && !self.nodes.contains_key(parent_id)
            {
                return Err(TreeError::UnknownParent {
                    node: id.clone(),
                    parent: parent_id.clone(),
                });
            }
            for child_id in node.child_ids() {
                let Some(child) = self.nodes.get(child_id) else {
                    return Err(TreeError::UnknownChild {
                        parent: id.clone(),
                        child: child_id.clone(),
                    });
                };
                if child.parent.as_deref() != Some(id.as_str()) {
                    return Err(TreeError::ParentMismatch {
                        child: child_id.clone(),
                        declared: child.parent.clone(),
                        actual: id.clone(),
                    });
                }
            }
        }

        // Reachability: breadth-first from each root. A revisit means a
        // node is shared between trees (or a cycle); leftovers are
        // orphans.
        let mut visited = BTreeSet::new();
        let mut queue: VecDeque<&str> = roots.iter().map(String::as_str).collect();
        while let Some(id) = queue.pop_front() {
            if !visited.insert(id.to_string()) {
                return Err(TreeError::NodeInMultipleTrees(id.to_string()));
            }
            if let Some(node) = self.nodes.get(id) {
                for child_id in node.child_ids() {
                    queue.push_back(child_id);
                }
            }
        }
        for id in self.nodes.keys() {
            if !visited.contains(id) {
                return Err(TreeError::UnreachableNode(id.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, parent: Option<&str>, children: &[&str]) -> Node {
        Node {
            id: id.to_string(),
            label: id.to_string(),
            checked: false,
            indeterminate: false,
            disabled: false,
            children: if children.is_empty() {
                None
            } else {
                Some(children.iter().map(|c| c.to_string()).collect())
            },
            parent: parent.map(|p| p.to_string()),
            level: 1,
        }
    }

    #[test]
    fn insert_rejects_duplicates() {
        let mut store = NodeStore::new();
        store.insert(node("a", None, &[])).unwrap();
        assert!(matches!(
            store.insert(node("a", None, &[])),
            Err(TreeError::DuplicateNode(_))
        ));
    }

    #[test]
    fn validate_accepts_consistent_forest() {
        let mut store = NodeStore::new();
        store.insert(node("root", None, &["kid"])).unwrap();
        store.insert(node("kid", Some("root"), &[])).unwrap();
        store.validate(&["root".to_string()]).unwrap();
    }

    #[test]
    fn validate_catches_dangling_child() {
        let mut store = NodeStore::new();
        store.insert(node("root", None, &["ghost"])).unwrap();
        assert!(matches!(
            store.validate(&["root".to_string()]),
            Err(TreeError::UnknownChild { .. })
        ));
    }

    #[test]
    fn validate_catches_parent_mismatch() {
        let mut store = NodeStore::new();
        store.insert(node("root", None, &["kid"])).unwrap();
        store.insert(node("kid", Some("other"), &[])).unwrap();
        store.insert(node("other", None, &[])).unwrap();
        assert!(matches!(
            store.validate(&["root".to_string(), "other".to_string()]),
            Err(TreeError::ParentMismatch { .. })
        ));
    }

    #[test]
    fn validate_catches_orphan() {
        let mut store = NodeStore::new();
        store.insert(node("root", None, &[])).unwrap();
        store.insert(node("stray", None, &[])).unwrap();
        assert!(matches!(
            store.validate(&["root".to_string()]),
            Err(TreeError::UnreachableNode(_))
        ));
    }

    #[test]
    fn node_serializes_without_absent_relations() {
        let json = serde_json::to_value(node("solo", None, &[])).unwrap();
        assert_eq!(json["id"], "solo");
        assert!(json.get("children").is_none());
        assert!(json.get("parent").is_none());

        let back: Node = serde_json::from_value(json).unwrap();
        assert!(back.is_leaf());
        assert!(!back.indeterminate);
    }

    #[test]
    fn leaf_is_structural() {
        let branch = node("b", None, &["x"]);
        let leaf = node("l", None, &[]);
        assert!(!branch.is_leaf());
        assert!(leaf.is_leaf());

        let mut empty_children = node("e", None, &[]);
        empty_children.children = Some(vec![]);
        assert!(empty_children.is_leaf());
    }
}
