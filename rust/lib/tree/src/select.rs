//! Leaf enumeration: the flat "selected items" view is always derived
//! from scratch, never patched incrementally.

use tracing::debug;

use crate::node::{Node, NodeStore};

/// All structural leaves under `roots`, depth-first pre-order: roots in
/// the given order, children in declared order.
pub fn leaf_nodes(roots: &[String], store: &NodeStore) -> Vec<Node> {
    let mut leaves = Vec::new();
    for root_id in roots {
        collect(root_id, store, &mut leaves);
    }
    leaves
}

/// Leaves that are checked and enabled — the selection summary.
pub fn checked_leaf_nodes(roots: &[String], store: &NodeStore) -> Vec<Node> {
    leaf_nodes(roots, store)
        .into_iter()
        .filter(|n| n.checked && !n.disabled)
        .collect()
}

fn collect(id: &str, store: &NodeStore, out: &mut Vec<Node>) {
    let Some(node) = store.get(id) else {
        debug!("leaf_nodes: skipping unknown node '{id}'");
        return;
    };
    if node.is_leaf() {
        out.push(node.clone());
        return;
    }
    for child_id in node.child_ids() {
        collect(child_id, store, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, parent: Option<&str>, children: &[&str], checked: bool, disabled: bool) -> Node {
        Node {
            id: id.to_string(),
            label: id.to_string(),
            checked,
            indeterminate: false,
            disabled,
            children: if children.is_empty() {
                None
            } else {
                Some(children.iter().map(|c| c.to_string()).collect())
            },
            parent: parent.map(|p| p.to_string()),
            level: 1,
        }
    }

    fn fixture() -> (Vec<String>, NodeStore) {
        let mut store = NodeStore::new();
        for n in [
            node("root", None, &["a", "b", "c"], false, false),
            node("a", Some("root"), &[], true, false),
            node("b", Some("root"), &[], false, false),
            node("c", Some("root"), &[], true, true),
        ] {
            store.insert(n).unwrap();
        }
        (vec!["root".to_string()], store)
    }

    #[test]
    fn leaves_in_declared_order() {
        let (roots, store) = fixture();
        let ids: Vec<String> = leaf_nodes(&roots, &store).into_iter().map(|n| n.id).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn checked_leaves_exclude_unchecked_and_disabled() {
        // a: checked, b: unchecked, c: checked but disabled.
        let (roots, store) = fixture();
        let ids: Vec<String> = checked_leaf_nodes(&roots, &store)
            .into_iter()
            .map(|n| n.id)
            .collect();
        assert_eq!(ids, ["a"]);
    }

    #[test]
    fn childless_root_is_a_leaf() {
        let mut store = NodeStore::new();
        store.insert(node("solo", None, &[], true, false)).unwrap();
        let roots = vec!["solo".to_string()];
        assert_eq!(leaf_nodes(&roots, &store).len(), 1);
        assert_eq!(checked_leaf_nodes(&roots, &store)[0].id, "solo");
    }

    #[test]
    fn unknown_root_is_skipped() {
        let store = NodeStore::new();
        assert!(leaf_nodes(&["ghost".to_string()], &store).is_empty());
    }
}
