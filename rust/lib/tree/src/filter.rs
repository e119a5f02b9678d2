//! Search filtering: prune a forest to label matches plus the ancestor
//! path of each match.
//!
//! The filter is display-only. It never mutates the shared store and
//! never touches checked state; pruned nodes are fresh copies with
//! recomputed child lists. Sibling branches without a match are
//! dropped, so an operator scanning many permissions sees each match in
//! its structural position and nothing else.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::node::{Node, NodeStore};

/// An ordered root list plus the pruned nodes backing it — the display
/// snapshot of one tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Forest {
    /// Kept roots, in original seed order.
    pub roots: Vec<String>,
    /// Pruned copies of every kept node, keyed by id.
    pub nodes: BTreeMap<String, Node>,
}

impl Forest {
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }
}

/// Reduce the tree under `roots` to nodes whose label contains `query`
/// (case-insensitive) plus the ancestors needed to reach them.
///
/// An empty query is the identity: the full tree is returned unchanged.
/// Matching scans the entire store — a match belonging to another tree
/// simply falls outside `roots` and does not appear in the result. A
/// root is kept only when it matches or a match descends from it; with
/// no matches at all the forest is empty.
pub fn filter_forest(roots: &[String], store: &NodeStore, query: &str) -> Forest {
    if query.is_empty() {
        return snapshot(roots, store);
    }

    let needle = query.to_lowercase();

    // Keep-set: every match plus its ancestor chain. Once an ancestor
    // is already present its chain above is recorded too, so the walk
    // can stop early.
    let mut keep: HashSet<String> = HashSet::new();
    for (id, node) in store.iter() {
        if !node.label.to_lowercase().contains(&needle) {
            continue;
        }
        if !keep.insert(id.clone()) {
            continue;
        }
        let mut current = node.parent.clone();
        while let Some(parent_id) = current {
            if !keep.insert(parent_id.clone()) {
                break;
            }
            match store.get(&parent_id) {
                Some(parent) => current = parent.parent.clone(),
                None => {
                    debug!("filter_forest: skipping unknown parent '{parent_id}'");
                    break;
                }
            }
        }
    }

    let mut forest = Forest::default();
    for root_id in roots {
        if !keep.contains(root_id) {
            continue;
        }
        forest.roots.push(root_id.clone());
        prune_into(root_id, store, &keep, &mut forest.nodes);
    }
    forest
}

/// Copy the kept slice of the tree at `id`, restricting each child list
/// to kept descendants. A kept node with nothing kept below it comes
/// out as a leaf.
fn prune_into(id: &str, store: &NodeStore, keep: &HashSet<String>, out: &mut BTreeMap<String, Node>) {
    let Some(node) = store.get(id) else {
        debug!("filter_forest: skipping unknown node '{id}'");
        return;
    };
    let kept_children: Vec<String> = node
        .child_ids()
        .iter()
        .filter(|child_id| keep.contains(*child_id))
        .cloned()
        .collect();

    let mut copy = node.clone();
    copy.children = if kept_children.is_empty() {
        None
    } else {
        Some(kept_children.clone())
    };
    out.insert(id.to_string(), copy);

    for child_id in kept_children {
        prune_into(&child_id, store, keep, out);
    }
}

/// Identity snapshot: all roots, every reachable node unchanged.
fn snapshot(roots: &[String], store: &NodeStore) -> Forest {
    let mut forest = Forest {
        roots: roots.to_vec(),
        nodes: BTreeMap::new(),
    };
    let mut stack: Vec<String> = roots.to_vec();
    while let Some(id) = stack.pop() {
        let Some(node) = store.get(&id) else {
            debug!("filter_forest: skipping unknown node '{id}'");
            continue;
        };
        for child_id in node.child_ids() {
            stack.push(child_id.clone());
        }
        forest.nodes.insert(id, node.clone());
    }
    forest
}
