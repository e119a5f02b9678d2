//! The selection coordinator: owns the store, sequences propagation,
//! and keeps the derived selection view current.

use serde::Serialize;
use tracing::debug;

use ssoam_tree::{
    Forest, Node, NodeStore, TreeError, cascade_down, checked_leaf_nodes, filter_forest,
    leaf_nodes, reconcile_up,
};

use crate::catalog::{self, Catalog};

/// The tri-state selection model behind the account management screen.
///
/// One instance per session. Mutation is serialized by `&mut self`:
/// a toggle runs the downward cascade, merges it, runs the upward
/// reconciliation against the merged store, and recomputes the
/// selection summary before returning. The display layer only ever
/// observes complete states.
pub struct AccountSelection {
    store: NodeStore,
    standard: Vec<String>,
    unix: Vec<String>,
    dbsec: Vec<String>,
    selected: Vec<Node>,
}

/// Per-tree search results, in fixed display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults {
    pub standard: Forest,
    pub unix: Forest,
    pub dbsec: Forest,
}

impl AccountSelection {
    /// Build the seed catalog and reconcile every ancestor chain before
    /// exposing the store. Seed data only pins leaf states; non-leaf
    /// checked/indeterminate/disabled values are derived here.
    pub fn new() -> Result<Self, TreeError> {
        let Catalog {
            store,
            standard,
            unix,
            dbsec,
        } = catalog::build()?;

        let mut selection = Self {
            store,
            standard,
            unix,
            dbsec,
            selected: Vec::new(),
        };
        selection.reconcile_all();
        selection.recompute_selected();
        Ok(selection)
    }

    /// Set a node's checked state and propagate: down through its
    /// enabled subtree, then up through its ancestor chain. Unknown and
    /// disabled nodes are a defined no-op.
    pub fn toggle(&mut self, node_id: &str, checked: bool) {
        let Some(node) = self.store.get(node_id) else {
            debug!("toggle: unknown node '{node_id}'");
            return;
        };
        if node.disabled {
            debug!("toggle: node '{node_id}' is disabled");
            return;
        }

        let down = cascade_down(&self.store, node_id, checked);
        self.store.merge(down);
        let up = reconcile_up(&self.store, node_id);
        self.store.merge(up);
        self.recompute_selected();
    }

    /// Remove an entry from the selection summary by unchecking the
    /// underlying node. No-op for unknown or disabled nodes.
    pub fn remove(&mut self, node_id: &str) {
        self.toggle(node_id, false);
    }

    /// Filter each tree to nodes matching `query` plus their ancestor
    /// paths. Display-only: checked state and the selection summary are
    /// unaffected.
    pub fn search(&self, query: &str) -> SearchResults {
        SearchResults {
            standard: filter_forest(&self.standard, &self.store, query),
            unix: filter_forest(&self.unix, &self.store, query),
            dbsec: filter_forest(&self.dbsec, &self.store, query),
        }
    }

    /// Checked, enabled leaves across all three trees, in display
    /// order. Recomputed after every mutation.
    pub fn selected_leaf_nodes(&self) -> &[Node] {
        &self.selected
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.store.get(id)
    }

    /// Tooltip text for a disabled node; `None` for unknown or enabled
    /// nodes.
    pub fn restriction_reason(&self, id: &str) -> Option<&'static str> {
        self.store
            .get(id)
            .filter(|node| node.disabled)
            .map(|node| catalog::restriction_reason(&node.id))
    }

    pub fn standard_roots(&self) -> &[String] {
        &self.standard
    }

    pub fn unix_roots(&self) -> &[String] {
        &self.unix
    }

    pub fn dbsec_roots(&self) -> &[String] {
        &self.dbsec
    }

    fn all_roots(&self) -> Vec<String> {
        self.standard
            .iter()
            .chain(&self.unix)
            .chain(&self.dbsec)
            .cloned()
            .collect()
    }

    /// One upward pass per leaf chain reaches the fixed point: leaf
    /// states are seed-fixed, level 2 derives from leaves, level 1 from
    /// level 2.
    fn reconcile_all(&mut self) {
        let roots = self.all_roots();
        let leaf_ids: Vec<String> = leaf_nodes(&roots, &self.store)
            .into_iter()
            .map(|node| node.id)
            .collect();
        for id in leaf_ids {
            let updates = reconcile_up(&self.store, &id);
            self.store.merge(updates);
        }
    }

    fn recompute_selected(&mut self) {
        let roots = self.all_roots();
        self.selected = checked_leaf_nodes(&roots, &self.store);
    }
}
