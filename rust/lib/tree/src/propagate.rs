//! Checked-state propagation: downward cascade and upward
//! reconciliation over the flat node store.
//!
//! Both passes are pure: they read a store snapshot and return the
//! partial mapping of nodes they changed. The caller merges that into
//! the authoritative store, and must merge the downward result before
//! running the upward pass so each parent sees final child values.

use std::collections::{BTreeMap, VecDeque};

use tracing::debug;

use crate::node::{Node, NodeStore};

/// Cascade an explicit checked-state change down the subtree rooted at
/// `id`.
///
/// Every visited enabled node gets `checked` set to the requested value
/// and `indeterminate` cleared. A disabled node walls off its subtree:
/// its own state is untouched and traversal does not descend into its
/// children. Dangling child ids are skipped.
pub fn cascade_down(store: &NodeStore, id: &str, checked: bool) -> BTreeMap<String, Node> {
    let mut updated = BTreeMap::new();
    let mut queue = VecDeque::from([id.to_string()]);

    while let Some(current_id) = queue.pop_front() {
        let Some(node) = store.get(&current_id) else {
            debug!("cascade_down: skipping unknown node '{current_id}'");
            continue;
        };
        if node.disabled {
            continue;
        }

        if node.checked != checked || node.indeterminate {
            let mut next = node.clone();
            next.checked = checked;
            next.indeterminate = false;
            updated.insert(current_id, next);
        }
        for child_id in node.child_ids() {
            queue.push_back(child_id.clone());
        }
    }

    updated
}

/// Recompute every ancestor of `id`, walking strictly bottom-up so each
/// parent is derived from already-recomputed child values.
///
/// For each parent, direct children are partitioned into disabled and
/// active (enabled) sets:
///
/// - the parent is disabled iff it has children and all of them are
///   disabled;
/// - with no active children, `checked` mirrors whether all (disabled)
///   children are checked and `indeterminate` is forced off, so a
///   fully-disabled subtree still reports a definite aggregate;
/// - otherwise `checked` means every active child is fully checked, and
///   `indeterminate` means partial selection exists beneath: some but
///   not all active children checked, or any active child itself
///   indeterminate.
pub fn reconcile_up(store: &NodeStore, id: &str) -> BTreeMap<String, Node> {
    let mut updated: BTreeMap<String, Node> = BTreeMap::new();

    let Some(start) = store.get(id) else {
        debug!("reconcile_up: unknown node '{id}'");
        return updated;
    };

    let mut parent_id = start.parent.clone();
    while let Some(current_id) = parent_id {
        let Some(parent) = updated
            .get(&current_id)
            .or_else(|| store.get(&current_id))
            .cloned()
        else {
            debug!("reconcile_up: skipping unknown parent '{current_id}'");
            break;
        };

        // Reads see earlier writes from this walk before the shared
        // store, so each level uses final child values.
        let mut children = Vec::new();
        for child_id in parent.child_ids() {
            match updated.get(child_id).or_else(|| store.get(child_id)) {
                Some(child) => children.push(child.clone()),
                None => debug!("reconcile_up: skipping unknown child '{child_id}'"),
            }
        }

        let all_disabled = !children.is_empty() && children.iter().all(|c| c.disabled);
        let active: Vec<&Node> = children.iter().filter(|c| !c.disabled).collect();

        let mut next = parent.clone();
        next.disabled = all_disabled;
        if active.is_empty() {
            next.checked = !children.is_empty() && children.iter().all(|c| c.checked);
            next.indeterminate = false;
        } else {
            let checked_count = active.iter().filter(|c| c.checked).count();
            let indeterminate_count = active.iter().filter(|c| c.indeterminate).count();
            let all_checked = checked_count == active.len();
            let none_selected = checked_count == 0 && indeterminate_count == 0;
            next.checked = all_checked;
            next.indeterminate = (!all_checked && !none_selected) || indeterminate_count > 0;
        }

        parent_id = next.parent.clone();
        updated.insert(current_id, next);
    }

    updated
}
