/*
 * This module holds the selection state for one displayed catalog tree and the
 * rules for how a toggle propagates. State is a sparse map from node key to
 * "selected"; an absent key reads as unselected. The tri-state queries
 * (`is_all_selected`, `is_lowest_selected`) are derived from the map and the
 * tree shape on every call, nothing is cached.
 *
 * The "select all" flag is a plain toggle. It is not recomputed when individual
 * nodes change afterwards.
 */
use super::category_node::{CategoryNode, NodeKey};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    // The node does not carry `can_select_subcategories`.
    SubtreeSelectNotAllowed(NodeKey),
}

impl std::fmt::Display for SelectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionError::SubtreeSelectNotAllowed(key) => write!(
                f,
                "Node '{key}' does not allow selecting itself with all subcategories"
            ),
        }
    }
}

impl std::error::Error for SelectionError {}

pub type Result<T> = std::result::Result<T, SelectionError>;

#[derive(Debug, Default, Clone)]
pub struct SelectionEngine {
    entries: HashMap<NodeKey, bool>,
    all_selected_flag: bool,
}

impl SelectionEngine {
    pub fn new() -> Self {
        SelectionEngine::default()
    }

    /*
     * Flips the entry for `node` alone. Descendants and ancestors are not
     * touched. Returns the new value.
     */
    pub fn toggle_single(&mut self, node: &CategoryNode) -> bool {
        let key = node.key();
        let new_value = !self.is_key_selected(&key);
        log::trace!("SelectionEngine: toggle_single '{key}' -> {new_value}");
        self.entries.insert(key, new_value);
        new_value
    }

    /*
     * Flips the global "select all" flag and writes the new value into every
     * node of every root's subtree, regardless of per-node flags.
     */
    pub fn toggle_select_all(&mut self, roots: &[CategoryNode]) -> bool {
        self.all_selected_flag = !self.all_selected_flag;
        let new_value = self.all_selected_flag;
        let mut touched = 0usize;
        for root in roots {
            root.visit_pre_order(|n| {
                self.entries.insert(n.key(), new_value);
                touched += 1;
            });
        }
        log::debug!("SelectionEngine: select all -> {new_value} ({touched} node(s)).");
        new_value
    }

    /*
     * For a leaf this is `toggle_single`. For an internal node the current
     * lowest-selected status is flipped and written into every leaf descendant.
     * Entries of internal nodes are left as they were.
     */
    pub fn toggle_lowest_only(&mut self, node: &CategoryNode) -> bool {
        if node.is_leaf() {
            return self.toggle_single(node);
        }
        let new_value = !self.is_lowest_selected(node);
        let mut leaves = 0usize;
        node.visit_pre_order(|n| {
            if n.is_leaf() {
                self.entries.insert(n.key(), new_value);
                leaves += 1;
            }
        });
        log::debug!(
            "SelectionEngine: lowest-level toggle on '{}' -> {new_value} ({leaves} leaf node(s)).",
            node.key()
        );
        new_value
    }

    /*
     * Flips the all-selected status of `node` and writes the new value into the
     * node and every descendant. Rejected, with state unchanged, when the node
     * does not allow subtree selection.
     */
    pub fn toggle_subtree(&mut self, node: &CategoryNode) -> Result<bool> {
        let key = node.key();
        if !node.allows_subtree_select() {
            log::warn!("SelectionEngine: Subtree toggle rejected for '{key}', not permitted.");
            return Err(SelectionError::SubtreeSelectNotAllowed(key));
        }
        let new_value = !self.is_all_selected(node);
        self.set_subtree(node, new_value);
        log::debug!("SelectionEngine: subtree toggle on '{key}' -> {new_value}");
        Ok(new_value)
    }

    fn set_subtree(&mut self, node: &CategoryNode, value: bool) {
        node.visit_pre_order(|n| {
            self.entries.insert(n.key(), value);
        });
    }

    pub fn is_selected(&self, node: &CategoryNode) -> bool {
        self.is_key_selected(&node.key())
    }

    pub fn is_key_selected(&self, key: &NodeKey) -> bool {
        self.entries.get(key).copied().unwrap_or(false)
    }

    /*
     * True iff the node and every descendant have a selected entry.
     */
    pub fn is_all_selected(&self, node: &CategoryNode) -> bool {
        let mut all = true;
        node.visit_pre_order(|n| {
            if all && !self.is_selected(n) {
                all = false;
            }
        });
        all
    }

    /*
     * True iff every leaf in the node's subtree is selected. Internal entries
     * are ignored.
     */
    pub fn is_lowest_selected(&self, node: &CategoryNode) -> bool {
        let mut all = true;
        node.visit_pre_order(|n| {
            if all && n.is_leaf() && !self.is_selected(n) {
                all = false;
            }
        });
        all
    }

    pub fn is_global_all_selected(&self) -> bool {
        self.all_selected_flag
    }

    // The raw map entry, distinguishing "never touched" from "set to false".
    #[cfg(test)]
    pub fn entry(&self, key: &NodeKey) -> Option<bool> {
        self.entries.get(key).copied()
    }

    pub fn selected_keys(&self) -> Vec<NodeKey> {
        let mut keys: Vec<NodeKey> = self
            .entries
            .iter()
            .filter(|(_, selected)| **selected)
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        keys
    }
}
