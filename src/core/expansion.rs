/*
 * Tracks which nodes are expanded. Independent of selection. Absent keys read
 * as collapsed; root-level nodes are expanded when a snapshot is first loaded.
 */
use super::category_node::{CategoryNode, NodeKey};
use std::collections::HashMap;

#[derive(Debug, Default, Clone)]
pub struct ExpansionEngine {
    entries: HashMap<NodeKey, bool>,
}

impl ExpansionEngine {
    pub fn new() -> Self {
        ExpansionEngine::default()
    }

    /*
     * Marks every root as expanded. Deeper levels keep whatever state they had.
     */
    pub fn initialize_roots(&mut self, roots: &[CategoryNode]) {
        for root in roots {
            self.entries.insert(root.key(), true);
        }
        log::debug!("ExpansionEngine: Expanded {} root node(s).", roots.len());
    }

    pub fn toggle_expand_key(&mut self, key: NodeKey) -> bool {
        let expanded = !self.is_key_expanded(&key);
        log::trace!("ExpansionEngine: '{key}' expanded -> {expanded}");
        self.entries.insert(key, expanded);
        expanded
    }

    pub fn is_expanded(&self, node: &CategoryNode) -> bool {
        self.is_key_expanded(&node.key())
    }

    pub fn is_key_expanded(&self, key: &NodeKey) -> bool {
        self.entries.get(key).copied().unwrap_or(false)
    }
}
