/*
 * This module defines the TreeSession struct and the TreeSessionOperations trait.
 * A TreeSession ties one loaded catalog snapshot to its filtered view, its
 * selection state and its expansion state. Callers address nodes by key; the
 * session resolves the key, applies the engine operation and answers the
 * per-node questions a renderer needs.
 *
 * Loading a new snapshot replaces selection and expansion wholesale. Changing
 * the search text only replaces the visible view.
 */
use super::catalog::{self, CatalogSnapshot};
use super::category_node::{CategoryNode, NodeKey};
use super::expansion::ExpansionEngine;
use super::filter;
use super::selection::{SelectionEngine, SelectionError};

// Why a key-addressed session operation was refused. State is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    UnknownNode(NodeKey),
    Selection(SelectionError),
}

impl From<SelectionError> for SessionError {
    fn from(err: SelectionError) -> Self {
        SessionError::Selection(err)
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::UnknownNode(key) => write!(f, "No node with key '{key}' is loaded"),
            SessionError::Selection(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Selection(e) => Some(e),
            SessionError::UnknownNode(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;

/*
 * Everything a renderer needs to draw one node. Derived on demand, never stored.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeView {
    pub key: NodeKey,
    pub name: String,
    pub has_children: bool,
    pub is_expanded: bool,
    /* Root-level nodes act as group headers and carry no checkbox. */
    pub show_checkbox: bool,
    pub is_selected: bool,
    pub is_lowest_selected: bool,
    pub allows_subtree_select: bool,
    pub is_all_selected: bool,
}

pub trait TreeSessionOperations: Send + Sync {
    fn load_snapshot(&mut self, snapshot: CatalogSnapshot);
    fn set_search_text(&mut self, raw: &str) -> usize;
    fn active_query(&self) -> Option<&str>;
    fn visible_roots(&self) -> &[CategoryNode];

    fn toggle_single(&mut self, key: &NodeKey) -> Result<bool>;
    fn toggle_lowest_only(&mut self, key: &NodeKey) -> Result<bool>;
    fn toggle_subtree(&mut self, key: &NodeKey) -> Result<bool>;
    fn toggle_select_all(&mut self) -> bool;
    fn toggle_expand(&mut self, key: &NodeKey) -> Result<bool>;

    fn is_select_all_active(&self) -> bool;
    fn selected_keys(&self) -> Vec<NodeKey>;
    fn node_view(&self, node: &CategoryNode, is_root: bool) -> NodeView;
}

#[derive(Debug, Default)]
pub struct TreeSession {
    snapshot: CatalogSnapshot,
    filtered_roots: Option<Vec<CategoryNode>>,
    active_query: Option<String>,
    selection: SelectionEngine,
    expansion: ExpansionEngine,
}

impl TreeSession {
    pub fn new() -> Self {
        log::debug!("TreeSession::new called - no catalog loaded.");
        TreeSession::default()
    }

    #[cfg(test)]
    pub fn with_snapshot(snapshot: CatalogSnapshot) -> Self {
        let mut session = TreeSession::new();
        session.load_snapshot(snapshot);
        session
    }

    #[cfg(test)]
    pub fn selection(&self) -> &SelectionEngine {
        &self.selection
    }

    #[cfg(test)]
    pub fn expansion(&self) -> &ExpansionEngine {
        &self.expansion
    }
}

/*
 * Resolves `key` to the node as the user currently sees it: the filtered node
 * when a filter is active and the node survived it, otherwise the node from the
 * full snapshot. Only the tree fields are borrowed, so the engines stay free
 * for mutation while the node is held.
 */
fn resolve_node<'a>(
    snapshot: &'a CatalogSnapshot,
    filtered_roots: Option<&'a [CategoryNode]>,
    key: &NodeKey,
) -> Result<&'a CategoryNode> {
    if let Some(node) = filtered_roots.and_then(|roots| catalog::find_in_forest(roots, key)) {
        return Ok(node);
    }
    snapshot.find(key).ok_or_else(|| {
        log::warn!("TreeSession: Unknown node key '{key}'.");
        SessionError::UnknownNode(key.clone())
    })
}

impl TreeSessionOperations for TreeSession {
    fn load_snapshot(&mut self, snapshot: CatalogSnapshot) {
        log::debug!(
            "TreeSession: Loading snapshot with {} node(s); selection and expansion reset.",
            snapshot.node_count()
        );
        self.selection = SelectionEngine::new();
        self.expansion = ExpansionEngine::new();
        self.expansion.initialize_roots(snapshot.roots());
        self.filtered_roots = None;
        self.active_query = None;
        self.snapshot = snapshot;
    }

    /*
     * Re-filters the full snapshot. Selection and expansion are untouched, so
     * nodes that survive the filter keep their prior state. Returns the number
     * of visible root nodes.
     */
    fn set_search_text(&mut self, raw: &str) -> usize {
        match filter::normalize_query(raw) {
            Some(query) => {
                let filtered = filter::filter_nodes(self.snapshot.roots(), raw);
                let count = filtered.len();
                self.filtered_roots = Some(filtered);
                self.active_query = Some(query);
                count
            }
            None => {
                if self.active_query.is_some() {
                    log::debug!("TreeSession: Filter cleared.");
                }
                self.filtered_roots = None;
                self.active_query = None;
                self.snapshot.roots().len()
            }
        }
    }

    fn active_query(&self) -> Option<&str> {
        self.active_query.as_deref()
    }

    fn visible_roots(&self) -> &[CategoryNode] {
        match &self.filtered_roots {
            Some(filtered) => filtered,
            None => self.snapshot.roots(),
        }
    }

    fn toggle_single(&mut self, key: &NodeKey) -> Result<bool> {
        let node = resolve_node(&self.snapshot, self.filtered_roots.as_deref(), key)?;
        Ok(self.selection.toggle_single(node))
    }

    fn toggle_lowest_only(&mut self, key: &NodeKey) -> Result<bool> {
        let node = resolve_node(&self.snapshot, self.filtered_roots.as_deref(), key)?;
        Ok(self.selection.toggle_lowest_only(node))
    }

    fn toggle_subtree(&mut self, key: &NodeKey) -> Result<bool> {
        let node = resolve_node(&self.snapshot, self.filtered_roots.as_deref(), key)?;
        Ok(self.selection.toggle_subtree(node)?)
    }

    // Acts on the visible roots, so an active filter limits what gets selected.
    fn toggle_select_all(&mut self) -> bool {
        let roots = match &self.filtered_roots {
            Some(filtered) => filtered.as_slice(),
            None => self.snapshot.roots(),
        };
        self.selection.toggle_select_all(roots)
    }

    fn toggle_expand(&mut self, key: &NodeKey) -> Result<bool> {
        if !self.snapshot.contains(key) {
            log::warn!("TreeSession: Cannot expand unknown node '{key}'.");
            return Err(SessionError::UnknownNode(key.clone()));
        }
        Ok(self.expansion.toggle_expand_key(key.clone()))
    }

    fn is_select_all_active(&self) -> bool {
        self.selection.is_global_all_selected()
    }

    fn selected_keys(&self) -> Vec<NodeKey> {
        self.selection.selected_keys()
    }

    fn node_view(&self, node: &CategoryNode, is_root: bool) -> NodeView {
        NodeView {
            key: node.key(),
            name: node.product_name.clone(),
            has_children: !node.is_leaf(),
            is_expanded: self.expansion.is_expanded(node),
            show_checkbox: !is_root,
            is_selected: self.selection.is_selected(node),
            is_lowest_selected: self.selection.is_lowest_selected(node),
            allows_subtree_select: node.allows_subtree_select(),
            is_all_selected: self.selection.is_all_selected(node),
        }
    }
}
