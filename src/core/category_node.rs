use serde::{Deserialize, Serialize};
use std::fmt;

/*
 * The identity of a node within one catalog snapshot. Selection and expansion
 * maps are keyed by this value, so it must be unique across the snapshot.
 */
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeKey(String);

impl NodeKey {
    pub fn new(key: impl Into<String>) -> Self {
        NodeKey(key.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/*
 * Represents one entry in the category hierarchy as delivered by the catalog
 * service. The engine never mutates node content; the filter produces new nodes
 * with a pruned `categories` list, everything else is carried through untouched.
 * Field names follow the catalog service's camelCase JSON.
 */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryNode {
    #[serde(rename = "productID", default)]
    pub product_id: Option<i64>,
    pub product_name: String,
    #[serde(rename = "parentProductID", default)]
    pub parent_product_id: Option<i64>,
    #[serde(default)]
    pub has_children: bool,
    #[serde(rename = "categoryID", default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub is_enabled: bool,
    // Gates the "select node and all descendants" action.
    #[serde(rename = "canSelectsubcategories", default)]
    pub can_select_subcategories: bool,
    #[serde(default)]
    pub level1_group: Option<String>,
    #[serde(default)]
    pub level2_group: Option<String>,
    #[serde(default)]
    pub is_lowest_level: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_name: Option<String>,
    #[serde(default)]
    pub categories: Vec<CategoryNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
}

impl CategoryNode {
    /*
     * Creates a node with only a display name set. All identifiers are absent,
     * so the key falls back to the name until `with_product_id` or
     * `with_category_id` is applied.
     */
    pub fn new(name: impl Into<String>) -> Self {
        CategoryNode {
            product_id: None,
            product_name: name.into(),
            parent_product_id: None,
            has_children: false,
            category_id: None,
            is_enabled: true,
            can_select_subcategories: false,
            level1_group: None,
            level2_group: None,
            is_lowest_level: true,
            parent_name: None,
            categories: Vec::new(),
            definition: None,
        }
    }

    pub fn with_product_id(mut self, id: i64) -> Self {
        self.product_id = Some(id);
        self
    }

    pub fn with_category_id(mut self, id: i64) -> Self {
        self.category_id = Some(id);
        self
    }

    pub fn with_subtree_select(mut self, allowed: bool) -> Self {
        self.can_select_subcategories = allowed;
        self
    }

    /*
     * Attaches children and keeps the descriptive flags consistent with them.
     * Each child's `parent_product_id` and `parent_name` are filled in from
     * this node when not already present.
     */
    pub fn with_children(mut self, children: Vec<CategoryNode>) -> Self {
        let parent_id = self.product_id;
        let parent_name = self.product_name.clone();
        self.categories = children
            .into_iter()
            .map(|mut child| {
                if child.parent_product_id.is_none() {
                    child.parent_product_id = parent_id;
                }
                if child.parent_name.is_none() {
                    child.parent_name = Some(parent_name.clone());
                }
                child
            })
            .collect();
        self.has_children = !self.categories.is_empty();
        self.is_lowest_level = self.categories.is_empty();
        self
    }

    /*
     * Derives the node's identity: the product id if present, else the
     * category id, else the display name.
     */
    pub fn key(&self) -> NodeKey {
        match (self.product_id, self.category_id) {
            (Some(id), _) => NodeKey(id.to_string()),
            (None, Some(id)) => NodeKey(id.to_string()),
            (None, None) => NodeKey(self.product_name.clone()),
        }
    }

    // Leaf-ness is decided by the child list alone, never by `is_lowest_level`.
    pub fn is_leaf(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn allows_subtree_select(&self) -> bool {
        self.can_select_subcategories
    }

    /*
     * Visits this node and every descendant in pre-order, children in their
     * original order. Uses an explicit work stack so deep catalogs cannot
     * exhaust the call stack.
     */
    pub fn visit_pre_order<'a>(&'a self, mut visit: impl FnMut(&'a CategoryNode)) {
        let mut stack: Vec<&'a CategoryNode> = vec![self];
        while let Some(node) = stack.pop() {
            visit(node);
            for child in node.categories.iter().rev() {
                stack.push(child);
            }
        }
    }
}
