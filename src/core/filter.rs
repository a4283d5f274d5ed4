/*
 * Narrows a category forest to the nodes whose names contain a search query.
 * Ancestors of matching nodes are kept so the result is still a well-formed
 * tree that shows where each match lives. Non-matching descendants of a
 * matching node are pruned.
 */
use super::category_node::CategoryNode;

// Queries shorter than this (after trimming) are treated as "no filter".
pub const MIN_QUERY_LEN: usize = 3;

/*
 * Trims and lower-cases raw search text. Returns `None` when the normalized
 * query is too short to filter on.
 */
pub fn normalize_query(raw: &str) -> Option<String> {
    let query = raw.trim().to_lowercase();
    if query.chars().count() < MIN_QUERY_LEN {
        None
    } else {
        Some(query)
    }
}

/*
 * Returns the filtered forest for `raw_query`. Short queries yield a clone of
 * the input unchanged. The result never shares child lists with the input.
 */
pub fn filter_nodes(nodes: &[CategoryNode], raw_query: &str) -> Vec<CategoryNode> {
    match normalize_query(raw_query) {
        Some(query) => {
            let filtered = filter_normalized(nodes, &query);
            log::debug!(
                "Filter: Query '{query}' kept {} of {} root(s).",
                filtered.len(),
                nodes.len()
            );
            filtered
        }
        None => {
            log::trace!("Filter: Query '{raw_query}' below minimum length, tree left unfiltered.");
            nodes.to_vec()
        }
    }
}

// Filters with an already-normalized (trimmed, lower-cased) query.
fn filter_normalized(nodes: &[CategoryNode], query: &str) -> Vec<CategoryNode> {
    let mut kept = Vec::new();
    for node in nodes {
        let children = filter_normalized(&node.categories, query);
        let name_matches = node.product_name.to_lowercase().contains(query);
        if name_matches || !children.is_empty() {
            let mut kept_node = clone_without_children(node);
            kept_node.categories = children;
            kept.push(kept_node);
        }
    }
    kept
}

/*
 * Copies every field except the child list. The destructuring names each field
 * without `..`, so a field added to `CategoryNode` fails to compile here until
 * it is carried over.
 */
fn clone_without_children(node: &CategoryNode) -> CategoryNode {
    let CategoryNode {
        product_id,
        product_name,
        parent_product_id,
        has_children,
        category_id,
        is_enabled,
        can_select_subcategories,
        level1_group,
        level2_group,
        is_lowest_level,
        parent_name,
        categories: _,
        definition,
    } = node;
    CategoryNode {
        product_id: *product_id,
        product_name: product_name.clone(),
        parent_product_id: *parent_product_id,
        has_children: *has_children,
        category_id: *category_id,
        is_enabled: *is_enabled,
        can_select_subcategories: *can_select_subcategories,
        level1_group: level1_group.clone(),
        level2_group: level2_group.clone(),
        is_lowest_level: *is_lowest_level,
        parent_name: parent_name.clone(),
        categories: Vec::new(),
        definition: definition.clone(),
    }
}
