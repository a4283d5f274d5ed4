/*
 * Built-in sample hierarchy used when no catalog file is configured. It stands
 * in for the real catalog service and exercises every key-derivation path:
 * product ids, category-only ids and name-only nodes.
 */
use super::category_node::CategoryNode;

pub fn mock_catalog() -> Vec<CategoryNode> {
    vec![
        CategoryNode::new("Electronics")
            .with_category_id(100)
            .with_subtree_select(true)
            .with_children(vec![
                CategoryNode::new("Phones")
                    .with_product_id(1001)
                    .with_subtree_select(true)
                    .with_children(vec![
                        CategoryNode::new("Smartphones").with_product_id(1002),
                        CategoryNode::new("Feature Phones").with_product_id(1003),
                    ]),
                CategoryNode::new("Accessories")
                    .with_product_id(1010)
                    .with_children(vec![
                        CategoryNode::new("iPhone Case").with_product_id(1011),
                        CategoryNode::new("Chargers").with_product_id(1012),
                        CategoryNode::new("Headphones").with_product_id(1013),
                    ]),
                CategoryNode::new("Laptops").with_product_id(1020),
            ]),
        CategoryNode::new("Home & Garden")
            .with_category_id(200)
            .with_children(vec![
                CategoryNode::new("Furniture")
                    .with_category_id(201)
                    .with_subtree_select(true)
                    .with_children(vec![
                        CategoryNode::new("Sofas"),
                        CategoryNode::new("Tables"),
                    ]),
                CategoryNode::new("Garden Tools").with_category_id(202),
            ]),
    ]
}
