/*
 * This module owns the loaded category hierarchy. A `CatalogSnapshot` is an
 * immutable, validated tree: node keys are checked for uniqueness when the
 * snapshot is built, so later selection bookkeeping can rely on them.
 *
 * Fetching the hierarchy is abstracted behind `CatalogSourceOperations` so the
 * session can be fed from a JSON file, an in-memory vector, or a mock in tests.
 */
use super::category_node::{CategoryNode, NodeKey};
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

#[derive(Debug)]
pub enum CatalogError {
    Io(io::Error),
    Serde(serde_json::Error),
    DuplicateKey(NodeKey),
    EmptyKey { name: String },
}

impl From<io::Error> for CatalogError {
    fn from(err: io::Error) -> Self {
        CatalogError::Io(err)
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Serde(err)
    }
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Io(e) => write!(f, "Catalog I/O error: {e}"),
            CatalogError::Serde(e) => write!(f, "Catalog deserialization error: {e}"),
            CatalogError::DuplicateKey(key) => {
                write!(f, "Duplicate node key '{key}' in catalog snapshot")
            }
            CatalogError::EmptyKey { name } => {
                write!(f, "Catalog node '{name}' has no usable key")
            }
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Io(e) => Some(e),
            CatalogError::Serde(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;

/*
 * A validated catalog tree together with an index from key to the node's
 * position, expressed as the child-index path from the roots.
 */
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    roots: Vec<CategoryNode>,
    index: HashMap<NodeKey, Vec<usize>>,
}

impl CatalogSnapshot {
    /*
     * Builds a snapshot, rejecting trees where any two nodes derive the same key
     * or a node derives an empty key. An empty root list is a valid, empty
     * snapshot.
     */
    pub fn new(roots: Vec<CategoryNode>) -> Result<Self> {
        let mut index = HashMap::new();
        let mut stack: Vec<(Vec<usize>, &CategoryNode)> = roots
            .iter()
            .enumerate()
            .rev()
            .map(|(i, node)| (vec![i], node))
            .collect();

        while let Some((path, node)) = stack.pop() {
            let key = node.key();
            if key.is_empty() {
                log::error!(
                    "CatalogSnapshot: Node '{}' derives an empty key.",
                    node.product_name
                );
                return Err(CatalogError::EmptyKey {
                    name: node.product_name.clone(),
                });
            }
            if index.contains_key(&key) {
                log::error!("CatalogSnapshot: Duplicate key '{key}' rejected at load time.");
                return Err(CatalogError::DuplicateKey(key));
            }
            for (i, child) in node.categories.iter().enumerate().rev() {
                let mut child_path = path.clone();
                child_path.push(i);
                stack.push((child_path, child));
            }
            index.insert(key, path);
        }

        log::debug!(
            "CatalogSnapshot: Loaded {} root(s), {} node(s) in total.",
            roots.len(),
            index.len()
        );
        Ok(CatalogSnapshot { roots, index })
    }

    pub fn roots(&self) -> &[CategoryNode] {
        &self.roots
    }

    pub fn node_count(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn contains(&self, key: &NodeKey) -> bool {
        self.index.contains_key(key)
    }

    pub fn find(&self, key: &NodeKey) -> Option<&CategoryNode> {
        let path = self.index.get(key)?;
        find_by_path(&self.roots, path)
    }
}

fn find_by_path<'a>(nodes: &'a [CategoryNode], path: &[usize]) -> Option<&'a CategoryNode> {
    let (first, rest) = path.split_first()?;
    let node = nodes.get(*first)?;
    if rest.is_empty() {
        Some(node)
    } else {
        find_by_path(&node.categories, rest)
    }
}

/*
 * Locates a node by key anywhere in a (possibly filtered) forest. Used to map a
 * key from the full snapshot onto the currently visible view.
 */
pub fn find_in_forest<'a>(nodes: &'a [CategoryNode], key: &NodeKey) -> Option<&'a CategoryNode> {
    let mut stack: Vec<&CategoryNode> = nodes.iter().rev().collect();
    while let Some(node) = stack.pop() {
        if node.key() == *key {
            return Some(node);
        }
        stack.extend(node.categories.iter().rev());
    }
    None
}

/*
 * Supplies the category hierarchy. Implementations may read from disk or a
 * remote service; the session treats the result as an opaque snapshot.
 */
pub trait CatalogSourceOperations: Send + Sync {
    fn fetch_catalog(&self) -> Result<Vec<CategoryNode>>;
}

pub struct JsonFileCatalogSource {
    path: PathBuf,
}

impl JsonFileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileCatalogSource { path: path.into() }
    }
}

impl CatalogSourceOperations for JsonFileCatalogSource {
    fn fetch_catalog(&self) -> Result<Vec<CategoryNode>> {
        log::trace!("JsonFileCatalogSource: Reading catalog from {:?}", self.path);
        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let roots: Vec<CategoryNode> = serde_json::from_reader(reader)?;
        log::debug!(
            "JsonFileCatalogSource: Read {} root node(s) from {:?}.",
            roots.len(),
            self.path
        );
        Ok(roots)
    }
}

pub struct StaticCatalogSource {
    roots: Vec<CategoryNode>,
}

impl StaticCatalogSource {
    pub fn new(roots: Vec<CategoryNode>) -> Self {
        StaticCatalogSource { roots }
    }
}

impl CatalogSourceOperations for StaticCatalogSource {
    fn fetch_catalog(&self) -> Result<Vec<CategoryNode>> {
        Ok(self.roots.clone())
    }
}

/*
 * Fetches from `source` and validates the result in one step.
 */
pub fn load_snapshot(source: &dyn CatalogSourceOperations) -> Result<CatalogSnapshot> {
    let roots = source.fetch_catalog()?;
    CatalogSnapshot::new(roots)
}
