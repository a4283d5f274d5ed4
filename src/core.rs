/*
 * This module consolidates the core, platform-agnostic logic of the category
 * picker: the category node model and key derivation, validated catalog
 * snapshots and their sources, the search filter, the selection and expansion
 * engines, and the `TreeSession` that composes them for one displayed tree.
 * Configuration handling lives here as well.
 */
pub mod catalog;
pub mod category_node;
pub mod config;
pub mod expansion;
pub mod filter;
pub mod mock_catalog;
pub mod path_utils;
pub mod selection;
pub mod tree_session;

pub use category_node::{CategoryNode, NodeKey};

pub use catalog::{
    CatalogSnapshot, CatalogSourceOperations, JsonFileCatalogSource, StaticCatalogSource,
};

pub use config::{AppConfig, ConfigManagerOperations, CoreConfigManager, DirectoryConfigManager};

pub use tree_session::{SessionError, TreeSession, TreeSessionOperations};
