/*
 * This module defines the data types exchanged between the application logic
 * and the platform layer: the events a user interaction produces (`AppEvent`),
 * the commands the logic sends back for rendering (`PlatformCommand`), the
 * platform-agnostic description of a tree row (`TreeItemDescriptor`) and the
 * `PlatformEventHandler` trait the application logic implements.
 */

use crate::core::{CatalogSnapshot, NodeKey};

// Label shown on the per-node "lowest level" control.
pub const SELECT_LOWEST_LABEL: &str = "SelectLowestCategory";
pub const UNSELECT_LOWEST_LABEL: &str = "UnSelectLowestCategory";

// Label shown on the per-node "node and all subcategories" control.
pub const SELECT_SUBTREE_LABEL: &str = "SelectCategoryAndAllSubcategories";
pub const UNSELECT_SUBTREE_LABEL: &str = "UnSelectCategoryAndAllSubcategories";

pub const SELECT_ALL_LABEL: &str = "Select All";
pub const CLEAR_ALL_LABEL: &str = "Clear All";

// Represents the visual check state of an item's checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    Checked,
    Unchecked,
}

impl From<bool> for CheckState {
    fn from(selected: bool) -> Self {
        if selected {
            CheckState::Checked
        } else {
            CheckState::Unchecked
        }
    }
}

/*
 * Describes a single row of the category tree for the renderer. Optional
 * controls are `None` when the node does not offer them. Children are only
 * described when the node is expanded.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeItemDescriptor {
    pub key: NodeKey,
    pub text: String,
    /* `None` for root-level group headers, which carry no checkbox. */
    pub check_state: Option<CheckState>,
    pub has_children: bool,
    pub expanded: bool,
    pub lowest_button_label: Option<&'static str>,
    pub subtree_button_label: Option<&'static str>,
    pub children: Vec<TreeItemDescriptor>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageSeverity {
    Information,
    Warning,
}

/*
 * Platform-agnostic user interactions, translated by the platform layer from
 * whatever input surface it drives.
 */
#[derive(Debug)]
pub enum AppEvent {
    // A fresh catalog has been fetched; replaces all session state.
    CatalogLoaded { snapshot: CatalogSnapshot },
    SearchTextChanged { text: String },
    ItemToggled { key: NodeKey },
    LowestToggled { key: NodeKey },
    SubtreeToggled { key: NodeKey },
    ExpandToggled { key: NodeKey },
    SelectAllClicked,
    // Asks for a full redraw without changing state.
    RefreshRequested,
}

// Commands from the application logic to the platform layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformCommand {
    SetHeading {
        text: String,
    },
    PopulateTreeView {
        items: Vec<TreeItemDescriptor>,
    },
    /* `None` hides the select-all control. */
    SetSelectAllLabel {
        label: Option<&'static str>,
    },
    UpdateStatusText {
        text: String,
        severity: MessageSeverity,
    },
}

// Implemented by the application logic layer to receive UI events.
pub trait PlatformEventHandler: Send + Sync + 'static {
    // Handles one event and enqueues any resulting `PlatformCommand`s.
    fn handle_event(&mut self, event: AppEvent);

    fn on_quit(&mut self) {}

    fn try_dequeue_command(&mut self) -> Option<PlatformCommand>;
}
