use super::handler::*;

use crate::core::mock_catalog::mock_catalog;
use crate::core::selection::SelectionError;
use crate::core::tree_session::NodeView;
use crate::core::{
    AppConfig, CatalogSnapshot, CategoryNode, NodeKey, SessionError, TreeSession,
    TreeSessionOperations,
};
use crate::platform_layer::types::{
    CLEAR_ALL_LABEL, SELECT_ALL_LABEL, SELECT_LOWEST_LABEL, SELECT_SUBTREE_LABEL,
    UNSELECT_LOWEST_LABEL,
};
use crate::platform_layer::{
    AppEvent, CheckState, MessageSeverity, PlatformCommand, PlatformEventHandler,
    TreeItemDescriptor,
};

use std::sync::{Arc, Mutex};

/*
 * This module contains unit tests for `CategoryPickerLogic` from the
 * `super::handler` module. Most tests drive a real `TreeSession` loaded with the
 * sample catalog and inspect the dequeued `PlatformCommand`s; a recording mock
 * session checks that events are forwarded with the right keys.
 */

// --- MockTreeSession ---
struct MockTreeSession {
    calls: Arc<Mutex<Vec<String>>>,
    snapshot: CatalogSnapshot,
    subtree_result: Result<bool, SessionError>,
}

impl MockTreeSession {
    fn new(calls: Arc<Mutex<Vec<String>>>) -> Self {
        MockTreeSession {
            calls,
            snapshot: CatalogSnapshot::default(),
            subtree_result: Ok(true),
        }
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl TreeSessionOperations for MockTreeSession {
    fn load_snapshot(&mut self, snapshot: CatalogSnapshot) {
        self.record(format!("load_snapshot:{}", snapshot.node_count()));
        self.snapshot = snapshot;
    }
    fn set_search_text(&mut self, raw: &str) -> usize {
        self.record(format!("set_search_text:{raw}"));
        0
    }
    fn active_query(&self) -> Option<&str> {
        None
    }
    fn visible_roots(&self) -> &[CategoryNode] {
        self.snapshot.roots()
    }
    fn toggle_single(&mut self, key: &NodeKey) -> Result<bool, SessionError> {
        self.record(format!("toggle_single:{key}"));
        Ok(true)
    }
    fn toggle_lowest_only(&mut self, key: &NodeKey) -> Result<bool, SessionError> {
        self.record(format!("toggle_lowest_only:{key}"));
        Ok(true)
    }
    fn toggle_subtree(&mut self, key: &NodeKey) -> Result<bool, SessionError> {
        self.record(format!("toggle_subtree:{key}"));
        self.subtree_result.clone()
    }
    fn toggle_select_all(&mut self) -> bool {
        self.record("toggle_select_all".to_string());
        true
    }
    fn toggle_expand(&mut self, key: &NodeKey) -> Result<bool, SessionError> {
        self.record(format!("toggle_expand:{key}"));
        Ok(true)
    }
    fn is_select_all_active(&self) -> bool {
        false
    }
    fn selected_keys(&self) -> Vec<NodeKey> {
        Vec::new()
    }
    fn node_view(&self, node: &CategoryNode, is_root: bool) -> NodeView {
        NodeView {
            key: node.key(),
            name: node.product_name.clone(),
            has_children: !node.is_leaf(),
            is_expanded: false,
            show_checkbox: !is_root,
            is_selected: false,
            is_lowest_selected: false,
            allows_subtree_select: node.allows_subtree_select(),
            is_all_selected: false,
        }
    }
}
// --- End MockTreeSession ---

fn setup_logic_with_catalog(config: &AppConfig) -> CategoryPickerLogic {
    let mut logic = CategoryPickerLogic::new(Box::new(TreeSession::new()), config);
    logic.handle_event(AppEvent::CatalogLoaded {
        snapshot: CatalogSnapshot::new(mock_catalog()).unwrap(),
    });
    drain_commands(&mut logic);
    logic
}

fn drain_commands(logic: &mut CategoryPickerLogic) -> Vec<PlatformCommand> {
    let mut commands = Vec::new();
    while let Some(command) = logic.try_dequeue_command() {
        commands.push(command);
    }
    commands
}

fn last_tree(commands: &[PlatformCommand]) -> Vec<TreeItemDescriptor> {
    commands
        .iter()
        .rev()
        .find_map(|c| match c {
            PlatformCommand::PopulateTreeView { items } => Some(items.clone()),
            _ => None,
        })
        .expect("Expected a PopulateTreeView command")
}

fn last_select_all_label(commands: &[PlatformCommand]) -> Option<&'static str> {
    commands
        .iter()
        .rev()
        .find_map(|c| match c {
            PlatformCommand::SetSelectAllLabel { label } => Some(*label),
            _ => None,
        })
        .expect("Expected a SetSelectAllLabel command")
}

fn last_status(commands: &[PlatformCommand]) -> (String, MessageSeverity) {
    commands
        .iter()
        .rev()
        .find_map(|c| match c {
            PlatformCommand::UpdateStatusText { text, severity } => Some((text.clone(), *severity)),
            _ => None,
        })
        .expect("Expected an UpdateStatusText command")
}

fn find_item<'a>(items: &'a [TreeItemDescriptor], key: &str) -> Option<&'a TreeItemDescriptor> {
    for item in items {
        if item.key == NodeKey::new(key) {
            return Some(item);
        }
        if let Some(found) = find_item(&item.children, key) {
            return Some(found);
        }
    }
    None
}

fn key(k: &str) -> NodeKey {
    NodeKey::new(k)
}

#[test]
fn test_new_enqueues_heading() {
    let mut logic = CategoryPickerLogic::new(Box::new(TreeSession::new()), &AppConfig::default());
    let commands = drain_commands(&mut logic);
    assert_eq!(
        commands,
        vec![PlatformCommand::SetHeading {
            text: "Select Categories".to_string()
        }]
    );
}

#[test]
fn test_catalog_loaded_describes_expanded_roots() {
    let mut logic = CategoryPickerLogic::new(Box::new(TreeSession::new()), &AppConfig::default());
    drain_commands(&mut logic);
    logic.handle_event(AppEvent::CatalogLoaded {
        snapshot: CatalogSnapshot::new(mock_catalog()).unwrap(),
    });
    let commands = drain_commands(&mut logic);
    let tree = last_tree(&commands);

    assert_eq!(tree.len(), 2);
    let electronics = &tree[0];
    assert_eq!(electronics.text, "Electronics");
    assert_eq!(electronics.check_state, None);
    assert!(electronics.expanded);
    assert_eq!(electronics.children.len(), 3);
    assert_eq!(electronics.lowest_button_label, Some(SELECT_LOWEST_LABEL));
    assert_eq!(electronics.subtree_button_label, Some(SELECT_SUBTREE_LABEL));

    let phones = &electronics.children[0];
    assert_eq!(phones.check_state, Some(CheckState::Unchecked));
    assert!(phones.has_children);
    assert!(!phones.expanded);
    assert!(phones.children.is_empty());

    let laptops = find_item(&tree, "1020").unwrap();
    assert_eq!(laptops.lowest_button_label, None);
    assert_eq!(laptops.subtree_button_label, None);

    assert_eq!(last_select_all_label(&commands), Some(SELECT_ALL_LABEL));
    assert_eq!(
        last_status(&commands),
        ("0 categories selected".to_string(), MessageSeverity::Information)
    );
}

#[test]
fn test_expand_reveals_children() {
    let mut logic = setup_logic_with_catalog(&AppConfig::default());
    logic.handle_event(AppEvent::ExpandToggled { key: key("1001") });
    let tree = last_tree(&drain_commands(&mut logic));
    let phones = find_item(&tree, "1001").unwrap();
    assert!(phones.expanded);
    assert_eq!(phones.children.len(), 2);
}

#[test]
fn test_select_all_checks_everything_and_flips_label() {
    let mut logic = setup_logic_with_catalog(&AppConfig::default());
    logic.handle_event(AppEvent::SelectAllClicked);
    let commands = drain_commands(&mut logic);
    assert_eq!(last_select_all_label(&commands), Some(CLEAR_ALL_LABEL));
    assert_eq!(logic.session().selected_keys().len(), 14);
    let tree = last_tree(&commands);
    let phones = find_item(&tree, "1001").unwrap();
    assert_eq!(phones.check_state, Some(CheckState::Checked));

    logic.handle_event(AppEvent::SelectAllClicked);
    let commands = drain_commands(&mut logic);
    assert_eq!(last_select_all_label(&commands), Some(SELECT_ALL_LABEL));
    assert!(logic.session().selected_keys().is_empty());
}

#[test]
fn test_lowest_toggle_updates_button_label() {
    let mut logic = setup_logic_with_catalog(&AppConfig::default());
    logic.handle_event(AppEvent::LowestToggled { key: key("1010") });
    let commands = drain_commands(&mut logic);
    let tree = last_tree(&commands);
    let accessories = find_item(&tree, "1010").unwrap();
    assert_eq!(accessories.lowest_button_label, Some(UNSELECT_LOWEST_LABEL));
    assert_eq!(accessories.check_state, Some(CheckState::Unchecked));
    assert_eq!(
        last_status(&commands).0,
        "3 categories selected".to_string()
    );
}

#[test]
fn test_search_filters_visible_tree() {
    let mut logic = setup_logic_with_catalog(&AppConfig::default());
    logic.handle_event(AppEvent::SearchTextChanged {
        text: "  Phone ".to_string(),
    });
    let commands = drain_commands(&mut logic);
    let tree = last_tree(&commands);
    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0].text, "Electronics");
    assert!(find_item(&tree, "1020").is_none());
    assert_eq!(
        last_status(&commands),
        (
            "0 categories selected - filter 'phone'".to_string(),
            MessageSeverity::Information
        )
    );
    assert_eq!(logic.ui_state.filter_text.as_deref(), Some("  Phone "));
}

#[test]
fn test_search_without_matches_warns() {
    let mut logic = setup_logic_with_catalog(&AppConfig::default());
    logic.handle_event(AppEvent::SearchTextChanged {
        text: "zzz".to_string(),
    });
    let commands = drain_commands(&mut logic);
    assert!(last_tree(&commands).is_empty());
    assert!(logic.ui_state.filter_no_match);
    assert_eq!(last_status(&commands).1, MessageSeverity::Warning);

    logic.handle_event(AppEvent::SearchTextChanged {
        text: "zz".to_string(),
    });
    let commands = drain_commands(&mut logic);
    assert_eq!(last_tree(&commands).len(), 2);
    assert!(!logic.ui_state.filter_no_match);
}

#[test]
fn test_rejected_subtree_toggle_changes_nothing() {
    let mut logic = setup_logic_with_catalog(&AppConfig::default());
    logic.handle_event(AppEvent::SubtreeToggled { key: key("1010") });
    assert!(drain_commands(&mut logic).is_empty());
    assert!(logic.session().selected_keys().is_empty());
}

#[test]
fn test_unknown_key_changes_nothing() {
    let mut logic = setup_logic_with_catalog(&AppConfig::default());
    logic.handle_event(AppEvent::ItemToggled { key: key("missing") });
    assert!(drain_commands(&mut logic).is_empty());
}

#[test]
fn test_hidden_select_all_button() {
    let config = AppConfig {
        show_select_all_button: false,
        ..AppConfig::default()
    };
    let mut logic = setup_logic_with_catalog(&config);
    logic.handle_event(AppEvent::RefreshRequested);
    assert_eq!(last_select_all_label(&drain_commands(&mut logic)), None);
}

#[test]
fn test_events_are_forwarded_to_session() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let session = MockTreeSession::new(calls.clone());
    let mut logic = CategoryPickerLogic::new(Box::new(session), &AppConfig::default());

    logic.handle_event(AppEvent::ItemToggled { key: key("7") });
    logic.handle_event(AppEvent::LowestToggled { key: key("8") });
    logic.handle_event(AppEvent::SubtreeToggled { key: key("9") });
    logic.handle_event(AppEvent::ExpandToggled { key: key("10") });
    logic.handle_event(AppEvent::SelectAllClicked);
    logic.handle_event(AppEvent::SearchTextChanged {
        text: "abc".to_string(),
    });

    assert_eq!(
        *calls.lock().unwrap(),
        vec![
            "toggle_single:7",
            "toggle_lowest_only:8",
            "toggle_subtree:9",
            "toggle_expand:10",
            "toggle_select_all",
            "set_search_text:abc",
        ]
    );
}

#[test]
fn test_mock_subtree_rejection_skips_refresh() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let mut session = MockTreeSession::new(calls);
    session.subtree_result = Err(SessionError::Selection(
        SelectionError::SubtreeSelectNotAllowed(key("9")),
    ));
    let mut logic = CategoryPickerLogic::new(Box::new(session), &AppConfig::default());
    drain_commands(&mut logic);

    logic.handle_event(AppEvent::SubtreeToggled { key: key("9") });
    assert!(drain_commands(&mut logic).is_empty());
}

#[test]
fn test_empty_catalog_renders_empty_tree() {
    let mut logic = CategoryPickerLogic::new(Box::new(TreeSession::new()), &AppConfig::default());
    drain_commands(&mut logic);
    logic.handle_event(AppEvent::CatalogLoaded {
        snapshot: CatalogSnapshot::new(Vec::new()).unwrap(),
    });
    let commands = drain_commands(&mut logic);
    assert!(last_tree(&commands).is_empty());
    assert_eq!(last_select_all_label(&commands), Some(SELECT_ALL_LABEL));
}
