use crate::app_logic::PickerUiState;
use crate::core::{
    AppConfig, CatalogSnapshot, CategoryNode, NodeKey, SessionError, TreeSessionOperations,
};
use crate::platform_layer::types::{
    CLEAR_ALL_LABEL, SELECT_ALL_LABEL, SELECT_LOWEST_LABEL, SELECT_SUBTREE_LABEL,
    UNSELECT_LOWEST_LABEL, UNSELECT_SUBTREE_LABEL,
};
use crate::platform_layer::{
    AppEvent, CheckState, MessageSeverity, PlatformCommand, PlatformEventHandler,
    TreeItemDescriptor,
};
use std::collections::VecDeque;

/*
 * Presenter for the category picker. It receives `AppEvent`s from the platform
 * layer, applies them to the `TreeSessionOperations` it owns, and queues
 * `PlatformCommand`s describing what the platform layer should draw. Every
 * state change is followed by a full re-description of the visible tree.
 */
pub struct CategoryPickerLogic {
    pub(crate) session: Box<dyn TreeSessionOperations>,
    pub(crate) ui_state: PickerUiState,
    synthetic_commands: VecDeque<PlatformCommand>,
}

impl CategoryPickerLogic {
    pub fn new(session: Box<dyn TreeSessionOperations>, config: &AppConfig) -> Self {
        let mut logic = CategoryPickerLogic {
            session,
            ui_state: PickerUiState::new(config),
            synthetic_commands: VecDeque::new(),
        };
        logic.enqueue_command(PlatformCommand::SetHeading {
            text: logic.ui_state.heading.clone(),
        });
        logic
    }

    #[cfg(test)]
    pub fn session(&self) -> &dyn TreeSessionOperations {
        self.session.as_ref()
    }

    fn enqueue_command(&mut self, command: PlatformCommand) {
        self.synthetic_commands.push_back(command);
    }

    /*
     * Describes the visible forest for the renderer. Root-level nodes carry no
     * checkbox; children are only described below expanded nodes.
     */
    pub(crate) fn build_tree_item_descriptors(&self) -> Vec<TreeItemDescriptor> {
        Self::build_tree_item_descriptors_recursive(
            self.session.as_ref(),
            self.session.visible_roots(),
            true,
        )
    }

    fn build_tree_item_descriptors_recursive(
        session: &dyn TreeSessionOperations,
        nodes: &[CategoryNode],
        is_root_level: bool,
    ) -> Vec<TreeItemDescriptor> {
        nodes
            .iter()
            .map(|node| {
                let view = session.node_view(node, is_root_level);
                let children = if view.has_children && view.is_expanded {
                    Self::build_tree_item_descriptors_recursive(session, &node.categories, false)
                } else {
                    Vec::new()
                };
                TreeItemDescriptor {
                    key: view.key,
                    text: view.name,
                    check_state: view
                        .show_checkbox
                        .then(|| CheckState::from(view.is_selected)),
                    has_children: view.has_children,
                    expanded: view.is_expanded,
                    lowest_button_label: view.has_children.then_some(
                        if view.is_lowest_selected {
                            UNSELECT_LOWEST_LABEL
                        } else {
                            SELECT_LOWEST_LABEL
                        },
                    ),
                    subtree_button_label: view.allows_subtree_select.then_some(
                        if view.is_all_selected {
                            UNSELECT_SUBTREE_LABEL
                        } else {
                            SELECT_SUBTREE_LABEL
                        },
                    ),
                    children,
                }
            })
            .collect()
    }

    fn select_all_label(&self) -> Option<&'static str> {
        if !self.ui_state.show_select_all_button {
            return None;
        }
        Some(if self.session.is_select_all_active() {
            CLEAR_ALL_LABEL
        } else {
            SELECT_ALL_LABEL
        })
    }

    fn enqueue_full_refresh(&mut self) {
        let items = self.build_tree_item_descriptors();
        self.enqueue_command(PlatformCommand::PopulateTreeView { items });
        let label = self.select_all_label();
        self.enqueue_command(PlatformCommand::SetSelectAllLabel { label });
        let status = self.ui_state.compose_status_text(
            self.session.selected_keys().len(),
            self.session.active_query(),
        );
        let severity = if self.ui_state.filter_no_match {
            MessageSeverity::Warning
        } else {
            MessageSeverity::Information
        };
        self.enqueue_command(PlatformCommand::UpdateStatusText {
            text: status,
            severity,
        });
    }

    fn on_catalog_loaded(&mut self, snapshot: CatalogSnapshot) {
        log::debug!(
            "AppLogic: Catalog loaded with {} node(s).",
            snapshot.node_count()
        );
        if snapshot.is_empty() {
            log::warn!("AppLogic: The loaded catalog has no categories.");
        }
        self.session.load_snapshot(snapshot);
        self.ui_state.reset_filter();
        self.enqueue_full_refresh();
    }

    fn on_search_text_changed(&mut self, text: String) {
        let visible = self.session.set_search_text(&text);
        self.ui_state.filter_no_match = self.session.active_query().is_some() && visible == 0;
        self.ui_state.filter_text = Some(text);
        self.enqueue_full_refresh();
    }

    /*
     * Applies a key-addressed toggle. A rejected operation is a caller contract
     * violation: it is logged for developers and the view is left as it was.
     */
    fn apply_toggle(
        &mut self,
        action: &str,
        key: &NodeKey,
        toggle: impl FnOnce(&mut dyn TreeSessionOperations, &NodeKey) -> Result<bool, SessionError>,
    ) {
        match toggle(self.session.as_mut(), key) {
            Ok(new_value) => {
                log::debug!("AppLogic: {action} on '{key}' -> {new_value}");
                self.enqueue_full_refresh();
            }
            Err(e) => {
                log::error!("AppLogic: {action} on '{key}' rejected: {e}");
            }
        }
    }
}

impl PlatformEventHandler for CategoryPickerLogic {
    fn handle_event(&mut self, event: AppEvent) {
        log::trace!("AppLogic: Handling {event:?}");
        match event {
            AppEvent::CatalogLoaded { snapshot } => self.on_catalog_loaded(snapshot),
            AppEvent::SearchTextChanged { text } => self.on_search_text_changed(text),
            AppEvent::ItemToggled { key } => {
                self.apply_toggle("Item toggle", &key, |s, k| s.toggle_single(k))
            }
            AppEvent::LowestToggled { key } => {
                self.apply_toggle("Lowest-level toggle", &key, |s, k| s.toggle_lowest_only(k))
            }
            AppEvent::SubtreeToggled { key } => {
                self.apply_toggle("Subtree toggle", &key, |s, k| s.toggle_subtree(k))
            }
            AppEvent::ExpandToggled { key } => {
                self.apply_toggle("Expand toggle", &key, |s, k| s.toggle_expand(k))
            }
            AppEvent::SelectAllClicked => {
                let selected = self.session.toggle_select_all();
                log::debug!("AppLogic: Select all -> {selected}");
                self.enqueue_full_refresh();
            }
            AppEvent::RefreshRequested => self.enqueue_full_refresh(),
        }
    }

    fn on_quit(&mut self) {
        log::debug!(
            "AppLogic: Quitting with {} selected categor(ies).",
            self.session.selected_keys().len()
        );
    }

    fn try_dequeue_command(&mut self) -> Option<PlatformCommand> {
        self.synthetic_commands.pop_front()
    }
}
