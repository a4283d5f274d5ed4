/*
 * This module defines the PickerUiState struct, holding presentation-only state
 * for one category picker: the heading, whether the select-all control is
 * offered, and the outcome of the last search. None of it affects the engine.
 */
use crate::core::AppConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerUiState {
    pub heading: String,
    pub show_select_all_button: bool,
    /* Raw text of the last search input event. */
    pub filter_text: Option<String>,
    /* Set when an active filter left no visible nodes. */
    pub filter_no_match: bool,
}

impl PickerUiState {
    pub fn new(config: &AppConfig) -> Self {
        log::debug!("PickerUiState::new called with heading '{}'", config.heading);
        PickerUiState {
            heading: config.heading.clone(),
            show_select_all_button: config.show_select_all_button,
            filter_text: None,
            filter_no_match: false,
        }
    }

    pub fn reset_filter(&mut self) {
        self.filter_text = None;
        self.filter_no_match = false;
    }

    /*
     * Composes the status line summarizing the current selection and filter.
     */
    pub fn compose_status_text(&self, selected_count: usize, active_query: Option<&str>) -> String {
        let mut status = match selected_count {
            1 => "1 category selected".to_string(),
            n => format!("{n} categories selected"),
        };
        if let Some(query) = active_query {
            status = format!("{status} - filter '{query}'");
            if self.filter_no_match {
                status = format!("{status} (no matches)");
            }
        }
        status
    }
}
