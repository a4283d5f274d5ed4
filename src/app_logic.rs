/*
 * This module provides the application logic layer, centered around
 * `CategoryPickerLogic`, which acts as the Presenter between the platform layer
 * and the tree session. `PickerUiState` holds its presentation-only state.
 * Unit tests for `CategoryPickerLogic` are in `handler_tests.rs`.
 */
pub mod handler;
pub mod picker_ui_state;

#[cfg(test)]
mod handler_tests;

pub use handler::CategoryPickerLogic;
pub use picker_ui_state::PickerUiState;
