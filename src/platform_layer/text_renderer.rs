/*
 * Renders `TreeItemDescriptor`s as indented text, one line per visible row.
 * Stands in for a graphical tree control.
 */
use super::types::{CheckState, TreeItemDescriptor};

const INDENT: &str = "    ";

pub struct TextRenderer;

impl TextRenderer {
    pub fn render_tree(items: &[TreeItemDescriptor]) -> Vec<String> {
        let mut lines = Vec::new();
        Self::render_level(items, 0, &mut lines);
        lines
    }

    fn render_level(items: &[TreeItemDescriptor], depth: usize, lines: &mut Vec<String>) {
        for item in items {
            lines.push(Self::render_row(item, depth));
            if item.expanded {
                Self::render_level(&item.children, depth + 1, lines);
            }
        }
    }

    /*
     * Format: `<indent>[+|-] [x|o] Name (key) <lowest> <subtree>`. The expander
     * is blank for leaves and the checkbox is absent for root rows.
     */
    pub fn render_row(item: &TreeItemDescriptor, depth: usize) -> String {
        let mut row = INDENT.repeat(depth);
        row.push_str(match (item.has_children, item.expanded) {
            (false, _) => "  ",
            (true, true) => "- ",
            (true, false) => "+ ",
        });
        match item.check_state {
            Some(CheckState::Checked) => row.push_str("[x] "),
            Some(CheckState::Unchecked) => row.push_str("[ ] "),
            None => {}
        }
        row.push_str(&format!("{} ({})", item.text, item.key));
        if let Some(label) = item.lowest_button_label {
            row.push_str(&format!(" <{label}>"));
        }
        if let Some(label) = item.subtree_button_label {
            row.push_str(&format!(" <{label}>"));
        }
        row
    }
}
