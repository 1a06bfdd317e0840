//! Plain-text rendering of view models
//!
//! Functions here return strings; coloring happens in `output`.

use termtree::Tree;

use crate::domain::{BroadcastRow, CategoryNode, RenderedPage, Row, TagRow, TreeView};

pub const ALL_CATEGORIES: &str = "All categories";
pub const NO_CATEGORIES: &str = "No categories";

/// One line per row: indentation by depth, `▾`/`▸` on toggleable rows.
pub fn tree_lines(view: &TreeView) -> Vec<(String, bool)> {
    let mut lines: Vec<(String, bool)> = view
        .rows
        .iter()
        .map(|row| match row {
            Row::All { is_selected } => (ALL_CATEGORIES.to_string(), *is_selected),
            Row::Category(desc) => {
                let affordance = match (desc.is_toggleable(), desc.is_expanded) {
                    (true, true) => "▾ ",
                    (true, false) => "▸ ",
                    (false, _) => "  ",
                };
                let indent = "  ".repeat(desc.depth);
                (format!("{indent}{affordance}{}", desc.name), desc.is_selected)
            }
        })
        .collect();
    if view.is_empty {
        lines.push((NO_CATEGORIES.to_string(), false));
    }
    lines
}

/// Conversion into a `termtree` outline.
pub trait OutlineConvert {
    fn to_outline(&self) -> Tree<String>;
}

impl OutlineConvert for CategoryNode {
    fn to_outline(&self) -> Tree<String> {
        let leaves: Vec<_> = self.children.iter().map(|c| c.to_outline()).collect();
        Tree::new(self.name.clone()).with_leaves(leaves)
    }
}

impl OutlineConvert for [CategoryNode] {
    fn to_outline(&self) -> Tree<String> {
        let leaves: Vec<_> = self.iter().map(|c| c.to_outline()).collect();
        Tree::new(ALL_CATEGORIES.to_string()).with_leaves(leaves)
    }
}

/// Everything after the badge: resolved colors, usage and delete state.
pub fn tag_detail(row: &TagRow) -> String {
    let usage = match row.usage_count {
        1 => "1 use".to_string(),
        n => format!("{n} uses"),
    };
    let delete = if row.deletable { "deletable" } else { "in use" };
    format!("{} on {}  {usage}, {delete}", row.foreground, row.background)
}

pub fn broadcast_header() -> String {
    format!(
        "{:<24} {:<20} {:<16} {:<10} {}",
        "NAME", "AUDIENCE", "CHANNELS", "STATUS", "DATE"
    )
}

pub fn broadcast_line(row: &BroadcastRow) -> String {
    format!(
        "{:<24} {:<20} {:<16} {:<10} {}",
        row.name,
        row.audience,
        row.channels,
        row.status.label(),
        row.date
    )
}

pub fn page_heading(page: &RenderedPage) -> String {
    format!("{} {}", page.status_code, page.title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{present_view, ExpansionState};

    fn forest() -> Vec<CategoryNode> {
        vec![
            CategoryNode::new("A", "Alpha")
                .with_children(vec![CategoryNode::new("A1", "Alpha one")]),
            CategoryNode::new("B", "Beta"),
        ]
    }

    #[test]
    fn given_expanded_view_when_rendering_then_indents_children() {
        let expanded: ExpansionState = ["A"].into_iter().collect();
        let view = present_view(&forest(), Some("A1"), &expanded).unwrap();

        let lines = tree_lines(&view);

        assert_eq!(
            lines,
            vec![
                ("All categories".to_string(), false),
                ("▾ Alpha".to_string(), false),
                ("    Alpha one".to_string(), true),
                ("  Beta".to_string(), false),
            ]
        );
    }

    #[test]
    fn given_empty_forest_when_rendering_then_empty_hint() {
        let view = present_view(&[], None, &ExpansionState::new()).unwrap();
        let lines = tree_lines(&view);
        assert_eq!(lines.last().unwrap().0, NO_CATEGORIES);
    }

    #[test]
    fn given_unused_tag_when_rendering_detail_then_marked_deletable() {
        let row = TagRow {
            id: "t1".into(),
            name: "Lead".into(),
            background: crate::domain::HexColor::new(0, 0x80, 0),
            foreground: crate::domain::HexColor::WHITE,
            usage_count: 0,
            deletable: true,
        };
        assert_eq!(tag_detail(&row), "#ffffff on #008000  0 uses, deletable");
    }

    #[test]
    fn given_forest_when_outlining_then_all_nodes_present() {
        let outline = forest().to_outline().to_string();
        assert!(outline.starts_with("All categories"));
        assert!(outline.contains("Alpha one"));
        assert!(outline.contains("Beta"));
    }
}
