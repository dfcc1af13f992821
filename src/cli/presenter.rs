//! Terminal presenter: hierarchy as a tree, episodes as a table.

use colored::{ColoredString, Colorize};
use termtree::Tree;

use crate::application::Presenter;
use crate::cli::output;
use crate::domain::table::{count_label, COLUMNS};
use crate::domain::{format_range, EpisodeRow, HierarchyNode, NodeType, Saga, StoryArc};

const MAX_CELL_WIDTH: usize = 48;

/// Which saga nodes show their arcs. The root is always expanded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Expansion {
    /// Sagas collapsed, as on first render
    #[default]
    Collapsed,
    All,
    /// Sagas whose name matches case-insensitively
    Named(Vec<String>),
}

impl Expansion {
    fn expands(&self, node: &HierarchyNode) -> bool {
        match self {
            Expansion::Collapsed => false,
            Expansion::All => true,
            Expansion::Named(names) => names.iter().any(|n| n.eq_ignore_ascii_case(&node.name)),
        }
    }
}

/// Converts a hierarchy into a printable `termtree::Tree`.
#[derive(Debug, Clone, Default)]
pub struct TreeView {
    pub expansion: Expansion,
    pub details: bool,
    pub paint: bool,
}

impl TreeView {
    pub fn to_tree(&self, root: &HierarchyNode) -> Tree<String> {
        let mut tree = Tree::new(self.label(root, false));
        for saga in &root.children {
            tree.push(self.saga_tree(saga));
        }
        tree
    }

    fn saga_tree(&self, saga: &HierarchyNode) -> Tree<String> {
        if saga.is_leaf() || self.expansion.expands(saga) {
            let leaves = saga
                .children
                .iter()
                .map(|arc| Tree::new(self.label(arc, false)))
                .collect::<Vec<_>>();
            Tree::new(self.label(saga, false)).with_leaves(leaves)
        } else {
            Tree::new(self.label(saga, true))
        }
    }

    fn label(&self, node: &HierarchyNode, collapsed: bool) -> String {
        let mut label = self.paint_name(node).to_string();
        if self.details {
            // first tooltip line is the name itself
            let extra = node.tooltip_lines().into_iter().skip(1).collect::<Vec<_>>();
            if !extra.is_empty() {
                label.push_str(&format!("  [{}]", extra.join(" · ")));
            }
        } else if let Some(range) = &node.range {
            label.push_str(&format!(" ({range})"));
        }
        if let Some(id) = &node.id {
            label.push_str(&format!(" <{id}>"));
        }
        if collapsed {
            label.push_str(&format!(" [+{} arcs]", node.children.len()));
        }
        label
    }

    fn paint_name(&self, node: &HierarchyNode) -> ColoredString {
        let name = node.name.as_str();
        if !self.paint {
            return name.normal();
        }
        match node.node_type {
            NodeType::Root => name.truecolor(0xff, 0x8c, 0x00).bold(),
            NodeType::Saga => name.truecolor(0x4c, 0xc9, 0xf0),
            NodeType::Arc => name.truecolor(0xa0, 0x66, 0xff),
        }
    }
}

fn truncate(cell: &str) -> String {
    if cell.chars().count() <= MAX_CELL_WIDTH {
        return cell.to_string();
    }
    let mut cut: String = cell.chars().take(MAX_CELL_WIDTH - 1).collect();
    cut.push('…');
    cut
}

fn pad(cell: &str, width: usize) -> String {
    let len = cell.chars().count();
    format!("{cell}{}", " ".repeat(width.saturating_sub(len)))
}

/// Episode table as aligned text lines, header first.
///
/// An empty result is a single `No results.` line.
pub fn table_lines(rows: &[EpisodeRow]) -> Vec<String> {
    if rows.is_empty() {
        return vec!["No results.".to_string()];
    }
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|r| r.cells().iter().map(|c| truncate(c)).collect())
        .collect();

    let mut widths: Vec<usize> = COLUMNS.iter().map(|c| c.chars().count()).collect();
    for row in &cells {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let line = |row: &[String]| {
        row.iter()
            .zip(&widths)
            .map(|(cell, w)| pad(cell, *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let header: Vec<String> = COLUMNS.iter().map(|c| c.to_string()).collect();
    std::iter::once(line(&header))
        .chain(cells.iter().map(|row| line(row)))
        .collect()
}

/// Prints every presenter call to stdout.
///
/// Options rendering can be switched off so that a command prints only the
/// part the user asked for.
#[derive(Debug, Clone, Default)]
pub struct TerminalPresenter {
    pub view: TreeView,
    pub show_hierarchy: bool,
    pub show_table: bool,
    pub show_saga_options: bool,
    pub show_arc_options: bool,
}

impl TerminalPresenter {
    pub fn table_only() -> Self {
        Self {
            show_table: true,
            ..Self::default()
        }
    }

    pub fn hierarchy_only(view: TreeView) -> Self {
        Self {
            view,
            show_hierarchy: true,
            ..Self::default()
        }
    }
}

impl Presenter for TerminalPresenter {
    fn render_hierarchy(&mut self, root: &HierarchyNode) {
        if self.show_hierarchy {
            output::plain(&self.view.to_tree(root));
        }
    }

    fn render_episode_table(&mut self, rows: &[EpisodeRow], count: usize) {
        if !self.show_table {
            return;
        }
        let mut lines = table_lines(rows).into_iter();
        if let Some(first) = lines.next() {
            if rows.is_empty() {
                output::plain(&first);
            } else {
                output::header(&first);
            }
        }
        for line in lines {
            output::plain(&line);
        }
        output::note(&count_label(count));
    }

    fn populate_saga_options(&mut self, sagas: &[Saga]) {
        if !self.show_saga_options {
            return;
        }
        output::header("Sagas");
        for saga in sagas {
            output::detail(&format!(
                "{:<24} {}  {}  {}",
                saga.id,
                saga.name,
                saga.super_saga.as_deref().unwrap_or("-"),
                format_range(saga.episode_range.as_ref())
            ));
        }
    }

    fn populate_arc_options(&mut self, arcs: Option<&[&StoryArc]>) {
        if !self.show_arc_options {
            return;
        }
        match arcs {
            None => output::warning("arc selection disabled: select a saga first (--saga)"),
            Some(arcs) => {
                output::header("Arcs");
                for arc in arcs {
                    output::detail(&format!("{:<24} {}", arc.id, arc.name));
                }
            }
        }
    }

    fn focus_episode_table(&mut self) {
        if self.show_table {
            output::note(&"(filtered from hierarchy selection)");
        }
    }
}
