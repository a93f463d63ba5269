//! Visitor pattern for walking a composed document.
//!
//! A visitor sees every content node of every page in paint order and can
//! keep the default text of a node, replace it, or drop it. The plain-text
//! export and [`DocumentStats`] are both built on [`walk`].
//!
//! # Example
//!
//! ```
//! use cvpress::export::visitor::{NodeVisitor, VisitorAction};
//! use cvpress::model::Table;
//!
//! struct NoTables;
//!
//! impl NodeVisitor for NoTables {
//!     fn visit_table(&mut self, _table: &Table) -> VisitorAction {
//!         VisitorAction::Replace("[table omitted]".to_string())
//!     }
//! }
//! ```

use crate::model::{Document, InlineRun, Node, Region, RenderedPage, Table, TextStyle};
use serde::Serialize;

/// Action returned by visitor methods to control the walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum VisitorAction {
    /// Keep the node's default text.
    #[default]
    Continue,

    /// Replace the node (and its children) with custom text.
    Replace(String),

    /// Drop the node and its children.
    Skip,
}

impl VisitorAction {
    /// Check if this action drops the node.
    pub fn should_skip(&self) -> bool {
        matches!(self, VisitorAction::Skip)
    }

    /// Check if this action provides replacement text.
    pub fn is_replace(&self) -> bool {
        matches!(self, VisitorAction::Replace(_))
    }

    /// Get replacement text if available.
    pub fn replacement(&self) -> Option<&str> {
        match self {
            VisitorAction::Replace(s) => Some(s),
            _ => None,
        }
    }
}

/// Trait for visiting document nodes.
///
/// All methods return `VisitorAction::Continue` by default.
pub trait NodeVisitor: Send + Sync {
    /// Called for literal label text (names, contact lines, section titles).
    fn visit_text(&mut self, text: &str, style: &TextStyle) -> VisitorAction {
        let _ = (text, style);
        VisitorAction::Continue
    }

    /// Called for a heading taken from the parsed content.
    fn visit_heading(&mut self, text: &str, level: u8) -> VisitorAction {
        let _ = (text, level);
        VisitorAction::Continue
    }

    /// Called for a paragraph.
    fn visit_paragraph(&mut self, runs: &[InlineRun]) -> VisitorAction {
        let _ = runs;
        VisitorAction::Continue
    }

    /// Called for a list item with its rendered marker.
    fn visit_list_item(&mut self, marker: &str, runs: &[InlineRun]) -> VisitorAction {
        let _ = (marker, runs);
        VisitorAction::Continue
    }

    /// Called for a labelled skill bar.
    fn visit_skill_bar(&mut self, label: &str, level: f32) -> VisitorAction {
        let _ = (label, level);
        VisitorAction::Continue
    }

    /// Called for a table.
    fn visit_table(&mut self, table: &Table) -> VisitorAction {
        let _ = table;
        VisitorAction::Continue
    }

    /// Called for an avatar placeholder.
    fn visit_avatar(&mut self, photo: Option<&str>, initials: &str) -> VisitorAction {
        let _ = (photo, initials);
        VisitorAction::Continue
    }

    /// Called before descending into a group, card or timeline entry.
    fn visit_container(&mut self, node: &Node) -> VisitorAction {
        let _ = node;
        VisitorAction::Continue
    }

    /// Called at the start of a page.
    fn on_page_start(&mut self, page: &RenderedPage) {
        let _ = page;
    }

    /// Called at the end of a page.
    fn on_page_end(&mut self, page: &RenderedPage) {
        let _ = page;
    }
}

/// Visitor that performs no customization.
#[derive(Debug, Clone, Default)]
pub struct DefaultVisitor;

impl DefaultVisitor {
    /// Create a new default visitor.
    pub fn new() -> Self {
        Self
    }
}

impl NodeVisitor for DefaultVisitor {}

/// Visitor that prefixes parsed headings with `#` markers.
#[derive(Debug, Clone, Default)]
pub struct HeadingMarkerVisitor;

impl NodeVisitor for HeadingMarkerVisitor {
    fn visit_heading(&mut self, text: &str, level: u8) -> VisitorAction {
        VisitorAction::Replace(format!("{} {}", "#".repeat(level as usize), text))
    }
}

/// Composite visitor that chains multiple visitors.
///
/// Visitors are called in order. The first one that returns a
/// non-`Continue` action decides the result.
#[derive(Default)]
pub struct CompositeVisitor {
    visitors: Vec<Box<dyn NodeVisitor>>,
}

impl CompositeVisitor {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a visitor to the chain.
    pub fn with_visitor<V: NodeVisitor + 'static>(mut self, visitor: V) -> Self {
        self.visitors.push(Box::new(visitor));
        self
    }

    fn first(&mut self, mut f: impl FnMut(&mut dyn NodeVisitor) -> VisitorAction) -> VisitorAction {
        for visitor in &mut self.visitors {
            let action = f(visitor.as_mut());
            if action != VisitorAction::Continue {
                return action;
            }
        }
        VisitorAction::Continue
    }
}

impl NodeVisitor for CompositeVisitor {
    fn visit_text(&mut self, text: &str, style: &TextStyle) -> VisitorAction {
        self.first(|v| v.visit_text(text, style))
    }

    fn visit_heading(&mut self, text: &str, level: u8) -> VisitorAction {
        self.first(|v| v.visit_heading(text, level))
    }

    fn visit_paragraph(&mut self, runs: &[InlineRun]) -> VisitorAction {
        self.first(|v| v.visit_paragraph(runs))
    }

    fn visit_list_item(&mut self, marker: &str, runs: &[InlineRun]) -> VisitorAction {
        self.first(|v| v.visit_list_item(marker, runs))
    }

    fn visit_skill_bar(&mut self, label: &str, level: f32) -> VisitorAction {
        self.first(|v| v.visit_skill_bar(label, level))
    }

    fn visit_table(&mut self, table: &Table) -> VisitorAction {
        self.first(|v| v.visit_table(table))
    }

    fn visit_avatar(&mut self, photo: Option<&str>, initials: &str) -> VisitorAction {
        self.first(|v| v.visit_avatar(photo, initials))
    }

    fn visit_container(&mut self, node: &Node) -> VisitorAction {
        self.first(|v| v.visit_container(node))
    }

    fn on_page_start(&mut self, page: &RenderedPage) {
        for visitor in &mut self.visitors {
            visitor.on_page_start(page);
        }
    }

    fn on_page_end(&mut self, page: &RenderedPage) {
        for visitor in &mut self.visitors {
            visitor.on_page_end(page);
        }
    }
}

/// Node counts of a composed document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DocumentStats {
    /// Logical pages
    pub pages: usize,
    /// Pages holding extra artifacts
    pub extra_pages: usize,
    /// Parsed headings
    pub headings: usize,
    /// Paragraphs
    pub paragraphs: usize,
    /// List items
    pub list_items: usize,
    /// Skill bars
    pub skill_bars: usize,
    /// Tables
    pub tables: usize,
    /// Words across all text-bearing nodes
    pub words: usize,
}

impl DocumentStats {
    /// Count the nodes of a document.
    pub fn collect(document: &Document) -> Self {
        let mut stats = Self::default();
        walk(document, &mut stats);
        stats
    }

    fn count_words(&mut self, text: &str) {
        self.words += text.split_whitespace().count();
    }
}

impl NodeVisitor for DocumentStats {
    fn visit_text(&mut self, text: &str, _style: &TextStyle) -> VisitorAction {
        self.count_words(text);
        VisitorAction::Continue
    }

    fn visit_heading(&mut self, text: &str, _level: u8) -> VisitorAction {
        self.headings += 1;
        self.count_words(text);
        VisitorAction::Continue
    }

    fn visit_paragraph(&mut self, runs: &[InlineRun]) -> VisitorAction {
        self.paragraphs += 1;
        for run in runs {
            self.count_words(run.text());
        }
        VisitorAction::Continue
    }

    fn visit_list_item(&mut self, _marker: &str, runs: &[InlineRun]) -> VisitorAction {
        self.list_items += 1;
        for run in runs {
            self.count_words(run.text());
        }
        VisitorAction::Continue
    }

    fn visit_skill_bar(&mut self, label: &str, _level: f32) -> VisitorAction {
        self.skill_bars += 1;
        self.count_words(label);
        VisitorAction::Continue
    }

    fn visit_table(&mut self, table: &Table) -> VisitorAction {
        self.tables += 1;
        self.count_words(&table.plain_text());
        VisitorAction::Continue
    }

    fn on_page_start(&mut self, page: &RenderedPage) {
        self.pages += 1;
        if page.is_extra() {
            self.extra_pages += 1;
        }
    }
}

/// Walk every page of a document and return its text.
///
/// Nodes of a region are joined with newlines, regions and pages with blank
/// lines. With [`DefaultVisitor`] the result equals
/// [`Document::plain_text`].
pub fn walk<V: NodeVisitor + ?Sized>(document: &Document, visitor: &mut V) -> String {
    document
        .pages
        .iter()
        .map(|page| walk_page(page, visitor))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Walk one page and return its text.
fn walk_page<V: NodeVisitor + ?Sized>(page: &RenderedPage, visitor: &mut V) -> String {
    visitor.on_page_start(page);
    let text = page
        .regions
        .iter()
        .map(|region| walk_region(region, visitor))
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");
    visitor.on_page_end(page);
    text
}

fn walk_region<V: NodeVisitor + ?Sized>(region: &Region, visitor: &mut V) -> String {
    join_nodes(&region.nodes, visitor)
}

fn join_nodes<V: NodeVisitor + ?Sized>(nodes: &[Node], visitor: &mut V) -> String {
    nodes
        .iter()
        .map(|node| walk_node(node, visitor))
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn walk_node<V: NodeVisitor + ?Sized>(node: &Node, visitor: &mut V) -> String {
    let action = match node {
        Node::Text { text, style } => visitor.visit_text(text, style),
        Node::Heading { text, level, .. } => visitor.visit_heading(text, *level),
        Node::Paragraph { runs, .. } => visitor.visit_paragraph(runs),
        Node::ListItem { marker, runs, .. } => visitor.visit_list_item(marker, runs),
        Node::SkillBar { label, level, .. } => visitor.visit_skill_bar(label, *level),
        Node::Table { table, .. } => visitor.visit_table(table),
        Node::Avatar {
            photo, initials, ..
        } => visitor.visit_avatar(photo.as_deref(), initials),
        Node::Group { .. } | Node::Card { .. } | Node::TimelineEntry { .. } => {
            visitor.visit_container(node)
        }
        Node::Divider { .. } | Node::Spacer { .. } => VisitorAction::Continue,
    };

    match action {
        VisitorAction::Skip => String::new(),
        VisitorAction::Replace(text) => text,
        VisitorAction::Continue => match node {
            Node::Group { nodes, .. }
            | Node::Card { nodes, .. }
            | Node::TimelineEntry { nodes, .. } => join_nodes(nodes, visitor),
            _ => node.plain_text(),
        },
    }
}
