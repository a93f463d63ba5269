//! Integration tests for the node visitor.

use chrono::{TimeZone, Utc};
use cvpress::export::visitor::{
    walk, CompositeVisitor, DefaultVisitor, DocumentStats, HeadingMarkerVisitor, NodeVisitor,
    VisitorAction,
};
use cvpress::export::to_text_with;
use cvpress::model::{InlineRun, Node, RenderedPage, Table};
use cvpress::{render_document, DocumentKind, RawDocumentInput, RenderOptions, StyleConfig};

fn options() -> RenderOptions {
    RenderOptions::new().with_generated_at(Utc.with_ymd_and_hms(2025, 2, 2, 0, 0, 0).unwrap())
}

fn cv() -> cvpress::Document {
    let mut input = RawDocumentInput::new(DocumentKind::Cv)
        .with_response(
            "SUMMARY\nBuilt APIs.\n\nEXPERIENCE\n## Acme Corp\n- Shipped v1\n- Shipped v2\n\nSKILLS\nGo, Rust",
        )
        .with_extra("coverLetter", "Dear Hiring Manager,");
    input.cv.full_name = "Ada Lovelace".into();
    render_document(&input, &options())
}

fn reviewed_plan() -> cvpress::Document {
    let input = RawDocumentInput::new(DocumentKind::BusinessPlan)
        .with_response("We roast coffee.")
        .with_style(StyleConfig::default().with_review_type("reviewed"));
    render_document(&input, &options())
}

/// Custom visitor that tracks visit counts.
#[derive(Default)]
struct CountingVisitor {
    paragraphs: usize,
    headings: usize,
    list_items: usize,
    pages_started: usize,
    pages_ended: usize,
}

impl NodeVisitor for CountingVisitor {
    fn visit_paragraph(&mut self, _runs: &[InlineRun]) -> VisitorAction {
        self.paragraphs += 1;
        VisitorAction::Continue
    }

    fn visit_heading(&mut self, _text: &str, _level: u8) -> VisitorAction {
        self.headings += 1;
        VisitorAction::Continue
    }

    fn visit_list_item(&mut self, _marker: &str, _runs: &[InlineRun]) -> VisitorAction {
        self.list_items += 1;
        VisitorAction::Continue
    }

    fn on_page_start(&mut self, _page: &RenderedPage) {
        self.pages_started += 1;
    }

    fn on_page_end(&mut self, _page: &RenderedPage) {
        self.pages_ended += 1;
    }
}

/// Replaces tables with their row count.
struct TableSummary;

impl NodeVisitor for TableSummary {
    fn visit_table(&mut self, table: &Table) -> VisitorAction {
        VisitorAction::Replace(format!("[table: {} rows]", table.row_count()))
    }
}

/// Drops every list item.
struct NoLists;

impl NodeVisitor for NoLists {
    fn visit_list_item(&mut self, _marker: &str, _runs: &[InlineRun]) -> VisitorAction {
        VisitorAction::Skip
    }
}

#[test]
fn test_default_walk_matches_plain_text() {
    let doc = cv();
    assert_eq!(walk(&doc, &mut DefaultVisitor::new()), doc.plain_text());
}

#[test]
fn test_counting_visitor() {
    let mut visitor = CountingVisitor::default();
    walk(&cv(), &mut visitor);

    assert_eq!(visitor.pages_started, 2);
    assert_eq!(visitor.pages_ended, 2);
    assert_eq!(visitor.headings, 1);
    // Shipped v1, Shipped v2, Go, Rust
    assert_eq!(visitor.list_items, 4);
    // Built APIs., Dear Hiring Manager,
    assert_eq!(visitor.paragraphs, 2);
}

#[test]
fn test_replace_table() {
    let text = walk(&reviewed_plan(), &mut TableSummary);
    assert!(text.contains("[table: 4 rows]"));
    assert!(!text.contains("$120,000"));
}

#[test]
fn test_skip_list_items() {
    let text = walk(&cv(), &mut NoLists);
    assert!(!text.contains("Shipped v1"));
    assert!(text.contains("Acme Corp"));
    assert!(text.contains("Built APIs."));
}

#[test]
fn test_heading_markers_in_text_export() {
    let text = to_text_with(&cv(), &mut HeadingMarkerVisitor, false);
    assert!(text.contains("## Acme Corp"));
}

#[test]
fn test_composite_visitor_chaining() {
    let mut composite = CompositeVisitor::new()
        .with_visitor(NoLists)
        .with_visitor(HeadingMarkerVisitor)
        .with_visitor(DefaultVisitor);

    let action = composite.visit_list_item("•", &[]);
    assert!(action.should_skip());

    let action = composite.visit_heading("Acme Corp", 2);
    assert_eq!(action.replacement(), Some("## Acme Corp"));

    let action = composite.visit_paragraph(&[InlineRun::Plain("x".into())]);
    assert_eq!(action, VisitorAction::Continue);

    let node = Node::group(vec![]);
    assert_eq!(composite.visit_container(&node), VisitorAction::Continue);
}

#[test]
fn test_visitor_action_methods() {
    let continue_action = VisitorAction::Continue;
    assert!(!continue_action.should_skip());
    assert!(!continue_action.is_replace());
    assert!(continue_action.replacement().is_none());

    let skip_action = VisitorAction::Skip;
    assert!(skip_action.should_skip());
    assert!(!skip_action.is_replace());

    let replace_action = VisitorAction::Replace("replaced".to_string());
    assert!(replace_action.is_replace());
    assert_eq!(replace_action.replacement(), Some("replaced"));
}

#[test]
fn test_document_stats() {
    let stats = DocumentStats::collect(&reviewed_plan());
    assert_eq!(stats.pages, 1);
    assert_eq!(stats.tables, 1);
    assert_eq!(stats.paragraphs, 1);
    assert!(stats.words > 10);
}
