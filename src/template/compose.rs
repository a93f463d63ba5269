//! Shared composition helpers: render groups to nodes, section titles,
//! skills explosion and identity lines.

use crate::layout::{GroupedBlock, RenderGroup};
use crate::model::{Block, Node, Rgb, TextStyle};
use crate::parse::{classify, format_inline, strip_emphasis, LineClass};

/// Text styles used when turning blocks into nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockStyles {
    /// Level 1 headings
    pub h1: TextStyle,
    /// Level 2 headings
    pub h2: TextStyle,
    /// Level 3 headings
    pub h3: TextStyle,
    /// Paragraphs
    pub body: TextStyle,
    /// List items
    pub item: TextStyle,
}

impl BlockStyles {
    /// Derive heading and item styles from a body style.
    pub fn new(body: TextStyle, heading_color: Rgb) -> Self {
        let heading = |delta: f32| {
            TextStyle::new(body.size + delta, heading_color)
                .bold()
                .line_height(1.3)
                .space_after(4.0)
        };
        Self {
            h1: heading(4.0),
            h2: heading(2.5),
            h3: heading(1.0),
            body,
            item: body.space_after(body.space_after.min(3.0)),
        }
    }

    /// Style for a heading level.
    pub fn heading(&self, level: u8) -> TextStyle {
        match level {
            1 => self.h1,
            2 => self.h2,
            _ => self.h3,
        }
    }
}

/// Nodes for one block. Lists become a group of items with their markers.
pub fn block_node(block: &GroupedBlock, styles: &BlockStyles) -> Node {
    match &block.block {
        Block::Heading { level, text } => Node::heading(*level, text.clone(), styles.heading(*level)),
        Block::Paragraph { text } => Node::paragraph(format_inline(text), styles.body),
        Block::UnorderedList { items } => Node::group(
            items
                .iter()
                .map(|item| Node::list_item("•", format_inline(item), styles.item))
                .collect(),
        ),
        Block::OrderedList { items } => Node::group(
            items
                .iter()
                .zip(block.numbers())
                .map(|(item, n)| Node::list_item(format!("{}.", n), format_inline(item), styles.item))
                .collect(),
        ),
    }
}

/// Nodes for one render group.
pub fn group_nodes(group: &RenderGroup, styles: &BlockStyles) -> Vec<Node> {
    match group {
        RenderGroup::Single(block) => vec![block_node(block, styles)],
        RenderGroup::KeepTogether { heading, body } => vec![Node::keep_together(vec![
            heading_node(heading, styles),
            block_node(body, styles),
        ])],
        RenderGroup::Heading { heading, spacer } => {
            let mut nodes = vec![heading_node(heading, styles)];
            if *spacer {
                nodes.push(Node::spacer(styles.body.size * 0.6));
            }
            nodes
        }
    }
}

/// Nodes for a sequence of render groups.
pub fn compose_groups(groups: &[RenderGroup], styles: &BlockStyles) -> Vec<Node> {
    groups.iter().flat_map(|g| group_nodes(g, styles)).collect()
}

fn heading_node(block: &Block, styles: &BlockStyles) -> Node {
    match block {
        Block::Heading { level, text } => Node::heading(*level, text.clone(), styles.heading(*level)),
        other => Node::paragraph(format_inline(&other.plain_text()), styles.body),
    }
}

/// A titled section: the title nodes travel with the first body node when
/// that node is short enough to move to a new page with it. Paragraphs
/// longer than `short_paragraph_limit` characters are left to flow.
pub fn section(title: Vec<Node>, body: Vec<Node>, short_paragraph_limit: usize) -> Vec<Node> {
    let mut body = body.into_iter();
    let Some(first) = body.next() else {
        return title;
    };

    let mut nodes = Vec::new();
    if travels_with_title(&first, short_paragraph_limit) {
        let mut glued = title;
        glued.push(first);
        nodes.push(Node::keep_together(glued));
    } else {
        nodes.extend(title);
        nodes.push(first);
    }
    nodes.extend(body);
    nodes
}

fn travels_with_title(node: &Node, short_paragraph_limit: usize) -> bool {
    match node {
        Node::Paragraph { .. } => node.plain_text().chars().count() <= short_paragraph_limit,
        _ => true,
    }
}

/// Split a skills body into individual items.
///
/// Items are separated by commas, semicolons or newlines. List markers and
/// emphasis markers are stripped, headings and empty items are dropped.
pub fn explode_skills(text: &str) -> Vec<String> {
    text.split(|c: char| matches!(c, ',' | ';' | '\n'))
        .filter_map(|piece| {
            let piece = piece.trim();
            let item = match classify(piece, None) {
                LineClass::Blank | LineClass::Heading { .. } => return None,
                LineClass::ListItemStart { text, .. } | LineClass::ListItemContinue { text, .. } => text,
                LineClass::ParagraphLine(text) => text,
            };
            let item = strip_emphasis(&item).trim().to_string();
            (!item.is_empty()).then_some(item)
        })
        .collect()
}

/// Skills as bullet items.
pub fn skill_items(text: &str, style: TextStyle) -> Vec<Node> {
    explode_skills(text)
        .into_iter()
        .map(|skill| Node::list_item("•", format_inline(&skill), style))
        .collect()
}

/// Collapse whitespace runs and trim.
pub fn field(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Join the non-empty parts with a separator.
pub fn join_present(parts: &[&str], separator: &str) -> String {
    parts
        .iter()
        .map(|p| field(p))
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

/// `industry • level`, each part falling back when empty.
pub fn role_line(industry: &str, level: &str, industry_fallback: &str, level_fallback: &str) -> String {
    let industry = field(industry);
    let level = field(level);
    format!(
        "{} • {}",
        if industry.is_empty() { industry_fallback } else { industry.as_str() },
        if level.is_empty() { level_fallback } else { level.as_str() },
    )
}

/// Up to two initials of a name, upper-cased.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().find(|c| c.is_alphanumeric()))
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

/// Labelled section body text nodes, one per non-empty line.
pub fn lines(text: &str, style: TextStyle) -> Vec<Node> {
    text.lines()
        .map(field)
        .filter(|l| !l.is_empty())
        .map(|l| Node::text(strip_emphasis(&l), style))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{group_blocks, SHORT_PARAGRAPH_LIMIT};
    use crate::model::InlineRun;
    use crate::parse::parse_text;

    fn styles() -> BlockStyles {
        BlockStyles::new(TextStyle::default(), Rgb::hex(0x2563EB))
    }

    #[test]
    fn test_explode_skills() {
        assert_eq!(explode_skills("Go, Rust, SQL"), vec!["Go", "Rust", "SQL"]);
        assert_eq!(
            explode_skills("- **Rust**; Go\n\n## Tools\n* Docker,,"),
            vec!["Rust", "Go", "Docker"]
        );
        assert!(explode_skills("  \n , ;").is_empty());
    }

    #[test]
    fn test_ordered_markers_use_group_numbers() {
        let groups = group_blocks(&parse_text("1. a\n2. b\n\ntext\n\n1. c"));
        let nodes = compose_groups(&groups, &styles());
        let markers: Vec<String> = nodes
            .iter()
            .flat_map(|n| n.children().iter().chain(std::iter::once(n)))
            .filter_map(|n| match n {
                Node::ListItem { marker, .. } => Some(marker.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(markers, vec!["1.", "2.", "3."]);
    }

    #[test]
    fn test_keep_together_group_node() {
        let groups = group_blocks(&parse_text("## Experience\n- Shipped v1\n- Shipped v2"));
        let nodes = compose_groups(&groups, &styles());
        assert_eq!(nodes.len(), 1);
        assert!(matches!(
            nodes[0],
            Node::Group {
                keep_together: true,
                ..
            }
        ));
        assert_eq!(nodes[0].plain_text(), "Experience\n• Shipped v1\n• Shipped v2");
    }

    #[test]
    fn test_paragraph_runs() {
        let groups = group_blocks(&parse_text("**Led team** of 5 engineers"));
        let nodes = compose_groups(&groups, &styles());
        let Node::Paragraph { runs, .. } = &nodes[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(runs[0], InlineRun::Emphasis("Led team".into()));
    }

    #[test]
    fn test_section_glues_title() {
        let title = vec![Node::text("SKILLS", TextStyle::default())];
        let nodes = section(
            title.clone(),
            vec![Node::spacer(1.0), Node::spacer(2.0)],
            SHORT_PARAGRAPH_LIMIT,
        );
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].children().len(), 2);

        let long = Node::paragraph(
            vec![InlineRun::Plain("x".repeat(SHORT_PARAGRAPH_LIMIT + 1))],
            TextStyle::default(),
        );
        assert_eq!(section(title.clone(), vec![long], SHORT_PARAGRAPH_LIMIT).len(), 2);
        assert_eq!(section(title, Vec::new(), SHORT_PARAGRAPH_LIMIT).len(), 1);
    }

    #[test]
    fn test_section_respects_configured_limit() {
        let title = vec![Node::text("SUMMARY", TextStyle::default())];
        let paragraph = Node::paragraph(
            vec![InlineRun::Plain("x".repeat(50))],
            TextStyle::default(),
        );

        let glued = section(title.clone(), vec![paragraph.clone()], 50);
        assert_eq!(glued.len(), 1);
        assert_eq!(glued[0].children().len(), 2);

        let apart = section(title, vec![paragraph], 49);
        assert_eq!(apart.len(), 2);
        assert_eq!(apart[1].plain_text().chars().count(), 50);
    }

    #[test]
    fn test_identity_helpers() {
        assert_eq!(role_line(" ", "Senior", "Specialist", "Professional"), "Specialist • Senior");
        assert_eq!(join_present(&["a@b.c", "  ", "123"], " • "), "a@b.c • 123");
        assert_eq!(initials("ada  king lovelace"), "AK");
        assert_eq!(initials(""), "");
        assert_eq!(field("  a \t b "), "a b");
    }

    #[test]
    fn test_unordered_marker() {
        let groups = group_blocks(&parse_text("- a"));
        let nodes = compose_groups(&groups, &styles());
        assert_eq!(nodes[0].plain_text(), "• a");
    }
}
