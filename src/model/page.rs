//! Rendered page tree.
//!
//! A [`RenderedPage`] is one logical page produced by a template: a set of
//! positioned regions, each holding a flow of [`Node`]s. Frames use points
//! with the origin at the top-left corner of the page and `y` growing
//! downwards. Flowing the nodes into physical lines and pages is the job of
//! [`crate::layout::flow`].

use super::{runs_text, FontFamily, InlineRun, Rgb, Table};
use serde::{Deserialize, Serialize};

/// Physical paper size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PageSize {
    /// ISO A4, 595 x 842 pt
    #[default]
    A4,
    /// US Letter, 612 x 792 pt
    Letter,
}

impl PageSize {
    /// Page width in points.
    pub fn width(self) -> f32 {
        match self {
            PageSize::A4 => 595.0,
            PageSize::Letter => 612.0,
        }
    }

    /// Page height in points.
    pub fn height(self) -> f32 {
        match self {
            PageSize::A4 => 842.0,
            PageSize::Letter => 792.0,
        }
    }
}

/// Whether a page carries the primary document or an extra artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageKind {
    /// The CV or business plan itself
    Primary,
    /// An extra artifact page
    Extra {
        /// Artifact key, e.g. `coverLetter`
        key: String,
        /// Display title, e.g. `COVER LETTER`
        title: String,
    },
}

/// One logical page produced by a template renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedPage {
    /// Position in the document (1-indexed), assigned when the document is assembled
    pub number: u32,

    /// Primary or extra
    pub kind: PageKind,

    /// Paper size
    pub size: PageSize,

    /// Page background color
    pub background: Rgb,

    /// Font family for all text on the page
    pub font: FontFamily,

    /// Layout regions, painted in order
    pub regions: Vec<Region>,
}

impl RenderedPage {
    /// Create an empty page.
    pub fn new(kind: PageKind, size: PageSize, font: FontFamily, background: Rgb) -> Self {
        Self {
            number: 0,
            kind,
            size,
            background,
            font,
            regions: Vec::new(),
        }
    }

    /// Add a region and return self.
    pub fn with_region(mut self, region: Region) -> Self {
        self.regions.push(region);
        self
    }

    /// First region with the given role.
    pub fn region(&self, role: RegionRole) -> Option<&Region> {
        self.regions.iter().find(|r| r.role == role)
    }

    /// Check if this page belongs to an extra artifact.
    pub fn is_extra(&self) -> bool {
        matches!(self.kind, PageKind::Extra { .. })
    }

    /// Check if no region holds any node.
    pub fn is_empty(&self) -> bool {
        self.regions.iter().all(Region::is_empty)
    }

    /// Get plain text content of the page, region by region.
    pub fn plain_text(&self) -> String {
        self.regions
            .iter()
            .map(Region::plain_text)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Semantic role of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionRole {
    /// Full-width single column
    Body,
    /// Top band
    Header,
    /// Narrow side column
    Sidebar,
    /// Wide main column
    Main,
    /// Left column below a header
    LeftColumn,
    /// Right column below a header
    RightColumn,
    /// Bottom band
    Footer,
    /// Photo slot beside a header
    Portrait,
}

/// Rectangle in page coordinates (top-left origin, points).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Frame {
    /// Create a frame.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Right edge.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Shrink by `padding` on every side.
    pub fn inset(&self, padding: f32) -> Frame {
        Frame {
            x: self.x + padding,
            y: self.y + padding,
            width: (self.width - 2.0 * padding).max(0.0),
            height: (self.height - 2.0 * padding).max(0.0),
        }
    }
}

/// Region background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Fill {
    /// Flat color
    Solid {
        /// Fill color
        color: Rgb,
    },
    /// Vertical two-stop gradient
    Gradient {
        /// Color at the top edge
        top: Rgb,
        /// Color at the bottom edge
        bottom: Rgb,
    },
}

/// A positioned area of a page holding a flow of nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Semantic role
    pub role: RegionRole,

    /// Position and size on the first physical page
    pub frame: Frame,

    /// Background
    pub fill: Option<Fill>,

    /// Inner padding on every side
    pub padding: f32,

    /// Whether overflow continues on following pages instead of being clipped
    pub continues: bool,

    /// Content in flow order
    pub nodes: Vec<Node>,
}

impl Region {
    /// Create an empty, unfilled, clipping region.
    pub fn new(role: RegionRole, frame: Frame) -> Self {
        Self {
            role,
            frame,
            fill: None,
            padding: 0.0,
            continues: false,
            nodes: Vec::new(),
        }
    }

    /// Set a solid background.
    pub fn with_fill(mut self, color: Rgb) -> Self {
        self.fill = Some(Fill::Solid { color });
        self
    }

    /// Set a vertical gradient background.
    pub fn with_gradient(mut self, top: Rgb, bottom: Rgb) -> Self {
        self.fill = Some(Fill::Gradient { top, bottom });
        self
    }

    /// Set the inner padding.
    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    /// Let overflow continue on following pages.
    pub fn continuing(mut self) -> Self {
        self.continues = true;
        self
    }

    /// Append a node.
    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    /// Append several nodes.
    pub fn extend(&mut self, nodes: impl IntoIterator<Item = Node>) {
        self.nodes.extend(nodes);
    }

    /// Check if the region holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get plain text content of the region.
    pub fn plain_text(&self) -> String {
        self.nodes
            .iter()
            .map(Node::plain_text)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Horizontal alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    /// Left aligned
    #[default]
    Left,
    /// Centered
    Center,
    /// Right aligned
    Right,
}

/// Text presentation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font size in points
    pub size: f32,
    /// Bold weight for the whole text (emphasis runs are bold regardless)
    pub bold: bool,
    /// Text color
    pub color: Rgb,
    /// Alignment
    pub align: Align,
    /// Line height as a multiple of the font size
    pub line_height: f32,
    /// Extra space below, in points
    pub space_after: f32,
}

impl TextStyle {
    /// Create a left-aligned regular style.
    pub fn new(size: f32, color: Rgb) -> Self {
        Self {
            size,
            bold: false,
            color,
            align: Align::Left,
            line_height: 1.35,
            space_after: 0.0,
        }
    }

    /// Make the style bold.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Center the text.
    pub fn centered(mut self) -> Self {
        self.align = Align::Center;
        self
    }

    /// Right-align the text.
    pub fn right(mut self) -> Self {
        self.align = Align::Right;
        self
    }

    /// Set the space below.
    pub fn space_after(mut self, points: f32) -> Self {
        self.space_after = points;
        self
    }

    /// Set the line height multiple.
    pub fn line_height(mut self, factor: f32) -> Self {
        self.line_height = factor;
        self
    }

    /// Line advance in points.
    pub fn leading(&self) -> f32 {
        self.size * self.line_height
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(10.0, Rgb::hex(0x111827))
    }
}

/// A content or decoration node inside a region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    /// Literal label text (names, contact lines, captions)
    Text {
        /// Text
        text: String,
        /// Style
        style: TextStyle,
    },

    /// A heading taken from the parsed content or a template section title
    Heading {
        /// Level 1-3
        level: u8,
        /// Title text
        text: String,
        /// Style
        style: TextStyle,
    },

    /// A paragraph of inline runs
    Paragraph {
        /// Runs
        runs: Vec<InlineRun>,
        /// Style
        style: TextStyle,
    },

    /// One list item with its rendered marker (`•` or `3.`)
    ListItem {
        /// Marker text
        marker: String,
        /// Runs
        runs: Vec<InlineRun>,
        /// Style
        style: TextStyle,
    },

    /// A sequence of nodes; `keep_together` forbids a page break inside it
    Group {
        /// Children
        nodes: Vec<Node>,
        /// Atomic for pagination
        keep_together: bool,
    },

    /// Horizontal rule
    Divider {
        /// Line color
        color: Rgb,
        /// Line thickness
        thickness: f32,
        /// Length in points, `None` for the full width
        length: Option<f32>,
        /// Alignment of a shortened rule
        align: Align,
    },

    /// Vertical gap
    Spacer {
        /// Height in points
        height: f32,
    },

    /// Circular avatar placeholder recording the photo reference
    Avatar {
        /// Photo reference; never fetched
        photo: Option<String>,
        /// Initials drawn inside the circle
        initials: String,
        /// Diameter in points
        diameter: f32,
        /// Circle color
        fill: Rgb,
        /// Initials color
        text_color: Rgb,
        /// Alignment within the region
        align: Align,
    },

    /// Labelled horizontal bar
    SkillBar {
        /// Label above the bar
        label: String,
        /// Filled fraction, 0.0 to 1.0
        level: f32,
        /// Empty part color
        track: Rgb,
        /// Filled part color
        fill: Rgb,
        /// Label style
        style: TextStyle,
    },

    /// Literal table
    Table {
        /// Rows
        table: Table,
        /// Header row background
        header_fill: Rgb,
        /// Cell border color
        border: Rgb,
        /// Cell text style
        style: TextStyle,
    },

    /// Boxed content (summary card, evaluation box, banded title)
    Card {
        /// Children
        nodes: Vec<Node>,
        /// Background
        fill: Option<Rgb>,
        /// Outline
        border: Option<Rgb>,
        /// Inner padding
        padding: f32,
    },

    /// Timeline row: a dot and a vertical rule to the left of the content
    TimelineEntry {
        /// Children
        nodes: Vec<Node>,
        /// Dot color
        dot: Rgb,
        /// Rule color
        line: Rgb,
    },
}

impl Node {
    /// Create a text node.
    pub fn text(text: impl Into<String>, style: TextStyle) -> Self {
        Node::Text {
            text: text.into(),
            style,
        }
    }

    /// Create a heading node.
    pub fn heading(level: u8, text: impl Into<String>, style: TextStyle) -> Self {
        Node::Heading {
            level: level.clamp(1, 3),
            text: text.into(),
            style,
        }
    }

    /// Create a paragraph node.
    pub fn paragraph(runs: Vec<InlineRun>, style: TextStyle) -> Self {
        Node::Paragraph { runs, style }
    }

    /// Create a list item node.
    pub fn list_item(marker: impl Into<String>, runs: Vec<InlineRun>, style: TextStyle) -> Self {
        Node::ListItem {
            marker: marker.into(),
            runs,
            style,
        }
    }

    /// Create a group that may break across pages.
    pub fn group(nodes: Vec<Node>) -> Self {
        Node::Group {
            nodes,
            keep_together: false,
        }
    }

    /// Create a group that must stay on one page.
    pub fn keep_together(nodes: Vec<Node>) -> Self {
        Node::Group {
            nodes,
            keep_together: true,
        }
    }

    /// Create a full-width divider.
    pub fn divider(color: Rgb, thickness: f32) -> Self {
        Node::Divider {
            color,
            thickness,
            length: None,
            align: Align::Left,
        }
    }

    /// Create a vertical gap.
    pub fn spacer(height: f32) -> Self {
        Node::Spacer { height }
    }

    /// Child nodes of container nodes.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Group { nodes, .. }
            | Node::Card { nodes, .. }
            | Node::TimelineEntry { nodes, .. } => nodes,
            _ => &[],
        }
    }

    /// Check if this node is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self, Node::Heading { .. })
    }

    /// Get plain text content of the node and its children.
    pub fn plain_text(&self) -> String {
        match self {
            Node::Text { text, .. } | Node::Heading { text, .. } => text.clone(),
            Node::Paragraph { runs, .. } => runs_text(runs),
            Node::ListItem { marker, runs, .. } => format!("{} {}", marker, runs_text(runs)),
            Node::SkillBar { label, .. } => label.clone(),
            Node::Table { table, .. } => table.plain_text(),
            Node::Group { .. } | Node::Card { .. } | Node::TimelineEntry { .. } => self
                .children()
                .iter()
                .map(Node::plain_text)
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join("\n"),
            Node::Divider { .. } | Node::Spacer { .. } | Node::Avatar { .. } => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_sizes() {
        assert_eq!(PageSize::A4.width(), 595.0);
        assert_eq!(PageSize::Letter.height(), 792.0);
    }

    #[test]
    fn test_frame_inset() {
        let frame = Frame::new(0.0, 0.0, 100.0, 50.0).inset(10.0);
        assert_eq!(frame, Frame::new(10.0, 10.0, 80.0, 30.0));
        assert_eq!(frame.bottom(), 40.0);
        assert_eq!(frame.right(), 90.0);
    }

    #[test]
    fn test_page_plain_text_skips_decorations() {
        let mut region = Region::new(RegionRole::Body, Frame::new(0.0, 0.0, 100.0, 100.0));
        region.push(Node::heading(2, "Skills", TextStyle::default()));
        region.push(Node::divider(Rgb::hex(0xCCCCCC), 1.0));
        region.push(Node::list_item(
            "•",
            vec![InlineRun::Plain("Rust".into())],
            TextStyle::default(),
        ));

        let page = RenderedPage::new(
            PageKind::Primary,
            PageSize::A4,
            FontFamily::Helvetica,
            Rgb::WHITE,
        )
        .with_region(region);

        assert!(!page.is_empty());
        assert_eq!(page.plain_text(), "Skills\n• Rust");
        assert!(page.region(RegionRole::Sidebar).is_none());
    }

    #[test]
    fn test_node_children() {
        let group = Node::keep_together(vec![Node::spacer(4.0), Node::spacer(2.0)]);
        assert_eq!(group.children().len(), 2);
        assert!(Node::spacer(1.0).children().is_empty());
    }
}
