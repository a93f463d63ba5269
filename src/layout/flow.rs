//! Flow layout: places region nodes onto physical pages.
//!
//! Every node is measured into slices, the smallest units that can be
//! placed. A paragraph yields one slice per wrapped line, so it may break
//! between lines. Keep-together groups, cards, timeline entries, skill bars
//! and tables yield one atomic slice that remembers its parts. An atomic
//! slice that does not fit moves to the next page when a fresh page can hold
//! it, and is otherwise placed part by part.
//!
//! Coordinates are points with a top-left origin, like [`Frame`].

use super::metrics::text_width;
use crate::model::{
    Align, Document, Fill, FontFamily, Frame, InlineRun, Node, PageSize, Region, RenderedPage,
    Rgb, Table, TextStyle,
};
use serde::Serialize;

/// Top edge of a continuing region on follow-up pages.
pub const CONTINUATION_TOP: f32 = 36.0;

const GRADIENT_BANDS: usize = 48;
const EPSILON: f32 = 0.01;
const LIST_GAP: f32 = 5.0;
const TIMELINE_INDENT: f32 = 20.0;
const CELL_PADDING: f32 = 5.0;

/// A drawing primitive in page coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    /// Axis-aligned rectangle
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Option<Rgb>,
        stroke: Option<Rgb>,
        line_width: f32,
    },
    /// Straight line
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: Rgb,
        width: f32,
    },
    /// One run of text; `y` is the baseline
    Text {
        x: f32,
        y: f32,
        size: f32,
        bold: bool,
        color: Rgb,
        text: String,
    },
    /// Filled circle
    Circle { cx: f32, cy: f32, r: f32, fill: Rgb },
}

impl DrawOp {
    fn translate(&mut self, dx: f32, dy: f32) {
        match self {
            DrawOp::Rect { x, y, .. } | DrawOp::Text { x, y, .. } => {
                *x += dx;
                *y += dy;
            }
            DrawOp::Line { x1, y1, x2, y2, .. } => {
                *x1 += dx;
                *x2 += dx;
                *y1 += dy;
                *y2 += dy;
            }
            DrawOp::Circle { cx, cy, .. } => {
                *cx += dx;
                *cy += dy;
            }
        }
    }
}

/// One physical output page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaidOutPage {
    /// Number of the logical page this physical page belongs to
    pub logical_page: u32,
    /// Paper size
    pub size: PageSize,
    /// Font family
    pub font: FontFamily,
    /// Drawing operations in paint order
    pub ops: Vec<DrawOp>,
}

impl LaidOutPage {
    /// Concatenated text of the page's text operations.
    pub fn text(&self) -> String {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Lay out every page of a document.
pub fn layout_document(document: &Document) -> Vec<LaidOutPage> {
    let pages: Vec<LaidOutPage> = document.pages.iter().flat_map(layout_page).collect();
    log::debug!(
        "laid out {} logical pages onto {} physical pages",
        document.page_count(),
        pages.len()
    );
    pages
}

/// Lay out one logical page, continuing regions onto extra physical pages.
pub fn layout_page(page: &RenderedPage) -> Vec<LaidOutPage> {
    let mut sheets = Sheets::new(page);
    for region in &page.regions {
        RegionFlow::new(&mut sheets, region, page.font).run();
    }
    sheets.pages
}

struct Sheets {
    template: LaidOutPage,
    pages: Vec<LaidOutPage>,
}

impl Sheets {
    fn new(page: &RenderedPage) -> Self {
        let mut template = LaidOutPage {
            logical_page: page.number,
            size: page.size,
            font: page.font,
            ops: Vec::new(),
        };
        if page.background != Rgb::WHITE {
            template.ops.push(DrawOp::Rect {
                x: 0.0,
                y: 0.0,
                width: page.size.width(),
                height: page.size.height(),
                fill: Some(page.background),
                stroke: None,
                line_width: 0.0,
            });
        }
        Self {
            pages: vec![template.clone()],
            template,
        }
    }

    fn page(&mut self, index: usize) -> &mut LaidOutPage {
        while self.pages.len() <= index {
            self.pages.push(self.template.clone());
        }
        &mut self.pages[index]
    }
}

struct RegionFlow<'a> {
    sheets: &'a mut Sheets,
    region: &'a Region,
    font: FontFamily,
    page_index: usize,
    content: Frame,
    y: f32,
    clipped: bool,
}

impl<'a> RegionFlow<'a> {
    fn new(sheets: &'a mut Sheets, region: &'a Region, font: FontFamily) -> Self {
        let content = region.frame.inset(region.padding);
        let mut flow = Self {
            sheets,
            region,
            font,
            page_index: 0,
            content,
            y: content.y,
            clipped: false,
        };
        flow.paint_fill(region.frame);
        flow
    }

    fn run(mut self) {
        let slices: Vec<Slice> = self
            .region
            .nodes
            .iter()
            .flat_map(|node| measure(node, self.content.width, self.font))
            .collect();
        for slice in slices {
            if !self.place(slice) {
                break;
            }
        }
    }

    fn continuation_frame(&self) -> Frame {
        let frame = self.region.frame;
        let top = frame.y.min(CONTINUATION_TOP);
        Frame::new(frame.x, top, frame.width, frame.bottom() - top)
    }

    fn fresh_height(&self) -> f32 {
        self.continuation_frame().inset(self.region.padding).height
    }

    fn at_top(&self) -> bool {
        (self.y - self.content.y).abs() < EPSILON
    }

    /// At the top of a page that is as tall as any later page.
    fn on_fresh_page(&self) -> bool {
        self.at_top() && self.content.height + EPSILON >= self.fresh_height()
    }

    fn fits(&self, height: f32) -> bool {
        self.y + height <= self.content.bottom() + EPSILON
    }

    /// Place a slice; returns false once the region stops accepting content.
    fn place(&mut self, slice: Slice) -> bool {
        if slice.ops.is_empty() && slice.parts.is_empty() && self.at_top() && self.page_index > 0 {
            return true;
        }
        if self.fits(slice.height) {
            self.emit(slice);
            return true;
        }
        if !self.region.continues {
            if !self.clipped {
                log::warn!("content clipped in {:?} region", self.region.role);
                self.clipped = true;
            }
            return false;
        }

        if slice.keep && slice.height <= self.fresh_height() + EPSILON && !self.on_fresh_page() {
            self.next_page();
            self.emit(slice);
            return true;
        }
        if !slice.parts.is_empty() {
            if slice.keep {
                log::warn!(
                    "keep-together block of {:.0}pt is taller than a page; splitting it",
                    slice.height
                );
            }
            return slice.parts.into_iter().all(|part| self.place(part));
        }

        if !self.on_fresh_page() {
            self.next_page();
        }
        if !self.fits(slice.height) {
            log::warn!("line of {:.0}pt overflows the page", slice.height);
        }
        self.emit(slice);
        true
    }

    fn emit(&mut self, slice: Slice) {
        let (x, y) = (self.content.x, self.y);
        let page = self.sheets.page(self.page_index);
        page.ops.extend(slice.ops.into_iter().map(|mut op| {
            op.translate(x, y);
            op
        }));
        self.y += slice.height;
    }

    fn next_page(&mut self) {
        self.page_index += 1;
        let frame = self.continuation_frame();
        self.content = frame.inset(self.region.padding);
        self.y = self.content.y;
        self.paint_fill(frame);
    }

    fn paint_fill(&mut self, frame: Frame) {
        let Some(fill) = self.region.fill else {
            return;
        };
        let ops = fill_ops(fill, frame);
        self.sheets.page(self.page_index).ops.extend(ops);
    }
}

fn fill_ops(fill: Fill, frame: Frame) -> Vec<DrawOp> {
    match fill {
        Fill::Solid { color } => vec![rect(frame, Some(color), None, 0.0)],
        Fill::Gradient { top, bottom } => {
            let band = frame.height / GRADIENT_BANDS as f32;
            (0..GRADIENT_BANDS)
                .map(|i| {
                    let t = i as f32 / (GRADIENT_BANDS - 1) as f32;
                    // bands overlap slightly so no seams show
                    let frame = Frame::new(frame.x, frame.y + band * i as f32, frame.width, band + 0.5);
                    rect(frame, Some(top.lerp(bottom, t)), None, 0.0)
                })
                .collect()
        }
    }
}

fn rect(frame: Frame, fill: Option<Rgb>, stroke: Option<Rgb>, line_width: f32) -> DrawOp {
    DrawOp::Rect {
        x: frame.x,
        y: frame.y,
        width: frame.width,
        height: frame.height,
        fill,
        stroke,
        line_width,
    }
}

/// A placeable unit with ops relative to its own top-left corner.
#[derive(Debug, Clone, Default)]
struct Slice {
    height: f32,
    ops: Vec<DrawOp>,
    keep: bool,
    parts: Vec<Slice>,
}

impl Slice {
    fn gap(height: f32) -> Self {
        Self {
            height,
            ..Self::default()
        }
    }

    fn offset(mut self, dx: f32, dy: f32) -> Self {
        for op in &mut self.ops {
            op.translate(dx, dy);
        }
        self.parts = self
            .parts
            .into_iter()
            .map(|p| p.offset(dx, 0.0))
            .collect();
        self
    }

    /// Stack slices into one atomic slice that can fall back to its parts.
    fn stack(parts: Vec<Slice>) -> Self {
        let mut ops = Vec::new();
        let mut y = 0.0;
        for part in &parts {
            ops.extend(part.ops.iter().cloned().map(|mut op| {
                op.translate(0.0, y);
                op
            }));
            y += part.height;
        }
        Self {
            height: y,
            ops,
            keep: true,
            parts,
        }
    }
}

fn measure(node: &Node, width: f32, font: FontFamily) -> Vec<Slice> {
    match node {
        Node::Text { text, style } | Node::Heading { text, style, .. } => {
            let runs = [InlineRun::Plain(text.clone())];
            text_lines(&runs, style, width, font, 0.0)
        }
        Node::Paragraph { runs, style } => text_lines(runs, style, width, font, 0.0),
        Node::ListItem {
            marker,
            runs,
            style,
        } => {
            let indent = (text_width(marker, font, style.bold, style.size) + LIST_GAP).max(14.0);
            let mut lines = text_lines(runs, style, width - indent, font, indent);
            if let Some(first) = lines.first_mut() {
                first.ops.push(DrawOp::Text {
                    x: 0.0,
                    y: baseline(style),
                    size: style.size,
                    bold: style.bold,
                    color: style.color,
                    text: marker.clone(),
                });
            }
            lines
        }
        Node::Group {
            nodes,
            keep_together,
        } => {
            let parts: Vec<Slice> = nodes
                .iter()
                .flat_map(|n| measure(n, width, font))
                .collect();
            if *keep_together && !parts.is_empty() {
                vec![Slice::stack(parts)]
            } else {
                parts
            }
        }
        Node::Divider {
            color,
            thickness,
            length,
            align,
        } => {
            let length = length.unwrap_or(width).min(width);
            let x = align_offset(*align, width, length);
            let y = 3.0 + thickness / 2.0;
            vec![Slice {
                height: thickness + 6.0,
                ops: vec![DrawOp::Line {
                    x1: x,
                    y1: y,
                    x2: x + length,
                    y2: y,
                    color: *color,
                    width: *thickness,
                }],
                ..Slice::default()
            }]
        }
        Node::Spacer { height } => vec![Slice::gap(*height)],
        Node::Avatar {
            initials,
            diameter,
            fill,
            text_color,
            align,
            ..
        } => {
            let diameter = diameter.min(width);
            let r = diameter / 2.0;
            let cx = align_offset(*align, width, diameter) + r;
            let mut ops = vec![DrawOp::Circle {
                cx,
                cy: r,
                r,
                fill: *fill,
            }];
            if !initials.is_empty() {
                let size = diameter * 0.32;
                let w = text_width(initials, font, true, size);
                ops.push(DrawOp::Text {
                    x: cx - w / 2.0,
                    y: r + size * 0.35,
                    size,
                    bold: true,
                    color: *text_color,
                    text: initials.clone(),
                });
            }
            vec![Slice {
                height: diameter + 4.0,
                ops,
                keep: true,
                parts: Vec::new(),
            }]
        }
        Node::SkillBar {
            label,
            level,
            track,
            fill,
            style,
        } => {
            let mut parts = text_lines(
                &[InlineRun::Plain(label.clone())],
                &TextStyle { space_after: 2.0, ..*style },
                width,
                font,
                0.0,
            );
            parts.push(Slice {
                height: 6.0 + style.space_after.max(6.0),
                ops: vec![
                    rect(Frame::new(0.0, 0.0, width, 6.0), Some(*track), None, 0.0),
                    rect(
                        Frame::new(0.0, 0.0, width * level.clamp(0.0, 1.0), 6.0),
                        Some(*fill),
                        None,
                        0.0,
                    ),
                ],
                ..Slice::default()
            });
            vec![Slice::stack(parts)]
        }
        Node::Table {
            table,
            header_fill,
            border,
            style,
        } => table_slices(table, *header_fill, *border, style, width, font),
        Node::Card {
            nodes,
            fill,
            border,
            padding,
        } => {
            let inner_width = (width - 2.0 * padding).max(1.0);
            let parts: Vec<Slice> = nodes
                .iter()
                .flat_map(|n| measure(n, inner_width, font))
                .collect();
            let inner = Slice::stack(parts).offset(*padding, *padding);
            let height = inner.height + 2.0 * padding;
            let mut ops = vec![rect(
                Frame::new(0.0, 0.0, width, height),
                *fill,
                *border,
                if border.is_some() { 1.0 } else { 0.0 },
            )];
            ops.extend(inner.ops);
            let mut parts = vec![Slice::gap(*padding)];
            parts.extend(inner.parts);
            parts.push(Slice::gap(*padding));
            vec![Slice {
                height,
                ops,
                keep: true,
                parts,
            }]
        }
        Node::TimelineEntry { nodes, dot, line } => {
            let parts: Vec<Slice> = nodes
                .iter()
                .flat_map(|n| measure(n, (width - TIMELINE_INDENT).max(1.0), font))
                .collect();
            let inner = Slice::stack(parts).offset(TIMELINE_INDENT, 0.0);
            let height = inner.height + 6.0;
            let mut ops = vec![
                DrawOp::Line {
                    x1: 6.0,
                    y1: 12.0,
                    x2: 6.0,
                    y2: height,
                    color: *line,
                    width: 1.0,
                },
                DrawOp::Circle {
                    cx: 6.0,
                    cy: 7.0,
                    r: 4.0,
                    fill: *dot,
                },
            ];
            ops.extend(inner.ops);
            vec![Slice {
                height,
                ops,
                keep: true,
                parts: inner.parts,
            }]
        }
    }
}

fn baseline(style: &TextStyle) -> f32 {
    (style.leading() - style.size) / 2.0 + style.size * 0.8
}

fn align_offset(align: Align, available: f32, used: f32) -> f32 {
    match align {
        Align::Left => 0.0,
        Align::Center => ((available - used) / 2.0).max(0.0),
        Align::Right => (available - used).max(0.0),
    }
}

/// Wrap runs into one slice per line, offset by `indent`.
fn text_lines(
    runs: &[InlineRun],
    style: &TextStyle,
    width: f32,
    font: FontFamily,
    indent: f32,
) -> Vec<Slice> {
    let lines = wrap(runs, style, width.max(1.0), font);
    let count = lines.len();
    lines
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            let x0 = indent + align_offset(style.align, width, line.width);
            let y = baseline(style);
            let ops = line
                .spans
                .into_iter()
                .map(|span| DrawOp::Text {
                    x: x0 + span.x,
                    y,
                    size: style.size,
                    bold: span.bold,
                    color: style.color,
                    text: span.text,
                })
                .collect();
            let extra = if i + 1 == count { style.space_after } else { 0.0 };
            Slice {
                height: style.leading() + extra,
                ops,
                ..Slice::default()
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
struct Span {
    text: String,
    bold: bool,
    x: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Line {
    spans: Vec<Span>,
    width: f32,
}

impl Line {
    fn push(&mut self, text: &str, bold: bool, advance: f32) {
        match self.spans.last_mut() {
            Some(last) if last.bold == bold => last.text.push_str(text),
            _ => self.spans.push(Span {
                text: text.to_string(),
                bold,
                x: self.width,
            }),
        }
        self.width += advance;
    }
}

struct Word {
    text: String,
    bold: bool,
    space_before: bool,
}

fn words(runs: &[InlineRun], base_bold: bool) -> Vec<Word> {
    let mut words = Vec::new();
    let mut pending_space = false;
    for run in runs {
        let bold = base_bold || run.is_emphasis();
        let text = run.text();
        let mut start: Option<usize> = None;
        for (i, c) in text.char_indices() {
            if c.is_whitespace() {
                if let Some(s) = start.take() {
                    words.push(Word {
                        text: text[s..i].to_string(),
                        bold,
                        space_before: pending_space,
                    });
                }
                pending_space = true;
            } else if start.is_none() {
                start = Some(i);
            }
        }
        if let Some(s) = start {
            words.push(Word {
                text: text[s..].to_string(),
                bold,
                space_before: pending_space,
            });
            pending_space = false;
        }
    }
    words
}

/// Greedy word wrap. Words wider than a line are broken between characters.
fn wrap(runs: &[InlineRun], style: &TextStyle, width: f32, font: FontFamily) -> Vec<Line> {
    let measure = |text: &str, bold: bool| text_width(text, font, bold, style.size);
    let mut lines = Vec::new();
    let mut line = Line::default();

    for word in words(runs, style.bold) {
        let space = if word.space_before && !line.spans.is_empty() {
            measure(" ", word.bold)
        } else {
            0.0
        };
        let word_width = measure(&word.text, word.bold);

        if !line.spans.is_empty() && line.width + space + word_width > width {
            lines.push(std::mem::take(&mut line));
        } else if space > 0.0 {
            line.push(" ", word.bold, space);
        }

        if word_width <= width || !line.spans.is_empty() {
            line.push(&word.text, word.bold, word_width);
            continue;
        }

        for c in word.text.chars() {
            let w = measure(c.encode_utf8(&mut [0; 4]), word.bold);
            if !line.spans.is_empty() && line.width + w > width {
                lines.push(std::mem::take(&mut line));
            }
            line.push(c.encode_utf8(&mut [0; 4]), word.bold, w);
        }
    }
    if !line.spans.is_empty() {
        lines.push(line);
    }
    lines
}

fn table_slices(
    table: &Table,
    header_fill: Rgb,
    border: Rgb,
    style: &TextStyle,
    width: f32,
    font: FontFamily,
) -> Vec<Slice> {
    if table.is_empty() {
        return Vec::new();
    }
    let widths = table.resolved_widths(width);
    let header_rows = table.header().len();

    let rows: Vec<Slice> = table
        .rows
        .iter()
        .enumerate()
        .map(|(r, row)| {
            let is_header = r < header_rows || row.is_header;
            let cell_style = if is_header { style.bold() } else { *style };
            let cells: Vec<(f32, Vec<Line>, Align)> = widths
                .iter()
                .enumerate()
                .map(|(c, w)| {
                    let (text, align) = row
                        .cells
                        .get(c)
                        .map(|cell| (cell.text.clone(), cell.alignment))
                        .unwrap_or_default();
                    let runs = [InlineRun::Plain(text)];
                    (*w, wrap(&runs, &cell_style, (w - 2.0 * CELL_PADDING).max(1.0), font), align)
                })
                .collect();
            let line_count = cells.iter().map(|(_, l, _)| l.len()).max().unwrap_or(0).max(1);
            let height = line_count as f32 * cell_style.leading() + 2.0 * CELL_PADDING;

            let mut ops = Vec::new();
            let mut x = 0.0;
            for (w, lines, align) in cells {
                let fill = is_header.then_some(header_fill);
                ops.push(rect(Frame::new(x, 0.0, w, height), fill, Some(border), 0.75));
                for (i, line) in lines.into_iter().enumerate() {
                    let x0 = x + CELL_PADDING + align_offset(align, w - 2.0 * CELL_PADDING, line.width);
                    let y = CELL_PADDING + i as f32 * cell_style.leading() + baseline(&cell_style);
                    ops.extend(line.spans.into_iter().map(|span| DrawOp::Text {
                        x: x0 + span.x,
                        y,
                        size: cell_style.size,
                        bold: span.bold,
                        color: cell_style.color,
                        text: span.text,
                    }));
                }
                x += w;
            }
            Slice {
                height,
                ops,
                ..Slice::default()
            }
        })
        .collect();

    vec![Slice::stack(rows), Slice::gap(style.space_after.max(6.0))]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PageKind, RegionRole};

    fn style() -> TextStyle {
        TextStyle::new(10.0, Rgb::hex(0x111827))
    }

    fn page_with(region: Region) -> RenderedPage {
        RenderedPage::new(PageKind::Primary, PageSize::A4, FontFamily::Helvetica, Rgb::WHITE)
            .with_region(region)
    }

    fn body(continues: bool) -> Region {
        let region = Region::new(RegionRole::Body, Frame::new(0.0, 0.0, 595.0, 842.0)).with_padding(40.0);
        if continues {
            region.continuing()
        } else {
            region
        }
    }

    fn paragraph(text: &str) -> Node {
        Node::paragraph(vec![InlineRun::Plain(text.into())], style())
    }

    #[test]
    fn test_wrap_respects_width() {
        let runs = [InlineRun::Plain("alpha beta gamma delta epsilon".into())];
        let lines = wrap(&runs, &style(), 60.0, FontFamily::Helvetica);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.width <= 60.0 + EPSILON);
        }
        let rejoined: Vec<String> = lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.text.as_str()).collect())
            .collect();
        assert_eq!(rejoined.join(" "), "alpha beta gamma delta epsilon");
    }

    #[test]
    fn test_wrap_keeps_emphasis_spans() {
        let runs = [
            InlineRun::Emphasis("Led team".into()),
            InlineRun::Plain(" of 5".into()),
        ];
        let lines = wrap(&runs, &style(), 500.0, FontFamily::Helvetica);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].spans.len(), 2);
        assert!(lines[0].spans[0].bold);
        assert_eq!(lines[0].spans[0].text, "Led team");
        assert_eq!(lines[0].spans[1].text, " of 5");
    }

    #[test]
    fn test_wrap_breaks_long_words() {
        let runs = [InlineRun::Plain("x".repeat(200))];
        let lines = wrap(&runs, &style(), 50.0, FontFamily::Courier);
        assert!(lines.len() >= 20);
        assert!(lines.iter().all(|l| l.width <= 50.0 + EPSILON));
    }

    #[test]
    fn test_no_space_between_adjacent_runs() {
        let runs = [
            InlineRun::Emphasis("Rust".into()),
            InlineRun::Plain(", Go".into()),
        ];
        let lines = wrap(&runs, &style(), 500.0, FontFamily::Helvetica);
        let text: String = lines[0].spans.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(text, "Rust, Go");
    }

    #[test]
    fn test_continuing_region_overflows() {
        let mut region = body(true);
        for i in 0..120 {
            region.push(paragraph(&format!("Line number {}", i)));
        }
        let pages = layout_page(&page_with(region));
        assert!(pages.len() >= 2);
        assert!(pages[0].text().contains("Line number 0"));
        assert!(pages.last().unwrap().text().contains("Line number 119"));
    }

    #[test]
    fn test_clipping_region_stays_on_one_page() {
        let mut region = body(false);
        for i in 0..120 {
            region.push(paragraph(&format!("Line number {}", i)));
        }
        let pages = layout_page(&page_with(region));
        assert_eq!(pages.len(), 1);
        assert!(!pages[0].text().contains("Line number 119"));
    }

    #[test]
    fn test_keep_together_moves_whole() {
        let mut region = body(true);
        // fill most of the first page
        region.push(Node::spacer(842.0 - 80.0 - 20.0));
        region.push(Node::keep_together(vec![
            Node::heading(2, "Experience", style().bold()),
            paragraph("Shipped v1"),
        ]));
        let pages = layout_page(&page_with(region));
        assert_eq!(pages.len(), 2);
        assert!(!pages[0].text().contains("Experience"));
        assert!(pages[1].text().contains("Experience"));
        assert!(pages[1].text().contains("Shipped v1"));
    }

    #[test]
    fn test_oversized_keep_together_splits() {
        let mut region = body(true);
        let nodes = (0..200).map(|i| paragraph(&format!("row {}", i))).collect();
        region.push(Node::keep_together(nodes));
        let pages = layout_page(&page_with(region));
        assert!(pages.len() >= 2);
        assert!(pages[0].text().contains("row 0"));
    }

    #[test]
    fn test_gradient_fill_bands() {
        let region = Region::new(RegionRole::Sidebar, Frame::new(0.0, 0.0, 100.0, 842.0))
            .with_gradient(Rgb::hex(0x000000), Rgb::hex(0xFFFFFF));
        let pages = layout_page(&page_with(region));
        let bands = pages[0]
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Rect { .. }))
            .count();
        assert_eq!(bands, GRADIENT_BANDS);
    }

    #[test]
    fn test_table_rows() {
        let mut table = Table::with_header(1);
        table.add_row(crate::model::TableRow::from_strings(["Year", "Profit"]));
        table.add_row(crate::model::TableRow::from_strings(["2025", "$50,000"]));
        let slices = table_slices(
            &table,
            Rgb::hex(0xDBEAFE),
            Rgb::hex(0xE5E7EB),
            &style(),
            300.0,
            FontFamily::Helvetica,
        );
        assert_eq!(slices[0].parts.len(), 2);
        let texts: Vec<&str> = slices[0]
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec!["Year", "Profit", "2025", "$50,000"]);
    }

    #[test]
    fn test_list_marker_drawn() {
        let node = Node::list_item("3.", vec![InlineRun::Plain("Third".into())], style());
        let slices = measure(&node, 200.0, FontFamily::Helvetica);
        assert_eq!(slices.len(), 1);
        assert!(slices[0]
            .ops
            .iter()
            .any(|op| matches!(op, DrawOp::Text { text, x, .. } if text == "3." && *x == 0.0)));
    }
}
