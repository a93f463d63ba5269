//! Block-level and inline types produced by the parser.

use serde::{Deserialize, Serialize};

/// Kind of list a block or list line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    /// Bulleted list (`- item`, `* item`, `• item`)
    Unordered,
    /// Numbered list (`1. item`)
    Ordered,
}

/// One structurally classified unit of parsed text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A heading, level 1 to 3
    Heading {
        /// Heading level (1-3)
        level: u8,
        /// Title text with markers stripped
        text: String,
    },

    /// A paragraph; continuation lines are joined with a single space
    Paragraph {
        /// Paragraph text, still carrying inline emphasis markers
        text: String,
    },

    /// A bulleted list
    UnorderedList {
        /// Item texts with the bullet stripped
        items: Vec<String>,
    },

    /// A numbered list; source numbers are dropped and reassigned at grouping time
    OrderedList {
        /// Item texts with the number prefix stripped
        items: Vec<String>,
    },
}

impl Block {
    /// Create a heading block. The level is clamped to 1-3.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Block::Heading {
            level: level.clamp(1, 3),
            text: text.into(),
        }
    }

    /// Create a paragraph block.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph { text: text.into() }
    }

    /// Create a list block of the given kind.
    pub fn list(kind: ListKind, items: Vec<String>) -> Self {
        match kind {
            ListKind::Unordered => Block::UnorderedList { items },
            ListKind::Ordered => Block::OrderedList { items },
        }
    }

    /// Check if this block is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self, Block::Heading { .. })
    }

    /// Check if this block is a list of either kind.
    pub fn is_list(&self) -> bool {
        self.list_kind().is_some()
    }

    /// List kind, if this block is a list.
    pub fn list_kind(&self) -> Option<ListKind> {
        match self {
            Block::UnorderedList { .. } => Some(ListKind::Unordered),
            Block::OrderedList { .. } => Some(ListKind::Ordered),
            _ => None,
        }
    }

    /// List items, or an empty slice for non-list blocks.
    pub fn items(&self) -> &[String] {
        match self {
            Block::UnorderedList { items } | Block::OrderedList { items } => items,
            _ => &[],
        }
    }

    /// Get plain text content of the block (list items joined by newlines).
    pub fn plain_text(&self) -> String {
        match self {
            Block::Heading { text, .. } | Block::Paragraph { text } => text.clone(),
            Block::UnorderedList { items } | Block::OrderedList { items } => items.join("\n"),
        }
    }
}

/// Ordered, restartable sequence of blocks in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockSequence(Vec<Block>);

impl BlockSequence {
    /// Create an empty sequence.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a block.
    pub fn push(&mut self, block: Block) {
        self.0.push(block);
    }

    /// Iterate over the blocks in document order.
    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.0.iter()
    }

    /// Borrow the blocks as a slice.
    pub fn as_slice(&self) -> &[Block] {
        &self.0
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the sequence has no blocks.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume the sequence, returning the blocks.
    pub fn into_vec(self) -> Vec<Block> {
        self.0
    }
}

impl From<Vec<Block>> for BlockSequence {
    fn from(blocks: Vec<Block>) -> Self {
        Self(blocks)
    }
}

impl<'a> IntoIterator for &'a BlockSequence {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A contiguous span of text carrying one inline style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "style", content = "text", rename_all = "snake_case")]
pub enum InlineRun {
    /// Unstyled text
    Plain(String),
    /// Emphasized (bold) text
    Emphasis(String),
}

impl InlineRun {
    /// Text content of the run.
    pub fn text(&self) -> &str {
        match self {
            InlineRun::Plain(t) | InlineRun::Emphasis(t) => t,
        }
    }

    /// Check if the run is emphasized.
    pub fn is_emphasis(&self) -> bool {
        matches!(self, InlineRun::Emphasis(_))
    }
}

/// Concatenate the text of a run sequence.
pub fn runs_text(runs: &[InlineRun]) -> String {
    runs.iter().map(InlineRun::text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_level_clamped() {
        assert_eq!(Block::heading(5, "Deep"), Block::heading(3, "Deep"));
        assert_eq!(Block::heading(0, "Top"), Block::heading(1, "Top"));
    }

    #[test]
    fn test_list_helpers() {
        let ul = Block::list(ListKind::Unordered, vec!["a".into(), "b".into()]);
        assert!(ul.is_list());
        assert_eq!(ul.list_kind(), Some(ListKind::Unordered));
        assert_eq!(ul.items().len(), 2);
        assert_eq!(ul.plain_text(), "a\nb");

        let p = Block::paragraph("text");
        assert!(!p.is_list());
        assert!(p.items().is_empty());
    }

    #[test]
    fn test_sequence_is_restartable() {
        let seq = BlockSequence::from(vec![Block::heading(1, "A"), Block::paragraph("b")]);
        let first: Vec<_> = seq.iter().collect();
        let second: Vec<_> = (&seq).into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(seq.len(), 2);
    }

    #[test]
    fn test_runs_text() {
        let runs = vec![
            InlineRun::Emphasis("Led team".into()),
            InlineRun::Plain(" of 5".into()),
        ];
        assert_eq!(runs_text(&runs), "Led team of 5");
        assert!(runs[0].is_emphasis());
    }
}
