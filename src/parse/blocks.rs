//! Block parser.
//!
//! A line-oriented state machine over [`LineClass`]es. Each transition is
//! driven by the class of the next line and the block currently open.

use super::classify::{classifier, LineClass};
use crate::model::{Block, BlockSequence, ListKind};

/// Block under construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum State {
    /// Between blocks
    #[default]
    Idle,
    /// Collecting paragraph lines
    Paragraph(Vec<String>),
    /// Collecting list items
    List { kind: ListKind, items: Vec<String> },
}

impl State {
    fn open_list(&self) -> Option<ListKind> {
        match self {
            State::List { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Emit the open block, if any.
    fn close(self, out: &mut BlockSequence) {
        match self {
            State::Idle => {}
            State::Paragraph(lines) => out.push(Block::paragraph(lines.join(" "))),
            State::List { kind, items } => out.push(Block::list(kind, items)),
        }
    }
}

/// Apply one line to the state machine.
fn step(state: State, class: LineClass, out: &mut BlockSequence) -> State {
    match (state, class) {
        (state, LineClass::Blank) => {
            state.close(out);
            State::Idle
        }
        (state, LineClass::Heading { level, text }) => {
            state.close(out);
            out.push(Block::heading(level, text));
            State::Idle
        }
        (State::List { kind, mut items }, LineClass::ListItemContinue { text, .. }) => {
            items.push(text);
            State::List { kind, items }
        }
        (state, LineClass::ListItemStart { kind, text })
        | (state, LineClass::ListItemContinue { kind, text }) => {
            state.close(out);
            State::List {
                kind,
                items: vec![text],
            }
        }
        (State::Paragraph(mut lines), LineClass::ParagraphLine(text)) => {
            lines.push(text);
            State::Paragraph(lines)
        }
        (state, LineClass::ParagraphLine(text)) => {
            state.close(out);
            State::Paragraph(vec![text])
        }
    }
}

/// Parse normalized text into blocks. Never fails; unrecognized structure
/// degrades to paragraphs.
pub fn parse_blocks(text: &str) -> BlockSequence {
    let classifier = classifier();
    let mut out = BlockSequence::new();
    let mut state = State::Idle;

    for line in text.lines() {
        let class = classifier.classify(line, state.open_list());
        state = step(state, class, &mut out);
    }
    state.close(&mut out);

    log::debug!("parsed {} blocks", out.len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(parse_blocks("").is_empty());
        assert!(parse_blocks("\n\n").is_empty());
    }

    #[test]
    fn test_heading_followed_by_list() {
        let blocks = parse_blocks("## Experience\n- Shipped v1\n- Shipped v2");
        assert_eq!(
            blocks.as_slice(),
            &[
                Block::heading(2, "Experience"),
                Block::list(
                    ListKind::Unordered,
                    vec!["Shipped v1".into(), "Shipped v2".into()]
                ),
            ]
        );
    }

    #[test]
    fn test_paragraph_lines_joined() {
        let blocks = parse_blocks("First line\nsecond line\n\nNext");
        assert_eq!(
            blocks.as_slice(),
            &[
                Block::paragraph("First line second line"),
                Block::paragraph("Next")
            ]
        );
    }

    #[test]
    fn test_paragraph_ends_at_markers() {
        let blocks = parse_blocks("Intro\n# Title\nBody\n- item\nTail\n---\nAfter");
        assert_eq!(
            blocks.as_slice(),
            &[
                Block::paragraph("Intro"),
                Block::heading(1, "Title"),
                Block::paragraph("Body"),
                Block::list(ListKind::Unordered, vec!["item".into()]),
                Block::paragraph("Tail"),
                Block::paragraph("After"),
            ]
        );
    }

    #[test]
    fn test_list_kind_switch_starts_new_list() {
        let blocks = parse_blocks("1. one\n2. two\n- bullet\n3. three");
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks.as_slice()[0].items(), ["one", "two"]);
        assert_eq!(blocks.as_slice()[1].list_kind(), Some(ListKind::Unordered));
        assert_eq!(blocks.as_slice()[2].items(), ["three"]);
    }

    #[test]
    fn test_blank_line_splits_lists() {
        let blocks = parse_blocks("- a\n\n- b");
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn test_emphasis_paragraph() {
        let blocks = parse_blocks("**Led team** of 5 engineers");
        assert_eq!(
            blocks.as_slice(),
            &[Block::paragraph("**Led team** of 5 engineers")]
        );
    }

    #[test]
    fn test_step_transitions() {
        let mut out = BlockSequence::new();
        let state = step(
            State::Paragraph(vec!["a".into()]),
            LineClass::ListItemStart {
                kind: ListKind::Ordered,
                text: "x".into(),
            },
            &mut out,
        );
        assert_eq!(out.as_slice(), &[Block::paragraph("a")]);
        assert_eq!(state.open_list(), Some(ListKind::Ordered));

        let state = step(state, LineClass::Blank, &mut out);
        assert_eq!(state, State::Idle);
        assert_eq!(out.len(), 2);
    }
}
