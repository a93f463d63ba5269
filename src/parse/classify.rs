//! Line classifier.
//!
//! Classifies one line of normalized text for the block parser. The result
//! depends only on the line and on which kind of list, if any, is open.

use crate::model::ListKind;
use regex::Regex;
use std::sync::OnceLock;

/// Structural class of one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    /// Empty line, horizontal rule, or a heading marker without text
    Blank,
    /// Heading line
    Heading {
        /// Level 1-3 (four or more markers count as 3)
        level: u8,
        /// Cleaned title
        text: String,
    },
    /// List item that opens a new list
    ListItemStart {
        /// Kind of the new list
        kind: ListKind,
        /// Item text without the marker
        text: String,
    },
    /// List item continuing the open list of the same kind
    ListItemContinue {
        /// Kind of the open list
        kind: ListKind,
        /// Item text without the marker
        text: String,
    },
    /// Any other text
    ParagraphLine(String),
}

impl LineClass {
    /// Check if the line ends a paragraph.
    pub fn breaks_paragraph(&self) -> bool {
        !matches!(self, LineClass::ParagraphLine(_))
    }
}

/// Compiled line patterns.
pub struct LineClassifier {
    rule: Regex,
    heading: Regex,
    title_prefix: Regex,
    unordered: Regex,
    ordered: Regex,
}

impl LineClassifier {
    /// Create a classifier.
    pub fn new() -> Self {
        Self {
            rule: Regex::new(r"^[-_*]{2,}$").unwrap(),
            heading: Regex::new(r"^(#+)\s*(.*)$").unwrap(),
            title_prefix: Regex::new(r"(?i)^h[1-3](?:[\s:.]+|$)").unwrap(),
            unordered: Regex::new(r"^[-*+•–—]\s+(.*)$").unwrap(),
            ordered: Regex::new(r"^\d+\.\s+(.*)$").unwrap(),
        }
    }

    /// Classify a line given the kind of the currently open list.
    pub fn classify(&self, line: &str, open_list: Option<ListKind>) -> LineClass {
        let line = line.trim();
        if line.is_empty() || self.rule.is_match(line) {
            return LineClass::Blank;
        }

        if let Some(caps) = self.heading.captures(line) {
            let level = caps[1].len().min(3) as u8;
            let text = self.clean_title(&caps[2]);
            if text.is_empty() {
                return LineClass::Blank;
            }
            return LineClass::Heading { level, text };
        }

        let item = if let Some(caps) = self.unordered.captures(line) {
            Some((ListKind::Unordered, caps[1].trim().to_string()))
        } else {
            self.ordered
                .captures(line)
                .map(|caps| (ListKind::Ordered, caps[1].trim().to_string()))
        };

        match item {
            Some((kind, text)) if open_list == Some(kind) => {
                LineClass::ListItemContinue { kind, text }
            }
            Some((kind, text)) => LineClass::ListItemStart { kind, text },
            None => LineClass::ParagraphLine(line.to_string()),
        }
    }

    /// Strip closing markers, whole-title emphasis and an `h1`-`h3` prefix.
    pub fn clean_title(&self, raw: &str) -> String {
        let mut title = raw.trim().trim_end_matches('#').trim();
        if title.len() >= 4 && title.starts_with("**") && title.ends_with("**") {
            title = title[2..title.len() - 2].trim();
        }
        self.title_prefix.replace(title, "").trim().to_string()
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared classifier instance.
pub(crate) fn classifier() -> &'static LineClassifier {
    static CLASSIFIER: OnceLock<LineClassifier> = OnceLock::new();
    CLASSIFIER.get_or_init(LineClassifier::new)
}

/// Classify a line with the shared classifier.
pub fn classify(line: &str, open_list: Option<ListKind>) -> LineClass {
    classifier().classify(line, open_list)
}
