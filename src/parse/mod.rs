//! Text parsing stages: normalize, split into sections, parse blocks and
//! extract inline runs.
//!
//! Every function here is total. Malformed or missing input degrades to
//! empty or plain output.

pub mod blocks;
pub mod classify;
pub mod inline;
pub mod normalize;
pub mod sections;

pub use blocks::parse_blocks;
pub use classify::{classify, LineClass, LineClassifier};
pub use inline::{format_inline, strip_emphasis};
pub use normalize::{normalize, normalize_opt, Normalizer};
pub use sections::{extract_sections, SectionExtractor, SectionKeywords};

use crate::model::BlockSequence;

/// Normalize raw text and parse it into blocks.
pub fn parse_text(raw: &str) -> BlockSequence {
    parse_blocks(&normalize(raw))
}
