//! Pagination grouper.
//!
//! Glues a heading to the block right after it when that block is short
//! enough to travel with it, so a page break never strands a heading at the
//! bottom of a page. The rule looks exactly one block ahead and never
//! revisits a consumed block.
//!
//! Ordered-list numbering is assigned here. One [`Grouper`] numbers every
//! ordered list it sees, so separate lists continue counting instead of
//! restarting at 1.

use crate::model::{Block, BlockSequence, SectionKey, SectionSet};
use crate::parse::parse_blocks;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default short-paragraph threshold, in characters (inclusive).
pub const SHORT_PARAGRAPH_LIMIT: usize = 400;

/// A block with its display numbering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupedBlock {
    /// The block
    pub block: Block,
    /// Number of the first item, for ordered lists
    pub first_number: Option<u32>,
}

impl GroupedBlock {
    /// Display numbers of an ordered list's items.
    pub fn numbers(&self) -> impl Iterator<Item = u32> + '_ {
        let start = self.first_number.unwrap_or(1);
        (0..self.block.items().len() as u32).map(move |i| start + i)
    }
}

/// An atomic unit for pagination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "group", rename_all = "snake_case")]
pub enum RenderGroup {
    /// A block on its own
    Single(GroupedBlock),
    /// A heading and the block it introduces; never split across pages
    KeepTogether {
        /// The heading
        heading: Block,
        /// The introduced block
        body: GroupedBlock,
    },
    /// A heading that could not be glued to what follows
    Heading {
        /// The heading
        heading: Block,
        /// Whether a spacing hint follows (more content comes after)
        spacer: bool,
    },
}

impl RenderGroup {
    /// Check if the group must not be split.
    pub fn is_atomic(&self) -> bool {
        matches!(self, RenderGroup::KeepTogether { .. })
    }

    /// Blocks in this group, in order.
    pub fn blocks(&self) -> Vec<&Block> {
        match self {
            RenderGroup::Single(b) => vec![&b.block],
            RenderGroup::KeepTogether { heading, body } => vec![heading, &body.block],
            RenderGroup::Heading { heading, .. } => vec![heading],
        }
    }
}

/// Groups blocks and numbers ordered lists across every sequence it is fed.
#[derive(Debug, Clone)]
pub struct Grouper {
    next_number: u32,
    short_paragraph_limit: usize,
}

impl Grouper {
    /// Create a grouper with a short-paragraph threshold in characters.
    pub fn new(short_paragraph_limit: usize) -> Self {
        Self {
            next_number: 1,
            short_paragraph_limit,
        }
    }

    /// Number the next ordered list item would get.
    pub fn next_number(&self) -> u32 {
        self.next_number
    }

    /// Group one block sequence.
    pub fn group(&mut self, blocks: &BlockSequence) -> Vec<RenderGroup> {
        let blocks = blocks.as_slice();
        let mut groups = Vec::with_capacity(blocks.len());
        let mut i = 0;

        while i < blocks.len() {
            let block = &blocks[i];
            if !block.is_heading() {
                groups.push(RenderGroup::Single(self.number(block)));
                i += 1;
                continue;
            }

            match blocks.get(i + 1) {
                Some(next) if self.travels_with_heading(next) => {
                    groups.push(RenderGroup::KeepTogether {
                        heading: block.clone(),
                        body: self.number(next),
                    });
                    i += 2;
                }
                next => {
                    groups.push(RenderGroup::Heading {
                        heading: block.clone(),
                        spacer: next.is_some(),
                    });
                    i += 1;
                }
            }
        }

        log::debug!(
            "grouped {} blocks into {} groups",
            blocks.len(),
            groups.len()
        );
        groups
    }

    fn travels_with_heading(&self, block: &Block) -> bool {
        match block {
            Block::Paragraph { text } => text.chars().count() <= self.short_paragraph_limit,
            Block::UnorderedList { items } | Block::OrderedList { items } => !items.is_empty(),
            Block::Heading { .. } => false,
        }
    }

    fn number(&mut self, block: &Block) -> GroupedBlock {
        let first_number = match block {
            Block::OrderedList { items } => {
                let first = self.next_number;
                self.next_number += items.len() as u32;
                Some(first)
            }
            _ => None,
        };
        GroupedBlock {
            block: block.clone(),
            first_number,
        }
    }
}

impl Default for Grouper {
    fn default() -> Self {
        Self::new(SHORT_PARAGRAPH_LIMIT)
    }
}

/// Group one sequence with a fresh grouper.
pub fn group_blocks(blocks: &BlockSequence) -> Vec<RenderGroup> {
    Grouper::default().group(blocks)
}

/// Render groups for every section of a document.
///
/// Sections are parsed and grouped in key order with one shared grouper, so
/// ordered-list numbering runs across the whole primary document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionGroups(BTreeMap<SectionKey, Vec<RenderGroup>>);

impl SectionGroups {
    /// Parse and group each section body.
    pub fn build(sections: &SectionSet, grouper: &mut Grouper) -> Self {
        let mut groups = BTreeMap::new();
        for &key in sections.keys() {
            let blocks = parse_blocks(sections.get(key));
            groups.insert(key, grouper.group(&blocks));
        }
        Self(groups)
    }

    /// Groups of one section; empty for a missing key.
    pub fn get(&self, key: SectionKey) -> &[RenderGroup] {
        self.0.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of groups.
    pub fn len(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    /// Check if no section produced a group.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
