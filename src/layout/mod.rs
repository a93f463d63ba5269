//! Pagination: render groups, glyph metrics and the flow that places page
//! regions onto physical pages.

pub mod flow;
pub mod group;
pub mod metrics;

pub use flow::{layout_document, layout_page, DrawOp, LaidOutPage};
pub use group::{
    group_blocks, GroupedBlock, Grouper, RenderGroup, SectionGroups, SHORT_PARAGRAPH_LIMIT,
};
pub use metrics::{char_width, text_width};
