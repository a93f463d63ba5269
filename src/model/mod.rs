//! Document model types for the rendering pipeline.
//!
//! The model follows the data flow: caller input, parsed blocks and inline
//! runs, named sections, and finally the rendered page tree handed to the
//! exporters. Every value is created fresh per invocation.

mod block;
mod document;
mod input;
mod page;
mod section;
mod style;
mod table;

pub use block::{runs_text, Block, BlockSequence, InlineRun, ListKind};
pub use document::{Document, Metadata};
pub use input::{
    BusinessFields, CvFields, DocumentKind, ExtraArtifact, Extras, RawDocumentInput, StyleConfig,
};
pub use page::{
    Align, Fill, Frame, Node, PageKind, PageSize, Region, RegionRole, RenderedPage, TextStyle,
};
pub use section::{SectionKey, SectionSet};
pub use style::{Accent, FontFamily, Rgb, TemplateVariant};
pub use table::{Table, TableCell, TableRow};
