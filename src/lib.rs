//! # cvpress
//!
//! Turns AI-generated CV and business-plan text into paginated, themed PDF
//! documents.
//!
//! The free text is normalized, split into named sections, parsed into
//! headings, paragraphs and lists with inline emphasis, grouped so headings
//! never end up orphaned at a page bottom, and then laid out by one of six
//! templates. Extra artifacts such as a cover letter become additional pages.
//!
//! ## Quick Start
//!
//! ```no_run
//! use cvpress::{export_pdf, DocumentKind, RawDocumentInput, RenderOptions, StyleConfig};
//!
//! fn main() -> cvpress::Result<()> {
//!     let input = RawDocumentInput::new(DocumentKind::Cv)
//!         .with_id("order-42")
//!         .with_response("SUMMARY\nBuilt APIs.\n\nSKILLS\nGo, Rust, SQL")
//!         .with_style(StyleConfig::new("Modern", "Helvetica", "Blue"))
//!         .with_extra("coverLetter", "Dear Hiring Manager,\n\nI am excited...");
//!
//!     let exported = export_pdf(&input, &RenderOptions::default())?;
//!     std::fs::write(&exported.file_name, &exported.bytes)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Six templates**: Classic, Modern, Creative and Manager-Reviewed CVs;
//!   AI-generated and Reviewed business plans
//! - **Forgiving input**: unknown template, font and accent names fall back
//!   to defaults; missing text yields empty regions
//! - **Keep-together pagination**: headings stay with their first content
//! - **Parallel extras**: extras pages are composed with Rayon
//! - **Multiple exports**: PDF, JSON page tree and plain text

pub mod error;
pub mod export;
pub mod layout;
pub mod model;
pub mod parse;
pub mod pipeline;
pub mod template;
pub mod theme;

pub use error::{Error, Result};
pub use export::{
    suggested_file_name, to_json, to_pdf, to_text, DocumentStats, ExportedDocument, JsonFormat,
    NodeVisitor, PdfWriter, VisitorAction,
};
pub use layout::{layout_document, Grouper, RenderGroup};
pub use model::{
    Accent, Block, BlockSequence, Document, DocumentKind, Extras, FontFamily, InlineRun,
    Metadata, PageSize, RawDocumentInput, RenderedPage, SectionKey, SectionSet, StyleConfig,
    TemplateVariant,
};
pub use parse::{extract_sections, format_inline, normalize, parse_blocks, parse_text};
pub use pipeline::{export_pdf, render_document, Pipeline, RenderOptions};
pub use template::{renderer_for, ExtrasComposer, ExtrasTitles, TemplateRenderer};
pub use theme::{Theme, ThemeResolver};

#[cfg(feature = "async")]
pub use pipeline::export_pdf_async;

/// Crate version, recorded as the PDF producer.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parse a JSON-encoded input record.
///
/// # Example
///
/// ```
/// let input = cvpress::input_from_json(r#"{"kind": "businessPlan", "id": "7"}"#).unwrap();
/// assert_eq!(input.kind, cvpress::DocumentKind::BusinessPlan);
/// ```
pub fn input_from_json(json: &str) -> Result<RawDocumentInput> {
    Ok(serde_json::from_str(json)?)
}

/// Render an input straight to plain text.
pub fn render_text(input: &RawDocumentInput, options: &RenderOptions) -> String {
    to_text(&render_document(input, options), false)
}
