//! Document export.
//!
//! The PDF blob is the primary product. JSON and plain text exports of the
//! same page tree serve previews and debugging.

pub mod json;
pub mod pdf;
pub mod text;
pub mod visitor;

pub use json::{layout_to_json, to_json, JsonFormat};
pub use pdf::{encode_win_ansi, to_pdf, PdfWriter};
pub use text::{to_text, to_text_with};
pub use visitor::{
    walk, CompositeVisitor, DefaultVisitor, DocumentStats, HeadingMarkerVisitor, NodeVisitor,
    VisitorAction,
};

use crate::error::Result;
use crate::model::{DocumentKind, RawDocumentInput, TemplateVariant};
use std::path::Path;

/// MIME type of exported PDF blobs.
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// An encoded document ready to hand to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDocument {
    /// Encoded bytes
    pub bytes: Vec<u8>,
    /// Suggested file name
    pub file_name: String,
    /// MIME type of `bytes`
    pub mime_type: &'static str,
}

impl ExportedDocument {
    /// Wrap a PDF blob.
    pub fn pdf(bytes: Vec<u8>, file_name: impl Into<String>) -> Self {
        Self {
            bytes,
            file_name: file_name.into(),
            mime_type: PDF_MIME_TYPE,
        }
    }

    /// Size of the blob in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if the blob is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Write the blob into a directory under its suggested file name and
    /// return the full path.
    pub fn save_in(&self, dir: impl AsRef<Path>) -> Result<std::path::PathBuf> {
        let path = dir.as_ref().join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// Suggested file name for an input rendered with a template.
///
/// CVs are named `cv-<template>-<id>.pdf`, business plans
/// `business-plan-<business name or id>.pdf`.
pub fn suggested_file_name(input: &RawDocumentInput, variant: TemplateVariant) -> String {
    match input.kind {
        DocumentKind::Cv => format!("cv-{}-{}.pdf", variant.slug(), slugify(&input.id)),
        DocumentKind::BusinessPlan => {
            let name = if input.business.business_name.trim().is_empty() {
                &input.id
            } else {
                &input.business.business_name
            };
            format!("business-plan-{}.pdf", slugify(name))
        }
    }
}

/// Lower-case ASCII slug of `[a-z0-9-]`; empty input gives `document`.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');

    if slug.is_empty() {
        "document".to_string()
    } else {
        slug.to_string()
    }
}
