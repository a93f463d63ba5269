//! Plain text export.

use super::visitor::{walk, DefaultVisitor, NodeVisitor};
use crate::model::Document;

/// Convert a document to plain text, optionally led by YAML frontmatter.
pub fn to_text(doc: &Document, frontmatter: bool) -> String {
    to_text_with(doc, &mut DefaultVisitor::new(), frontmatter)
}

/// Convert a document to plain text through a custom visitor.
pub fn to_text_with<V: NodeVisitor + ?Sized>(
    doc: &Document,
    visitor: &mut V,
    frontmatter: bool,
) -> String {
    let body = walk(doc, visitor);
    let body = body.trim();

    if frontmatter {
        format!("{}{}", doc.metadata.to_yaml_frontmatter(), body)
    } else {
        body.to_string()
    }
}
