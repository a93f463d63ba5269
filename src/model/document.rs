//! Document-level types.

use super::{DocumentKind, RenderedPage, TemplateVariant};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A composed document: primary pages followed by extras pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata (title, author, etc.)
    pub metadata: Metadata,

    /// Pages in the document
    pub pages: Vec<RenderedPage>,
}

impl Document {
    /// Create a new empty document.
    pub fn new(metadata: Metadata) -> Self {
        Self {
            metadata,
            pages: Vec::new(),
        }
    }

    /// Get the number of logical pages in the document.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Add a page, numbering it after the existing ones.
    pub fn add_page(&mut self, mut page: RenderedPage) {
        page.number = self.pages.len() as u32 + 1;
        self.pages.push(page);
        self.metadata.page_count = self.pages.len() as u32;
    }

    /// Pages holding extra artifacts.
    pub fn extra_pages(&self) -> impl Iterator<Item = &RenderedPage> {
        self.pages.iter().filter(|p| p.is_extra())
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.pages
            .iter()
            .map(|page| page.plain_text())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Document metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// Document author
    pub author: Option<String>,

    /// Document subject
    pub subject: Option<String>,

    /// Producer application
    pub producer: String,

    /// Creation date
    pub created: Option<DateTime<Utc>>,

    /// Document kind
    pub kind: DocumentKind,

    /// Template used for the primary pages
    pub template: TemplateVariant,

    /// Total number of logical pages
    pub page_count: u32,
}

impl Metadata {
    /// Create metadata for a document kind and template.
    pub fn new(kind: DocumentKind, template: TemplateVariant) -> Self {
        Self {
            title: None,
            author: None,
            subject: None,
            producer: format!("cvpress {}", crate::VERSION),
            created: None,
            kind,
            template,
            page_count: 0,
        }
    }

    /// Convert metadata to YAML frontmatter format.
    pub fn to_yaml_frontmatter(&self) -> String {
        let mut lines = vec!["---".to_string()];

        if let Some(ref title) = self.title {
            lines.push(format!("title: \"{}\"", escape_yaml(title)));
        }
        if let Some(ref author) = self.author {
            lines.push(format!("author: \"{}\"", escape_yaml(author)));
        }
        if let Some(ref subject) = self.subject {
            lines.push(format!("subject: \"{}\"", escape_yaml(subject)));
        }
        lines.push(format!("producer: \"{}\"", escape_yaml(&self.producer)));
        if let Some(ref created) = self.created {
            lines.push(format!("created: {}", created.to_rfc3339()));
        }

        lines.push(format!("template: {}", self.template.slug()));
        lines.push(format!("pages: {}", self.page_count));

        lines.push("---".to_string());
        lines.push(String::new());

        lines.join("\n")
    }
}

/// Escape special characters for YAML strings.
fn escape_yaml(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
