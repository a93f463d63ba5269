//! Rendering pipeline.
//!
//! Runs the stages in order: section extraction (with normalization),
//! block parsing, grouping, theme resolution, template rendering and extras
//! composition. Every stage up to here is total; only [`Pipeline::export_pdf`]
//! can fail.

use crate::error::Result;
use crate::export::{suggested_file_name, ExportedDocument, PdfWriter};
use crate::layout::{Grouper, SectionGroups, SHORT_PARAGRAPH_LIMIT};
use crate::model::{
    Document, DocumentKind, Metadata, PageSize, RawDocumentInput, TemplateVariant,
};
use crate::parse::SectionExtractor;
use crate::template::{renderer_for, ExtrasComposer, ExtrasTitles, RenderContext};
use crate::theme::ThemeResolver;
use chrono::{DateTime, Utc};

/// Options for one rendering invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Paper size of every page
    pub page_size: PageSize,

    /// Longest paragraph (in characters) still glued to a preceding heading
    pub short_paragraph_limit: usize,

    /// Compose extras pages in parallel
    pub parallel: bool,

    /// Flate-compress PDF content streams
    pub compress: bool,

    /// Timestamp stamped into metadata and footers; `None` means now
    pub generated_at: Option<DateTime<Utc>>,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the paper size.
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the short-paragraph threshold of the grouper.
    pub fn with_short_paragraph_limit(mut self, limit: usize) -> Self {
        self.short_paragraph_limit = limit;
        self
    }

    /// Enable or disable compression of PDF content streams.
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Fix the generation timestamp.
    pub fn with_generated_at(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = Some(at);
        self
    }

    /// Compose extras pages on the calling thread.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.generated_at.unwrap_or_else(Utc::now)
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            page_size: PageSize::A4,
            short_paragraph_limit: SHORT_PARAGRAPH_LIMIT,
            parallel: true,
            compress: true,
            generated_at: None,
        }
    }
}

/// The configured rendering pipeline.
///
/// Holds only immutable tables, so one instance can serve concurrent
/// invocations.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    options: RenderOptions,
    extractor: SectionExtractor,
    themes: ThemeResolver,
    titles: ExtrasTitles,
}

impl Pipeline {
    /// Create a pipeline with the built-in tables.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    /// Replace the section keyword table.
    pub fn with_extractor(mut self, extractor: SectionExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Replace the theme palette.
    pub fn with_theme_resolver(mut self, themes: ThemeResolver) -> Self {
        self.themes = themes;
        self
    }

    /// Replace the extras title table.
    pub fn with_extras_titles(mut self, titles: ExtrasTitles) -> Self {
        self.titles = titles;
        self
    }

    /// The options in effect.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Compose the page tree for an input. Never fails.
    pub fn render(&self, input: &RawDocumentInput) -> Document {
        let options = &self.options;
        let generated_at = options.timestamp();
        let variant = TemplateVariant::select(input.kind, &input.style);
        let theme = self.themes.resolve_style(variant, &input.style);

        let sections = self.extractor.extract(input);
        let mut grouper = Grouper::new(options.short_paragraph_limit);
        let groups = SectionGroups::build(&sections, &mut grouper);

        let ctx = RenderContext {
            input,
            sections: &sections,
            groups: &groups,
            theme: &theme,
            page_size: options.page_size,
            generated_at,
            short_paragraph_limit: options.short_paragraph_limit,
        };

        let mut document = Document::new(metadata(input, variant, generated_at));
        document.add_page(renderer_for(variant).render(&ctx));

        let extras = ExtrasComposer::new(self.titles.clone())
            .with_page_size(options.page_size)
            .with_short_paragraph_limit(options.short_paragraph_limit)
            .with_parallel(options.parallel);
        for page in extras.compose(&input.extras, &theme) {
            document.add_page(page);
        }

        log::debug!(
            "rendered {} with template {} into {} pages",
            input.id,
            variant.slug(),
            document.page_count()
        );
        document
    }

    /// Compose and encode an input into a PDF blob with its file name.
    pub fn export_pdf(&self, input: &RawDocumentInput) -> Result<ExportedDocument> {
        self.encode(input, &self.render(input))
    }

    /// Encode a document composed from `input` into a PDF blob.
    pub fn encode(&self, input: &RawDocumentInput, document: &Document) -> Result<ExportedDocument> {
        let bytes = PdfWriter::new()
            .with_compression(self.options.compress)
            .write(document)?;
        Ok(ExportedDocument::pdf(
            bytes,
            suggested_file_name(input, document.metadata.template),
        ))
    }
}

fn metadata(
    input: &RawDocumentInput,
    variant: TemplateVariant,
    generated_at: DateTime<Utc>,
) -> Metadata {
    let mut metadata = Metadata::new(input.kind, variant);
    let (name, author, subject) = match input.kind {
        DocumentKind::Cv => (
            input.cv.full_name.trim(),
            input.cv.full_name.trim(),
            "Curriculum Vitae",
        ),
        DocumentKind::BusinessPlan => (
            input.business.business_name.trim(),
            input.business.owner.trim(),
            "Business Plan",
        ),
    };
    metadata.title = Some(if name.is_empty() {
        subject.to_string()
    } else {
        format!("{} - {}", subject, name)
    });
    metadata.author = Some(author)
        .filter(|a| !a.is_empty())
        .map(str::to_string);
    metadata.subject = Some(subject.to_string());
    metadata.created = Some(generated_at);
    metadata
}

/// Compose the page tree for an input.
pub fn render_document(input: &RawDocumentInput, options: &RenderOptions) -> Document {
    Pipeline::new(options.clone()).render(input)
}

/// Compose and encode an input into a PDF blob.
pub fn export_pdf(input: &RawDocumentInput, options: &RenderOptions) -> Result<ExportedDocument> {
    Pipeline::new(options.clone()).export_pdf(input)
}

/// Compose and encode an input on the blocking thread pool.
#[cfg(feature = "async")]
pub async fn export_pdf_async(
    input: RawDocumentInput,
    options: RenderOptions,
) -> Result<ExportedDocument> {
    tokio::task::spawn_blocking(move || export_pdf(&input, &options))
        .await
        .map_err(std::io::Error::other)?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Node, PageKind, RegionRole, StyleConfig};
    use chrono::TimeZone;

    fn options() -> RenderOptions {
        RenderOptions::new().with_generated_at(Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap())
    }

    #[test]
    fn test_options_builder() {
        let options = RenderOptions::new()
            .with_page_size(PageSize::Letter)
            .with_short_paragraph_limit(120)
            .with_compression(false)
            .sequential();
        assert_eq!(options.page_size, PageSize::Letter);
        assert_eq!(options.short_paragraph_limit, 120);
        assert!(!options.compress);
        assert!(!options.parallel);
        assert!(options.generated_at.is_none());
    }

    #[test]
    fn test_render_cv_metadata() {
        let mut input = RawDocumentInput::new(DocumentKind::Cv)
            .with_id("42")
            .with_style(StyleConfig::new("Modern", "Courier", "Green"))
            .with_extra("coverLetter", "Dear Hiring Manager,");
        input.cv.full_name = "Ada Lovelace".into();

        let doc = render_document(&input, &options());
        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.metadata.template, TemplateVariant::Modern);
        assert_eq!(
            doc.metadata.title.as_deref(),
            Some("Curriculum Vitae - Ada Lovelace")
        );
        assert_eq!(doc.metadata.author.as_deref(), Some("Ada Lovelace"));
        assert_eq!(doc.pages[0].kind, PageKind::Primary);
        assert!(doc.pages[1].is_extra());
        assert_eq!(doc.pages[1].number, 2);
    }

    #[test]
    fn test_business_plan_without_owner() {
        let input = RawDocumentInput::new(DocumentKind::BusinessPlan).with_response("We roast.");
        let doc = render_document(&input, &options());
        assert_eq!(doc.metadata.template, TemplateVariant::BusinessAi);
        assert_eq!(doc.metadata.title.as_deref(), Some("Business Plan"));
        assert!(doc.metadata.author.is_none());
    }

    #[test]
    fn test_export_pdf_names_blob() {
        let input = RawDocumentInput::new(DocumentKind::Cv).with_id("ORD 7");
        let exported = export_pdf(&input, &options()).unwrap();
        assert_eq!(exported.file_name, "cv-classic-ord-7.pdf");
        assert!(exported.bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_short_paragraph_limit_reaches_section_titles() {
        let summary = "Built payment APIs used by millions of customers daily.";
        let input = RawDocumentInput::new(DocumentKind::Cv)
            .with_response(format!("SUMMARY\n{}", summary));
        let flows_alone = |doc: &Document| {
            doc.pages[0]
                .region(RegionRole::Body)
                .unwrap()
                .nodes
                .iter()
                .any(|n| matches!(n, Node::Paragraph { .. }) && n.plain_text() == summary)
        };

        assert!(!flows_alone(&render_document(&input, &options())));
        let tight = options().with_short_paragraph_limit(10);
        assert!(flows_alone(&render_document(&input, &tight)));
    }

    #[test]
    fn test_letter_size_propagates() {
        let input = RawDocumentInput::new(DocumentKind::Cv).with_extra("keywords", "rust");
        let doc = render_document(&input, &options().with_page_size(PageSize::Letter));
        assert!(doc.pages.iter().all(|p| p.size == PageSize::Letter));
    }
}
