//! Template renderers.
//!
//! Every template consumes the same inputs (sections, their render groups,
//! a resolved [`Theme`] and the caller's identity fields) and produces one
//! primary [`RenderedPage`]. Templates differ in geometry and decoration
//! only; parsing and grouping happen before any template runs.

mod business_ai;
mod business_reviewed;
mod classic;
pub mod compose;
mod creative;
pub mod extras;
mod manager;
mod modern;

pub use business_ai::BusinessAiTemplate;
pub use business_reviewed::BusinessReviewedTemplate;
pub use classic::ClassicTemplate;
pub use compose::BlockStyles;
pub use creative::CreativeTemplate;
pub use extras::{ExtrasComposer, ExtrasTitles};
pub use manager::ManagerReviewedTemplate;
pub use modern::ModernTemplate;

use crate::layout::SectionGroups;
use crate::model::{
    Frame, Node, PageKind, PageSize, RawDocumentInput, RenderedPage, SectionKey, SectionSet,
    TemplateVariant,
};
use crate::theme::Theme;
use chrono::{DateTime, Utc};

/// Everything a template needs to render the primary page.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Caller input (identity fields, photo)
    pub input: &'a RawDocumentInput,
    /// Normalized section bodies
    pub sections: &'a SectionSet,
    /// Render groups per section
    pub groups: &'a SectionGroups,
    /// Resolved theme
    pub theme: &'a Theme,
    /// Paper size
    pub page_size: PageSize,
    /// Generation timestamp
    pub generated_at: DateTime<Utc>,
    /// Longest paragraph still glued to a section title
    pub short_paragraph_limit: usize,
}

impl<'a> RenderContext<'a> {
    /// An empty primary page with the theme's background and font.
    pub fn primary_page(&self) -> RenderedPage {
        RenderedPage::new(
            PageKind::Primary,
            self.page_size,
            self.theme.font,
            self.theme.background,
        )
    }

    /// Frame covering the whole page.
    pub fn page_frame(&self) -> Frame {
        Frame::new(0.0, 0.0, self.page_size.width(), self.page_size.height())
    }

    /// Normalized body of one section.
    pub fn section(&self, key: SectionKey) -> &'a str {
        self.sections.get(key)
    }

    /// Title nodes followed by a body, glued per [`compose::section`].
    pub fn titled(&self, title: Vec<Node>, body: Vec<Node>) -> Vec<Node> {
        compose::section(title, body, self.short_paragraph_limit)
    }
}

/// A template that lays out the primary page.
pub trait TemplateRenderer: Send + Sync {
    /// The variant this renderer implements.
    fn variant(&self) -> TemplateVariant;

    /// Render the primary page.
    ///
    /// Missing fields produce empty regions, never a failure.
    fn render(&self, ctx: &RenderContext<'_>) -> RenderedPage;
}

/// The renderer for a template variant.
pub fn renderer_for(variant: TemplateVariant) -> &'static dyn TemplateRenderer {
    match variant {
        TemplateVariant::Classic => &ClassicTemplate,
        TemplateVariant::Modern => &ModernTemplate,
        TemplateVariant::Creative => &CreativeTemplate,
        TemplateVariant::ManagerReviewed => &ManagerReviewedTemplate,
        TemplateVariant::BusinessAi => &BusinessAiTemplate,
        TemplateVariant::BusinessReviewed => &BusinessReviewedTemplate,
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::layout::{Grouper, SHORT_PARAGRAPH_LIMIT};
    use crate::model::{Accent, DocumentKind, FontFamily};
    use crate::parse::extract_sections;
    use crate::theme::ThemeResolver;
    use chrono::TimeZone;

    /// Render one variant for an input, the way the pipeline does.
    pub(crate) fn render(variant: TemplateVariant, input: &RawDocumentInput) -> RenderedPage {
        let sections = extract_sections(input);
        let groups = SectionGroups::build(&sections, &mut Grouper::default());
        let theme = ThemeResolver::default().resolve(variant, Accent::Default, FontFamily::Helvetica);
        let ctx = RenderContext {
            input,
            sections: &sections,
            groups: &groups,
            theme: &theme,
            page_size: PageSize::A4,
            generated_at: Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
            short_paragraph_limit: SHORT_PARAGRAPH_LIMIT,
        };
        renderer_for(variant).render(&ctx)
    }

    pub(crate) fn sample_cv() -> RawDocumentInput {
        let mut input = RawDocumentInput::new(DocumentKind::Cv)
            .with_id("ord-1")
            .with_response(
                "SUMMARY\nBuilt **reliable** APIs.\n\nEXPERIENCE\n## Acme Corp\n- Shipped v1\n- Shipped v2\n\nEDUCATION\nBSc Computer Science\n\nSKILLS\nGo, Rust, SQL",
            );
        input.cv.full_name = "Ada Lovelace".into();
        input.cv.email = "ada@example.com".into();
        input.cv.phone = "+44 20 0000".into();
        input.cv.industry = "Engineering".into();
        input.cv.experience_level = "Senior".into();
        input
    }

    pub(crate) fn blank(kind: DocumentKind) -> RawDocumentInput {
        let mut input = RawDocumentInput::new(kind).with_response("   \n\t ");
        input.cv.full_name = "  ".into();
        input.business.business_name = " ".into();
        input
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::model::DocumentKind;

    #[test]
    fn test_registry_covers_every_variant() {
        for variant in TemplateVariant::ALL {
            assert_eq!(renderer_for(variant).variant(), variant);
        }
    }

    #[test]
    fn test_every_template_renders_blank_input() {
        for variant in TemplateVariant::ALL {
            let page = render(variant, &blank(variant.kind()));
            assert_eq!(page.kind, PageKind::Primary);
            assert!(!page.regions.is_empty(), "{:?} produced no regions", variant);
        }
    }

    #[test]
    fn test_cv_templates_show_every_section() {
        let input = sample_cv();
        for variant in TemplateVariant::ALL {
            if variant.kind() != DocumentKind::Cv {
                continue;
            }
            let text = render(variant, &input).plain_text().to_lowercase();
            for needle in ["ada", "reliable", "shipped v2", "bsc computer science", "rust"] {
                assert!(text.contains(needle), "{:?} is missing {:?}", variant, needle);
            }
        }
    }
}
