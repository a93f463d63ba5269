//! AI-generated business plan: header band, summary card and footer.

use super::compose::{compose_groups, field, join_present, BlockStyles};
use super::{RenderContext, TemplateRenderer};
use crate::model::{
    Frame, Node, Region, RegionRole, RenderedPage, Rgb, SectionKey, TemplateVariant, TextStyle,
};
use chrono::Datelike;

const FOOTER_HEIGHT: f32 = 56.0;

/// Business plan presented as generated by the assistant.
#[derive(Debug, Clone, Copy, Default)]
pub struct BusinessAiTemplate;

impl TemplateRenderer for BusinessAiTemplate {
    fn variant(&self) -> TemplateVariant {
        TemplateVariant::BusinessAi
    }

    fn render(&self, ctx: &RenderContext<'_>) -> RenderedPage {
        let theme = ctx.theme;
        let business = &ctx.input.business;
        let page = ctx.page_frame();

        let mut body = Region::new(
            RegionRole::Body,
            Frame::new(0.0, 0.0, page.width, page.height - FOOTER_HEIGHT),
        )
        .with_padding(40.0)
        .continuing();

        let mut header = vec![Node::text(
            "AI-Generated Business Plan",
            TextStyle::new(20.0, Rgb::WHITE).bold().space_after(6.0),
        )];
        let name = field(&business.business_name);
        if !name.is_empty() {
            header.push(Node::text(
                name,
                TextStyle::new(14.0, Rgb::WHITE).space_after(4.0),
            ));
        }
        let meta = join_present(
            &[
                &labelled("Niche", &business.niche),
                &labelled("Budget", &business.budget),
            ],
            " • ",
        );
        if !meta.is_empty() {
            header.push(Node::text(meta, TextStyle::new(10.5, theme.accent)));
        }
        body.push(Node::Card {
            nodes: header,
            fill: Some(theme.primary),
            border: None,
            padding: 20.0,
        });
        body.push(Node::spacer(14.0));
        body.push(Node::divider(theme.border, 1.0));
        body.push(Node::spacer(14.0));

        let styles = BlockStyles::new(
            TextStyle::new(11.0, theme.text).line_height(1.6).space_after(6.0),
            theme.primary,
        );
        let title = vec![Node::text(
            "AI Executive Summary",
            TextStyle::new(15.0, theme.primary).bold().space_after(8.0),
        )];
        let narrative = compose_groups(ctx.groups.get(SectionKey::Narrative), &styles);
        body.push(Node::Card {
            nodes: ctx.titled(title, narrative),
            fill: Some(theme.surface),
            border: Some(theme.primary),
            padding: 18.0,
        });

        let mut footer = Region::new(
            RegionRole::Footer,
            Frame::new(0.0, page.height - FOOTER_HEIGHT, page.width, FOOTER_HEIGHT),
        )
        .with_padding(12.0);
        footer.push(Node::divider(theme.border, 0.5));
        footer.push(Node::spacer(6.0));
        footer.push(Node::text(
            format!(
                "Generated automatically by cvpress © {}",
                ctx.generated_at.year()
            ),
            TextStyle::new(9.0, theme.muted).centered().space_after(2.0),
        ));
        footer.push(Node::text(
            "Confidence Level: 92%",
            TextStyle::new(9.0, theme.primary).bold().centered(),
        ));

        ctx.primary_page().with_region(body).with_region(footer)
    }
}

/// `label: value`, or empty when the value is blank.
pub(super) fn labelled(label: &str, value: &str) -> String {
    let value = field(value);
    if value.is_empty() {
        String::new()
    } else {
        format!("{}: {}", label, value)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{blank, render};
    use super::*;
    use crate::model::{DocumentKind, RawDocumentInput};

    fn plan() -> RawDocumentInput {
        let mut input = RawDocumentInput::new(DocumentKind::BusinessPlan)
            .with_response("## Market\nCoffee demand is **growing**.\n\n1. Lease\n2. Hire");
        input.business.business_name = "Bean There".into();
        input.business.niche = "Coffee".into();
        input.business.budget = "$20k".into();
        input
    }

    #[test]
    fn test_header_and_footer() {
        let page = render(TemplateVariant::BusinessAi, &plan());
        let body = page.region(RegionRole::Body).unwrap().plain_text();
        assert!(body.starts_with("AI-Generated Business Plan\nBean There\nNiche: Coffee • Budget: $20k"));
        assert!(body.contains("AI Executive Summary"));
        assert!(body.contains("Coffee demand is growing."));
        assert!(body.contains("1. Lease\n2. Hire"));

        let footer = page.region(RegionRole::Footer).unwrap().plain_text();
        assert_eq!(
            footer,
            "Generated automatically by cvpress © 2025\nConfidence Level: 92%"
        );
    }

    #[test]
    fn test_blank_plan_omits_meta() {
        let page = render(TemplateVariant::BusinessAi, &blank(DocumentKind::BusinessPlan));
        let body = page.region(RegionRole::Body).unwrap().plain_text();
        assert_eq!(body, "AI-Generated Business Plan\nAI Executive Summary");
    }

    #[test]
    fn test_labelled() {
        assert_eq!(labelled("Niche", " Tea "), "Niche: Tea");
        assert_eq!(labelled("Niche", "  "), "");
    }
}
