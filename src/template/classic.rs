//! Classic: one centred column with banded section titles.

use super::compose::{compose_groups, join_present, role_line, skill_items, BlockStyles};
use super::{RenderContext, TemplateRenderer};
use crate::model::{
    Align, Node, Region, RegionRole, RenderedPage, Rgb, SectionKey, TemplateVariant, TextStyle,
};

const PADDING: f32 = 45.0;
const RULE: Rgb = Rgb::hex(0x9CA3AF);

/// Single-column CV.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassicTemplate;

impl TemplateRenderer for ClassicTemplate {
    fn variant(&self) -> TemplateVariant {
        TemplateVariant::Classic
    }

    fn render(&self, ctx: &RenderContext<'_>) -> RenderedPage {
        let theme = ctx.theme;
        let cv = &ctx.input.cv;
        let frame = ctx.page_frame();
        let mut body = Region::new(RegionRole::Body, frame)
            .with_padding(PADDING)
            .continuing();

        let name = cv.full_name.trim().to_uppercase();
        if !name.is_empty() {
            body.push(Node::text(
                name,
                TextStyle::new(22.0, theme.text).bold().centered().space_after(4.0),
            ));
        }
        body.push(Node::text(
            role_line(&cv.industry, &cv.experience_level, "Specialist", "Professional"),
            TextStyle::new(12.0, theme.primary).centered().space_after(4.0),
        ));
        let contact = join_present(&[&cv.email, &cv.phone], " • ");
        if !contact.is_empty() {
            body.push(Node::text(contact, TextStyle::new(10.0, theme.muted).centered()));
        }
        body.push(Node::spacer(14.0));

        let paragraph = TextStyle::new(11.5, theme.text)
            .line_height(1.6)
            .space_after(6.0);
        let styles = BlockStyles::new(paragraph, theme.text);
        let rule_length = (frame.width - 2.0 * PADDING - 160.0).max(40.0);

        for key in ctx.sections.keys() {
            let title = vec![
                Node::Card {
                    nodes: vec![Node::text(
                        key.label().to_uppercase(),
                        TextStyle::new(12.0, theme.text).bold().centered(),
                    )],
                    fill: Some(theme.accent),
                    border: None,
                    padding: 6.0,
                },
                Node::Divider {
                    color: RULE,
                    thickness: 1.0,
                    length: Some(rule_length),
                    align: Align::Center,
                },
                Node::spacer(6.0),
            ];
            let content = match key {
                SectionKey::Skills => skill_items(ctx.section(*key), paragraph),
                _ => compose_groups(ctx.groups.get(*key), &styles),
            };
            body.extend(ctx.titled(title, content));
            body.push(Node::spacer(10.0));
        }

        ctx.primary_page().with_region(body)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{blank, render, sample_cv};
    use super::*;
    use crate::model::DocumentKind;

    #[test]
    fn test_classic_header_and_titles() {
        let page = render(TemplateVariant::Classic, &sample_cv());
        let body = page.region(RegionRole::Body).unwrap();
        assert!(body.continues);
        assert_eq!(body.nodes[0].plain_text(), "ADA LOVELACE");
        assert_eq!(body.nodes[1].plain_text(), "Engineering • Senior");

        let text = page.plain_text();
        for title in ["SUMMARY", "EXPERIENCE", "EDUCATION", "SKILLS"] {
            assert!(text.contains(title));
        }
        assert!(text.contains("• Go\n• Rust\n• SQL"));
    }

    #[test]
    fn test_classic_blank_fields_fall_back() {
        let page = render(TemplateVariant::Classic, &blank(DocumentKind::Cv));
        let body = page.region(RegionRole::Body).unwrap();
        assert_eq!(body.nodes[0].plain_text(), "Specialist • Professional");
    }
}
