//! Manager-reviewed CV: solid sidebar, divided main column and a fixed
//! evaluation box.

use super::compose::{
    compose_groups, initials, join_present, lines, skill_items, BlockStyles,
};
use super::{RenderContext, TemplateRenderer};
use crate::model::{
    Align, Frame, Node, Region, RegionRole, RenderedPage, Rgb, SectionKey, TemplateVariant,
    TextStyle,
};
use crate::theme::Theme;

const SIDEBAR_SHARE: f32 = 0.3;
const SIDEBAR_TEXT: Rgb = Rgb::hex(0xE5E7EB);
const POSITION_TEXT: Rgb = Rgb::hex(0xE0E7FF);
const EVALUATION_TEXT: Rgb = Rgb::hex(0x1F2937);

/// Fixed reviewer statement printed in the evaluation box.
pub const EVALUATION: &str = "This CV has been professionally reviewed for clarity, structure, \
and compliance with international HR standards. The achievements were evaluated for \
measurable impact, presentation quality, and professionalism.";

/// CV presented as reviewed by a hiring manager.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManagerReviewedTemplate;

impl TemplateRenderer for ManagerReviewedTemplate {
    fn variant(&self) -> TemplateVariant {
        TemplateVariant::ManagerReviewed
    }

    fn render(&self, ctx: &RenderContext<'_>) -> RenderedPage {
        let page = ctx.page_frame();
        let sidebar_width = page.width * SIDEBAR_SHARE;

        ctx.primary_page()
            .with_region(sidebar(ctx, Frame::new(0.0, 0.0, sidebar_width, page.height)))
            .with_region(main(
                ctx,
                Frame::new(sidebar_width, 0.0, page.width - sidebar_width, page.height),
            ))
    }
}

fn sidebar(ctx: &RenderContext<'_>, frame: Frame) -> Region {
    let theme = ctx.theme;
    let cv = &ctx.input.cv;
    let mut region = Region::new(RegionRole::Sidebar, frame)
        .with_fill(theme.primary)
        .with_padding(26.0);

    if let Some(photo) = &ctx.input.photo {
        region.push(Node::Avatar {
            photo: Some(photo.clone()),
            initials: initials(&cv.full_name),
            diameter: 95.0,
            fill: theme.primary.lerp(Rgb::WHITE, 0.3),
            text_color: Rgb::WHITE,
            align: Align::Center,
        });
        region.push(Node::spacer(12.0));
    }

    let name = cv.full_name.trim();
    if !name.is_empty() {
        region.push(Node::text(
            name,
            TextStyle::new(18.0, Rgb::WHITE).bold().centered().space_after(4.0),
        ));
    }
    let position = join_present(&[&cv.industry, &cv.experience_level], " • ");
    if !position.is_empty() {
        region.push(Node::text(
            position,
            TextStyle::new(10.5, POSITION_TEXT).centered(),
        ));
    }
    region.push(Node::spacer(18.0));

    let text = TextStyle::new(9.5, SIDEBAR_TEXT).space_after(3.0);
    let styles = BlockStyles::new(text, Rgb::WHITE);
    let rule = theme.primary.lerp(Rgb::WHITE, 0.35);

    let contact = lines(&format!("{}\n{}", cv.email, cv.phone), text);
    region.extend(ctx.titled(label("Contact", rule), contact));
    region.push(Node::spacer(12.0));

    let education = compose_groups(ctx.groups.get(SectionKey::Education), &styles);
    region.extend(ctx.titled(label("Education", rule), education));
    region.push(Node::spacer(12.0));

    let skills = skill_items(ctx.section(SectionKey::Skills), text);
    region.extend(ctx.titled(label("Skills", rule), skills));
    region.push(Node::spacer(12.0));

    let languages = cv
        .languages
        .as_deref()
        .filter(|l| !l.trim().is_empty())
        .unwrap_or("English (Fluent)");
    region.extend(ctx.titled(label("Languages", rule), lines(languages, text)));

    region
}

fn label(title: &str, rule: Rgb) -> Vec<Node> {
    vec![
        Node::text(
            title.to_uppercase(),
            TextStyle::new(10.5, Rgb::WHITE).bold().space_after(3.0),
        ),
        Node::divider(rule, 0.8),
        Node::spacer(5.0),
    ]
}

fn main(ctx: &RenderContext<'_>, frame: Frame) -> Region {
    let theme = ctx.theme;
    let mut region = Region::new(RegionRole::Main, frame)
        .with_padding(36.0)
        .continuing();
    let styles = BlockStyles::new(
        TextStyle::new(11.0, theme.text).line_height(1.55).space_after(6.0),
        theme.text,
    );

    let parts = [
        ("Professional Summary", SectionKey::Summary),
        ("Work Experience", SectionKey::Experience),
        ("Skills", SectionKey::Skills),
    ];
    for (i, (title, key)) in parts.into_iter().enumerate() {
        if i > 0 {
            region.push(Node::spacer(8.0));
            region.push(Node::divider(theme.border, 1.0));
            region.push(Node::spacer(12.0));
        }
        let body = compose_groups(ctx.groups.get(key), &styles);
        region.extend(ctx.titled(title_nodes(title, theme), body));
    }

    region.push(Node::spacer(20.0));
    region.push(Node::Card {
        nodes: vec![
            Node::text(
                "MANAGER’S EVALUATION",
                TextStyle::new(16.0, theme.primary).bold().centered().space_after(8.0),
            ),
            Node::text(
                EVALUATION,
                TextStyle::new(12.0, EVALUATION_TEXT).line_height(1.7),
            ),
        ],
        fill: Some(theme.accent),
        border: Some(theme.primary),
        padding: 24.0,
    });

    region
}

fn title_nodes(title: &str, theme: &Theme) -> Vec<Node> {
    vec![
        Node::text(
            title.to_uppercase(),
            TextStyle::new(14.0, theme.primary).bold().space_after(4.0),
        ),
        Node::divider(theme.primary, 1.5),
        Node::spacer(8.0),
    ]
}
