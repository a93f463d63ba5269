//! Modern: gradient sidebar beside a main column with an experience timeline.

use super::compose::{
    compose_groups, initials, lines, role_line, skill_items, BlockStyles,
};
use super::{RenderContext, TemplateRenderer};
use crate::model::{
    Align, Frame, Node, Region, RegionRole, RenderedPage, Rgb, SectionKey, TemplateVariant,
    TextStyle,
};
use crate::theme::Theme;

const SIDEBAR_SHARE: f32 = 0.3;
const SIDEBAR_TEXT: Rgb = Rgb::hex(0xE5E7EB);
const SIDEBAR_RULE: Rgb = Rgb::hex(0x4B5563);

/// Sidebar and timeline CV.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModernTemplate;

impl TemplateRenderer for ModernTemplate {
    fn variant(&self) -> TemplateVariant {
        TemplateVariant::Modern
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
    let mut region = Region::new(RegionRole::Sidebar, frame).with_padding(24.0);
    region = match theme.gradient {
        Some((top, bottom)) => region.with_gradient(top, bottom),
        None => region.with_fill(theme.primary),
    };

    if let Some(photo) = &ctx.input.photo {
        region.push(Node::Avatar {
            photo: Some(photo.clone()),
            initials: initials(&cv.full_name),
            diameter: 100.0,
            fill: theme.primary.lerp(Rgb::WHITE, 0.25),
            text_color: Rgb::WHITE,
            align: Align::Center,
        });
        region.push(Node::spacer(16.0));
    }

    let text = TextStyle::new(10.0, SIDEBAR_TEXT).space_after(3.0);
    let styles = BlockStyles::new(text, Rgb::WHITE);

    let contact = lines(&format!("{}\n{}", cv.phone, cv.email), text);
    region.extend(ctx.titled(sidebar_title("Contact"), contact));
    region.push(Node::spacer(12.0));

    let education = compose_groups(ctx.groups.get(SectionKey::Education), &styles);
    region.extend(ctx.titled(sidebar_title("Education"), education));
    region.push(Node::spacer(12.0));

    let skills = skill_items(ctx.section(SectionKey::Skills), text);
    region.extend(ctx.titled(sidebar_title("Expertise"), skills));
    region.push(Node::spacer(12.0));

    let languages = cv
        .languages
        .as_deref()
        .filter(|l| !l.trim().is_empty())
        .unwrap_or("English");
    region.extend(ctx.titled(sidebar_title("Language"), lines(languages, text)));

    region
}

fn sidebar_title(title: &str) -> Vec<Node> {
    vec![
        Node::text(
            title.to_uppercase(),
            TextStyle::new(11.0, Rgb::WHITE).bold().space_after(4.0),
        ),
        Node::divider(SIDEBAR_RULE, 1.0),
        Node::spacer(6.0),
    ]
}

fn main(ctx: &RenderContext<'_>, frame: Frame) -> Region {
    let theme = ctx.theme;
    let cv = &ctx.input.cv;
    let mut region = Region::new(RegionRole::Main, frame)
        .with_fill(Rgb::WHITE)
        .with_padding(36.0)
        .continuing();

    let name = cv.full_name.trim();
    if !name.is_empty() {
        region.push(Node::text(
            name,
            TextStyle::new(22.0, theme.text).bold().space_after(4.0),
        ));
    }
    region.push(Node::text(
        role_line(&cv.industry, &cv.experience_level, "Professional", "Level"),
        TextStyle::new(12.0, theme.primary),
    ));
    region.push(Node::spacer(18.0));

    let body = TextStyle::new(10.5, theme.text)
        .line_height(1.5)
        .space_after(5.0);
    let styles = BlockStyles::new(body, theme.text);

    let summary = compose_groups(ctx.groups.get(SectionKey::Summary), &styles);
    region.extend(ctx.titled(main_title("Summary", theme), summary));
    region.push(Node::spacer(12.0));

    let experience = timeline(
        compose_groups(ctx.groups.get(SectionKey::Experience), &styles),
        theme,
    );
    region.extend(ctx.titled(main_title("Experience", theme), experience));

    region
}

fn main_title(title: &str, theme: &Theme) -> Vec<Node> {
    vec![
        Node::text(
            title.to_uppercase(),
            TextStyle::new(12.0, theme.text).bold().space_after(4.0),
        ),
        Node::divider(theme.border, 1.0),
        Node::spacer(8.0),
    ]
}

/// One timeline entry per top-level node; plain lists get one entry per item.
pub(super) fn timeline(nodes: Vec<Node>, theme: &Theme) -> Vec<Node> {
    let entry = |nodes: Vec<Node>| Node::TimelineEntry {
        nodes,
        dot: theme.primary,
        line: theme.border,
    };
    nodes
        .into_iter()
        .flat_map(|node| match node {
            Node::Group {
                nodes,
                keep_together: false,
            } => nodes.into_iter().map(|n| entry(vec![n])).collect::<Vec<_>>(),
            spacer @ Node::Spacer { .. } => vec![spacer],
            other => vec![entry(vec![other])],
        })
        .collect()
}
