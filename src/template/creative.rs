//! Creative: portrait header band over a card column and a timeline column.

use super::compose::{
    compose_groups, explode_skills, group_nodes, initials, lines, role_line, BlockStyles,
};
use super::modern::timeline;
use super::{RenderContext, TemplateRenderer};
use crate::model::{
    Align, Frame, Node, Region, RegionRole, RenderedPage, Rgb, SectionKey, TemplateVariant,
    TextStyle,
};
use crate::theme::Theme;

const MARGIN: f32 = 32.0;
const PORTRAIT: f32 = 130.0;
const HEADER_HEIGHT: f32 = 150.0;
const GUTTER: f32 = 16.0;
const SKILL_TRACK: Rgb = Rgb::hex(0xE5D4C5);
const MAX_SKILL_BARS: usize = 6;

/// Header band and two-column CV.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreativeTemplate;

impl TemplateRenderer for CreativeTemplate {
    fn variant(&self) -> TemplateVariant {
        TemplateVariant::Creative
    }

    fn render(&self, ctx: &RenderContext<'_>) -> RenderedPage {
        let page = ctx.page_frame();
        let inner_width = page.width - 2.0 * MARGIN;
        let columns_top = MARGIN + HEADER_HEIGHT + GUTTER;
        let columns_height = page.height - columns_top - MARGIN;
        let left_width = (inner_width - GUTTER) * 0.48;
        let right_width = inner_width - GUTTER - left_width;

        let portrait = Frame::new(MARGIN, MARGIN, PORTRAIT, PORTRAIT);
        let header = Frame::new(
            MARGIN + PORTRAIT + GUTTER,
            MARGIN,
            inner_width - PORTRAIT - GUTTER,
            HEADER_HEIGHT,
        );
        let left = Frame::new(MARGIN, columns_top, left_width, columns_height);
        let right = Frame::new(
            MARGIN + left_width + GUTTER,
            columns_top,
            right_width,
            columns_height,
        );

        ctx.primary_page()
            .with_region(portrait_region(ctx, portrait))
            .with_region(header_region(ctx, header))
            .with_region(left_column(ctx, left))
            .with_region(right_column(ctx, right))
    }
}

fn portrait_region(ctx: &RenderContext<'_>, frame: Frame) -> Region {
    let mut region = Region::new(RegionRole::Portrait, frame);
    region.push(Node::Avatar {
        photo: ctx.input.photo.clone(),
        initials: initials(&ctx.input.cv.full_name),
        diameter: 120.0,
        fill: ctx.theme.border,
        text_color: ctx.theme.primary,
        align: Align::Center,
    });
    region
}

fn header_region(ctx: &RenderContext<'_>, frame: Frame) -> Region {
    let theme = ctx.theme;
    let cv = &ctx.input.cv;
    let mut region = Region::new(RegionRole::Header, frame).with_padding(4.0);

    let name = cv.full_name.trim();
    if !name.is_empty() {
        region.push(Node::text(
            name,
            TextStyle::new(24.0, theme.text).bold().space_after(4.0),
        ));
    }
    region.push(Node::text(
        role_line(&cv.industry, &cv.experience_level, "Professional", "Level"),
        TextStyle::new(12.0, theme.primary).space_after(8.0),
    ));

    let intro = BlockStyles::new(
        TextStyle::new(10.0, theme.muted).line_height(1.45),
        theme.text,
    );
    if let Some(first) = ctx.groups.get(SectionKey::Summary).first() {
        region.extend(group_nodes(first, &intro));
    }
    region
}

fn left_column(ctx: &RenderContext<'_>, frame: Frame) -> Region {
    let theme = ctx.theme;
    let cv = &ctx.input.cv;
    let mut region = Region::new(RegionRole::LeftColumn, frame).continuing();
    let text = TextStyle::new(10.5, theme.text).line_height(1.45).space_after(4.0);
    let styles = BlockStyles::new(text, theme.text);

    let profile = compose_groups(ctx.groups.get(SectionKey::Summary), &styles);
    region.push(card("My Profile", profile, theme));
    region.push(Node::spacer(12.0));

    let bars = explode_skills(ctx.section(SectionKey::Skills))
        .into_iter()
        .take(MAX_SKILL_BARS)
        .map(|label| Node::SkillBar {
            label,
            level: 0.75,
            track: SKILL_TRACK,
            fill: theme.primary,
            style: TextStyle::new(10.5, theme.text).space_after(2.0),
        })
        .collect();
    region.push(card("Skills", bars, theme));
    region.push(Node::spacer(12.0));

    let contact = lines(&format!("{}\n{}", cv.phone, cv.email), text);
    region.push(card("Contact", contact, theme));
    region
}

fn card(title: &str, body: Vec<Node>, theme: &Theme) -> Node {
    let mut nodes = vec![Node::text(
        title.to_uppercase(),
        TextStyle::new(12.0, theme.primary).bold().space_after(6.0),
    )];
    nodes.extend(body);
    Node::Card {
        nodes,
        fill: Some(theme.surface),
        border: Some(theme.border),
        padding: 14.0,
    }
}

fn right_column(ctx: &RenderContext<'_>, frame: Frame) -> Region {
    let theme = ctx.theme;
    let mut region = Region::new(RegionRole::RightColumn, frame).continuing();
    let styles = BlockStyles::new(
        TextStyle::new(10.5, theme.text).line_height(1.45).space_after(5.0),
        theme.text,
    );

    let experience = compose_groups(ctx.groups.get(SectionKey::Experience), &styles);
    region.extend(ctx.titled(column_title("Experience", theme), experience));
    region.push(Node::spacer(14.0));

    let education = timeline(
        compose_groups(ctx.groups.get(SectionKey::Education), &styles),
        theme,
    );
    region.extend(ctx.titled(column_title("Education", theme), education));
    region
}

fn column_title(title: &str, theme: &Theme) -> Vec<Node> {
    vec![
        Node::text(
            title.to_uppercase(),
            TextStyle::new(13.0, theme.primary).bold().space_after(4.0),
        ),
        Node::divider(theme.border, 1.0),
        Node::spacer(8.0),
    ]
}
