//! Reviewed business plan: narrative, fixed financial projection and
//! reviewer footer.

use super::business_ai::labelled;
use super::compose::{compose_groups, field, join_present, BlockStyles};
use super::{RenderContext, TemplateRenderer};
use crate::model::{
    Align, Node, Region, RegionRole, RenderedPage, SectionKey, Table, TableCell, TableRow,
    TemplateVariant, TextStyle,
};
use crate::theme::Theme;

/// Rows of the financial projection table: year, revenue, expenses, profit.
pub const PROJECTION: [[&str; 4]; 3] = [
    ["2025", "$120,000", "$70,000", "$50,000"],
    ["2026", "$180,000", "$95,000", "$85,000"],
    ["2027", "$250,000", "$130,000", "$120,000"],
];

/// Business plan presented as reviewed by a specialist.
#[derive(Debug, Clone, Copy, Default)]
pub struct BusinessReviewedTemplate;

impl TemplateRenderer for BusinessReviewedTemplate {
    fn variant(&self) -> TemplateVariant {
        TemplateVariant::BusinessReviewed
    }

    fn render(&self, ctx: &RenderContext<'_>) -> RenderedPage {
        let theme = ctx.theme;
        let business = &ctx.input.business;
        let mut body = Region::new(RegionRole::Body, ctx.page_frame())
            .with_padding(48.0)
            .continuing();

        let name = field(&business.business_name);
        let heading = if name.is_empty() {
            "Business Plan".to_string()
        } else {
            format!("Business Plan - {}", name)
        };
        body.push(Node::text(
            heading,
            TextStyle::new(20.0, theme.primary).bold().space_after(6.0),
        ));
        let meta = join_present(
            &[
                &labelled("Niche", &business.niche),
                &labelled("Budget", &business.budget),
            ],
            " | ",
        );
        if !meta.is_empty() {
            body.push(Node::text(meta, TextStyle::new(10.5, theme.muted)));
        }
        body.push(Node::spacer(10.0));
        body.push(Node::divider(theme.primary, 1.5));
        body.push(Node::spacer(14.0));

        let styles = BlockStyles::new(
            TextStyle::new(11.0, theme.text).line_height(1.6).space_after(6.0),
            theme.text,
        );
        let narrative = compose_groups(ctx.groups.get(SectionKey::Narrative), &styles);
        body.extend(ctx.titled(title("Executive Summary", theme), narrative));
        body.push(Node::spacer(16.0));

        body.extend(ctx.titled(
            title("Financial Projection", theme),
            vec![projection_table(theme)],
        ));
        body.push(Node::spacer(28.0));

        let owner = field(&business.owner);
        let reviewer = if owner.is_empty() {
            "Business Specialist"
        } else {
            owner.as_str()
        };
        body.push(Node::divider(theme.border, 0.5));
        body.push(Node::spacer(6.0));
        body.push(Node::text(
            format!("Reviewed by: {}", reviewer),
            TextStyle::new(10.0, theme.muted).right(),
        ));

        ctx.primary_page().with_region(body)
    }
}

fn title(text: &str, theme: &Theme) -> Vec<Node> {
    vec![Node::text(
        text,
        TextStyle::new(14.0, theme.primary).bold().space_after(8.0),
    )]
}

fn projection_table(theme: &Theme) -> Node {
    let mut table = Table::with_header(1);
    table.add_row(TableRow::header(
        ["Year", "Revenue", "Expenses", "Profit"]
            .into_iter()
            .map(TableCell::text)
            .collect(),
    ));
    for row in PROJECTION {
        table.add_row(TableRow::new(
            row.into_iter()
                .enumerate()
                .map(|(i, value)| {
                    let cell = TableCell::text(value);
                    if i == 0 {
                        cell
                    } else {
                        cell.align(Align::Right)
                    }
                })
                .collect(),
        ));
    }
    Node::Table {
        table,
        header_fill: theme.accent,
        border: theme.border,
        style: TextStyle::new(10.5, theme.text),
    }
}
