//! Extras page composer.
//!
//! Each extra artifact runs through its own normalize, parse and group pass
//! and becomes one page with a titled body. Pages keep the insertion order
//! of the extras mapping even when they are composed in parallel.

use super::compose::{compose_groups, section, BlockStyles};
use crate::layout::{Grouper, SHORT_PARAGRAPH_LIMIT};
use crate::model::{
    ExtraArtifact, Extras, Frame, Node, PageKind, PageSize, Region, RegionRole, RenderedPage, TextStyle,
};
use crate::parse::parse_text;
use crate::theme::Theme;
use rayon::prelude::*;
use std::collections::HashMap;

/// Display titles of the known artifact keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtrasTitles {
    titles: HashMap<String, String>,
}

impl ExtrasTitles {
    /// Create an empty table; every key falls back to its upper-cased form.
    pub fn empty() -> Self {
        Self {
            titles: HashMap::new(),
        }
    }

    /// Add or replace a title.
    pub fn with_title(mut self, key: impl Into<String>, title: impl Into<String>) -> Self {
        self.titles.insert(key.into(), title.into());
        self
    }

    /// Title for a key.
    pub fn title(&self, key: &str) -> String {
        self.titles
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.trim().to_uppercase())
    }
}

impl Default for ExtrasTitles {
    fn default() -> Self {
        [
            ("coverLetter", "COVER LETTER"),
            ("linkedin", "LINKEDIN SUMMARY"),
            ("keywords", "KEYWORD OPTIMIZATION"),
            ("atsCheck", "ATS COMPATIBILITY"),
            ("jobAdaptation", "JOB-TAILORED VERSION"),
            ("achievements", "ACHIEVEMENTS BOOST"),
            ("skillsGap", "SKILLS GAP REPORT"),
            ("customFont", "CUSTOM FONT STYLING"),
            ("customColor", "CUSTOM COLOR THEME"),
        ]
        .into_iter()
        .fold(Self::empty(), |titles, (key, title)| {
            titles.with_title(key, title)
        })
    }
}

/// Composes one page per extra artifact.
#[derive(Debug, Clone)]
pub struct ExtrasComposer {
    titles: ExtrasTitles,
    page_size: PageSize,
    short_paragraph_limit: usize,
    parallel: bool,
}

impl ExtrasComposer {
    /// Create a composer over a title table.
    pub fn new(titles: ExtrasTitles) -> Self {
        Self {
            titles,
            page_size: PageSize::default(),
            short_paragraph_limit: SHORT_PARAGRAPH_LIMIT,
            parallel: true,
        }
    }

    /// Set the paper size.
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the grouper's short-paragraph threshold.
    pub fn with_short_paragraph_limit(mut self, limit: usize) -> Self {
        self.short_paragraph_limit = limit;
        self
    }

    /// Compose pages in parallel or sequentially.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// The title table.
    pub fn titles(&self) -> &ExtrasTitles {
        &self.titles
    }

    /// One page per artifact, in insertion order.
    pub fn compose(&self, extras: &Extras, theme: &Theme) -> Vec<RenderedPage> {
        let artifacts = extras.iter().as_slice();
        let pages: Vec<RenderedPage> = if self.parallel && artifacts.len() > 1 {
            artifacts
                .par_iter()
                .map(|artifact| self.compose_one(artifact, theme))
                .collect()
        } else {
            artifacts
                .iter()
                .map(|artifact| self.compose_one(artifact, theme))
                .collect()
        };
        log::debug!("composed {} extras pages", pages.len());
        pages
    }

    /// Page for a single artifact.
    pub fn compose_one(&self, artifact: &ExtraArtifact, theme: &Theme) -> RenderedPage {
        let title = self.titles.title(&artifact.key);
        let frame = Frame::new(0.0, 0.0, self.page_size.width(), self.page_size.height());
        let mut body = Region::new(RegionRole::Body, frame)
            .with_padding(50.0)
            .continuing();

        let heading = vec![
            Node::text(
                title.clone(),
                TextStyle::new(18.0, theme.primary).bold().centered().space_after(8.0),
            ),
            Node::divider(theme.primary, 3.0),
            Node::spacer(14.0),
        ];

        let blocks = parse_text(&artifact.text);
        let groups = Grouper::new(self.short_paragraph_limit).group(&blocks);
        let styles = BlockStyles::new(
            TextStyle::new(11.0, theme.text).line_height(1.5).space_after(6.0),
            theme.primary,
        );
        body.extend(section(
            heading,
            compose_groups(&groups, &styles),
            self.short_paragraph_limit,
        ));

        RenderedPage::new(
            PageKind::Extra {
                key: artifact.key.clone(),
                title,
            },
            self.page_size,
            theme.font,
            theme.background,
        )
        .with_region(body)
    }
}

impl Default for ExtrasComposer {
    fn default() -> Self {
        Self::new(ExtrasTitles::default())
    }
}
