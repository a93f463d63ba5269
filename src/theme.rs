//! Theme resolver.
//!
//! Maps a template variant, accent and font to concrete colors. The lookup
//! is a pure function of its inputs and the [`PaletteTable`] the resolver
//! owns, so equal inputs always produce equal themes.

use crate::model::{Accent, FontFamily, Rgb, StyleConfig, TemplateVariant};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Colors derived from one accent choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccentColors {
    /// Strong accent color (titles, dots, bars)
    pub primary: Rgb,
    /// Light background derived from the primary
    pub light: Rgb,
    /// Sidebar gradient, top stop
    pub gradient_top: Rgb,
    /// Sidebar gradient, bottom stop
    pub gradient_bottom: Rgb,
}

impl AccentColors {
    const fn new(primary: u32, light: u32, gradient_top: u32, gradient_bottom: u32) -> Self {
        Self {
            primary: Rgb::hex(primary),
            light: Rgb::hex(light),
            gradient_top: Rgb::hex(gradient_top),
            gradient_bottom: Rgb::hex(gradient_bottom),
        }
    }
}

/// Immutable color tables used by a [`ThemeResolver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteTable {
    accents: HashMap<Accent, AccentColors>,
    /// Body text
    pub text: Rgb,
    /// Secondary text
    pub muted: Rgb,
    /// Page background
    pub background: Rgb,
    /// Rules and table borders
    pub border: Rgb,
    /// Modern page background
    pub modern_background: Rgb,
    /// Creative page background
    pub creative_background: Rgb,
    /// Creative card fill
    pub creative_card: Rgb,
    /// Creative rule color
    pub creative_line: Rgb,
    /// Manager-reviewed primary when no accent was chosen
    pub manager_primary: Rgb,
    /// Manager-reviewed light accent
    pub manager_accent: Rgb,
}

impl PaletteTable {
    /// Colors for an accent. Accents missing from the table use `Default`'s.
    pub fn accent(&self, accent: Accent) -> AccentColors {
        self.accents
            .get(&accent)
            .or_else(|| self.accents.get(&Accent::Default))
            .copied()
            .unwrap_or(AccentColors::new(0x2563EB, 0xDBEAFE, 0x0F172A, 0x1D4ED8))
    }

    /// Replace the colors of one accent.
    pub fn with_accent(mut self, accent: Accent, colors: AccentColors) -> Self {
        self.accents.insert(accent, colors);
        self
    }
}

impl Default for PaletteTable {
    fn default() -> Self {
        let accents = HashMap::from([
            (
                Accent::Default,
                AccentColors::new(0x2563EB, 0xDBEAFE, 0x0F172A, 0x1D4ED8),
            ),
            (
                Accent::Red,
                AccentColors::new(0xDC2626, 0xFEE2E2, 0x111827, 0x7F1D1D),
            ),
            (
                Accent::Green,
                AccentColors::new(0x059669, 0xD1FAE5, 0x022C22, 0x047857),
            ),
            (
                Accent::Purple,
                AccentColors::new(0x7C3AED, 0xEDE9FE, 0x111827, 0x4C1D95),
            ),
            (
                Accent::Yellow,
                AccentColors::new(0xF59E0B, 0xFEF3C7, 0x78350F, 0xF59E0B),
            ),
        ]);
        Self {
            accents,
            text: Rgb::hex(0x111827),
            muted: Rgb::hex(0x4B5563),
            background: Rgb::WHITE,
            border: Rgb::hex(0xE5E7EB),
            modern_background: Rgb::hex(0xF9FAFB),
            creative_background: Rgb::hex(0xFBF5EE),
            creative_card: Rgb::hex(0xF3E5D8),
            creative_line: Rgb::hex(0xD4BFAA),
            manager_primary: Rgb::hex(0x1E40AF),
            manager_accent: Rgb::hex(0xF3F4F6),
        }
    }
}

/// Resolved colors and font for one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Theme {
    /// Template the theme was resolved for
    pub variant: TemplateVariant,
    /// Strong accent color
    pub primary: Rgb,
    /// Light accent background
    pub accent: Rgb,
    /// Font family
    pub font: FontFamily,
    /// Body text color
    pub text: Rgb,
    /// Secondary text color
    pub muted: Rgb,
    /// Page background
    pub background: Rgb,
    /// Card and box fill
    pub surface: Rgb,
    /// Rules and borders
    pub border: Rgb,
    /// Sidebar gradient (top, bottom), for sidebar templates
    pub gradient: Option<(Rgb, Rgb)>,
}

/// Resolves style selections to themes.
#[derive(Debug, Clone, Default)]
pub struct ThemeResolver {
    palette: PaletteTable,
}

impl ThemeResolver {
    /// Create a resolver over a palette table.
    pub fn new(palette: PaletteTable) -> Self {
        Self { palette }
    }

    /// The palette table.
    pub fn palette(&self) -> &PaletteTable {
        &self.palette
    }

    /// Resolve a theme from closed enumeration values.
    pub fn resolve(&self, variant: TemplateVariant, accent: Accent, font: FontFamily) -> Theme {
        let p = &self.palette;
        let colors = p.accent(accent);
        let mut theme = Theme {
            variant,
            primary: colors.primary,
            accent: colors.light,
            font,
            text: p.text,
            muted: p.muted,
            background: p.background,
            surface: colors.light,
            border: p.border,
            gradient: None,
        };

        match variant {
            TemplateVariant::Modern => {
                theme.background = p.modern_background;
                theme.gradient = Some((colors.gradient_top, colors.gradient_bottom));
            }
            TemplateVariant::Creative => {
                theme.background = p.creative_background;
                theme.surface = p.creative_card;
                theme.border = p.creative_line;
            }
            TemplateVariant::ManagerReviewed => {
                if accent == Accent::Default {
                    theme.primary = p.manager_primary;
                }
                theme.accent = p.manager_accent;
                theme.surface = p.manager_accent;
            }
            TemplateVariant::Classic
            | TemplateVariant::BusinessAi
            | TemplateVariant::BusinessReviewed => {}
        }

        theme
    }

    /// Resolve a theme from loose style names, falling back on unknown names.
    pub fn resolve_style(&self, variant: TemplateVariant, style: &StyleConfig) -> Theme {
        self.resolve(
            variant,
            Accent::from_name(&style.accent),
            FontFamily::from_name(&style.font),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic() {
        let resolver = ThemeResolver::default();
        let a = resolver.resolve(TemplateVariant::Modern, Accent::Green, FontFamily::Courier);
        let b = resolver.resolve(TemplateVariant::Modern, Accent::Green, FontFamily::Courier);
        assert_eq!(a, b);

        let other = ThemeResolver::new(PaletteTable::default());
        assert_eq!(
            other.resolve(TemplateVariant::Modern, Accent::Green, FontFamily::Courier),
            a
        );
    }

    #[test]
    fn test_unknown_accent_uses_default_palette() {
        let resolver = ThemeResolver::default();
        let style = StyleConfig::new("Classic", "Papyrus", "Chartreuse");
        let theme = resolver.resolve_style(TemplateVariant::Classic, &style);
        assert_eq!(theme.primary, Rgb::hex(0x2563EB));
        assert_eq!(theme.accent, Rgb::hex(0xDBEAFE));
        assert_eq!(theme.font, FontFamily::Helvetica);
        assert_eq!(theme.background, Rgb::WHITE);
    }

    #[test]
    fn test_modern_gradient() {
        let theme =
            ThemeResolver::default().resolve(TemplateVariant::Modern, Accent::Red, FontFamily::Helvetica);
        assert_eq!(theme.gradient, Some((Rgb::hex(0x111827), Rgb::hex(0x7F1D1D))));
        assert_eq!(theme.background, Rgb::hex(0xF9FAFB));
    }

    #[test]
    fn test_classic_has_no_gradient() {
        let theme = ThemeResolver::default().resolve(
            TemplateVariant::Classic,
            Accent::Red,
            FontFamily::TimesRoman,
        );
        assert_eq!(theme.gradient, None);
        assert_eq!(theme.primary, Rgb::hex(0xDC2626));
    }

    #[test]
    fn test_manager_primary_override() {
        let resolver = ThemeResolver::default();
        let default = resolver.resolve(
            TemplateVariant::ManagerReviewed,
            Accent::Default,
            FontFamily::Helvetica,
        );
        assert_eq!(default.primary, Rgb::hex(0x1E40AF));
        assert_eq!(default.accent, Rgb::hex(0xF3F4F6));

        let purple = resolver.resolve(
            TemplateVariant::ManagerReviewed,
            Accent::Purple,
            FontFamily::Helvetica,
        );
        assert_eq!(purple.primary, Rgb::hex(0x7C3AED));
    }

    #[test]
    fn test_creative_colors() {
        let theme = ThemeResolver::default().resolve(
            TemplateVariant::Creative,
            Accent::Default,
            FontFamily::Helvetica,
        );
        assert_eq!(theme.background, Rgb::hex(0xFBF5EE));
        assert_eq!(theme.surface, Rgb::hex(0xF3E5D8));
        assert_eq!(theme.border, Rgb::hex(0xD4BFAA));
    }

    #[test]
    fn test_custom_palette() {
        let palette = PaletteTable::default().with_accent(
            Accent::Red,
            AccentColors {
                primary: Rgb::hex(0x990000),
                light: Rgb::hex(0xFFEEEE),
                gradient_top: Rgb::hex(0x000000),
                gradient_bottom: Rgb::hex(0x990000),
            },
        );
        let theme =
            ThemeResolver::new(palette).resolve(TemplateVariant::Classic, Accent::Red, FontFamily::Courier);
        assert_eq!(theme.primary, Rgb::hex(0x990000));
    }
}
