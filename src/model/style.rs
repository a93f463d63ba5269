//! Closed style enumerations and colors.

use super::{DocumentKind, StyleConfig};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// White.
    pub const WHITE: Rgb = Rgb::hex(0xFFFFFF);

    /// Create a color from a `0xRRGGBB` literal.
    pub const fn hex(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
        }
    }

    /// Parse `#RRGGBB` or `RRGGBB`.
    pub fn parse(s: &str) -> Option<Self> {
        let digits = s.trim().trim_start_matches('#');
        if digits.len() != 6 {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Self::hex)
    }

    /// Channels as fractions in `0.0..=1.0`.
    pub fn components(self) -> (f32, f32, f32) {
        (
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }

    /// Linear interpolation towards `other`; `t` is clamped to `0.0..=1.0`.
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgb::parse(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid color: {s}")))
    }
}

/// Font families available to every template (PDF base-14).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontFamily {
    /// Helvetica (fallback)
    #[default]
    Helvetica,
    /// Times-Roman
    TimesRoman,
    /// Courier
    Courier,
}

impl FontFamily {
    /// All families.
    pub const ALL: [FontFamily; 3] = [
        FontFamily::Helvetica,
        FontFamily::TimesRoman,
        FontFamily::Courier,
    ];

    /// Resolve a font name. `Default`, empty and unknown names map to Helvetica.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "times-roman" | "times roman" | "times" | "timesroman" => FontFamily::TimesRoman,
            "courier" => FontFamily::Courier,
            "helvetica" | "default" | "" => FontFamily::Helvetica,
            other => {
                log::warn!("unknown font '{}', using Helvetica", other);
                FontFamily::Helvetica
            }
        }
    }

    /// PDF base font name for regular weight.
    pub fn regular(self) -> &'static str {
        match self {
            FontFamily::Helvetica => "Helvetica",
            FontFamily::TimesRoman => "Times-Roman",
            FontFamily::Courier => "Courier",
        }
    }

    /// PDF base font name for bold weight.
    pub fn bold(self) -> &'static str {
        match self {
            FontFamily::Helvetica => "Helvetica-Bold",
            FontFamily::TimesRoman => "Times-Bold",
            FontFamily::Courier => "Courier-Bold",
        }
    }
}

/// Accent choices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Accent {
    /// Default blue
    #[default]
    Default,
    /// Red
    Red,
    /// Green
    Green,
    /// Purple
    Purple,
    /// Yellow
    Yellow,
}

impl Accent {
    /// All accents.
    pub const ALL: [Accent; 5] = [
        Accent::Default,
        Accent::Red,
        Accent::Green,
        Accent::Purple,
        Accent::Yellow,
    ];

    /// Resolve an accent name. Unknown names map to `Default`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "red" => Accent::Red,
            "green" => Accent::Green,
            "purple" => Accent::Purple,
            "yellow" => Accent::Yellow,
            "default" | "blue" | "" => Accent::Default,
            other => {
                log::warn!("unknown accent '{}', using default palette", other);
                Accent::Default
            }
        }
    }
}

/// The six template variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateVariant {
    /// Single column with banded, centred section titles
    Classic,
    /// Gradient sidebar plus main column
    Modern,
    /// Header band with avatar, then card and timeline columns
    Creative,
    /// Solid sidebar CV with a manager's evaluation box
    ManagerReviewed,
    /// AI business plan with summary card and footer
    BusinessAi,
    /// Reviewed business plan with a financial projection table
    BusinessReviewed,
}

impl TemplateVariant {
    /// All variants.
    pub const ALL: [TemplateVariant; 6] = [
        TemplateVariant::Classic,
        TemplateVariant::Modern,
        TemplateVariant::Creative,
        TemplateVariant::ManagerReviewed,
        TemplateVariant::BusinessAi,
        TemplateVariant::BusinessReviewed,
    ];

    /// Document kind this variant renders.
    pub fn kind(self) -> DocumentKind {
        match self {
            TemplateVariant::BusinessAi | TemplateVariant::BusinessReviewed => {
                DocumentKind::BusinessPlan
            }
            _ => DocumentKind::Cv,
        }
    }

    /// Default variant for a document kind.
    pub fn default_for(kind: DocumentKind) -> Self {
        match kind {
            DocumentKind::Cv => TemplateVariant::Classic,
            DocumentKind::BusinessPlan => TemplateVariant::BusinessAi,
        }
    }

    /// Resolve a template name, without regard to document kind.
    pub fn from_name(name: &str) -> Option<Self> {
        let key: String = name
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match key.as_str() {
            "classic" => Some(TemplateVariant::Classic),
            "modern" => Some(TemplateVariant::Modern),
            "creative" => Some(TemplateVariant::Creative),
            "manager" | "managerreviewed" => Some(TemplateVariant::ManagerReviewed),
            "ai" | "businessai" => Some(TemplateVariant::BusinessAi),
            "reviewed" | "businessreviewed" => Some(TemplateVariant::BusinessReviewed),
            _ => None,
        }
    }

    /// Pick the variant for a document kind and style selection.
    ///
    /// A CV with review type `manager` always uses the manager-reviewed
    /// template; a business plan with review type `reviewed` uses the
    /// reviewed business template. Unknown names and names belonging to the
    /// other document kind fall back to the kind's default.
    pub fn select(kind: DocumentKind, style: &StyleConfig) -> Self {
        let review = style.review_type.trim().to_ascii_lowercase();
        match kind {
            DocumentKind::Cv if review == "manager" => return TemplateVariant::ManagerReviewed,
            DocumentKind::BusinessPlan if review == "reviewed" => {
                return TemplateVariant::BusinessReviewed
            }
            _ => {}
        }

        match Self::from_name(&style.template) {
            Some(variant) if variant.kind() == kind => variant,
            Some(variant) => {
                log::warn!(
                    "template {:?} does not render {:?} documents, using default",
                    variant,
                    kind
                );
                Self::default_for(kind)
            }
            None => {
                if !style.template.trim().is_empty() {
                    log::warn!("unknown template '{}', using default", style.template);
                }
                Self::default_for(kind)
            }
        }
    }

    /// Lower-case slug used in file names.
    pub fn slug(self) -> &'static str {
        match self {
            TemplateVariant::Classic => "classic",
            TemplateVariant::Modern => "modern",
            TemplateVariant::Creative => "creative",
            TemplateVariant::ManagerReviewed => "manager",
            TemplateVariant::BusinessAi => "ai",
            TemplateVariant::BusinessReviewed => "reviewed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_hex_roundtrip() {
        let c = Rgb::hex(0x2563EB);
        assert_eq!(c.to_string(), "#2563EB");
        assert_eq!(Rgb::parse("#2563eb"), Some(c));
        assert_eq!(Rgb::parse("nope"), None);
    }

    #[test]
    fn test_rgb_lerp_endpoints() {
        let a = Rgb::hex(0x000000);
        let b = Rgb::hex(0xFFFFFF);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 2.0), b);
    }

    #[test]
    fn test_font_fallback() {
        assert_eq!(FontFamily::from_name("Times-Roman"), FontFamily::TimesRoman);
        assert_eq!(FontFamily::from_name("COURIER"), FontFamily::Courier);
        assert_eq!(FontFamily::from_name("Default"), FontFamily::Helvetica);
        assert_eq!(FontFamily::from_name("Comic Sans"), FontFamily::Helvetica);
    }

    #[test]
    fn test_accent_fallback() {
        assert_eq!(Accent::from_name("Purple"), Accent::Purple);
        assert_eq!(Accent::from_name("Chartreuse"), Accent::Default);
    }

    #[test]
    fn test_select_manager_review_wins() {
        let style = StyleConfig::new("Modern", "", "").with_review_type("manager");
        assert_eq!(
            TemplateVariant::select(DocumentKind::Cv, &style),
            TemplateVariant::ManagerReviewed
        );
    }

    #[test]
    fn test_select_mismatched_kind_falls_back() {
        let style = StyleConfig::new("Creative", "", "");
        assert_eq!(
            TemplateVariant::select(DocumentKind::BusinessPlan, &style),
            TemplateVariant::BusinessAi
        );
        let style = StyleConfig::new("businessReviewed", "", "");
        assert_eq!(
            TemplateVariant::select(DocumentKind::Cv, &style),
            TemplateVariant::Classic
        );
    }

    #[test]
    fn test_select_business_reviewed() {
        let style = StyleConfig::default().with_review_type("reviewed");
        assert_eq!(
            TemplateVariant::select(DocumentKind::BusinessPlan, &style),
            TemplateVariant::BusinessReviewed
        );
    }
}
