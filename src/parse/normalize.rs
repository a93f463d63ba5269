//! Text normalizer.
//!
//! Cleans AI-generated text before structural parsing. Line structure is
//! kept, along with the `#`, `-`, `1.` and `**` markers the block parser and
//! inline formatter rely on. Everything else that only adds noise is removed:
//! invisible characters, decorative glyphs, code fences, dash runs and
//! placeholder lines the generator tends to leave behind.
//!
//! Normalizing is idempotent.

use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

/// Glyphs dropped wherever they appear.
const DECORATIVE: &[char] = &[
    '™', '©', '®', '✓', '✔', '✗', '✘', '·', '…', '▶', '◼', '◾', '◽', '◈', '★', '☆', '➤',
];

/// Bullet glyphs: a list marker at the start of a line, noise elsewhere.
const BULLETS: &[char] = &['•', '●', '○', '▪', '▫', '◆', '◇', '►', '■', '□', '▸'];

/// Line-preserving cleanup pipeline.
pub struct Normalizer {
    dash_run: Regex,
    horizontal_space: Regex,
    placeholder: Regex,
}

impl Normalizer {
    /// Create a normalizer.
    pub fn new() -> Self {
        Self {
            dash_run: Regex::new(r"-{2,}").unwrap(),
            horizontal_space: Regex::new(r"[^\S\n]+").unwrap(),
            placeholder: Regex::new(
                r"(?i)^(?:-+|\*{1,2}|(?:expertise|languages?|skills):?|(?:\*\*)?references available (?:up)?on request\.?(?:\*\*)?)$",
            )
            .unwrap(),
        }
    }

    /// Normalize a text. Empty input yields an empty string.
    ///
    /// Removing a character or line can expose a new placeholder, so passes
    /// repeat until the text is stable. No pass grows the text after the first.
    pub fn normalize(&self, text: &str) -> String {
        let mut current = self.pass(text);
        loop {
            let next = self.pass(&current);
            if next == current {
                return current;
            }
            current = next;
        }
    }

    fn pass(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return String::new();
        }

        // Stage 1: characters
        let text = strip_glyphs(text);
        let text: String = text.nfkc().collect();
        let text = strip_glyphs(&text);

        // Stage 2: lines
        let mut lines: Vec<String> = Vec::new();
        for line in text.split('\n') {
            let line = self.dash_run.replace_all(line, " ");
            let line = self.horizontal_space.replace_all(&line, " ");
            let line = line.trim();
            if line.starts_with("```") || self.placeholder.is_match(line) {
                continue;
            }
            lines.push(line.to_string());
        }

        // Stage 3: blank line runs
        let mut out: Vec<&str> = Vec::with_capacity(lines.len());
        for line in &lines {
            if line.is_empty() && out.last().map_or(true, |l| l.is_empty()) {
                continue;
            }
            out.push(line);
        }
        while out.last().is_some_and(|l| l.is_empty()) {
            out.pop();
        }

        out.join("\n")
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize a text with the shared normalizer.
pub fn normalize(text: &str) -> String {
    static NORMALIZER: OnceLock<Normalizer> = OnceLock::new();
    NORMALIZER.get_or_init(Normalizer::new).normalize(text)
}

/// Normalize an optional text; `None` yields an empty string.
pub fn normalize_opt(text: Option<&str>) -> String {
    text.map(normalize).unwrap_or_default()
}

/// Check if a character is an invisible format character.
fn is_format_char(c: char) -> bool {
    matches!(
        c as u32,
        0x00AD | 0x200B..=0x200F | 0x202A..=0x202E | 0x2060..=0x206F | 0xFEFF
    )
}

/// Character-level pass: line endings, tabs, invisible and decorative
/// characters, dashes and bullets.
fn strip_glyphs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_line_start = true;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() != Some(&'\n') {
                    out.push('\n');
                    at_line_start = true;
                }
                continue;
            }
            '\n' => {
                out.push('\n');
                at_line_start = true;
                continue;
            }
            '\t' => {
                out.push(' ');
                continue;
            }
            '–' | '—' | '‒' | '―' | '−' => out.push('-'),
            c if BULLETS.contains(&c) => {
                if at_line_start && chars.peek().is_some_and(|n| n.is_whitespace()) {
                    out.push('-');
                }
            }
            c if DECORATIVE.contains(&c) || is_format_char(c) || c.is_control() => {}
            c => out.push(c),
        }
        if !c.is_whitespace() {
            at_line_start = false;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("  \n\t\n "), "");
        assert_eq!(normalize_opt(None), "");
    }

    #[test]
    fn test_references_placeholder_removed() {
        assert_eq!(normalize("References available upon request."), "");
        assert_eq!(normalize("**references available on request**"), "");
        assert_eq!(
            normalize("Built APIs.\nReferences available upon request"),
            "Built APIs."
        );
    }

    #[test]
    fn test_placeholder_lines_removed() {
        let input = "SKILLS\n---\n**\nRust, Go\n—\nExpertise:";
        assert_eq!(normalize(input), "Rust, Go");
    }

    #[test]
    fn test_invisible_characters_removed() {
        let input = "Bu\u{200B}ilt\u{FEFF} A\u{00AD}PIs\u{0007}";
        assert_eq!(normalize(input), "Built APIs");
    }

    #[test]
    fn test_whitespace_collapsed_per_line() {
        let input = "  Led   the\tteam  \r\n\r\n\r\n\r\nShipped  v1 ";
        assert_eq!(normalize(input), "Led the team\n\nShipped v1");
    }

    #[test]
    fn test_markers_preserved() {
        let input = "## Experience\n- **Led** team\n1. First";
        assert_eq!(normalize(input), input);
    }

    #[test]
    fn test_bullets_become_list_markers() {
        assert_eq!(normalize("• Rust\n● Go"), "- Rust\n- Go");
        assert_eq!(normalize("Rust • Go"), "Rust Go");
    }

    #[test]
    fn test_fences_and_dash_runs() {
        let input = "```markdown\nSummary -- here\n```";
        assert_eq!(normalize(input), "Summary here");
    }

    #[test]
    fn test_decorative_glyphs() {
        assert_eq!(normalize("Acme™ ✓ verified…"), "Acme verified");
        assert_eq!(normalize("2019–2021"), "2019-2021");
    }

    #[test]
    fn test_compatibility_forms() {
        assert_eq!(normalize("ﬁle\u{00A0}name"), "file name");
    }

    #[test]
    fn test_fence_exposed_by_dash_run() {
        assert_eq!(normalize("--```rust\nfn main() {}"), "fn main() {}");
        assert_eq!(normalize(":\r\u{2013}\u{2013}```Z:`\u{2022}"), ":");
        assert_eq!(normalize("\u{2022}--\u{25CF}`\u{200B}\u{2022}``"), "");
    }

    #[test]
    fn test_placeholder_exposed_by_glyph_removal() {
        let once = normalize("\u{2122}Skills\u{2122}:\nRust");
        assert_eq!(once, "Rust");
        assert_eq!(normalize(&once), once);
    }

    /// Fragments the generator mixes: markers, glyphs, placeholder words and
    /// line breaks.
    const FRAGMENTS: &[&str] = &[
        "a", "Z", " ", "  ", "\n", "\r", "\t", ":", "-", "--", "*", "**", "#", "`", "```",
        "\u{2022}", "\u{25CF}", "\u{2013}", "\u{2014}", "\u{200B}", "\u{FEFF}", "\u{2122}",
        "\u{2026}", "\u{FB01}", "\u{00A0}", "1.", "Skills", "EXPERTISE",
        "References available upon request.",
    ];

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(4000))]

        #[test]
        fn prop_normalize_is_idempotent(
            parts in prop::collection::vec(prop::sample::select(FRAGMENTS), 0..24)
        ) {
            let text = parts.concat();
            let once = normalize(&text);
            prop_assert_eq!(normalize(&once), once.clone(), "input {:?}", text);
        }

        #[test]
        fn prop_normalize_has_no_blank_edges(
            parts in prop::collection::vec(prop::sample::select(FRAGMENTS), 0..24)
        ) {
            let out = normalize(&parts.concat());
            prop_assert_eq!(out.trim(), out.as_str());
            prop_assert!(!out.contains("\n\n\n"));
        }
    }
}
