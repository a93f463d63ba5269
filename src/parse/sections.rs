//! Section extractor.
//!
//! Splits a free-text response into named sections by scanning for header
//! lines. A line whose whole text, once decoration is stripped, equals a
//! keyword phrase is always a header. A short line that looks like a heading
//! (all caps, `#` or `**` prefix, or a trailing colon) is a header when it
//! contains a keyword phrase, so "SKILLS & TOOLS" opens the skills section
//! while prose that mentions a keyword does not.

use super::normalize::normalize;
use crate::model::{DocumentKind, RawDocumentInput, SectionKey, SectionSet};

/// Keyword phrases per section, checked in order.
#[derive(Debug, Clone)]
pub struct SectionKeywords {
    entries: Vec<(SectionKey, Vec<String>)>,
}

impl SectionKeywords {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add phrases for a section. Sections are tried in insertion order.
    pub fn with_section(mut self, key: SectionKey, phrases: &[&str]) -> Self {
        let phrases = phrases.iter().map(|p| p.to_lowercase()).collect();
        self.entries.push((key, phrases));
        self
    }

    /// Section whose phrase matches the line, if the line is a header.
    ///
    /// An exact match wins over a contained one; otherwise sections are
    /// tried in table order.
    pub fn match_header(&self, line: &str) -> Option<SectionKey> {
        let title = header_title(line);
        if title.is_empty() {
            return None;
        }
        if let Some((key, _)) = self
            .entries
            .iter()
            .find(|(_, phrases)| phrases.iter().any(|p| *p == title))
        {
            return Some(*key);
        }
        if !is_heading_shaped(line, &title) {
            return None;
        }

        let words: Vec<&str> = title
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();
        self.entries
            .iter()
            .find(|(_, phrases)| phrases.iter().any(|p| contains_phrase(&words, p)))
            .map(|(key, _)| *key)
    }
}

impl Default for SectionKeywords {
    fn default() -> Self {
        Self::new()
            .with_section(
                SectionKey::Summary,
                &["summary", "professional summary", "profile"],
            )
            .with_section(
                SectionKey::Experience,
                &[
                    "experience",
                    "work experience",
                    "professional experience",
                    "employment history",
                ],
            )
            .with_section(SectionKey::Education, &["education"])
            .with_section(
                SectionKey::Skills,
                &["skills", "key skills", "core skills", "technical skills"],
            )
    }
}

/// Longest line, in words, that can open a section by containing a phrase.
const MAX_HEADER_WORDS: usize = 6;

/// Lower-cased line text without markdown decoration or a trailing colon.
fn header_title(line: &str) -> String {
    let stripped =
        line.trim_matches(|c: char| c == '#' || c == '*' || c == '_' || c == ':' || c.is_whitespace());
    stripped
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn is_heading_shaped(line: &str, title: &str) -> bool {
    if title.split_whitespace().count() > MAX_HEADER_WORDS {
        return false;
    }
    let line = line.trim();
    let decorated = line.starts_with('#') || line.starts_with("**") || line.ends_with(':');
    let upper_case =
        line.chars().any(char::is_alphabetic) && !line.chars().any(char::is_lowercase);
    decorated || upper_case
}

/// Check if the phrase's words appear consecutively in `words`.
fn contains_phrase(words: &[&str], phrase: &str) -> bool {
    let phrase: Vec<&str> = phrase.split_whitespace().collect();
    !phrase.is_empty() && words.windows(phrase.len()).any(|w| w == phrase.as_slice())
}

/// Splits responses into sections.
#[derive(Debug, Clone, Default)]
pub struct SectionExtractor {
    keywords: SectionKeywords,
}

impl SectionExtractor {
    /// Create an extractor with a custom keyword table.
    pub fn new(keywords: SectionKeywords) -> Self {
        Self { keywords }
    }

    /// Build the section set for an input. Never fails; missing text yields
    /// empty sections.
    pub fn extract(&self, input: &RawDocumentInput) -> SectionSet {
        let sections = match input.kind {
            DocumentKind::Cv => self.extract_cv(input),
            DocumentKind::BusinessPlan => extract_business(input),
        };
        log::debug!(
            "extracted {} sections ({} non-empty)",
            sections.keys().len(),
            sections.iter().filter(|(_, body)| !body.is_empty()).count()
        );
        sections
    }

    fn extract_cv(&self, input: &RawDocumentInput) -> SectionSet {
        let mut sections = SectionSet::empty(DocumentKind::Cv);
        let mut buffers: Vec<(SectionKey, Vec<&str>)> = sections
            .keys()
            .iter()
            .map(|key| (*key, Vec::new()))
            .collect();

        if let Some(response) = input.response_text() {
            let mut current: Option<usize> = None;
            for line in response.lines() {
                if let Some(key) = self.keywords.match_header(line) {
                    current = buffers.iter().position(|(k, _)| *k == key);
                    continue;
                }
                if let Some(idx) = current {
                    buffers[idx].1.push(line);
                }
            }
        }

        for (key, lines) in buffers {
            let body = normalize(&lines.join("\n"));
            let body = if body.is_empty() {
                normalize(cv_fallback(input, key))
            } else {
                body
            };
            sections.set(key, body);
        }

        sections
    }
}

fn extract_business(input: &RawDocumentInput) -> SectionSet {
    let mut sections = SectionSet::empty(DocumentKind::BusinessPlan);
    let narrative = input.response_text().map(normalize).unwrap_or_default();
    let narrative = if narrative.is_empty() {
        normalize(&input.business.summary)
    } else {
        narrative
    };
    sections.set(SectionKey::Narrative, narrative);
    sections
}

fn cv_fallback(input: &RawDocumentInput, key: SectionKey) -> &str {
    match key {
        SectionKey::Summary => &input.cv.summary,
        SectionKey::Experience => &input.cv.work_experience,
        SectionKey::Education => &input.cv.education,
        SectionKey::Skills => &input.cv.skills,
        SectionKey::Narrative => "",
    }
}

/// Extract sections with the built-in keyword table.
pub fn extract_sections(input: &RawDocumentInput) -> SectionSet {
    SectionExtractor::default().extract(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cv(response: &str) -> RawDocumentInput {
        RawDocumentInput::new(DocumentKind::Cv).with_response(response)
    }

    #[test]
    fn test_summary_and_skills() {
        let sections = extract_sections(&cv("SUMMARY\nBuilt APIs.\n\nSKILLS\nGo, Rust, SQL"));
        assert_eq!(sections.summary(), "Built APIs.");
        assert_eq!(sections.skills(), "Go, Rust, SQL");
        assert_eq!(sections.experience(), "");
        assert_eq!(sections.education(), "");
    }

    #[test]
    fn test_lines_before_first_header_discarded() {
        let sections = extract_sections(&cv("Here is your CV:\n\n## Education\nMIT, 2010"));
        assert_eq!(sections.education(), "MIT, 2010");
        assert_eq!(sections.summary(), "");
    }

    #[test]
    fn test_decorated_headers() {
        let response = "**Professional Summary:**\nCurious engineer.\n### Work Experience\n- Acme";
        let sections = extract_sections(&cv(response));
        assert_eq!(sections.summary(), "Curious engineer.");
        assert_eq!(sections.experience(), "- Acme");
    }

    #[test]
    fn test_mentions_are_not_headers() {
        let response = "Summary\nStrong skills in Rust and education technology.";
        let sections = extract_sections(&cv(response));
        assert_eq!(
            sections.summary(),
            "Strong skills in Rust and education technology."
        );
        assert_eq!(sections.skills(), "");
    }

    #[test]
    fn test_compound_headers() {
        let response = "PROFESSIONAL SUMMARY\nBuilt APIs.\n\nWORK EXPERIENCE & PROJECTS\n- Shipped v1\n\nEDUCATION & CERTIFICATIONS\nBSc CS\n\nSKILLS & TOOLS\nGo, Rust";
        let sections = extract_sections(&cv(response));
        assert_eq!(sections.summary(), "Built APIs.");
        assert_eq!(sections.experience(), "- Shipped v1");
        assert_eq!(sections.education(), "BSc CS");
        assert_eq!(sections.skills(), "Go, Rust");
    }

    #[test]
    fn test_heading_shaped_lines() {
        let keywords = SectionKeywords::default();
        assert_eq!(
            keywords.match_header("## Skills & Tools"),
            Some(SectionKey::Skills)
        );
        assert_eq!(
            keywords.match_header("**Education and Training**"),
            Some(SectionKey::Education)
        );
        assert_eq!(
            keywords.match_header("Relevant Experience:"),
            Some(SectionKey::Experience)
        );
        assert_eq!(
            keywords.match_header("PROFILE & SKILLS"),
            Some(SectionKey::Summary)
        );
        assert_eq!(keywords.match_header("I have experience leading teams"), None);
        assert_eq!(
            keywords.match_header("## Led the skills program for the whole education district"),
            None
        );
        assert_eq!(keywords.match_header("## SKILLSET"), None);
    }

    #[test]
    fn test_fallback_fields() {
        let mut input = cv("SUMMARY\nFrom response.");
        input.cv.skills = "  Rust ,  Go ".into();
        input.cv.summary = "From field.".into();
        let sections = extract_sections(&input);
        assert_eq!(sections.summary(), "From response.");
        assert_eq!(sections.skills(), "Rust , Go");
    }

    #[test]
    fn test_no_response_uses_fields() {
        let mut input = RawDocumentInput::new(DocumentKind::Cv);
        input.cv.education = "References available upon request.".into();
        input.cv.work_experience = "Acme Corp".into();
        let sections = extract_sections(&input);
        assert_eq!(sections.experience(), "Acme Corp");
        assert_eq!(sections.education(), "");
    }

    #[test]
    fn test_business_narrative() {
        let input = RawDocumentInput::new(DocumentKind::BusinessPlan)
            .with_response("## Market\nCoffee   in\u{200B} Kyiv");
        let sections = extract_sections(&input);
        assert_eq!(sections.narrative(), "## Market\nCoffee in Kyiv");
        assert_eq!(sections.keys(), &[SectionKey::Narrative]);

        let mut input = RawDocumentInput::new(DocumentKind::BusinessPlan);
        input.business.summary = "Fallback plan".into();
        assert_eq!(extract_sections(&input).narrative(), "Fallback plan");
    }

    #[test]
    fn test_custom_keywords() {
        let keywords = SectionKeywords::new().with_section(SectionKey::Skills, &["Toolbox"]);
        let extractor = SectionExtractor::new(keywords);
        let sections = extractor.extract(&cv("TOOLBOX\nHammer"));
        assert_eq!(sections.skills(), "Hammer");
    }
}
