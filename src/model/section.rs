//! Named semantic sections of a document's free text.

use super::DocumentKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Section names. CVs use the first four; business plans use `Narrative`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKey {
    /// Professional summary / profile
    Summary,
    /// Work experience
    Experience,
    /// Education
    Education,
    /// Skills
    Skills,
    /// Whole business-plan narrative
    Narrative,
}

impl SectionKey {
    /// Keys that make up a document of the given kind, in display priority order.
    pub fn for_kind(kind: DocumentKind) -> &'static [SectionKey] {
        match kind {
            DocumentKind::Cv => &[
                SectionKey::Summary,
                SectionKey::Experience,
                SectionKey::Education,
                SectionKey::Skills,
            ],
            DocumentKind::BusinessPlan => &[SectionKey::Narrative],
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            SectionKey::Summary => "Summary",
            SectionKey::Experience => "Experience",
            SectionKey::Education => "Education",
            SectionKey::Skills => "Skills",
            SectionKey::Narrative => "Narrative",
        }
    }
}

/// Fixed-arity mapping from section key to normalized body text.
///
/// Every key of the document kind is present, possibly empty. Looking up a
/// key outside the kind also yields an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSet {
    kind: DocumentKind,
    bodies: BTreeMap<SectionKey, String>,
}

impl SectionSet {
    /// Create a set with every key of `kind` present and empty.
    pub fn empty(kind: DocumentKind) -> Self {
        let bodies = SectionKey::for_kind(kind)
            .iter()
            .map(|k| (*k, String::new()))
            .collect();
        Self { kind, bodies }
    }

    /// Document kind this set was built for.
    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// Body text for a key, or `""`.
    pub fn get(&self, key: SectionKey) -> &str {
        self.bodies.get(&key).map(String::as_str).unwrap_or("")
    }

    /// Set the body of one of this kind's keys. Keys outside the kind are ignored.
    pub fn set(&mut self, key: SectionKey, body: impl Into<String>) {
        if let Some(slot) = self.bodies.get_mut(&key) {
            *slot = body.into();
        }
    }

    /// Keys present in this set, in display priority order.
    pub fn keys(&self) -> &'static [SectionKey] {
        SectionKey::for_kind(self.kind)
    }

    /// Iterate over `(key, body)` in display priority order.
    pub fn iter(&self) -> impl Iterator<Item = (SectionKey, &str)> + '_ {
        self.keys().iter().map(move |k| (*k, self.get(*k)))
    }

    /// Check if every section is empty.
    pub fn is_blank(&self) -> bool {
        self.bodies.values().all(|b| b.trim().is_empty())
    }

    /// Summary body (CV).
    pub fn summary(&self) -> &str {
        self.get(SectionKey::Summary)
    }

    /// Experience body (CV).
    pub fn experience(&self) -> &str {
        self.get(SectionKey::Experience)
    }

    /// Education body (CV).
    pub fn education(&self) -> &str {
        self.get(SectionKey::Education)
    }

    /// Skills body (CV).
    pub fn skills(&self) -> &str {
        self.get(SectionKey::Skills)
    }

    /// Narrative body (business plan).
    pub fn narrative(&self) -> &str {
        self.get(SectionKey::Narrative)
    }
}
