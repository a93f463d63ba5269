//! Caller-supplied input record.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Kind of document being generated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DocumentKind {
    /// Curriculum vitae
    #[default]
    Cv,
    /// Business plan
    BusinessPlan,
}

/// The unparsed record supplied by the caller for one rendering invocation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawDocumentInput {
    /// Document kind
    pub kind: DocumentKind,

    /// Caller identifier (order id), used for the suggested file name
    pub id: String,

    /// AI-generated free text
    pub response: Option<String>,

    /// Fallback CV fields
    pub cv: CvFields,

    /// Fallback business-plan fields
    pub business: BusinessFields,

    /// Photo reference (URL or path); never fetched
    pub photo: Option<String>,

    /// Loose style selection
    pub style: StyleConfig,

    /// Extra artifacts, key to raw text, in insertion order
    pub extras: Extras,
}

impl RawDocumentInput {
    /// Create an empty input of the given kind.
    pub fn new(kind: DocumentKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    /// Set the caller identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the free-text response.
    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.response = Some(response.into());
        self
    }

    /// Set the style selection.
    pub fn with_style(mut self, style: StyleConfig) -> Self {
        self.style = style;
        self
    }

    /// Add an extra artifact.
    pub fn with_extra(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.extras.insert(key, text);
        self
    }

    /// Set the photo reference.
    pub fn with_photo(mut self, photo: impl Into<String>) -> Self {
        self.photo = Some(photo.into());
        self
    }

    /// The free-text response if it holds anything besides whitespace.
    pub fn response_text(&self) -> Option<&str> {
        self.response.as_deref().filter(|r| !r.trim().is_empty())
    }
}

/// Caller-supplied CV fields, used when the response lacks a section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CvFields {
    /// Full name
    pub full_name: String,
    /// Email address
    pub email: String,
    /// Phone number
    pub phone: String,
    /// Industry, shown in the role line
    pub industry: String,
    /// Experience level, shown in the role line
    pub experience_level: String,
    /// Summary fallback text
    pub summary: String,
    /// Work experience fallback text
    pub work_experience: String,
    /// Education fallback text
    pub education: String,
    /// Skills fallback text
    pub skills: String,
    /// Spoken languages
    pub languages: Option<String>,
}

/// Caller-supplied business-plan fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BusinessFields {
    /// Business name
    pub business_name: String,
    /// Market niche
    pub niche: String,
    /// Budget description
    pub budget: String,
    /// Reviewer / owner name
    pub owner: String,
    /// Fallback narrative when the response is empty
    pub summary: String,
}

/// Style selection as loose names; resolved to closed enums with fallbacks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleConfig {
    /// Template name ("Classic", "Modern", "Creative", ...)
    pub template: String,
    /// Font name ("Helvetica", "Times-Roman", "Courier", "Default")
    pub font: String,
    /// Accent name ("Default", "Red", "Green", ...)
    pub accent: String,
    /// Review type ("manager" for CVs, "reviewed" for business plans)
    pub review_type: String,
}

impl StyleConfig {
    /// Create a style selection.
    pub fn new(template: &str, font: &str, accent: &str) -> Self {
        Self {
            template: template.to_string(),
            font: font.to_string(),
            accent: accent.to_string(),
            review_type: String::new(),
        }
    }

    /// Set the review type.
    pub fn with_review_type(mut self, review_type: &str) -> Self {
        self.review_type = review_type.to_string();
        self
    }
}

/// One extra artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraArtifact {
    /// Artifact key, e.g. `coverLetter`
    pub key: String,
    /// Raw artifact text
    pub text: String,
}

/// Extra artifacts keyed by name, preserving insertion order.
///
/// Serialized as a JSON object; keys keep the order they appear in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extras(Vec<ExtraArtifact>);

impl Extras {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Insert an artifact. Re-inserting a key replaces its text in place.
    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        let key = key.into();
        let text = text.into();
        match self.0.iter_mut().find(|a| a.key == key) {
            Some(existing) => existing.text = text,
            None => self.0.push(ExtraArtifact { key, text }),
        }
    }

    /// Look up an artifact's text.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.iter().find(|a| a.key == key).map(|a| a.text.as_str())
    }

    /// Iterate over artifacts in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, ExtraArtifact> {
        self.0.iter()
    }

    /// Number of artifacts.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no artifacts.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Extras {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut extras = Extras::new();
        for (k, v) in iter {
            extras.insert(k, v);
        }
        extras
    }
}

impl Serialize for Extras {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for artifact in &self.0 {
            map.serialize_entry(&artifact.key, &artifact.text)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Extras {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ExtrasVisitor;

        impl<'de> Visitor<'de> for ExtrasVisitor {
            type Value = Extras;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of artifact keys to text")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Extras, A::Error> {
                let mut extras = Extras::new();
                while let Some((key, value)) = access.next_entry::<String, Option<String>>()? {
                    extras.insert(key, value.unwrap_or_default());
                }
                Ok(extras)
            }
        }

        deserializer.deserialize_map(ExtrasVisitor)
    }
}
