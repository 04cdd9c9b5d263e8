//! Section data model and its wire format.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Number of content characters shown in a list preview.
pub const PREVIEW_CHARS: usize = 100;

/// Server-assigned section identifier.
///
/// Held and re-sent as text. The service may emit ids as strings or integers;
/// both deserialize into the same textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SectionId(String);

impl SectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SectionId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for SectionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => Self(text),
            RawId::Signed(n) => Self(n.to_string()),
            RawId::Unsigned(n) => Self(n.to_string()),
        })
    }
}

/// A titled block of content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    #[serde(alias = "ID", alias = "Id")]
    pub id: SectionId,
    #[serde(alias = "Title")]
    pub title: String,
    #[serde(alias = "Content")]
    pub content: String,
}

impl Section {
    pub fn new(id: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: SectionId::new(id),
            title: title.into(),
            content: content.into(),
        }
    }

    /// List preview: the first [`PREVIEW_CHARS`] characters followed by an ellipsis.
    pub fn preview(&self) -> String {
        let head: String = self.content.chars().take(PREVIEW_CHARS).collect();
        format!("{head}...")
    }
}

/// Body of `POST /api/sections`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct NewSection<'a> {
    pub title: &'a str,
    pub content: &'a str,
}

/// Body of `POST /api/sections/reorder`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ReorderRequest<'a> {
    pub order: &'a [SectionId],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_lowercase_fields() {
        let json = r#"{"id":"a1","title":"Intro","content":"Hello"}"#;
        let section: Section = serde_json::from_str(json).unwrap();
        assert_eq!(section, Section::new("a1", "Intro", "Hello"));
    }

    #[test]
    fn test_deserializes_capitalized_fields_and_ignores_extras() {
        let json = r#"{"ID":"b2","Title":"Body","Content":"Text","Order":3,"FilePath":"sections/b2.md"}"#;
        let section: Section = serde_json::from_str(json).unwrap();
        assert_eq!(section.id.as_str(), "b2");
        assert_eq!(section.title, "Body");
        assert_eq!(section.content, "Text");
    }

    #[test]
    fn test_numeric_id_becomes_text() {
        let json = r#"{"id":42,"title":"T","content":"C"}"#;
        let section: Section = serde_json::from_str(json).unwrap();
        assert_eq!(section.id, SectionId::from("42"));
    }

    #[test]
    fn test_reorder_request_serializes_ids_as_text() {
        let order = vec![SectionId::from("3"), SectionId::from("1")];
        let body = serde_json::to_string(&ReorderRequest { order: &order }).unwrap();
        assert_eq!(body, r#"{"order":["3","1"]}"#);
    }

    #[test]
    fn test_preview_truncates_by_characters() {
        let content = "é".repeat(150);
        let section = Section::new("1", "T", content);
        let preview = section.preview();
        assert_eq!(preview.chars().count(), PREVIEW_CHARS + 3);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn test_preview_of_short_content_keeps_ellipsis() {
        let section = Section::new("1", "T", "short");
        assert_eq!(section.preview(), "short...");
    }
}
