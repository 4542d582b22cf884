//! Data models for scraped articles and the notes attached to them.
//!
//! This module defines the two document shapes the service stores:
//! - [`Article`]: one scraped listing item plus its curation state
//! - [`Note`]: a free-text annotation created by a reader
//!
//! Articles hold their notes by id only. An [`Article`] is generic over the
//! element type of its `notes` field so the same shape serves both the stored
//! form (`Article<String>`, bare ids) and the expanded form returned by list
//! queries ([`PopulatedArticle`], full notes inlined).
//!
//! Ids go over the wire as `_id` to stay compatible with existing clients of
//! the headline API.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{AppError, Result};

/// A scraped news listing item.
///
/// `title`, `link` and `summary` are whatever the scraper found; none of them
/// is required. `notes` is an ordered list of note references with no
/// uniqueness or existence guarantee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article<N = String> {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: Option<String>,
    pub link: Option<String>,
    pub summary: Option<String>,
    #[serde(default = "Vec::new")]
    pub notes: Vec<N>,
    #[serde(default)]
    pub saved: bool,
}

/// An [`Article`] with its note references replaced by the notes themselves.
pub type PopulatedArticle = Article<Note>;

/// Fields extracted from one listing card, ready to be stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewArticle {
    pub title: Option<String>,
    pub link: Option<String>,
    pub summary: Option<String>,
}

/// A reader's annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub body: Option<String>,
}

/// A note payload as submitted by a client, before validation.
///
/// Numbers and booleans are accepted for either field and stored as their
/// string form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoteDraft {
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub body: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Bool(bool),
}

fn scalar_as_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Scalar>::deserialize(deserializer)?;
    Ok(value.map(|scalar| match scalar {
        Scalar::Text(text) => text,
        Scalar::Integer(n) => n.to_string(),
        Scalar::Unsigned(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
        Scalar::Bool(b) => b.to_string(),
    }))
}

/// A validated note payload. Only [`NoteDraft::validate`] builds one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    title: String,
    body: Option<String>,
}

impl NoteDraft {
    /// Check the draft against the note schema: `title` is required and must
    /// not be blank, `body` is free-form.
    pub fn validate(self) -> Result<NewNote> {
        match self.title {
            Some(title) if !title.trim().is_empty() => Ok(NewNote {
                title,
                body: self.body,
            }),
            _ => Err(AppError::Validation("note `title` is required".to_string())),
        }
    }
}

impl NewNote {
    pub fn into_parts(self) -> (String, Option<String>) {
        (self.title, self.body)
    }
}

/// Selection applied to article list queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArticleFilter {
    pub saved: Option<bool>,
}

impl ArticleFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn saved() -> Self {
        Self { saved: Some(true) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_draft_requires_title() {
        let err = NoteDraft {
            title: None,
            body: Some("body".to_string()),
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_note_draft_rejects_blank_title() {
        let result = NoteDraft {
            title: Some("   ".to_string()),
            body: None,
        }
        .validate();
        assert!(result.is_err());
    }

    #[test]
    fn test_note_draft_body_is_optional() {
        let note = NoteDraft {
            title: Some("Follow up".to_string()),
            body: None,
        }
        .validate()
        .unwrap();
        assert_eq!(note.into_parts(), ("Follow up".to_string(), None));
    }

    #[test]
    fn test_note_draft_coerces_scalars_to_strings() {
        let draft: NoteDraft = serde_json::from_str(r#"{"title": 5, "body": true}"#).unwrap();
        assert_eq!(draft.title.as_deref(), Some("5"));
        assert_eq!(draft.body.as_deref(), Some("true"));

        let draft: NoteDraft = serde_json::from_str(r#"{"title": 2.5, "body": null}"#).unwrap();
        assert_eq!(draft.title.as_deref(), Some("2.5"));
        assert!(draft.body.is_none());
    }

    #[test]
    fn test_note_draft_rejects_structured_title() {
        let result: std::result::Result<NoteDraft, _> =
            serde_json::from_str(r#"{"title": {"nested": 1}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_note_draft_deserializes_without_fields() {
        let draft: NoteDraft = serde_json::from_str("{}").unwrap();
        assert!(draft.title.is_none());
        assert!(draft.body.is_none());
    }

    #[test]
    fn test_article_uses_underscore_id_on_the_wire() {
        let article = Article {
            id: "a1".to_string(),
            title: Some("Headline".to_string()),
            link: None,
            summary: None,
            notes: vec!["n1".to_string()],
            saved: false,
        };

        let json = serde_json::to_value(&article).unwrap();
        assert_eq!(json["_id"], "a1");
        assert_eq!(json["notes"][0], "n1");
        assert_eq!(json["saved"], false);
        assert!(json.get("id").is_none());
    }

    #[test]
    fn test_populated_article_inlines_notes() {
        let article: PopulatedArticle = Article {
            id: "a1".to_string(),
            title: None,
            link: None,
            summary: None,
            notes: vec![Note {
                id: "n1".to_string(),
                title: "t".to_string(),
                body: Some("b".to_string()),
            }],
            saved: true,
        };

        let json = serde_json::to_value(&article).unwrap();
        assert_eq!(json["notes"][0]["_id"], "n1");
        assert_eq!(json["notes"][0]["title"], "t");
        assert_eq!(json["notes"][0]["body"], "b");
    }

    #[test]
    fn test_article_saved_defaults_to_false() {
        let json = r#"{"_id": "a1", "title": null, "link": null, "summary": null}"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert!(!article.saved);
        assert!(article.notes.is_empty());
    }

    #[test]
    fn test_article_filter_constructors() {
        assert_eq!(ArticleFilter::all().saved, None);
        assert_eq!(ArticleFilter::saved().saved, Some(true));
    }
}
