//! Article domain model.
//!
//! # Responsibility
//! - Define the persisted article record and its write payloads.
//! - Validate user-supplied fields before they reach SQL.
//!
//! # Invariants
//! - `title` never exceeds `TITLE_MAX_LENGTH` characters.
//! - `author_id` is fixed at creation and never reassigned.
//! - `deleted` is a one-way flag; no operation clears it.

use crate::model::author::AuthorId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable integer identifier assigned by storage.
pub type ArticleId = i64;

/// Maximum number of characters in an article title.
pub const TITLE_MAX_LENGTH: usize = 50;

/// Persisted article as returned by list reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub content: String,
    /// Serialized as `author` to match the table column.
    #[serde(rename = "author")]
    pub author_id: AuthorId,
    pub deleted: bool,
}

/// Creation payload. The author comes from the resolved caller, never from
/// client input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleDraft {
    pub title: String,
    pub content: String,
}

impl ArticleDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Validates field limits.
    ///
    /// # Errors
    /// - `TitleTooLong` when the title exceeds `TITLE_MAX_LENGTH` characters.
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        validate_title(&self.title)
    }
}

/// Partial update payload; absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticlePatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl ArticlePatch {
    /// Returns `true` when neither field is supplied.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        match self.title.as_deref() {
            Some(title) => validate_title(title),
            None => Ok(()),
        }
    }
}

/// Field-level validation failures for write payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelValidationError {
    TitleTooLong { length: usize, max: usize },
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TitleTooLong { length, max } => {
                write!(f, "title has {length} characters, at most {max} allowed")
            }
        }
    }
}

impl Error for ModelValidationError {}

fn validate_title(title: &str) -> Result<(), ModelValidationError> {
    let length = title.chars().count();
    if length > TITLE_MAX_LENGTH {
        return Err(ModelValidationError::TitleTooLong {
            length,
            max: TITLE_MAX_LENGTH,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{ArticleDraft, ArticlePatch, ModelValidationError, TITLE_MAX_LENGTH};

    #[test]
    fn draft_accepts_title_at_limit() {
        let draft = ArticleDraft::new("a".repeat(TITLE_MAX_LENGTH), "body");
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn draft_rejects_title_over_limit_counting_chars() {
        let draft = ArticleDraft::new("é".repeat(TITLE_MAX_LENGTH + 1), "body");
        assert_eq!(
            draft.validate(),
            Err(ModelValidationError::TitleTooLong {
                length: TITLE_MAX_LENGTH + 1,
                max: TITLE_MAX_LENGTH,
            })
        );
    }

    #[test]
    fn empty_patch_is_detected() {
        assert!(ArticlePatch::default().is_empty());
        let patch = ArticlePatch {
            content: Some(String::new()),
            ..ArticlePatch::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn article_serializes_author_column_name() {
        let article = super::Article {
            id: 3,
            title: "t".to_string(),
            content: "c".to_string(),
            author_id: 2,
            deleted: false,
        };
        let value = serde_json::to_value(&article).expect("article should serialize");
        assert_eq!(value["author"], 2);
        assert!(value.get("author_id").is_none());
    }
}
