//! Input validation for book data.
//!
//! Two rule sets live here. [`validate_presence`] is what the server enforces
//! before anything is written. [`validate_form`] is the stricter client-side
//! check a form runs before it sends anything over the wire.

use crate::error::{Result, ShelfError};
use crate::model::BookField;

/// Maximum title length accepted by the create form.
pub const MAX_TITLE_LENGTH: usize = 100;

/// Maximum author length accepted by the create form.
pub const MAX_AUTHOR_LENGTH: usize = 50;

/// Minimum content length accepted by the create form.
pub const MIN_CONTENT_LENGTH: usize = 10;

/// A value that is empty or only whitespace counts as missing.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Server-side rule: all three fields must be present.
///
/// Every blank field is reported, joined with ", ".
pub fn validate_presence(title: &str, author: &str, content: &str) -> Result<()> {
    let missing: Vec<String> = [
        (BookField::Title, title),
        (BookField::Author, author),
        (BookField::Content, content),
    ]
    .into_iter()
    .filter(|(_, value)| is_blank(value))
    .map(|(field, _)| format!("{} can't be blank", field.label()))
    .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ShelfError::Validation(missing.join(", ")))
    }
}

/// Per-field messages produced by [`validate_form`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub title: Option<String>,
    pub author: Option<String>,
    pub content: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.content.is_none()
    }

    pub fn get(&self, field: BookField) -> Option<&str> {
        match field {
            BookField::Title => self.title.as_deref(),
            BookField::Author => self.author.as_deref(),
            BookField::Content => self.content.as_deref(),
        }
    }

    /// The first message in field order, if any.
    pub fn first(&self) -> Option<&str> {
        BookField::ALL.iter().find_map(|f| self.get(*f))
    }

    pub fn clear(&mut self, field: BookField) {
        match field {
            BookField::Title => self.title = None,
            BookField::Author => self.author = None,
            BookField::Content => self.content = None,
        }
    }
}

/// Client-side rules mirroring the server, plus length bounds.
///
/// Lengths are counted in characters, not bytes.
pub fn validate_form(title: &str, author: &str, content: &str) -> FieldErrors {
    let title = if is_blank(title) {
        Some("Title is required".to_string())
    } else if title.chars().count() > MAX_TITLE_LENGTH {
        Some(format!(
            "Title must be at most {} characters",
            MAX_TITLE_LENGTH
        ))
    } else {
        None
    };

    let author = if is_blank(author) {
        Some("Author is required".to_string())
    } else if author.chars().count() > MAX_AUTHOR_LENGTH {
        Some(format!(
            "Author must be at most {} characters",
            MAX_AUTHOR_LENGTH
        ))
    } else {
        None
    };

    let content = if is_blank(content) {
        Some("Content is required".to_string())
    } else if content.chars().count() < MIN_CONTENT_LENGTH {
        Some(format!(
            "Content must be at least {} characters",
            MIN_CONTENT_LENGTH
        ))
    } else {
        None
    };

    FieldErrors {
        title,
        author,
        content,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presence_accepts_filled_fields() {
        assert!(validate_presence("Dune", "Herbert", "Desert planet saga").is_ok());
    }

    #[test]
    fn test_presence_reports_every_blank_field() {
        let err = validate_presence("", " ", "ok").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation failed: Title can't be blank, Author can't be blank"
        );
        assert!(err.is_validation());
    }

    #[test]
    fn test_form_valid() {
        assert!(validate_form("Dune", "Herbert", "Desert planet saga").is_empty());
    }

    #[test]
    fn test_form_title_too_long() {
        let title = "a".repeat(MAX_TITLE_LENGTH + 1);
        let errors = validate_form(&title, "Herbert", "Desert planet saga");
        assert_eq!(
            errors.title.as_deref(),
            Some("Title must be at most 100 characters")
        );
        assert!(errors.author.is_none());
    }

    #[test]
    fn test_form_title_at_limit() {
        let title = "a".repeat(MAX_TITLE_LENGTH);
        assert!(validate_form(&title, "Herbert", "Desert planet saga").is_empty());
    }

    #[test]
    fn test_form_author_too_long() {
        let author = "b".repeat(MAX_AUTHOR_LENGTH + 1);
        let errors = validate_form("Dune", &author, "Desert planet saga");
        assert!(errors.author.is_some());
    }

    #[test]
    fn test_form_content_too_short() {
        let errors = validate_form("Dune", "Herbert", "short");
        assert_eq!(
            errors.content.as_deref(),
            Some("Content must be at least 10 characters")
        );
        assert_eq!(errors.first(), errors.content.as_deref());
    }

    #[test]
    fn test_form_counts_characters_not_bytes() {
        // 10 multi-byte characters
        let errors = validate_form("本", "著者", "あいうえおかきくけこ");
        assert!(errors.is_empty());
    }

    #[test]
    fn test_form_reports_all_missing() {
        let errors = validate_form("", "", "");
        assert_eq!(errors.first(), Some("Title is required"));
        assert!(errors.author.is_some());
        assert!(errors.content.is_some());
    }
}
