use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;
use crate::validation;

/// A book as stored in the `books` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a book.
///
/// Only constructible through [`NewBook::new`], so every value that reaches
/// the repository has already passed the presence rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    title: String,
    author: String,
    content: String,
}

impl NewBook {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Self> {
        let book = Self {
            title: title.into(),
            author: author.into(),
            content: content.into(),
        };
        validation::validate_presence(&book.title, &book.author, &book.content)?;
        Ok(book)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookField {
    Title,
    Author,
    Content,
}

impl BookField {
    pub const ALL: [BookField; 3] = [BookField::Title, BookField::Author, BookField::Content];

    pub fn label(&self) -> &'static str {
        match self {
            BookField::Title => "Title",
            BookField::Author => "Author",
            BookField::Content => "Content",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            BookField::Title => BookField::Author,
            BookField::Author => BookField::Content,
            BookField::Content => BookField::Title,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            BookField::Title => BookField::Content,
            BookField::Author => BookField::Title,
            BookField::Content => BookField::Author,
        }
    }
}

impl fmt::Display for BookField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
