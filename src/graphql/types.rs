use crate::model::Book as ModelBook;
use async_graphql::{ID, SimpleObject};

/// A book on the shelf.
#[derive(SimpleObject, Clone, Debug, PartialEq)]
pub struct Book {
    /// Server-generated identifier, assigned at creation.
    pub id: ID,
    /// Unique title, compared case-sensitively.
    pub title: String,
    /// Author name.
    pub author: String,
    /// Body text.
    pub content: String,
}

impl From<ModelBook> for Book {
    fn from(b: ModelBook) -> Self {
        Self {
            id: ID(b.id.to_string()),
            title: b.title,
            author: b.author,
            content: b.content,
        }
    }
}
