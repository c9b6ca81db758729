use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::model::NewBook;

use super::cache::CacheKey;
use super::introspection::INTROSPECTION_QUERY;
use super::transport::GraphQlRequest;

pub const ALL_BOOKS_QUERY: &str = "query AllBooks {
  allBooks {
    id
    title
    author
    content
  }
}";

pub const CREATE_BOOK_MUTATION: &str =
    "mutation CreateBook($title: String!, $author: String!, $content: String!) {
  createBook(title: $title, author: $author, content: $content) {
    id
    title
    author
    content
  }
}";

/// A named GraphQL document with its variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub name: &'static str,
    pub document: &'static str,
    pub variables: Value,
}

impl Operation {
    pub fn all_books() -> Self {
        Self {
            name: "AllBooks",
            document: ALL_BOOKS_QUERY,
            variables: json!({}),
        }
    }

    pub fn create_book(input: &NewBook) -> Self {
        Self {
            name: "CreateBook",
            document: CREATE_BOOK_MUTATION,
            variables: json!({
                "title": input.title(),
                "author": input.author(),
                "content": input.content(),
            }),
        }
    }

    pub fn introspection() -> Self {
        Self {
            name: "IntrospectionQuery",
            document: INTROSPECTION_QUERY,
            variables: json!({}),
        }
    }

    pub fn to_request(&self) -> GraphQlRequest {
        GraphQlRequest {
            query: self.document.to_string(),
            operation_name: Some(self.name.to_string()),
            variables: self.variables.clone(),
        }
    }

    pub fn cache_key(&self) -> CacheKey {
        CacheKey::new(self.name, &self.variables)
    }
}

/// A book as the client sees it over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookNode {
    pub id: String,
    pub title: String,
    pub author: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllBooksData {
    pub all_books: Vec<BookNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookData {
    pub create_book: BookNode,
}
