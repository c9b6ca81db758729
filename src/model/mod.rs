//! Data models for the bookshelf.
//!
//! - [`Book`]: a persisted book record
//! - [`NewBook`]: validated input for creating a book
//! - [`BookField`]: the user-editable fields of a book

mod book;

pub use book::{Book, BookField, NewBook};
