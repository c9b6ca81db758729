//! Relational storage for books.
//!
//! Books live in a single SQLite table:
//!
//! ```sql
//! CREATE TABLE books (
//!     id INTEGER PRIMARY KEY AUTOINCREMENT,
//!     title TEXT NOT NULL UNIQUE,
//!     author TEXT NOT NULL,
//!     content TEXT NOT NULL,
//!     created_at TEXT NOT NULL
//! )
//! ```
//!
//! Title uniqueness is enforced by the `UNIQUE` constraint, so two concurrent
//! inserts with the same title cannot both succeed.
//!
//! - [`BookRepository`]: create and list operations over a connection pool

mod repository;

pub use repository::BookRepository;
