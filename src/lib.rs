//! # Bookshelf - a GraphQL bookshelf for the terminal
//!
//! Bookshelf stores books (title, author, content) in SQLite and serves them
//! over a two-operation GraphQL API. A caching client keeps lists fresh by
//! polling or manual refetch, and a TUI and CLI sit on top of it.
//!
//! ## Features
//!
//! - **GraphQL API**: `allBooks` and `createBook`, with unique titles
//! - **Caching client**: explicit cache object, fetch policies, polling, and
//!   sequence numbers that drop out-of-order responses
//! - **Create form**: client-side validation before anything is sent
//! - **TUI**: book list, detail pane, create modal and schema viewer
//!
//! ## Quick Start
//!
//! ```bash
//! # Initialize a project (writes .shelf.toml)
//! shelf init
//!
//! # Start the server
//! shelf serve
//!
//! # In another terminal
//! shelf create "Dune" --author "Herbert" --content "Desert planet saga"
//! shelf books
//! shelf tui
//! ```
//!
//! ## Modules
//!
//! - [`cli`]: Command-line interface definitions and handlers
//! - [`client`]: GraphQL client, cache and watched queries
//! - [`config`]: Configuration loading and management
//! - [`error`]: Error types and result aliases
//! - [`form`]: Create-book form state
//! - [`graphql`]: GraphQL schema, resolvers and HTTP server
//! - [`model`]: Data models (Book, NewBook)
//! - [`storage`]: SQLite storage
//! - [`tui`]: Terminal user interface
//! - [`validation`]: Field rules shared by server and client

/// Command-line interface definitions using clap.
pub mod cli;

/// GraphQL client with an injected cache.
pub mod client;

/// Configuration loading and management.
///
/// Handles `.shelf.toml` configuration files and project discovery.
pub mod config;

/// Error types and result aliases.
///
/// Defines `ShelfError` enum and `Result<T>` type alias.
pub mod error;

pub mod form;

/// GraphQL schema, resolvers and HTTP endpoint.
pub mod graphql;

pub mod logging;

/// Data models for books.
pub mod model;

/// SQLite storage layer.
pub mod storage;

/// Terminal user interface.
///
/// Interactive TUI built with ratatui, talking to the server through the client.
pub mod tui;

/// Input validation utilities.
///
/// Presence rules for the server and length bounds for the create form.
pub mod validation;
