//! GraphQL schema, resolvers and HTTP endpoint for the bookshelf.
//!
//! ## Usage
//!
//! ```bash
//! # Start the GraphQL server
//! shelf serve --port 3000
//!
//! # Execute a query against the local database
//! shelf query '{ allBooks { id title author } }'
//!
//! # Execute a mutation against the local database
//! shelf mutate 'createBook(title: "Dune", author: "Herbert", content: "Saga") { id }'
//! ```
//!
//! ## Schema
//!
//! ```graphql
//! type Book { id: ID!, title: String!, author: String!, content: String! }
//! type Query { allBooks: [Book!]! }
//! type Mutation { createBook(title: String!, author: String!, content: String!): Book! }
//! ```

mod schema;
mod server;
mod types;

pub use schema::{BookshelfSchema, MutationRoot, QueryRoot, build_schema};
pub use server::{build_router, run_server, serve};
pub use types::*;
