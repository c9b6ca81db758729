//! GraphQL client for the bookshelf server.
//!
//! The client is built from a [`Transport`] and an explicit [`QueryCache`].
//! The cache is passed in rather than held globally, so whoever creates it
//! decides which queries share results. It is invalidated by:
//!
//! - a manual refetch or a poll tick of a watched query (that query's entry)
//! - a successful `createBook` (every `AllBooks` entry)
//!
//! ## Read strategies
//!
//! - *Manual refresh*: [`FetchPolicy::CacheFirst`] on mount, then
//!   [`WatchedQuery::refetch`] when the user asks.
//! - *Polling*: [`FetchPolicy::CacheAndNetwork`] on mount plus
//!   [`WatchedQuery::start_polling`] every 5 seconds, with refetch still
//!   available.

mod cache;
mod introspection;
mod operations;
mod query;
mod transport;

pub use cache::{CacheEntry, CacheKey, QueryCache};
pub use introspection::{
    ArgInfo, FieldInfo, INTROSPECTION_QUERY, RootType, SchemaData, SchemaInfo, TypeRef,
    format_type,
};
pub use operations::{
    ALL_BOOKS_QUERY, AllBooksData, BookNode, CREATE_BOOK_MUTATION, CreateBookData, Operation,
};
pub use query::{FetchPolicy, PollHandle, QuerySnapshot, QueryState, WatchedQuery};
pub use transport::{GraphQlError, GraphQlRequest, GraphQlResponse, HttpTransport, Transport};

use std::sync::Arc;

use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{Result, ShelfError};
use crate::model::NewBook;

pub struct BookClient<T = HttpTransport> {
    transport: Arc<T>,
    cache: QueryCache,
}

impl<T> Clone for BookClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            cache: self.cache.clone(),
        }
    }
}

impl BookClient<HttpTransport> {
    /// Client for the server at `endpoint`.
    pub fn connect(endpoint: Url, cache: QueryCache) -> Result<Self> {
        Ok(Self::new(HttpTransport::new(endpoint)?, cache))
    }
}

impl<T: Transport> BookClient<T> {
    pub fn new(transport: T, cache: QueryCache) -> Self {
        Self {
            transport: Arc::new(transport),
            cache,
        }
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run one operation and decode its data.
    pub async fn execute<D: DeserializeOwned>(&self, operation: &Operation) -> Result<D> {
        let data = self
            .transport
            .execute(operation.to_request())
            .await?
            .into_data()?;
        serde_json::from_value(data).map_err(|e| {
            ShelfError::UnexpectedResponse(format!("cannot decode {} data: {}", operation.name, e))
        })
    }

    /// Fetch every book from the network and refresh the cache with it.
    pub async fn all_books(&self) -> Result<Vec<BookNode>> {
        let operation = Operation::all_books();
        let seq = self.cache.next_seq();
        let data: AllBooksData = self.execute(&operation).await?;
        let value = serde_json::to_value(&data)?;
        self.cache.write(operation.cache_key(), value, seq);
        Ok(data.all_books)
    }

    pub async fn create_book(&self, input: &NewBook) -> Result<BookNode> {
        let data: CreateBookData = self.execute(&Operation::create_book(input)).await?;
        tracing::info!(id = %data.create_book.id, title = %data.create_book.title, "Book created");
        self.cache.invalidate_operation(Operation::all_books().name);
        Ok(data.create_book)
    }

    /// Always bypasses the cache.
    pub async fn introspect(&self) -> Result<SchemaData> {
        self.execute(&Operation::introspection()).await
    }

    pub fn watch_all_books(&self, policy: FetchPolicy) -> WatchedQuery<AllBooksData, T> {
        WatchedQuery::new(
            Arc::clone(&self.transport),
            self.cache.clone(),
            Operation::all_books(),
            policy,
        )
    }

    pub fn watch_schema(&self) -> WatchedQuery<SchemaData, T> {
        WatchedQuery::new(
            Arc::clone(&self.transport),
            self.cache.clone(),
            Operation::introspection(),
            FetchPolicy::NetworkOnly,
        )
    }
}
