use async_graphql::{Context, EmptySubscription, ErrorExtensions, Object, Schema};

use crate::model::NewBook;
use crate::storage::BookRepository;

use super::types::*;

pub type BookshelfSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(repo: BookRepository) -> BookshelfSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(repo)
        .finish()
}

fn get_repo<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a BookRepository> {
    ctx.data::<BookRepository>()
}

pub struct QueryRoot;

#[Object(name = "Query")]
impl QueryRoot {
    /// Every book on the shelf, in insertion order
    async fn all_books(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Book>> {
        let repo = get_repo(ctx)?;
        let books = repo.list().await.map_err(|e| e.extend())?;
        tracing::debug!(count = books.len(), "Resolved allBooks");
        Ok(books.into_iter().map(Book::from).collect())
    }
}

pub struct MutationRoot;

#[Object(name = "Mutation")]
impl MutationRoot {
    /// Add a book. Fails when a field is blank or the title is taken.
    async fn create_book(
        &self,
        ctx: &Context<'_>,
        title: String,
        author: String,
        content: String,
    ) -> async_graphql::Result<Book> {
        let repo = get_repo(ctx)?;
        let input = NewBook::new(title, author, content).map_err(|e| e.extend())?;
        let book = repo.create(&input).await.map_err(|e| e.extend())?;
        Ok(book.into())
    }
}
