use crate::{
    error::{Result, ShelfError},
    model::{Book, NewBook},
};
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

const CREATE_BOOKS_TABLE: &str = "CREATE TABLE IF NOT EXISTS books (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL UNIQUE CHECK (length(trim(title)) > 0),
    author TEXT NOT NULL CHECK (length(trim(author)) > 0),
    content TEXT NOT NULL CHECK (length(trim(content)) > 0),
    created_at TEXT NOT NULL
)";

const BOOK_COLUMNS: &str = "id, title, author, content, created_at";

#[derive(Clone)]
pub struct BookRepository {
    pool: SqlitePool,
}

impl BookRepository {
    /// Open (creating if needed) the database file at `path`.
    pub async fn connect(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(8)
            .connect_with(options)
            .await?;

        tracing::debug!(path = %path.display(), "Opened book database");
        Self::from_pool(pool).await
    }

    /// A private in-memory database, gone when the repository is dropped.
    pub async fn in_memory() -> Result<Self> {
        // Every connection to `:memory:` is a separate database, so the pool
        // must hold exactly one connection for its whole lifetime.
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Self::from_pool(pool).await
    }

    pub async fn from_pool(pool: SqlitePool) -> Result<Self> {
        let repo = Self { pool };
        repo.migrate().await?;
        Ok(repo)
    }

    async fn migrate(&self) -> Result<()> {
        sqlx::query(CREATE_BOOKS_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    /// Insert a book in one statement and return the stored row.
    pub async fn create(&self, input: &NewBook) -> Result<Book> {
        tracing::info!(title = %input.title(), author = %input.author(), "Creating book");

        let sql = format!(
            "INSERT INTO books (title, author, content, created_at) \
             VALUES (?, ?, ?, ?) RETURNING {}",
            BOOK_COLUMNS
        );
        let result = sqlx::query_as::<_, Book>(&sql)
            .bind(input.title())
            .bind(input.author())
            .bind(input.content())
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await;

        match result {
            Ok(book) => {
                tracing::debug!(id = book.id, "Book created");
                Ok(book)
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                tracing::info!(title = %input.title(), "Rejected duplicate title");
                Err(ShelfError::DuplicateTitle(input.title().to_string()))
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_check_violation() => Err(
                ShelfError::Validation(format!("rejected by storage: {}", db_err.message())),
            ),
            Err(e) => Err(e.into()),
        }
    }

    /// All books in insertion order.
    pub async fn list(&self) -> Result<Vec<Book>> {
        let query = format!("SELECT {} FROM books ORDER BY id", BOOK_COLUMNS);
        let books = sqlx::query_as::<_, Book>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn dune() -> NewBook {
        NewBook::new("Dune", "Herbert", "Desert planet saga").unwrap()
    }

    #[tokio::test]
    async fn test_list_empty() {
        let repo = BookRepository::in_memory().await.unwrap();
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_round_trips() {
        let repo = BookRepository::in_memory().await.unwrap();
        let created = repo.create(&dune()).await.unwrap();
        assert!(created.id > 0);

        let books = repo.list().await.unwrap();
        assert_eq!(books, vec![created.clone()]);
        assert_eq!(books[0].title, "Dune");
        assert_eq!(books[0].author, "Herbert");
        assert_eq!(books[0].content, "Desert planet saga");
    }

    #[tokio::test]
    async fn test_duplicate_title_rejected_and_count_unchanged() {
        let repo = BookRepository::in_memory().await.unwrap();
        repo.create(&dune()).await.unwrap();

        let again = NewBook::new("Dune", "X", "Y, at least 10 chars").unwrap();
        let err = repo.create(&again).await.unwrap_err();
        assert!(matches!(err, ShelfError::DuplicateTitle(ref t) if t == "Dune"));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_title_uniqueness_is_case_sensitive() {
        let repo = BookRepository::in_memory().await.unwrap();
        repo.create(&dune()).await.unwrap();
        let lower = NewBook::new("dune", "Herbert", "Desert planet saga").unwrap();
        assert!(repo.create(&lower).await.is_ok());
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_list_in_insertion_order() {
        let repo = BookRepository::in_memory().await.unwrap();
        for title in ["C", "A", "B"] {
            let input = NewBook::new(title, "Someone", "Some long content").unwrap();
            repo.create(&input).await.unwrap();
        }
        let titles: Vec<_> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.title)
            .collect();
        assert_eq!(titles, vec!["C", "A", "B"]);
    }

    #[tokio::test]
    async fn test_concurrent_duplicate_creates_one_wins() {
        let temp_dir = TempDir::new().unwrap();
        let repo = BookRepository::connect(&temp_dir.path().join("shelf.db"))
            .await
            .unwrap();

        let mut handles = Vec::new();
        for i in 0..8 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                let input =
                    NewBook::new("Dune", format!("Author {}", i), "Desert planet saga").unwrap();
                repo.create(&input).await
            }));
        }

        let mut successes = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(e) => assert!(e.is_validation(), "unexpected error: {}", e),
            }
        }
        assert_eq!(successes, 1);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_persists_across_connections() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("shelf.db");
        {
            let repo = BookRepository::connect(&path).await.unwrap();
            repo.create(&dune()).await.unwrap();
        }
        let repo = BookRepository::connect(&path).await.unwrap();
        let books = repo.list().await.unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].author, "Herbert");
    }
}
