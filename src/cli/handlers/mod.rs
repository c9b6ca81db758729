mod books;
mod create;
mod init;
mod mutate;
mod query;
mod schema;
mod serve;
mod tui;
mod utils;
mod watch;

pub use books::handle_books;
pub use create::handle_create;
pub use init::handle_init;
pub use mutate::handle_mutate;
pub use query::handle_query;
pub use schema::handle_schema;
pub use serve::handle_serve;
pub use tui::handle_tui;
pub use watch::handle_watch;

use crate::client::{BookClient, QueryCache};
use crate::config::ShelfConfig;
use crate::storage::BookRepository;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Common context passed to all command handlers
pub struct CommandContext {
    pub config: ShelfConfig,
    /// Directory holding `.shelf.toml`, if a project was found.
    pub root: Option<PathBuf>,
}

impl CommandContext {
    /// Load the config from `config_path`, or search upward from the current
    /// directory, then apply the endpoint override.
    pub fn load(config_path: Option<&Path>, endpoint: Option<String>) -> Result<Self> {
        let (mut config, root) = match config_path {
            Some(path) => {
                let (config, root) = ShelfConfig::load_from(path)
                    .with_context(|| format!("Failed to load config from {}", path.display()))?;
                (config, Some(root))
            }
            None => {
                let cwd = std::env::current_dir()?;
                ShelfConfig::load(&cwd).context("Failed to load config")?
            }
        };

        if let Some(endpoint) = endpoint {
            config.client.endpoint = endpoint;
            config.client.endpoint_url()?;
        }

        Ok(Self { config, root })
    }

    /// HTTP client with a fresh cache.
    pub fn client(&self) -> Result<BookClient> {
        let endpoint = self.config.client.endpoint_url()?;
        Ok(BookClient::connect(endpoint, QueryCache::new())?)
    }

    pub async fn open_repository(&self) -> Result<BookRepository> {
        let path = self.config.database_path(self.root.as_deref())?;
        BookRepository::connect(&path)
            .await
            .with_context(|| format!("Failed to open database at {}", path.display()))
    }
}
