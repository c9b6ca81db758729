use crate::client::FetchPolicy;
use crate::error::{Result, ShelfError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

pub const CONFIG_FILE_NAME: &str = ".shelf.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShelfConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub client: ClientSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// The single path that accepts GraphQL POST requests.
    #[serde(default = "default_graphql_path")]
    pub path: String,

    /// Origins allowed by CORS (with credentials).
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,

    /// Serve GraphiQL on GET at the GraphQL path.
    #[serde(default = "default_graphiql")]
    pub graphiql: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// SQLite file, relative to the project root.
    #[serde(default = "default_database_path")]
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientSettings {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default)]
    pub fetch_policy: FetchPolicy,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_graphql_path() -> String {
    "/graphql".to_string()
}

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:5173".to_string()]
}

fn default_graphiql() -> bool {
    true
}

fn default_database_path() -> String {
    "shelf.db".to_string()
}

fn default_endpoint() -> String {
    "http://127.0.0.1:3000/graphql".to_string()
}

fn default_poll_interval_ms() -> u64 {
    5000
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            path: default_graphql_path(),
            allowed_origins: default_allowed_origins(),
            graphiql: default_graphiql(),
        }
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            poll_interval_ms: default_poll_interval_ms(),
            fetch_policy: FetchPolicy::default(),
        }
    }
}

impl ServerSettings {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Allowed origins must be listed explicitly: credentials are allowed,
    /// and browsers refuse `*` together with credentials.
    pub fn check_allowed_origins(&self) -> Result<()> {
        if self.allowed_origins.iter().any(|o| o.trim() == "*") {
            return Err(ShelfError::Config(
                "allowed_origins cannot contain '*' when credentials are allowed".to_string(),
            ));
        }
        Ok(())
    }
}

impl ClientSettings {
    pub fn endpoint_url(&self) -> Result<Url> {
        Url::parse(&self.endpoint).map_err(|e| {
            ShelfError::Config(format!(
                "Invalid client endpoint '{}': {}",
                self.endpoint, e
            ))
        })
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl ShelfConfig {
    /// Load the nearest `.shelf.toml` above `start_path`.
    ///
    /// Returns the config together with the project root (the directory the
    /// file lives in), or defaults and `None` when no file exists.
    pub fn load(start_path: &Path) -> Result<(Self, Option<PathBuf>)> {
        match Self::find_config_file(start_path) {
            Some(config_path) => {
                let (config, root) = Self::load_from(&config_path)?;
                Ok((config, Some(root)))
            }
            None => Ok((Self::default(), None)),
        }
    }

    pub fn load_from(config_path: &Path) -> Result<(Self, PathBuf)> {
        let content = std::fs::read_to_string(config_path).map_err(|e| {
            ShelfError::Config(format!("Cannot read {}: {}", config_path.display(), e))
        })?;
        let config: ShelfConfig = toml::from_str(&content)?;
        config.validate()?;
        let project_root = config_path
            .parent()
            .ok_or_else(|| ShelfError::Config("Config file has no parent directory".to_string()))?
            .to_path_buf();
        Ok((config, project_root))
    }

    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path.to_path_buf();
        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Some(config_path);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.client.endpoint_url()?;
        self.server.check_allowed_origins()?;
        if !self.server.path.starts_with('/') {
            return Err(ShelfError::Config(format!(
                "Server path must start with '/': {}",
                self.server.path
            )));
        }
        if self.client.poll_interval_ms == 0 {
            return Err(ShelfError::Config(
                "poll_interval_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Where the SQLite file lives.
    ///
    /// Relative paths resolve against the project root, or against the
    /// platform data directory when there is no project.
    pub fn database_path(&self, project_root: Option<&Path>) -> Result<PathBuf> {
        match project_root {
            Some(root) => Ok(root.join(&self.database.path)),
            None => {
                let dirs = directories::ProjectDirs::from("", "", "bookshelf").ok_or_else(|| {
                    ShelfError::Config("Cannot determine a data directory".to_string())
                })?;
                Ok(dirs.data_dir().join(&self.database.path))
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = ShelfConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.path, "/graphql");
        assert_eq!(config.server.allowed_origins, vec!["http://localhost:5173"]);
        assert_eq!(config.client.poll_interval(), Duration::from_millis(5000));
        assert_eq!(config.client.fetch_policy, FetchPolicy::CacheAndNetwork);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: ShelfConfig = toml::from_str("[server]\nport = 4000\n").unwrap();
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.database.path, "shelf.db");
    }

    #[test]
    fn test_fetch_policy_kebab_case() {
        let config: ShelfConfig =
            toml::from_str("[client]\nfetch_policy = \"network-only\"\n").unwrap();
        assert_eq!(config.client.fetch_policy, FetchPolicy::NetworkOnly);
    }

    #[test]
    fn test_load_walks_up() {
        let temp_dir = TempDir::new().unwrap();
        ShelfConfig::default()
            .save(&temp_dir.path().join(CONFIG_FILE_NAME))
            .unwrap();
        let nested = temp_dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let (config, root) = ShelfConfig::load(&nested).unwrap();
        assert_eq!(config, ShelfConfig::default());
        assert_eq!(root.as_deref(), Some(temp_dir.path()));
    }

    #[test]
    fn test_database_path_relative_to_root() {
        let config = ShelfConfig::default();
        let root = Path::new("/tmp/project");
        assert_eq!(
            config.database_path(Some(root)).unwrap(),
            root.join("shelf.db")
        );
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let mut config = ShelfConfig::default();
        config.client.endpoint = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_wildcard_origin_rejected() {
        let mut config = ShelfConfig::default();
        config.server.allowed_origins =
            vec!["http://localhost:5173".to_string(), "*".to_string()];

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ShelfError::Config(_)));
        assert!(err.to_string().contains("credentials"));
    }
}
