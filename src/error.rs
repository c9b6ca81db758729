use async_graphql::ErrorExtensions;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShelfError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// One or more required fields are blank.
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Validation failed: Title has already been taken")]
    DuplicateTitle(String),

    #[error("Network error: {0}")]
    Network(String),

    /// An error reported by the GraphQL server in the response `errors` list.
    #[error("{message}")]
    GraphQl {
        message: String,
        code: Option<String>,
    },

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("Project already initialized at {0}")]
    AlreadyInitialized(String),
}

pub type Result<T> = std::result::Result<T, ShelfError>;

impl From<reqwest::Error> for ShelfError {
    fn from(e: reqwest::Error) -> Self {
        ShelfError::Network(e.to_string())
    }
}

impl ShelfError {
    /// Machine-readable code placed in GraphQL error extensions.
    pub fn code(&self) -> &'static str {
        match self {
            ShelfError::Validation(_) | ShelfError::DuplicateTitle(_) => "VALIDATION_ERROR",
            _ => "INTERNAL_ERROR",
        }
    }

    pub fn is_validation(&self) -> bool {
        match self {
            ShelfError::Validation(_) | ShelfError::DuplicateTitle(_) => true,
            ShelfError::GraphQl { code, .. } => code.as_deref() == Some("VALIDATION_ERROR"),
            _ => false,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ShelfError::Network(_))
    }

    /// Text shown to a person in a status line or banner.
    ///
    /// Transport failures collapse into one generic banner; everything else
    /// shows its own message.
    pub fn user_message(&self) -> String {
        if self.is_network() {
            "Could not reach the bookshelf server".to_string()
        } else {
            self.to_string()
        }
    }
}

impl ErrorExtensions for ShelfError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", self.code()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_title_message() {
        let err = ShelfError::DuplicateTitle("Dune".to_string());
        assert_eq!(
            err.to_string(),
            "Validation failed: Title has already been taken"
        );
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_network_error_has_generic_user_message() {
        let err = ShelfError::Network("connection refused".to_string());
        assert!(err.is_network());
        assert_eq!(err.user_message(), "Could not reach the bookshelf server");
    }

    #[test]
    fn test_graphql_error_shows_server_message() {
        let err = ShelfError::GraphQl {
            message: "Validation failed: Title can't be blank".to_string(),
            code: Some("VALIDATION_ERROR".to_string()),
        };
        assert_eq!(
            err.user_message(),
            "Validation failed: Title can't be blank"
        );
        assert!(err.is_validation());
    }
}
