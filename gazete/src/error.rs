use thiserror::Error;

#[derive(Error, Debug)]
pub enum GazeteError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CMS error: {0}")]
    Cms(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<&str> for GazeteError {
    fn from(err: &str) -> Self {
        GazeteError::Internal(err.to_string())
    }
}

impl From<String> for GazeteError {
    fn from(err: String) -> Self {
        GazeteError::Internal(err)
    }
}

pub type Result<T> = std::result::Result<T, GazeteError>;
