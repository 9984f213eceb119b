use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("Host environment unavailable: {0}")]
    Host(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn config_message(message: impl Into<String>) -> Self {
        Self::Config(config::ConfigError::Message(message.into()))
    }

    /// Whether the error came from the storage host rather than from navigation or config
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::StorageUnavailable(_) | Self::Storage(_))
    }
}
