//! Error types for Sportify

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SportifyError>;

#[derive(Error, Debug)]
pub enum SportifyError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not logged in. Run `sportify login` first.")]
    NotAuthenticated,
}

impl SportifyError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            SportifyError::InvalidInput(_) => 3,
            SportifyError::NotAuthenticated => 2,
            SportifyError::Api(ApiError::Server {
                status: Some(401) | Some(400),
                ..
            }) => 2,
            SportifyError::Api(_) => 1,
            SportifyError::Config(_) => 1,
            SportifyError::Storage(_) => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage operation failed: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration failed: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage backend unavailable: {0}")]
    Unavailable(String),
}

/// Failure of a remote call, already reduced to the message shown to the user
///
/// The three variants mirror what can go wrong with a request: the server
/// answered with an error status, nothing answered at all, or the request
/// never got that far.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("{message}")]
    Server { status: Option<u16>, message: String },

    #[error("{0}")]
    NoResponse(String),

    #[error("{0}")]
    Other(String),
}

impl ApiError {
    /// The human-readable message stored in slice state
    pub fn message(&self) -> &str {
        match self {
            ApiError::Server { message, .. } => message,
            ApiError::NoResponse(message) | ApiError::Other(message) => message,
        }
    }
}
