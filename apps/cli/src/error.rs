use papertrade_core::errors::{DatabaseError, Error as CoreError};
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Core(#[from] CoreError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl CliError {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Core(CoreError::Trade(_))
            | Self::Core(CoreError::Validation(_))
            | Self::Core(CoreError::Database(DatabaseError::NotFound(_)))
            | Self::Core(CoreError::Database(DatabaseError::UniqueViolation(_))) => 2,
            Self::Core(CoreError::InvalidConfigValue(_)) | Self::Config(_) => 4,
            Self::Core(_) | Self::Serialization(_) => 3,
        }
    }
}
