//! CLI-specific error types

use thiserror::Error;

use crate::config::ConfigError;
use crate::relation::RelationError;

/// Result type for CLI commands
pub type CliResult<T> = Result<T, CliError>;

/// Errors that abort the process
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The configured relation failed identifier validation
    #[error("invalid relation config: {0}")]
    Relation(#[from] RelationError),

    #[error("could not connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}
