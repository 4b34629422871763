//! Field extraction error types.

use thiserror::Error;

use crate::relation::IdentifierError;

/// Errors parsing a request payload into fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// The payload is not valid JSON or not a top-level object.
    #[error("malformed request body: {0}")]
    MalformedBody(String),

    /// A field name failed the identifier grammar.
    #[error("invalid field identifier: {0}")]
    InvalidIdentifier(#[from] IdentifierError),

    /// The same key appeared more than once in the payload object.
    #[error("duplicate field: {0}")]
    DuplicateField(String),
}
