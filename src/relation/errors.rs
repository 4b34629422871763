//! Relation descriptor error types.

use thiserror::Error;

/// A name failed the identifier grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid identifier: {name}")]
pub struct IdentifierError {
    name: String,
}

impl IdentifierError {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The offending name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Errors building a relation descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelationError {
    /// A schema, relation or column name failed the identifier grammar.
    #[error(transparent)]
    Identifier(#[from] IdentifierError),

    /// The same column was listed twice.
    #[error("duplicate column: {0}")]
    DuplicateColumn(String),

    /// A relation must have at least one column.
    #[error("relation has no columns")]
    NoColumns,
}
