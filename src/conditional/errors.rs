//! Conditional header error types.

use thiserror::Error;

/// An entity tag failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EtagError {
    #[error("invalid etag: empty value")]
    Empty,

    #[error("invalid etag: shorter than the quoted form")]
    TooShort,

    #[error("invalid etag: missing quotes")]
    MissingQuotes,

    #[error("invalid etag: unwanted characters")]
    BadCharacters,
}

/// An `If-Match` / `If-None-Match` value failed to parse.
///
/// An empty header VALUE is a parse failure; a header that is absent
/// altogether never reaches this parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("invalid match header: empty value")]
    Empty,

    #[error("invalid match header: {0}")]
    Etag(#[from] EtagError),
}
