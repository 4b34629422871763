//! # Typed Statement Values
//!
//! An explicit tagged variant produced once by field extraction and consumed
//! uniformly by the statement compiler and the storage binding layer. Typing
//! is inferred from the raw JSON literal's lexical form, not from a schema.

use serde_json::Value;

/// A value ready to bind to a positional placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// JSON `null`. The column's actual nullable type cannot be inferred
    /// from the payload alone.
    Null,

    /// JSON `true` / `false`.
    Boolean(bool),

    /// A quoted JSON literal, with quoting and escapes resolved.
    Text(String),

    /// A JSON object or array, passed through opaque.
    Json(Value),

    /// A numeric literal, preserved verbatim in its lexical form.
    Number(String),
}
