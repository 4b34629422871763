//! Statement compilation error types.

use thiserror::Error;

/// Errors refusing to compile a statement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// An insert or update with zero fields would produce ill-formed
    /// statement text, so it is rejected before any assembly.
    #[error("empty payload: no fields to write")]
    EmptyPayload,
}
