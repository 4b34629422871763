//! # Payload Field Extraction
//!
//! Turns an untrusted JSON object payload into an ordered list of typed
//! fields. This is the security boundary for identifier safety: every field
//! name passes the identifier grammar here, before any statement assembly.

mod errors;
mod extract;
mod value;

pub use errors::ExtractError;
pub use extract::{extract, Field};
pub use value::SqlValue;
