//! # Relation Descriptors
//!
//! Static metadata for the relation a handler serves, and the identifier
//! grammar that gates every name interpolated into statement text.

mod descriptor;
mod errors;
mod identifier;

pub use descriptor::Relation;
pub use errors::{IdentifierError, RelationError};
pub use identifier::Identifier;
