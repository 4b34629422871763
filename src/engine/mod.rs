//! # CRUD Engine
//!
//! Runs one logical operation end-to-end: compile, execute inside a
//! transaction boundary, scan the single JSON result column, translate
//! storage errors into domain error kinds.
//!
//! `ResourceStore` is the seam the HTTP layer talks to. `CrudEngine` is the
//! Postgres implementation; `MemoryStore` is a map-backed stand-in with the
//! same observable semantics, used to exercise the protocol layer.

mod errors;
mod memory;
mod pg;
mod store;

pub use errors::EngineError;
pub use memory::MemoryStore;
pub use pg::CrudEngine;
pub use store::{ReadOutcome, ResourceStore};
