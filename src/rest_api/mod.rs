//! # REST Surface
//!
//! HTTP endpoints for the one served resource. The store returns entity
//! tags; this layer makes the conditional-request decisions (`If-None-Match`
//! short-circuits reads, `If-Match` gates updates) and maps domain errors
//! onto status codes.

mod errors;
mod server;

pub use errors::{ErrorResponse, RestError, RestResult};
pub use server::RestServer;
