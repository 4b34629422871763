//! jsonrow - serves a single relational table as a JSON resource with
//! conditional requests
//!
//! The core is the request-to-SQL compiler (`payload` + `sql`) and the
//! entity-tag protocol layer (`conditional`); `engine` runs one compiled
//! statement per operation and `rest_api` makes the conditional decisions.

pub mod cli;
pub mod conditional;
pub mod config;
pub mod engine;
pub mod payload;
pub mod relation;
pub mod rest_api;
pub mod sql;
