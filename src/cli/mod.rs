//! # Command-Line Interface
//!
//! Boot sequence for the server: parse arguments, load configuration,
//! connect the pool, hand the validated relation to the engine and serve.

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::run;
pub use errors::{CliError, CliResult};
