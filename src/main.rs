//! jsonrow entry point
//!
//! Minimal: dispatch to the CLI, print errors to stderr, exit non-zero on
//! failure. All logic lives in the cli module.

use jsonrow::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
