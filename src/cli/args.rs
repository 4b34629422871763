//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// jsonrow - serves a single relational table as a JSON resource
#[derive(Parser, Debug)]
#[command(name = "jsonrow")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./jsonrow.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
