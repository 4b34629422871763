//! CLI command implementations

use std::path::Path;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::engine::CrudEngine;
use crate::rest_api::RestServer;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Parse arguments and dispatch
pub async fn run() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse_args();

    match cli.command {
        Command::Serve { config } => serve(&config).await,
    }
}

/// Boot sequence: config, pool, engine, listener
async fn serve(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let relation = Arc::new(config.relation.to_relation()?);

    let pool = PgPoolOptions::new()
        .max_connections(config.pool_size)
        .connect(&config.database_url)
        .await
        .map_err(CliError::Connect)?;

    let engine = CrudEngine::new(pool, relation, config.statement_timeout());
    let router = RestServer::new(engine).router();

    let listener = TcpListener::bind(&config.listen_addr)
        .await
        .map_err(CliError::Serve)?;

    info!(addr = %config.listen_addr, "serving");

    axum::serve(listener, router).await.map_err(CliError::Serve)
}
