//! # Configuration
//!
//! File-based configuration: the served relation plus the runtime knobs
//! around it. Loaded once at startup by the CLI; the core modules only ever
//! see the validated `Relation` built from it.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::relation::{Relation, RelationError};

/// Top-level configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Address to bind (default: "0.0.0.0:8080")
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Postgres connection string (required)
    pub database_url: String,

    /// Connection pool size (default: 5)
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,

    /// Per-statement deadline in milliseconds (default: 5000)
    #[serde(default = "default_statement_timeout_ms")]
    pub statement_timeout_ms: u64,

    /// The one relation this process serves
    pub relation: RelationConfig,
}

/// The served relation, as written in the config file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationConfig {
    pub schema: String,
    pub table: String,
    pub key: String,
    pub columns: Vec<String>,
}

fn default_listen_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_pool_size() -> u32 {
    5
}

fn default_statement_timeout_ms() -> u64 {
    5_000
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Config {
    /// Load and parse a configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// The per-statement deadline
    pub fn statement_timeout(&self) -> Duration {
        Duration::from_millis(self.statement_timeout_ms)
    }
}

impl RelationConfig {
    /// Validate the configured names into a descriptor
    pub fn to_relation(&self) -> Result<Relation, RelationError> {
        Relation::new(&self.schema, &self.table, &self.key, &self.columns)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const MINIMAL: &str = r#"{
        "database_url": "postgres://localhost/app",
        "relation": {
            "schema": "app",
            "table": "resource",
            "key": "id",
            "columns": ["id", "name"]
        }
    }"#;

    #[test]
    fn test_load_applies_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MINIMAL.as_bytes()).unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.listen_addr, "0.0.0.0:8080");
        assert_eq!(config.pool_size, 5);
        assert_eq!(config.statement_timeout(), Duration::from_millis(5_000));

        let relation = config.relation.to_relation().unwrap();
        assert_eq!(relation.qualified(), "\"app\".\"resource\"");
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/jsonrow.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_bad_relation_name_is_rejected() {
        let config: Config = serde_json::from_str(
            &MINIMAL.replace("\"resource\"", "\"Re;source\""),
        )
        .unwrap();

        assert!(config.relation.to_relation().is_err());
    }
}
