//! # Postgres Engine
//!
//! Compiles exactly one statement per logical operation and executes it
//! against a shared pool. Writes run inside a transaction committed only on
//! success; every other exit path (scan error, timeout, unwind) drops the
//! transaction, which rolls it back.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::PgArguments;
use sqlx::query::Query;
use sqlx::{PgPool, Postgres, Row};
use tracing::{debug, warn};

use crate::conditional::ETag;
use crate::payload::{Field, SqlValue};
use crate::relation::Relation;
use crate::sql::{self, Statement, RESPONSE_COLUMN, TAG_COLUMN};

use super::errors::EngineError;
use super::store::{ReadOutcome, ResourceStore};

/// JSON text of an absent aggregated row.
const NULL_RESPONSE: &str = "null";

/// Postgres-backed store for one relation.
pub struct CrudEngine {
    pool: PgPool,
    relation: Arc<Relation>,
    statement_timeout: Duration,
}

impl CrudEngine {
    pub fn new(pool: PgPool, relation: Arc<Relation>, statement_timeout: Duration) -> Self {
        Self {
            pool,
            relation,
            statement_timeout,
        }
    }

    /// Bind a compiled statement's arguments in positional order.
    fn query(statement: &Statement) -> Query<'_, Postgres, PgArguments> {
        let mut query = sqlx::query(&statement.text);
        for value in &statement.args {
            query = bind_value(query, value);
        }

        query
    }

    /// Run a storage future under the configured deadline.
    async fn deadline<T, F>(&self, fut: F) -> Result<T, EngineError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.statement_timeout, fut).await {
            Ok(result) => result.map_err(EngineError::from),
            Err(_) => Err(EngineError::Timeout),
        }
    }
}

/// Typed binding for the extractor's tagged values. A null binds as a
/// text-typed NULL; a column with no assignment cast from text rejects it at
/// parse time and the failure surfaces classified.
fn bind_value<'q>(
    query: Query<'q, Postgres, PgArguments>,
    value: &SqlValue,
) -> Query<'q, Postgres, PgArguments> {
    match value {
        SqlValue::Null => query.bind(Option::<String>::None),
        SqlValue::Boolean(b) => query.bind(*b),
        SqlValue::Text(s) => query.bind(s.clone()),
        SqlValue::Json(j) => query.bind(j.clone()),
        SqlValue::Number(n) => {
            if let Ok(int) = n.parse::<i64>() {
                query.bind(int)
            } else if let Ok(float) = n.parse::<f64>() {
                query.bind(float)
            } else {
                // Lexically a number but outside both binary forms; hand the
                // literal to the server as text.
                query.bind(n.clone())
            }
        }
    }
}

#[async_trait]
impl ResourceStore for CrudEngine {
    async fn read(&self, key: i64) -> Result<ReadOutcome, EngineError> {
        let statement = sql::read_one(&self.relation, key);
        debug!(text = %statement.text, key, "compiled read");

        let row = self
            .deadline(Self::query(&statement).fetch_optional(&self.pool))
            .await?;

        let Some(row) = row else {
            return Err(EngineError::NotFound);
        };

        let body: String = row.try_get(RESPONSE_COLUMN)?;
        let tag: String = row.try_get(TAG_COLUMN)?;

        Ok(ReadOutcome {
            body,
            etag: ETag::new(false, tag),
        })
    }

    async fn create(&self, fields: Vec<Field>) -> Result<String, EngineError> {
        let statement = sql::insert_one(&self.relation, fields)?;
        debug!(text = %statement.text, "compiled insert");

        let mut tx = self.deadline(self.pool.begin()).await?;
        let row = self
            .deadline(Self::query(&statement).fetch_one(&mut *tx))
            .await?;
        let body: String = row.try_get(RESPONSE_COLUMN)?;

        if body == NULL_RESPONSE {
            // A well-formed INSERT returns its row; keep the boundary
            // contract but make the anomaly visible.
            warn!("insert aggregated zero rows");
        }

        self.deadline(tx.commit()).await?;

        Ok(body)
    }

    async fn update(&self, key: i64, fields: Vec<Field>) -> Result<String, EngineError> {
        let statement = sql::update_one(&self.relation, key, fields)?;
        debug!(text = %statement.text, key, "compiled update");

        let mut tx = self.deadline(self.pool.begin()).await?;
        let row = self
            .deadline(Self::query(&statement).fetch_one(&mut *tx))
            .await?;
        let body: String = row.try_get(RESPONSE_COLUMN)?;

        if body == NULL_RESPONSE {
            // Zero rows affected: the key does not exist. Dropping the
            // transaction rolls it back.
            return Err(EngineError::NotFound);
        }

        self.deadline(tx.commit()).await?;

        Ok(body)
    }
}
