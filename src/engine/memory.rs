//! # In-Memory Store
//!
//! Mirrors the Postgres engine's observable semantics against a plain map:
//! serial key assignment, column-order projection, strong tags that change
//! on every write, storage errors for unknown columns. Exists so the
//! protocol layer can be exercised without a database.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::conditional::ETag;
use crate::payload::{Field, SqlValue};
use crate::relation::Relation;

use super::errors::EngineError;
use super::store::{ReadOutcome, ResourceStore};

/// Map-backed store for one relation.
pub struct MemoryStore {
    relation: Arc<Relation>,
    inner: Mutex<Inner>,
}

struct Inner {
    next_key: i64,
    rows: BTreeMap<i64, StoredRow>,
}

struct StoredRow {
    values: Map<String, Value>,
    version: u64,
}

impl MemoryStore {
    pub fn new(relation: Arc<Relation>) -> Self {
        Self {
            relation,
            inner: Mutex::new(Inner {
                next_key: 1,
                rows: BTreeMap::new(),
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, EngineError> {
        self.inner
            .lock()
            .map_err(|_| EngineError::storage("store lock poisoned"))
    }

    /// Reject field names that are not columns of the relation, the way the
    /// database would.
    fn check_columns(&self, fields: &[Field]) -> Result<(), EngineError> {
        for field in fields {
            if !self.relation.columns().contains(&field.name) {
                return Err(EngineError::storage(format!(
                    "column \"{}\" does not exist",
                    field.name
                )));
            }
        }

        Ok(())
    }

    /// Render a row as a JSON object over the relation's column list, in
    /// canonical order, with absent columns as null.
    fn project(&self, key: i64, row: &StoredRow) -> String {
        let mut object = Map::new();
        for column in self.relation.columns() {
            let value = if column == self.relation.key() {
                Value::from(key)
            } else {
                row.values
                    .get(column.as_str())
                    .cloned()
                    .unwrap_or(Value::Null)
            };
            object.insert(column.as_str().to_string(), value);
        }

        Value::Object(object).to_string()
    }

    fn tag(key: i64, row: &StoredRow) -> ETag {
        ETag::new(false, format!("{}-{}", key, row.version))
    }
}

fn to_json(value: SqlValue) -> Value {
    match value {
        SqlValue::Null => Value::Null,
        SqlValue::Boolean(b) => Value::Bool(b),
        SqlValue::Text(s) => Value::String(s),
        SqlValue::Json(j) => j,
        SqlValue::Number(n) => serde_json::from_str(&n).unwrap_or(Value::Null),
    }
}

#[async_trait]
impl ResourceStore for MemoryStore {
    async fn read(&self, key: i64) -> Result<ReadOutcome, EngineError> {
        let inner = self.lock()?;
        let row = inner.rows.get(&key).ok_or(EngineError::NotFound)?;

        Ok(ReadOutcome {
            body: self.project(key, row),
            etag: Self::tag(key, row),
        })
    }

    async fn create(&self, fields: Vec<Field>) -> Result<String, EngineError> {
        if fields.is_empty() {
            return Err(EngineError::EmptyPayload);
        }
        self.check_columns(&fields)?;

        let mut inner = self.lock()?;
        let key = inner.next_key;
        inner.next_key += 1;

        let mut values = Map::new();
        for field in fields {
            values.insert(field.name.as_str().to_string(), to_json(field.value));
        }

        let row = StoredRow { values, version: 1 };
        let body = self.project(key, &row);
        inner.rows.insert(key, row);

        Ok(body)
    }

    async fn update(&self, key: i64, fields: Vec<Field>) -> Result<String, EngineError> {
        if fields.is_empty() {
            return Err(EngineError::EmptyPayload);
        }
        self.check_columns(&fields)?;

        let mut inner = self.lock()?;
        let row = inner.rows.get_mut(&key).ok_or(EngineError::NotFound)?;

        for field in fields {
            row.values.insert(field.name.as_str().to_string(), to_json(field.value));
        }
        row.version += 1;

        Ok(self.project(key, row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> MemoryStore {
        let relation = Relation::new("app", "resource", "id", &["id", "name"]).unwrap();
        MemoryStore::new(Arc::new(relation))
    }

    fn fields(pairs: &[(&str, SqlValue)]) -> Vec<Field> {
        pairs
            .iter()
            .map(|(name, value)| Field {
                name: name.parse().unwrap(),
                value: value.clone(),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_read_missing_key_is_not_found() {
        let store = store();
        assert!(matches!(store.read(1).await, Err(EngineError::NotFound)));
    }

    #[tokio::test]
    async fn test_create_assigns_serial_keys_and_fresh_tags() {
        let store = store();
        let payload = fields(&[("name", SqlValue::Text("a".to_string()))]);

        let first = store.create(payload.clone()).await.unwrap();
        let second = store.create(payload).await.unwrap();

        assert_eq!(first, r#"{"id":1,"name":"a"}"#);
        assert_eq!(second, r#"{"id":2,"name":"a"}"#);

        let first_tag = store.read(1).await.unwrap().etag;
        let second_tag = store.read(2).await.unwrap().etag;
        assert!(!first_tag.is_weak());
        assert_ne!(first_tag, second_tag);
    }

    #[tokio::test]
    async fn test_update_missing_key_is_not_found() {
        let store = store();
        let payload = fields(&[("name", SqlValue::Text("b".to_string()))]);

        assert!(matches!(
            store.update(1, payload).await,
            Err(EngineError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_update_changes_body_and_tag() {
        let store = store();
        store
            .create(fields(&[("name", SqlValue::Text("a".to_string()))]))
            .await
            .unwrap();
        let before = store.read(1).await.unwrap();

        let body = store
            .update(1, fields(&[("name", SqlValue::Text("b".to_string()))]))
            .await
            .unwrap();
        let after = store.read(1).await.unwrap();

        assert_eq!(body, r#"{"id":1,"name":"b"}"#);
        assert_eq!(after.body, body);
        assert!(!before.etag.match_weak(&after.etag));
    }

    #[tokio::test]
    async fn test_empty_payload_is_rejected() {
        let store = store();
        assert!(matches!(
            store.create(vec![]).await,
            Err(EngineError::EmptyPayload)
        ));
        assert!(matches!(
            store.update(1, vec![]).await,
            Err(EngineError::EmptyPayload)
        ));
    }

    #[tokio::test]
    async fn test_unknown_column_is_a_storage_error() {
        let store = store();
        let payload = fields(&[("missing", SqlValue::Null)]);

        assert!(matches!(
            store.create(payload).await,
            Err(EngineError::Storage { .. })
        ));
    }
}
