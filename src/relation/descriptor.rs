//! # Relation Descriptor
//!
//! Schema name, relation name, key column and the ordered column list for the
//! one relation a handler instance serves. Constructed once at startup and
//! shared read-only across all requests for that resource; per-request state
//! never lives here.

use std::collections::HashSet;

use super::errors::RelationError;
use super::identifier::Identifier;

/// A table or view with an ordered column list.
///
/// Column order is the canonical projection order: reads and RETURNING
/// projections emit columns in exactly this order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    schema: Identifier,
    name: Identifier,
    key: Identifier,
    columns: Vec<Identifier>,
}

impl Relation {
    /// Build a descriptor, validating every name against the identifier
    /// grammar and rejecting duplicate columns.
    pub fn new<S: AsRef<str>>(
        schema: &str,
        name: &str,
        key: &str,
        columns: &[S],
    ) -> Result<Self, RelationError> {
        if columns.is_empty() {
            return Err(RelationError::NoColumns);
        }

        let mut seen = HashSet::new();
        let mut parsed = Vec::with_capacity(columns.len());

        for column in columns {
            let column = column.as_ref();
            if !seen.insert(column.to_string()) {
                return Err(RelationError::DuplicateColumn(column.to_string()));
            }

            parsed.push(column.parse::<Identifier>()?);
        }

        Ok(Relation {
            schema: schema.parse()?,
            name: name.parse()?,
            key: key.parse()?,
            columns: parsed,
        })
    }

    /// The key column used for read/update lookups.
    pub fn key(&self) -> &Identifier {
        &self.key
    }

    /// Columns in canonical projection order.
    pub fn columns(&self) -> &[Identifier] {
        &self.columns
    }

    /// `"schema"."name"` as used in statement text.
    pub fn qualified(&self) -> String {
        format!("{}.{}", self.schema.quoted(), self.name.quoted())
    }

    /// Quoted column list for a projection, in canonical order.
    pub fn projection(&self) -> String {
        self.columns
            .iter()
            .map(Identifier::quoted)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_and_projection() {
        let relation = Relation::new("app", "resource", "id", &["id", "name", "val"]).unwrap();

        assert_eq!(relation.qualified(), "\"app\".\"resource\"");
        assert_eq!(relation.projection(), "\"id\", \"name\", \"val\"");
        assert_eq!(relation.key().as_str(), "id");
    }

    #[test]
    fn test_rejects_duplicate_column() {
        let err = Relation::new("app", "resource", "id", &["id", "name", "id"]).unwrap_err();
        assert_eq!(err, RelationError::DuplicateColumn("id".to_string()));
    }

    #[test]
    fn test_rejects_empty_column_list() {
        let columns: &[&str] = &[];
        let err = Relation::new("app", "resource", "id", columns).unwrap_err();
        assert_eq!(err, RelationError::NoColumns);
    }

    #[test]
    fn test_rejects_bad_table_name() {
        let err = Relation::new("app", "Resource;--", "id", &["id"]).unwrap_err();
        assert!(matches!(err, RelationError::Identifier(_)));
    }
}
