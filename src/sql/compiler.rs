//! # Statement Compiler
//!
//! Three statement shapes: read-one, insert-one, update-one. Each projects
//! the relation's full column list back as a single JSON value so the caller
//! scans exactly one text column (plus a tag column for reads).
//!
//! Placeholder indices are 1-based and contiguous, and the argument list
//! matches placeholder order exactly. A reordering bug here silently writes
//! values into the wrong columns, so the pairing is built in one pass and
//! never rearranged.

use crate::payload::{Field, SqlValue};
use crate::relation::Relation;

use super::errors::CompileError;

/// Name of the scanned JSON result column.
pub const RESPONSE_COLUMN: &str = "_response";

/// Name of the scanned entity-tag column (reads only).
pub const TAG_COLUMN: &str = "_tag";

/// Parameterized statement text with its positional arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub text: String,
    pub args: Vec<SqlValue>,
}

/// Select one row by key, projected as a JSON object plus a strong tag
/// derived from the row's JSON text. Zero storage rows yield zero result
/// rows, distinguishing "missing" from a row that happens to be null.
pub fn read_one(relation: &Relation, key: i64) -> Statement {
    let text = format!(
        "SELECT row_to_json(_row)::text AS {response}, md5(row_to_json(_row)::text) AS {tag}\n\
         FROM ( SELECT {projection} FROM {qualified} WHERE {key} = $1 LIMIT 1 ) _row",
        response = RESPONSE_COLUMN,
        tag = TAG_COLUMN,
        projection = relation.projection(),
        qualified = relation.qualified(),
        key = relation.key().quoted(),
    );

    Statement {
        text,
        args: vec![SqlValue::Number(key.to_string())],
    }
}

/// Insert one row from the extracted fields, re-projecting the relation's
/// column list through a CTE as one aggregated JSON value. The coalesce
/// defends against the zero-row case that a well-formed INSERT never hits.
pub fn insert_one(relation: &Relation, fields: Vec<Field>) -> Result<Statement, CompileError> {
    if fields.is_empty() {
        return Err(CompileError::EmptyPayload);
    }

    let columns: Vec<String> = fields.iter().map(|f| f.name.quoted()).collect();
    let placeholders: Vec<String> = (1..=fields.len()).map(|n| format!("${n}")).collect();

    let text = format!(
        "WITH _ins AS (\n\
         \tINSERT INTO {qualified} ( {columns} )\n\
         \tVALUES ( {placeholders} )\n\
         \tRETURNING *\n\
         )\n\
         SELECT coalesce(json_agg(_row)->0, 'null')::text AS {response}\n\
         FROM ( SELECT {projection} FROM _ins ) _row",
        qualified = relation.qualified(),
        columns = columns.join(", "),
        placeholders = placeholders.join(", "),
        response = RESPONSE_COLUMN,
        projection = relation.projection(),
    );

    Ok(Statement {
        text,
        args: fields.into_iter().map(|f| f.value).collect(),
    })
}

/// Update one row by key from the extracted fields. Assignment pairs keep
/// field order; the key is always the final positional argument. Zero rows
/// affected aggregate to the JSON `null` text, which the engine reads as
/// "key did not exist".
pub fn update_one(
    relation: &Relation,
    key: i64,
    fields: Vec<Field>,
) -> Result<Statement, CompileError> {
    if fields.is_empty() {
        return Err(CompileError::EmptyPayload);
    }

    let assignments: Vec<String> = fields
        .iter()
        .enumerate()
        .map(|(idx, f)| format!("{} = ${}", f.name.quoted(), idx + 1))
        .collect();
    let key_placeholder = fields.len() + 1;

    let text = format!(
        "WITH _upd AS (\n\
         \tUPDATE {qualified}\n\
         \tSET {assignments}\n\
         \tWHERE {key} = ${key_placeholder}\n\
         \tRETURNING *\n\
         )\n\
         SELECT coalesce(json_agg(_row)->0, 'null')::text AS {response}\n\
         FROM ( SELECT {projection} FROM _upd ) _row",
        qualified = relation.qualified(),
        assignments = assignments.join(", "),
        key = relation.key().quoted(),
        response = RESPONSE_COLUMN,
        projection = relation.projection(),
    );

    let mut args: Vec<SqlValue> = fields.into_iter().map(|f| f.value).collect();
    args.push(SqlValue::Number(key.to_string()));

    Ok(Statement { text, args })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relation() -> Relation {
        Relation::new("app", "resource", "id", &["id", "name", "val"]).unwrap()
    }

    fn field(name: &str, value: SqlValue) -> Field {
        Field {
            name: name.parse().unwrap(),
            value,
        }
    }

    #[test]
    fn test_read_one_shape() {
        let stmt = read_one(&relation(), 7);

        assert!(stmt.text.contains("SELECT \"id\", \"name\", \"val\" FROM \"app\".\"resource\""));
        assert!(stmt.text.contains("WHERE \"id\" = $1"));
        assert!(stmt.text.contains("LIMIT 1"));
        assert!(stmt.text.contains("md5(row_to_json(_row)::text) AS _tag"));
        assert_eq!(stmt.args, vec![SqlValue::Number("7".to_string())]);
    }

    #[test]
    fn test_insert_one_round_trip() {
        let fields = vec![
            field("name", SqlValue::Text("a".to_string())),
            field("val", SqlValue::Number("1".to_string())),
        ];
        let stmt = insert_one(&relation(), fields).unwrap();

        assert!(stmt.text.contains("INSERT INTO \"app\".\"resource\" ( \"name\", \"val\" )"));
        assert!(stmt.text.contains("VALUES ( $1, $2 )"));
        // RETURNING re-projects the full descriptor column list.
        assert!(stmt.text.contains("SELECT \"id\", \"name\", \"val\" FROM _ins"));
        assert_eq!(
            stmt.args,
            vec![
                SqlValue::Text("a".to_string()),
                SqlValue::Number("1".to_string()),
            ]
        );
    }

    #[test]
    fn test_update_one_keeps_key_last() {
        let fields = vec![
            field("name", SqlValue::Text("b".to_string())),
            field("flag", SqlValue::Boolean(false)),
        ];
        let stmt = update_one(&relation(), 9, fields).unwrap();

        assert!(stmt.text.contains("SET \"name\" = $1, \"flag\" = $2"));
        assert!(stmt.text.contains("WHERE \"id\" = $3"));
        assert_eq!(stmt.args.len(), 3);
        assert_eq!(stmt.args[2], SqlValue::Number("9".to_string()));
    }

    #[test]
    fn test_placeholders_are_contiguous_and_match_arg_order() {
        let fields: Vec<Field> = ["a", "b", "c", "d", "e"]
            .iter()
            .enumerate()
            .map(|(idx, name)| field(name, SqlValue::Number(idx.to_string())))
            .collect();
        let stmt = insert_one(&relation(), fields).unwrap();

        for n in 1..=5 {
            assert!(stmt.text.contains(&format!("${n}")), "missing ${n}");
        }
        assert_eq!(stmt.args.len(), 5);
        for (idx, arg) in stmt.args.iter().enumerate() {
            assert_eq!(arg, &SqlValue::Number(idx.to_string()));
        }
    }

    #[test]
    fn test_empty_fields_are_rejected() {
        assert_eq!(
            insert_one(&relation(), vec![]).unwrap_err(),
            CompileError::EmptyPayload
        );
        assert_eq!(
            update_one(&relation(), 1, vec![]).unwrap_err(),
            CompileError::EmptyPayload
        );
    }
}
