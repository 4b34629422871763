//! # Field Extraction
//!
//! Parses a byte payload that must be a single top-level JSON object into an
//! ordered field list. Pure parse: never builds a statement and never touches
//! the connection.

use std::collections::HashSet;
use std::fmt;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde_json::value::RawValue;

use crate::relation::Identifier;

use super::errors::ExtractError;
use super::value::SqlValue;

/// One field from the request payload: a grammar-checked name and a typed
/// value. Fields keep the order they appear in the payload text.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: Identifier,
    pub value: SqlValue,
}

/// Object entries in payload order. serde's default map handling would lose
/// ordering and silently drop duplicate keys, so the visitor collects the
/// pairs verbatim.
struct RawFields(Vec<(String, Box<RawValue>)>);

impl<'de> Deserialize<'de> for RawFields {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FieldsVisitor;

        impl<'de> Visitor<'de> for FieldsVisitor {
            type Value = RawFields;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a JSON object")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::new();
                while let Some(entry) = map.next_entry::<String, Box<RawValue>>()? {
                    entries.push(entry);
                }

                Ok(RawFields(entries))
            }
        }

        deserializer.deserialize_map(FieldsVisitor)
    }
}

/// Parse a payload into an ordered field list.
///
/// An empty object yields an empty list; rejecting empty lists for writes is
/// the statement compiler's concern.
pub fn extract(body: &[u8]) -> Result<Vec<Field>, ExtractError> {
    let raw: RawFields = serde_json::from_slice(body)
        .map_err(|err| ExtractError::MalformedBody(err.to_string()))?;

    let mut seen = HashSet::new();
    let mut fields = Vec::with_capacity(raw.0.len());

    for (name, value) in raw.0 {
        let ident = name.parse::<Identifier>()?;

        if !seen.insert(name.clone()) {
            return Err(ExtractError::DuplicateField(name));
        }

        fields.push(Field {
            name: ident,
            value: type_value(&value)?,
        });
    }

    Ok(fields)
}

/// Infer the storage representation from the literal's first byte, the same
/// dispatch the JSON grammar itself uses.
fn type_value(raw: &RawValue) -> Result<SqlValue, ExtractError> {
    let text = raw.get();

    match text.as_bytes().first() {
        Some(b'{') | Some(b'[') => {
            let value = serde_json::from_str(text)
                .map_err(|err| ExtractError::MalformedBody(err.to_string()))?;
            Ok(SqlValue::Json(value))
        }
        Some(b't') | Some(b'f') => Ok(SqlValue::Boolean(text == "true")),
        Some(b'"') => {
            let value = serde_json::from_str(text)
                .map_err(|err| ExtractError::MalformedBody(err.to_string()))?;
            Ok(SqlValue::Text(value))
        }
        Some(b'n') => Ok(SqlValue::Null),
        _ => Ok(SqlValue::Number(text.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_preserves_field_order_and_types() {
        let body = br#"{"name":"a","val":1,"flag":true,"meta":{"x":[1,2]},"gone":null}"#;
        let fields = extract(body).unwrap();

        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["name", "val", "flag", "meta", "gone"]);

        assert_eq!(fields[0].value, SqlValue::Text("a".to_string()));
        assert_eq!(fields[1].value, SqlValue::Number("1".to_string()));
        assert_eq!(fields[2].value, SqlValue::Boolean(true));
        assert_eq!(fields[3].value, SqlValue::Json(json!({"x": [1, 2]})));
        assert_eq!(fields[4].value, SqlValue::Null);
    }

    #[test]
    fn test_numbers_stay_verbatim() {
        let fields = extract(br#"{"price":1.50,"big":-2e10}"#).unwrap();

        assert_eq!(fields[0].value, SqlValue::Number("1.50".to_string()));
        assert_eq!(fields[1].value, SqlValue::Number("-2e10".to_string()));
    }

    #[test]
    fn test_text_is_unescaped() {
        let fields = extract(br#"{"name":"a\"b\\c"}"#).unwrap();
        assert_eq!(fields[0].value, SqlValue::Text("a\"b\\c".to_string()));
    }

    #[test]
    fn test_empty_object_yields_empty_list() {
        assert_eq!(extract(b"{}").unwrap(), vec![]);
    }

    #[test]
    fn test_rejects_invalid_field_name() {
        let err = extract(br#"{"name":"a","Bad-Name":1}"#).unwrap_err();
        match err {
            ExtractError::InvalidIdentifier(inner) => assert_eq!(inner.name(), "Bad-Name"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_duplicate_field() {
        let err = extract(br#"{"name":"a","name":"b"}"#).unwrap_err();
        assert_eq!(err, ExtractError::DuplicateField("name".to_string()));
    }

    #[test]
    fn test_rejects_non_object_payloads() {
        for body in [&b"[1,2]"[..], b"42", b"\"x\"", b"null", b"{", b""] {
            assert!(
                matches!(extract(body), Err(ExtractError::MalformedBody(_))),
                "accepted {:?}",
                String::from_utf8_lossy(body)
            );
        }
    }
}
