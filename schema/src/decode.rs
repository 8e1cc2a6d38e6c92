use serde_json::Value;

use crate::{collection::Collection, error::SchemaError, field::FieldType};

/// Decode the JSON text of a collection list.
pub fn decode_collections(text: &str) -> Result<Vec<Collection>, SchemaError> {
    let value: Value = serde_json::from_str(text)?;
    decode_collections_value(value)
}

/// Decode an already parsed collection list.
///
/// Every field's `type` tag is checked against the closed set of kinds
/// before the typed decode runs, so that an unsupported kind is reported
/// with the collection and field it belongs to instead of as a generic
/// deserialization failure.
pub fn decode_collections_value(value: Value) -> Result<Vec<Collection>, SchemaError> {
    let items = match &value {
        Value::Array(items) => items,
        other => {
            return Err(SchemaError::UnexpectedShape {
                expected: "an array of collections",
                found:    kind_of(other).to_string(),
            })
        }
    };

    for item in items {
        check_field_kinds(item)?;
    }

    Ok(serde_json::from_value(value)?)
}

fn check_field_kinds(collection: &Value) -> Result<(), SchemaError> {
    let fields = match collection.get("fields") {
        Some(Value::Array(fields)) => fields,
        // Missing or mistyped `fields` is left to the typed decode.
        _ => return Ok(()),
    };

    for field in fields {
        let kind = match field.get("type") {
            Some(Value::String(tag)) => {
                if FieldType::from_tag(tag).is_some() {
                    continue;
                }
                tag.clone()
            }
            Some(other) => other.to_string(),
            None => continue,
        };

        return Err(SchemaError::UnknownFieldKind {
            collection: string_at(collection, "name"),
            field:      string_at(field, "name"),
            kind,
        });
    }

    Ok(())
}

fn string_at(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null      => "null",
        Value::Bool(_)   => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_)  => "an array",
        Value::Object(_) => "an object",
    }
}
