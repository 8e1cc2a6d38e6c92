use serde::{Deserialize, Serialize};
use std::fmt;

/// A single field of a collection.
///
/// The attributes shared by every kind live on the struct itself, the
/// kind-specific ones in [`FieldOptions`], which is tagged by the `type` key
/// of the wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    #[serde(default)]
    pub id:          String,
    pub name:        String,
    #[serde(default)]
    pub system:      bool,
    #[serde(default)]
    pub hidden:      bool,
    #[serde(default)]
    pub presentable: bool,
    #[serde(flatten)]
    pub options:     FieldOptions,
}

/// The closed set of field kinds understood by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Text,
    Number,
    Password,
    Bool,
    Autodate,
    Email,
    File,
    Date,
    Relation,
    Select,
    Json,
}

pub const FIELD_TYPES: [FieldType; 11] = [
    FieldType::Text,
    FieldType::Number,
    FieldType::Password,
    FieldType::Bool,
    FieldType::Autodate,
    FieldType::Email,
    FieldType::File,
    FieldType::Date,
    FieldType::Relation,
    FieldType::Select,
    FieldType::Json,
];

impl FieldType {
    /// Looks up a kind by its wire tag, e.g. `"bool"`.
    pub fn from_tag(tag: &str) -> Option<FieldType> {
        FIELD_TYPES.iter().copied().find(|kind| kind.as_tag() == tag)
    }

    pub fn as_tag(self) -> &'static str {
        match self {
            FieldType::Text     => "text",
            FieldType::Number   => "number",
            FieldType::Password => "password",
            FieldType::Bool     => "bool",
            FieldType::Autodate => "autodate",
            FieldType::Email    => "email",
            FieldType::File     => "file",
            FieldType::Date     => "date",
            FieldType::Relation => "relation",
            FieldType::Select   => "select",
            FieldType::Json     => "json",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldOptions {
    Text(TextOptions),
    Number(NumberOptions),
    Password(PasswordOptions),
    Bool(BoolOptions),
    Autodate(AutodateOptions),
    Email(EmailOptions),
    File(FileOptions),
    Date(DateOptions),
    Relation(RelationOptions),
    Select(SelectOptions),
    Json(JsonOptions),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextOptions {
    pub autogenerate_pattern: String,
    pub max:                  u32,
    pub min:                  u32,
    pub pattern:              String,
    pub primary_key:          bool,
    pub required:             bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NumberOptions {
    pub max:      Option<f64>,
    pub min:      Option<f64>,
    pub only_int: bool,
    pub required: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PasswordOptions {
    pub cost:     u32,
    pub max:      u32,
    pub min:      u32,
    pub pattern:  String,
    pub required: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BoolOptions {
    pub required: bool,
}

/// Autodate fields are filled in by the server and have no `required` flag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AutodateOptions {
    pub on_create: bool,
    pub on_update: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmailOptions {
    pub except_domains: Option<Vec<String>>,
    pub only_domains:   Option<Vec<String>>,
    pub required:       bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FileOptions {
    pub max_select: u32,
    pub max_size:   u64,
    pub mime_types: Option<Vec<String>>,
    pub protected:  bool,
    pub required:   bool,
    pub thumbs:     Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DateOptions {
    pub max:      String,
    pub min:      String,
    pub required: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RelationOptions {
    pub cascade_delete: bool,
    pub collection_id:  String,
    pub max_select:     u32,
    pub min_select:     u32,
    pub required:       bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SelectOptions {
    pub values:     Vec<String>,
    pub max_select: u32,
    pub required:   bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JsonOptions {
    pub max_size: u64,
    pub required: bool,
}

impl Field {
    /// Creates a non-system field with an empty id.
    pub fn new(name: impl Into<String>, options: FieldOptions) -> Self {
        Field {
            id:          String::new(),
            name:        name.into(),
            system:      false,
            hidden:      false,
            presentable: false,
            options,
        }
    }

    pub fn field_type(&self) -> FieldType {
        match self.options {
            FieldOptions::Text(_)     => FieldType::Text,
            FieldOptions::Number(_)   => FieldType::Number,
            FieldOptions::Password(_) => FieldType::Password,
            FieldOptions::Bool(_)     => FieldType::Bool,
            FieldOptions::Autodate(_) => FieldType::Autodate,
            FieldOptions::Email(_)    => FieldType::Email,
            FieldOptions::File(_)     => FieldType::File,
            FieldOptions::Date(_)     => FieldType::Date,
            FieldOptions::Relation(_) => FieldType::Relation,
            FieldOptions::Select(_)   => FieldType::Select,
            FieldOptions::Json(_)     => FieldType::Json,
        }
    }

    /// The `required` flag, or `None` for kinds that do not carry one.
    pub fn required(&self) -> Option<bool> {
        match &self.options {
            FieldOptions::Text(o)     => Some(o.required),
            FieldOptions::Number(o)   => Some(o.required),
            FieldOptions::Password(o) => Some(o.required),
            FieldOptions::Bool(o)     => Some(o.required),
            FieldOptions::Autodate(_) => None,
            FieldOptions::Email(o)    => Some(o.required),
            FieldOptions::File(o)     => Some(o.required),
            FieldOptions::Date(o)     => Some(o.required),
            FieldOptions::Relation(o) => Some(o.required),
            FieldOptions::Select(o)   => Some(o.required),
            FieldOptions::Json(o)     => Some(o.required),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_round_trip_through_lookup() {
        for kind in FIELD_TYPES {
            assert_eq!(FieldType::from_tag(kind.as_tag()), Some(kind));
        }
        assert_eq!(FieldType::from_tag("boolean"), None);
        assert_eq!(FieldType::from_tag("geoPoint"), None);
    }

    #[test]
    fn test_deserialize_relation_field() {
        let field: Field = serde_json::from_str(
            r#"{
                "cascadeDelete": false,
                "collectionId": "_pb_users_auth_",
                "hidden": false,
                "id": "relation2375276105",
                "maxSelect": 1,
                "minSelect": 0,
                "name": "user",
                "presentable": false,
                "required": true,
                "system": false,
                "type": "relation"
            }"#,
        )
        .unwrap();

        assert_eq!(field.name, "user");
        assert_eq!(field.id, "relation2375276105");
        assert_eq!(field.field_type(), FieldType::Relation);
        assert_eq!(field.required(), Some(true));
        match field.options {
            FieldOptions::Relation(ref o) => {
                assert_eq!(o.collection_id, "_pb_users_auth_");
                assert_eq!(o.max_select, 1);
            }
            ref other => panic!("expected relation options, got {:?}", other),
        }
    }

    #[test]
    fn test_autodate_has_no_required_flag() {
        let field: Field = serde_json::from_str(
            r#"{ "name": "created", "type": "autodate", "onCreate": true, "onUpdate": false, "system": true }"#,
        )
        .unwrap();
        assert!(field.system);
        assert_eq!(field.required(), None);
    }

    #[test]
    fn test_nullable_attributes_accept_null() {
        let field: Field = serde_json::from_str(
            r#"{ "name": "avatar", "type": "file", "maxSelect": 1, "mimeTypes": null, "thumbs": null }"#,
        )
        .unwrap();
        match field.options {
            FieldOptions::File(ref o) => {
                assert_eq!(o.mime_types, None);
                assert!(!o.required);
            }
            ref other => panic!("expected file options, got {:?}", other),
        }

        let number: Field =
            serde_json::from_str(r#"{ "name": "n", "type": "number", "max": null, "min": 1 }"#).unwrap();
        assert_eq!(
            number.options,
            FieldOptions::Number(NumberOptions { max: None, min: Some(1.0), only_int: false, required: false })
        );
    }

    #[test]
    fn test_serialize_keeps_wire_tag() {
        let field = Field::new("done", FieldOptions::Bool(BoolOptions { required: false }));
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["type"], "bool");
        assert_eq!(json["name"], "done");
    }
}
