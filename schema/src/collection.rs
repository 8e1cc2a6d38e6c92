use serde::{Deserialize, Serialize};

use crate::field::Field;

/// One collection record as returned by the collections API.
///
/// Only `id`, `name` and `fields` take part in type generation. Rules,
/// indexes and timestamps are carried so that a decoded list can be
/// written back out without losing information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id:          String,
    pub name:        String,
    #[serde(rename = "type", default)]
    pub kind:        CollectionKind,
    #[serde(default)]
    pub fields:      Vec<Field>,
    #[serde(default)]
    pub list_rule:   Option<String>,
    #[serde(default)]
    pub view_rule:   Option<String>,
    #[serde(default)]
    pub create_rule: Option<String>,
    #[serde(default)]
    pub update_rule: Option<String>,
    #[serde(default)]
    pub delete_rule: Option<String>,
    #[serde(default)]
    pub indexes:     Vec<String>,
    #[serde(default)]
    pub created:     String,
    #[serde(default)]
    pub updated:     String,
    #[serde(default)]
    pub system:      bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    #[default]
    Base,
    Auth,
    View,
}

impl Collection {
    /// Creates a base collection with the given fields and empty metadata.
    pub fn new(id: impl Into<String>, name: impl Into<String>, fields: Vec<Field>) -> Self {
        Collection {
            id:          id.into(),
            name:        name.into(),
            kind:        CollectionKind::Base,
            fields,
            list_rule:   None,
            view_rule:   None,
            create_rule: None,
            update_rule: None,
            delete_rule: None,
            indexes:     Vec::new(),
            created:     String::new(),
            updated:     String::new(),
            system:      false,
        }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }
}
