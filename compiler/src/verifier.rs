use pbts_schema::{Collection, FieldOptions};
use std::collections::HashMap;

use crate::{
    gen_ts::{COLLECTIONS_ENUM, COLLECTION_RECORD},
    names::{camel_case, pascal_case},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollisionScope {
    /// Top-level declaration names: collection interfaces, select enums and
    /// the fixed declarations of the module.
    Module,
    /// Member names inside one collection's interface.
    Collection(String),
}

/// A generated identifier produced by more than one source name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameCollision {
    pub scope:   CollisionScope,
    pub name:    String,
    pub sources: Vec<String>,
}

/// Finds generated identifiers that more than one source maps to.
///
/// Nothing is renamed; the caller decides whether to report the result.
/// Collisions are listed in the order their identifiers first appear.
pub fn find_name_collisions(collections: &[Collection]) -> Vec<NameCollision> {
    let mut collisions = Vec::new();

    // 1) Declaration names across the module
    let mut declarations = NameTable::default();
    declarations.insert(COLLECTIONS_ENUM.to_string(), COLLECTIONS_ENUM.to_string());
    declarations.insert(COLLECTION_RECORD.to_string(), COLLECTION_RECORD.to_string());
    for collection in collections {
        let type_name = pascal_case(&collection.name);
        for field in &collection.fields {
            if let FieldOptions::Select(_) = field.options {
                declarations.insert(
                    format!("{}{}", type_name, pascal_case(&field.name)),
                    format!("{}.{}", collection.name, field.name),
                );
            }
        }
        declarations.insert(type_name, collection.name.clone());
    }
    collisions.extend(declarations.collisions(CollisionScope::Module));

    // 2) Member names inside each interface
    for collection in collections {
        let mut members = NameTable::default();
        for field in &collection.fields {
            members.insert(camel_case(&field.name), field.name.clone());
        }
        collisions.extend(members.collisions(CollisionScope::Collection(collection.name.clone())));
    }

    collisions
}

#[derive(Default)]
struct NameTable {
    order:   Vec<String>,
    sources: HashMap<String, Vec<String>>,
}

impl NameTable {
    fn insert(&mut self, name: String, source: String) {
        match self.sources.get_mut(&name) {
            Some(sources) => sources.push(source),
            None => {
                self.order.push(name.clone());
                self.sources.insert(name, vec![source]);
            }
        }
    }

    fn collisions(mut self, scope: CollisionScope) -> Vec<NameCollision> {
        let mut out = Vec::new();
        for name in self.order {
            match self.sources.remove(&name) {
                Some(sources) if sources.len() > 1 => out.push(NameCollision {
                    scope: scope.clone(),
                    name,
                    sources,
                }),
                _ => {}
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pbts_schema::{Field, SelectOptions, TextOptions};

    fn text(name: &str) -> Field {
        Field::new(name, FieldOptions::Text(TextOptions::default()))
    }

    fn select(name: &str) -> Field {
        Field::new(name, FieldOptions::Select(SelectOptions::default()))
    }

    #[test]
    fn test_no_collisions() {
        let collections = vec![
            Collection::new("a", "posts", vec![text("title"), select("status")]),
            Collection::new("b", "users", vec![text("name")]),
        ];
        assert!(find_name_collisions(&collections).is_empty());
    }

    #[test]
    fn test_collection_type_names_collide() {
        let collections = vec![
            Collection::new("a", "blog_posts", Vec::new()),
            Collection::new("b", "blog-posts", Vec::new()),
        ];
        assert_eq!(
            find_name_collisions(&collections),
            vec![NameCollision {
                scope:   CollisionScope::Module,
                name:    "BlogPosts".into(),
                sources: vec!["blog_posts".into(), "blog-posts".into()],
            }]
        );
    }

    #[test]
    fn test_select_enum_collides_with_collection() {
        let collections = vec![
            Collection::new("a", "posts", vec![select("status")]),
            Collection::new("b", "posts_status", Vec::new()),
        ];
        let collisions = find_name_collisions(&collections);
        assert_eq!(collisions.len(), 1);
        assert_eq!(collisions[0].name, "PostsStatus");
        assert_eq!(collisions[0].sources, vec!["posts.status".to_string(), "posts_status".to_string()]);
    }

    #[test]
    fn test_reserved_declaration_names() {
        let collections = vec![Collection::new("a", "collections", Vec::new())];
        let collisions = find_name_collisions(&collections);
        assert_eq!(collisions[0].name, "Collections");
    }

    #[test]
    fn test_member_names_collide() {
        let collections = vec![Collection::new("a", "posts", vec![text("created_by"), text("createdBy")])];
        assert_eq!(
            find_name_collisions(&collections),
            vec![NameCollision {
                scope:   CollisionScope::Collection("posts".into()),
                name:    "createdBy".into(),
                sources: vec!["created_by".into(), "createdBy".into()],
            }]
        );
    }
}
