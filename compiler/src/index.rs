use pbts_schema::Collection;
use std::collections::HashMap;

use crate::names::pascal_case;

/// A collection together with the name of its generated declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionEntry<'a> {
    pub type_name:  String,
    pub collection: &'a Collection,
}

/// Maps collection ids to their entries, remembering insertion order.
///
/// Built once per generation run and never mutated afterwards. Entries that
/// share a generated type name are kept side by side; see
/// [`crate::verifier::find_name_collisions`].
#[derive(Debug, Clone, Default)]
pub struct CollectionIndex<'a> {
    entries: Vec<CollectionEntry<'a>>,
    by_id:   HashMap<&'a str, usize>,
}

impl<'a> CollectionIndex<'a> {
    pub fn build(collections: &'a [Collection]) -> Self {
        let mut index = CollectionIndex {
            entries: Vec::with_capacity(collections.len()),
            by_id:   HashMap::with_capacity(collections.len()),
        };

        for collection in collections {
            let entry = CollectionEntry {
                type_name: pascal_case(&collection.name),
                collection,
            };
            // A repeated id replaces the earlier entry but keeps its position.
            match index.by_id.get(collection.id.as_str()) {
                Some(&position) => index.entries[position] = entry,
                None => {
                    index.by_id.insert(collection.id.as_str(), index.entries.len());
                    index.entries.push(entry);
                }
            }
        }

        index
    }

    pub fn get(&self, id: &str) -> Option<&CollectionEntry<'a>> {
        self.by_id.get(id).map(|&position| &self.entries[position])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CollectionEntry<'a>> {
        self.entries.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.collection.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builds the id -> entry index for a collection list.
pub fn get_collection_map(collections: &[Collection]) -> CollectionIndex<'_> {
    CollectionIndex::build(collections)
}
