use pbts_schema::{decode_collections, Collection};
use tracing::{debug, warn};

use crate::{
    error::CompileError,
    formatter::format_declarations,
    index::CollectionIndex,
    resolver::{generate_field_member, FieldContext},
    utils::quote,
    verifier::{find_name_collisions, CollisionScope},
};

/// Name of the enum mapping generated type names to collection names.
pub const COLLECTIONS_ENUM: &str = "Collections";

/// Name of the interface every collection interface extends.
pub const COLLECTION_RECORD: &str = "CollectionRecord";

/// Compiles a collection list into one formatted TypeScript module.
///
/// The module holds, in order: the `Collections` enum, the
/// `CollectionRecord` interface, one interface per collection in input
/// order, then the enums of all select fields in the order they were met.
pub fn generate_types(collections: &[Collection]) -> Result<String, CompileError> {
    for collision in find_name_collisions(collections) {
        match collision.scope {
            CollisionScope::Module => warn!(
                "Generated type name {} is shared by {}",
                collision.name,
                collision.sources.join(", ")
            ),
            CollisionScope::Collection(ref collection) => warn!(
                "Member {} of collection {} is shared by fields {}",
                collision.name,
                collection,
                collision.sources.join(", ")
            ),
        }
    }

    let index = CollectionIndex::build(collections);
    let mut side_definitions: Vec<String> = Vec::new();
    let mut interfaces = Vec::with_capacity(collections.len());

    for collection in collections {
        interfaces.push(generate_collection_interface(&collection.id, &index, &mut side_definitions)?);
    }

    let mut blocks = vec![generate_collections_enum(&index), generate_collection_record()];
    blocks.extend(interfaces);
    blocks.extend(side_definitions);

    format_declarations(&blocks.join("\n\n"))
}

/// Decodes a JSON collection list and compiles it.
pub fn generate_types_from_json(text: &str) -> Result<String, CompileError> {
    let collections = decode_collections(text)?;
    generate_types(&collections)
}

/// Generates the interface of one collection. Enums of its select fields
/// are appended to `side_definitions`.
pub fn generate_collection_interface(
    id: &str,
    index: &CollectionIndex<'_>,
    side_definitions: &mut Vec<String>,
) -> Result<String, CompileError> {
    let entry = index
        .get(id)
        .ok_or_else(|| CompileError::UnresolvedCollection { id: id.to_string() })?;

    debug!(
        "Generating interface {} for collection {} ({} fields)",
        entry.type_name,
        quote(&entry.collection.name),
        entry.collection.fields.len()
    );

    let ctx = FieldContext {
        index,
        type_name: &entry.type_name,
    };
    let members: Vec<String> = entry
        .collection
        .fields
        .iter()
        .map(|field| format!("  {}", generate_field_member(field, &ctx, side_definitions)))
        .collect();

    Ok(format!(
        "export interface {} extends {} {{\n{}\n}}",
        entry.type_name,
        COLLECTION_RECORD,
        members.join("\n")
    ))
}

fn generate_collections_enum(index: &CollectionIndex<'_>) -> String {
    let members: Vec<String> = index
        .iter()
        .map(|entry| format!("  {} = {},", entry.type_name, quote(&entry.collection.name)))
        .collect();
    format!("export enum {} {{\n{}\n}}", COLLECTIONS_ENUM, members.join("\n"))
}

fn generate_collection_record() -> String {
    format!(
        "export interface {} {{\n  collectionId: string;\n  collectionName: string;\n}}",
        COLLECTION_RECORD
    )
}
