//! pbts-compiler
//!
//! This crate implements:
//!  1) Identifier casing for generated names (`names`),
//!  2) The id -> collection index used for lookups and ordering (`index`),
//!  3) Field type resolution, including select enums (`resolver`),
//!  4) Interface and module generation (`gen_ts::generate_types` → `String`),
//!  5) A tokenizer + parser + printer that normalizes the generated text (`formatter`),
//!  6) Detection of colliding generated names (`verifier`),
//!  7) Error types (`CompileError`).

pub mod error;
pub mod types;
pub mod utils;
pub mod names;
pub mod index;
pub mod resolver;
pub mod tokenizer;
pub mod parser;
pub mod formatter;
pub mod verifier;
pub mod gen_ts;

pub use error::CompileError;
pub use formatter::format_declarations;
pub use gen_ts::{generate_collection_interface, generate_types, generate_types_from_json};
pub use index::{get_collection_map, CollectionEntry, CollectionIndex};
pub use names::{camel_case, pascal_case};
pub use resolver::{resolve_field_type, FieldContext};
