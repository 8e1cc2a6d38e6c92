//! This is a Rust library describing the collection schema of a PocketBase
//! instance, as returned by its `/api/collections` endpoint.
//!
//! ```
//! use pbts_schema::*;
//!
//! let collections = decode_collections(r#"[{
//!     "id": "c1",
//!     "name": "posts",
//!     "fields": [{ "name": "title", "type": "text", "required": true }]
//! }]"#).unwrap();
//!
//! assert_eq!(collections[0].name, "posts");
//! assert_eq!(collections[0].fields[0].field_type(), FieldType::Text);
//! assert_eq!(collections[0].fields[0].required(), Some(true));
//! ```

pub mod collection;
pub mod decode;
pub mod error;
pub mod field;

pub use collection::*;
pub use decode::*;
pub use error::SchemaError;
pub use field::*;
