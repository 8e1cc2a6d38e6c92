//! pbts
//!
//! This crate runs the generator against a live PocketBase instance:
//!
//! - layered configuration and config file discovery (`config`),
//! - an authenticated client for the collections API (`client`),
//! - writing the schema dump and the generated declarations (`output`),
//! - `run` / `regenerate`, which tie the steps together.

pub mod client;
pub mod config;
pub mod error;
pub mod output;

use pbts_compiler::{generate_types, generate_types_from_json};
use pbts_schema::decode_collections_value;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::info;

pub use client::PocketBaseClient;
pub use config::{Config, ConfigOverrides};
pub use error::PbtsError;

pub mod compiler {
    pub use pbts_compiler::{format_declarations, generate_collection_interface, generate_types, CompileError};
}

pub mod schema {
    pub use pbts_schema::{Collection, Field, FieldOptions, FieldType};
}

/// What a run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub collections: usize,
    pub schema_path: PathBuf,
    pub types_path:  PathBuf,
}

/// Fetches the collection list, writes it as JSON, then writes the
/// generated declarations.
///
/// The dump is written before decoding so that it is available for
/// inspection when generation fails.
pub async fn run(config: &Config) -> Result<Report, PbtsError> {
    let mut client = PocketBaseClient::new(&config.url)?;
    client.authenticate_superuser(&config.email, &config.password).await?;
    let raw = client.list_collections().await?;
    info!("Fetched {} collections from {}", raw.len(), config.url);

    output::write_json(&config.schema.output_path, &raw)?;
    info!("Wrote schema to {}", config.schema.output_path.display());

    let collections = decode_collections_value(Value::Array(raw))?;
    let types = generate_types(&collections)?;

    output::write_text(&config.types.output_path, &types)?;
    info!("Wrote types to {}", config.types.output_path.display());

    Ok(Report {
        collections: collections.len(),
        schema_path: config.schema.output_path.clone(),
        types_path:  config.types.output_path.clone(),
    })
}

/// Regenerates declarations from an existing schema dump. Writes them to
/// `destination` when given and returns them either way.
pub fn regenerate(input: &Path, destination: Option<&Path>) -> Result<String, PbtsError> {
    let text = output::read_text(input)?;
    let types = generate_types_from_json(&text)?;

    if let Some(path) = destination {
        output::write_text(path, &types)?;
        info!("Wrote types to {}", path.display());
    }
    Ok(types)
}
