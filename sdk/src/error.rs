use pbts_compiler::CompileError;
use pbts_schema::SchemaError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PbtsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("I/O error at {}: {source}", .path.display())]
    File {
        path:   PathBuf,
        source: std::io::Error,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("PocketBase responded with {status}: {message}")]
    Api {
        status:  u16,
        message: String,
    },

    #[error("config not found (searched upwards from {})", .start.display())]
    ConfigNotFound {
        start: PathBuf,
    },

    #[error("Invalid config in {}: {msg}", .path.display())]
    InvalidConfig {
        path: PathBuf,
        msg:  String,
    },

    #[error("Missing required config value \"{0}\"")]
    MissingConfig(&'static str),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Compile(#[from] CompileError),
}
