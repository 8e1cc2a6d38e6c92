//! Layered configuration.
//!
//! Values come from, in decreasing precedence: explicit overrides (CLI flags
//! or library callers), the first config file found while walking up from
//! the working directory, and built-in defaults for the output paths.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::PbtsError;

/// Key under which `package.json` may carry the configuration.
pub const PACKAGE_JSON_KEY: &str = "pocketbase-schema";

/// File names checked in every directory, in order.
pub const SEARCH_PLACES: [&str; 8] = [
    "package.json",
    ".pocketbase-schemarc",
    ".pocketbase-schemarc.json",
    ".pocketbase-schemarc.yaml",
    ".pocketbase-schemarc.yml",
    ".pocketbase-schemarc.toml",
    "pocketbase-schema.config.json",
    "pocketbase-schema.config.toml",
];

pub const DEFAULT_BASE_PATH: &str = "src/lib";
pub const DEFAULT_SCHEMA_FILE: &str = "pb.schema.json";
pub const DEFAULT_TYPES_FILE: &str = "pb.types.ts";

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub url:      String,
    pub email:    String,
    pub password: String,
    pub schema:   OutputConfig,
    pub types:    OutputConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputConfig {
    pub output_path: PathBuf,
}

/// A configuration layer in which every value is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialConfig {
    pub url:      Option<String>,
    pub email:    Option<String>,
    pub password: Option<String>,
    pub schema:   Option<PartialOutputConfig>,
    pub types:    Option<PartialOutputConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialOutputConfig {
    pub output_path: Option<PathBuf>,
}

/// Explicit values, e.g. from command line flags. They win over everything.
pub type ConfigOverrides = PartialConfig;

/// A config file found on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveredConfig {
    pub path:   PathBuf,
    pub config: PartialConfig,
}

impl PartialConfig {
    /// Layers `self` over `lower`: values set in `self` win.
    pub fn merge(self, lower: PartialConfig) -> PartialConfig {
        PartialConfig {
            url:      self.url.or(lower.url),
            email:    self.email.or(lower.email),
            password: self.password.or(lower.password),
            schema:   merge_output(self.schema, lower.schema),
            types:    merge_output(self.types, lower.types),
        }
    }

    fn has_required(&self) -> bool {
        self.url.is_some() && self.email.is_some() && self.password.is_some()
    }

    fn output_path(output: &Option<PartialOutputConfig>) -> Option<&PathBuf> {
        output.as_ref().and_then(|o| o.output_path.as_ref())
    }
}

fn merge_output(upper: Option<PartialOutputConfig>, lower: Option<PartialOutputConfig>) -> Option<PartialOutputConfig> {
    match (upper, lower) {
        (Some(upper), Some(lower)) => Some(PartialOutputConfig {
            output_path: upper.output_path.or(lower.output_path),
        }),
        (upper, lower) => upper.or(lower),
    }
}

/// Fills in defaults and checks required values. Relative output paths are
/// taken relative to `cwd`.
pub fn resolve(layers: PartialConfig, cwd: &Path) -> Result<Config, PbtsError> {
    let schema_path = PartialConfig::output_path(&layers.schema)
        .cloned()
        .unwrap_or_else(|| Path::new(DEFAULT_BASE_PATH).join(DEFAULT_SCHEMA_FILE));
    let types_path = PartialConfig::output_path(&layers.types)
        .cloned()
        .unwrap_or_else(|| Path::new(DEFAULT_BASE_PATH).join(DEFAULT_TYPES_FILE));

    Ok(Config {
        url:      layers.url.ok_or(PbtsError::MissingConfig("url"))?,
        email:    layers.email.ok_or(PbtsError::MissingConfig("email"))?,
        password: layers.password.ok_or(PbtsError::MissingConfig("password"))?,
        schema:   OutputConfig { output_path: cwd.join(schema_path) },
        types:    OutputConfig { output_path: cwd.join(types_path) },
    })
}

/// Loads the configuration for a run.
///
/// `config_path` names a file explicitly; otherwise the search starts at
/// `cwd`. A missing file is only an error when the overrides alone do not
/// carry every required value.
pub fn load(overrides: ConfigOverrides, config_path: Option<&Path>, cwd: &Path) -> Result<Config, PbtsError> {
    let file = match config_path {
        Some(path) => {
            let path = cwd.join(path);
            let config = read_config_file(&path)?.ok_or_else(|| PbtsError::InvalidConfig {
                path: path.clone(),
                msg:  format!("no \"{}\" key", PACKAGE_JSON_KEY),
            })?;
            Some(DiscoveredConfig { path, config })
        }
        None => discover(cwd)?,
    };

    let layers = match file {
        Some(found) => {
            debug!("Using config file {}", found.path.display());
            overrides.merge(found.config)
        }
        None if overrides.has_required() => overrides,
        None => {
            return Err(PbtsError::ConfigNotFound {
                start: cwd.to_path_buf(),
            })
        }
    };

    resolve(layers, cwd)
}

/// Walks from `start` up to the filesystem root and returns the first
/// config file found.
pub fn discover(start: &Path) -> Result<Option<DiscoveredConfig>, PbtsError> {
    for dir in start.ancestors() {
        for place in SEARCH_PLACES {
            let path = dir.join(place);
            if !path.is_file() {
                continue;
            }
            if let Some(config) = read_config_file(&path)? {
                return Ok(Some(DiscoveredConfig { path, config }));
            }
        }
    }
    Ok(None)
}

/// Reads one config file. `Ok(None)` means a `package.json` without a
/// `pocketbase-schema` key, which the search skips.
pub fn read_config_file(path: &Path) -> Result<Option<PartialConfig>, PbtsError> {
    let text = fs::read_to_string(path).map_err(|source| PbtsError::File {
        path: path.to_path_buf(),
        source,
    })?;

    let file_name = path.file_name().and_then(|name| name.to_str()).unwrap_or_default();

    if file_name == "package.json" {
        let mut package: serde_json::Value = serde_json::from_str(&text)?;
        return match package.get_mut(PACKAGE_JSON_KEY) {
            Some(section) => Ok(Some(serde_json::from_value(section.take())?)),
            None => Ok(None),
        };
    }

    // The bare rc file may hold YAML or JSON; YAML parses both.
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => Ok(Some(toml::from_str(&text)?)),
        Some("yaml") | Some("yml") | None => Ok(Some(serde_yaml::from_str(&text)?)),
        _ => Ok(Some(serde_json::from_str(&text)?)),
    }
}
