use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PbtsError;

fn file_error(path: &Path) -> impl FnOnce(std::io::Error) -> PbtsError + '_ {
    move |source| PbtsError::File {
        path: path.to_path_buf(),
        source,
    }
}

/// Creates the parent directory of `path` if needed.
pub fn ensure_dir_exists(path: &Path) -> Result<(), PbtsError> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir).map_err(file_error(dir)),
        _ => Ok(()),
    }
}

/// Writes `value` as JSON indented by two spaces.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), PbtsError> {
    let text = serde_json::to_string_pretty(value)?;
    write_text(path, &text)
}

pub fn write_text(path: &Path, text: &str) -> Result<(), PbtsError> {
    ensure_dir_exists(path)?;
    fs::write(path, text).map_err(file_error(path))
}

pub fn read_text(path: &Path) -> Result<String, PbtsError> {
    fs::read_to_string(path).map_err(file_error(path))
}

/// `path` relative to `base` when it lies below it, for log and CLI output.
pub fn display_path(path: &Path, base: &Path) -> PathBuf {
    path.strip_prefix(base).map(Path::to_path_buf).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("src").join("lib").join("pb.schema.json");

        write_json(&path, &serde_json::json!([{ "id": "c1" }])).unwrap();
        assert_eq!(read_text(&path).unwrap(), "[\n  {\n    \"id\": \"c1\"\n  }\n]");
    }

    #[test]
    fn test_display_path() {
        let base = Path::new("/work/app");
        assert_eq!(display_path(Path::new("/work/app/src/lib/pb.types.ts"), base), PathBuf::from("src/lib/pb.types.ts"));
        assert_eq!(display_path(Path::new("/elsewhere/x.ts"), base), PathBuf::from("/elsewhere/x.ts"));
    }

    #[test]
    fn test_read_missing_file_names_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.json");
        match read_text(&path).unwrap_err() {
            PbtsError::File { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("expected File error, got {:?}", other),
        }
    }
}
