//! Snapshot readers and format dispatch
//!
//! Ontology snapshots arrive as JSON or YAML documents. The `Reader` trait
//! parses one file into an [`OntologySnapshot`]; the registry picks a reader
//! from the file extension.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::model::OntologySnapshot;

/// Errors that can occur while reading a snapshot file
#[derive(Error, Debug)]
pub enum IoError {
    /// The file format is not supported
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The file extension could not be determined
    #[error("could not determine file format from path: {0}")]
    UnknownExtension(String),

    /// An I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A parsing error occurred
    #[error("parse error: {0}")]
    Parse(String),
}

/// Result type for snapshot reading
pub type IoResult<T> = Result<T, IoError>;

/// A reader parses one input format into an [`OntologySnapshot`]
pub trait Reader {
    /// Parse the input file into a snapshot
    fn read(&self, input: &Path) -> IoResult<OntologySnapshot>;

    /// File extensions this reader can handle (e.g., ["json"])
    fn supported_extensions(&self) -> &[&str];

    /// Check if this reader can handle the given file extension
    fn supports_extension(&self, ext: &str) -> bool {
        self.supported_extensions()
            .iter()
            .any(|e| e.eq_ignore_ascii_case(ext))
    }
}

/// Reader for JSON snapshot documents
pub struct JsonReader;

impl JsonReader {
    /// Create a new JSON reader
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonReader {
    fn default() -> Self {
        Self::new()
    }
}

impl Reader for JsonReader {
    fn read(&self, input: &Path) -> IoResult<OntologySnapshot> {
        let content = fs::read_to_string(input)?;
        let snapshot: OntologySnapshot =
            serde_json::from_str(&content).map_err(|e| IoError::Parse(e.to_string()))?;
        Ok(snapshot)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }
}

/// Reader for YAML snapshot documents
pub struct YamlReader;

impl YamlReader {
    /// Create a new YAML reader
    pub fn new() -> Self {
        Self
    }
}

impl Default for YamlReader {
    fn default() -> Self {
        Self::new()
    }
}

impl Reader for YamlReader {
    fn read(&self, input: &Path) -> IoResult<OntologySnapshot> {
        let content = fs::read_to_string(input)?;
        let snapshot: OntologySnapshot =
            serde_yaml::from_str(&content).map_err(|e| IoError::Parse(e.to_string()))?;
        Ok(snapshot)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }
}

/// Registry of available snapshot readers
pub struct SnapshotRegistry {
    readers: Vec<Box<dyn Reader>>,
}

impl Default for SnapshotRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl SnapshotRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            readers: Vec::new(),
        }
    }

    /// Create a registry with the JSON and YAML readers registered
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_reader(Box::new(JsonReader::new()));
        registry.register_reader(Box::new(YamlReader::new()));
        registry
    }

    /// Register a reader
    pub fn register_reader(&mut self, reader: Box<dyn Reader>) {
        self.readers.push(reader);
    }

    /// Find a reader for the given file extension
    pub fn reader_for_extension(&self, ext: &str) -> Option<&dyn Reader> {
        self.readers
            .iter()
            .find(|r| r.supports_extension(ext))
            .map(|r| r.as_ref())
    }

    /// Get file extension from a path
    pub fn extension_from_path(path: &Path) -> Option<&str> {
        path.extension().and_then(|e| e.to_str())
    }

    /// Find a reader for the given path based on its extension
    pub fn reader_for_path(&self, path: &Path) -> IoResult<&dyn Reader> {
        let ext = Self::extension_from_path(path)
            .ok_or_else(|| IoError::UnknownExtension(path.display().to_string()))?;

        self.reader_for_extension(ext)
            .ok_or_else(|| IoError::UnsupportedFormat(ext.to_string()))
    }

    /// Read a snapshot from the given path, picking a reader by extension
    pub fn read_snapshot(&self, path: &Path) -> IoResult<OntologySnapshot> {
        self.reader_for_path(path)?.read(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    #[test]
    fn readers_match_extensions_case_insensitively() {
        let json = JsonReader::new();
        assert!(json.supports_extension("json"));
        assert!(json.supports_extension("JSON"));
        assert!(!json.supports_extension("yaml"));

        let yaml = YamlReader::new();
        assert!(yaml.supports_extension("yaml"));
        assert!(yaml.supports_extension("YML"));
        assert!(!yaml.supports_extension("json"));
    }

    #[test]
    fn registry_dispatches_on_extension() {
        let registry = SnapshotRegistry::with_defaults();
        assert!(registry.reader_for_extension("json").is_some());
        assert!(registry.reader_for_extension("yaml").is_some());
        assert!(registry.reader_for_extension("ttl").is_none());
    }

    #[test]
    fn registry_rejects_unknown_extension() {
        let registry = SnapshotRegistry::with_defaults();
        let path = PathBuf::from("/some/path/snapshot.xyz");
        assert!(matches!(
            registry.reader_for_path(&path),
            Err(IoError::UnsupportedFormat(_))
        ));
        let bare = PathBuf::from("/some/path/snapshot");
        assert!(matches!(
            registry.reader_for_path(&bare),
            Err(IoError::UnknownExtension(_))
        ));
    }

    #[test]
    fn json_reader_parses_snapshot_file() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        write!(
            file,
            r#"{{"concepts": {{"http://example.org#a": {{"title": "http://example.org#a", "displayName": "A"}}}}}}"#
        )
        .unwrap();

        let registry = SnapshotRegistry::with_defaults();
        let snapshot = registry.read_snapshot(file.path()).unwrap();
        assert_eq!(snapshot.concepts.len(), 1);
        assert_eq!(
            snapshot.concepts["http://example.org#a"]
                .display_name
                .as_deref(),
            Some("A")
        );
    }

    #[test]
    fn yaml_reader_parses_snapshot_file() {
        let mut file = NamedTempFile::with_suffix(".yaml").unwrap();
        write!(
            file,
            "concepts:\n  'http://example.org#a':\n    title: 'http://example.org#a'\n    displayName: A\n"
        )
        .unwrap();

        let registry = SnapshotRegistry::with_defaults();
        let snapshot = registry.read_snapshot(file.path()).unwrap();
        assert_eq!(
            snapshot.concepts["http://example.org#a"]
                .display_name
                .as_deref(),
            Some("A")
        );
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        write!(file, "{{not json").unwrap();

        let registry = SnapshotRegistry::with_defaults();
        assert!(matches!(
            registry.read_snapshot(file.path()),
            Err(IoError::Parse(_))
        ));
    }

    #[test]
    fn io_error_display() {
        let err = IoError::UnsupportedFormat("xyz".to_string());
        assert_eq!(err.to_string(), "unsupported format: xyz");

        let err = IoError::Parse("invalid syntax".to_string());
        assert_eq!(err.to_string(), "parse error: invalid syntax");
    }
}
