//! Port traits abstracting all I/O away from the pipeline.

use crate::error::LoadError;
use camino::{Utf8Path, Utf8PathBuf};
use serde_json::Value;

/// Read-only access to schemas, fixtures, and examples.
pub trait CorpusSource {
    fn exists(&self, path: &Utf8Path) -> bool;

    /// Reads and parses one JSON document.
    fn load_json(&self, path: &Utf8Path) -> Result<Value, LoadError>;

    /// Files directly inside `dir` whose name matches the glob `pattern`,
    /// sorted by file name.
    fn list_files(&self, dir: &Utf8Path, pattern: &str) -> Result<Vec<Utf8PathBuf>, LoadError>;
}
