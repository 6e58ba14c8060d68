//! Default port implementations.

use crate::error::LoadError;
use crate::ports::CorpusSource;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, warn};

fn compile_pattern(pattern: &str) -> Result<glob::Pattern, LoadError> {
    glob::Pattern::new(pattern).map_err(|e| LoadError::Discover {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

fn parse_json(path: &Utf8Path, contents: &str) -> Result<Value, LoadError> {
    serde_json::from_str(contents).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads the corpus from the local filesystem.
#[derive(Debug, Clone, Default)]
pub struct FsCorpusSource;

impl CorpusSource for FsCorpusSource {
    fn exists(&self, path: &Utf8Path) -> bool {
        path.exists()
    }

    fn load_json(&self, path: &Utf8Path) -> Result<Value, LoadError> {
        let contents = fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        parse_json(path, &contents)
    }

    fn list_files(&self, dir: &Utf8Path, pattern: &str) -> Result<Vec<Utf8PathBuf>, LoadError> {
        let matcher = compile_pattern(pattern)?;
        if !dir.is_dir() {
            warn!(dir = dir.as_str(), "fixture directory not found; no fixtures to check");
            return Ok(Vec::new());
        }
        let discover_err = |message: String| LoadError::Discover {
            pattern: dir.join(pattern).to_string(),
            message,
        };

        let mut out = Vec::new();
        for entry in fs::read_dir(dir).map_err(|e| discover_err(e.to_string()))? {
            let entry = entry.map_err(|e| discover_err(e.to_string()))?;
            let path = Utf8PathBuf::from_path_buf(entry.path())
                .map_err(|p| discover_err(format!("non-UTF-8 path {}", p.display())))?;
            let Some(name) = path.file_name() else {
                continue;
            };
            if !matcher.matches(name) {
                continue;
            }
            if !path.is_file() {
                debug!(path = path.as_str(), "skipping non-file match");
                continue;
            }
            out.push(path);
        }
        out.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(out)
    }
}

/// In-memory corpus for embedding and testing.
///
/// Holds raw document text keyed by path so that malformed JSON can be
/// represented as well as well-formed documents.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCorpusSource {
    files: BTreeMap<Utf8PathBuf, String>,
}

impl InMemoryCorpusSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<Utf8PathBuf>, contents: impl Into<String>) -> Self {
        self.insert(path, contents);
        self
    }

    pub fn with_json(self, path: impl Into<Utf8PathBuf>, value: &Value) -> Self {
        self.with_file(path, value.to_string())
    }

    pub fn insert(&mut self, path: impl Into<Utf8PathBuf>, contents: impl Into<String>) {
        self.files.insert(path.into(), contents.into());
    }
}

impl CorpusSource for InMemoryCorpusSource {
    fn exists(&self, path: &Utf8Path) -> bool {
        self.files.contains_key(path)
    }

    fn load_json(&self, path: &Utf8Path) -> Result<Value, LoadError> {
        let Some(contents) = self.files.get(path) else {
            return Err(LoadError::Read {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
            });
        };
        parse_json(path, contents)
    }

    fn list_files(&self, dir: &Utf8Path, pattern: &str) -> Result<Vec<Utf8PathBuf>, LoadError> {
        let matcher = compile_pattern(pattern)?;
        // BTreeMap order within one directory is file-name order.
        Ok(self
            .files
            .keys()
            .filter(|p| p.parent() == Some(dir))
            .filter(|p| p.file_name().is_some_and(|n| matcher.matches(n)))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn utf8_tempdir() -> (TempDir, Utf8PathBuf) {
        let td = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(td.path().to_path_buf()).expect("utf8 path");
        (td, root)
    }

    #[test]
    fn fs_lists_matching_files_in_name_order() {
        let (_td, root) = utf8_tempdir();
        for name in ["v10.json", "v2.json", "v1.json", "readme.json", "v3.txt"] {
            fs::write(root.join(name), "{}").unwrap();
        }
        fs::create_dir_all(root.join("v9.json")).unwrap();

        let files = FsCorpusSource.list_files(&root, "v*.json").unwrap();
        let names: Vec<&str> = files.iter().filter_map(|p| p.file_name()).collect();
        assert_eq!(names, vec!["v1.json", "v10.json", "v2.json"]);
    }

    #[test]
    fn fs_missing_directory_lists_nothing() {
        let (_td, root) = utf8_tempdir();
        let files = FsCorpusSource
            .list_files(&root.join("nope"), "v*.json")
            .unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn fs_malformed_json_is_parse_error() {
        let (_td, root) = utf8_tempdir();
        let path = root.join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        let err = FsCorpusSource.load_json(&path).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn fs_missing_file_is_read_error() {
        let (_td, root) = utf8_tempdir();
        let path = root.join("absent.json");
        assert!(!FsCorpusSource.exists(&path));
        let err = FsCorpusSource.load_json(&path).unwrap_err();
        assert!(matches!(err, LoadError::Read { .. }));
    }

    #[test]
    fn invalid_pattern_is_discover_error() {
        let err = InMemoryCorpusSource::new()
            .list_files(Utf8Path::new("fixtures"), "v[*.json")
            .unwrap_err();
        assert!(matches!(err, LoadError::Discover { .. }));
    }

    #[test]
    fn in_memory_lists_only_direct_children() {
        let source = InMemoryCorpusSource::new()
            .with_json("fx/v2.json", &json!({}))
            .with_json("fx/v1.json", &json!({}))
            .with_json("fx/nested/v0.json", &json!({}))
            .with_json("other/v0.json", &json!({}));
        let files = source.list_files(Utf8Path::new("fx"), "v*.json").unwrap();
        assert_eq!(
            files,
            vec![Utf8PathBuf::from("fx/v1.json"), Utf8PathBuf::from("fx/v2.json")]
        );
    }

    #[test]
    fn in_memory_round_trips_json() {
        let doc = json!({"v": 1});
        let source = InMemoryCorpusSource::new().with_json("a.json", &doc);
        assert!(source.exists(Utf8Path::new("a.json")));
        assert_eq!(source.load_json(Utf8Path::new("a.json")).unwrap(), doc);
    }
}
