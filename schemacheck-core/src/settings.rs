//! Clap-free settings for the check pipeline.

use camino::{Utf8Path, Utf8PathBuf};
use schemacheck_types::DocKind;

pub const DEFAULT_PACKET_SCHEMA: &str = "spec/schemas/bdir-edit-packet.ultra-min.v1.schema.json";
pub const DEFAULT_PATCH_SCHEMA: &str = "spec/schemas/ai-patch.schema.json";
pub const DEFAULT_FIXTURES_DIR: &str = "spec/fixtures/validation";
pub const DEFAULT_FIXTURE_PATTERN: &str = "v*.json";
pub const DEFAULT_EXAMPLES_DIR: &str = "spec/examples";

/// One canonical example document and the kind of document it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleEntry {
    pub path: Utf8PathBuf,
    pub kind: DocKind,
}

impl ExampleEntry {
    pub fn new(path: impl Into<Utf8PathBuf>, kind: DocKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

/// Settings for a check run. Relative paths resolve against `repo_root`.
#[derive(Debug, Clone)]
pub struct CheckSettings {
    pub repo_root: Utf8PathBuf,
    pub packet_schema: Utf8PathBuf,
    pub patch_schema: Utf8PathBuf,
    pub fixtures_dir: Utf8PathBuf,
    pub fixture_pattern: String,
    pub examples: Vec<ExampleEntry>,
}

impl Default for CheckSettings {
    fn default() -> Self {
        Self {
            repo_root: Utf8PathBuf::from("."),
            packet_schema: Utf8PathBuf::from(DEFAULT_PACKET_SCHEMA),
            patch_schema: Utf8PathBuf::from(DEFAULT_PATCH_SCHEMA),
            fixtures_dir: Utf8PathBuf::from(DEFAULT_FIXTURES_DIR),
            fixture_pattern: DEFAULT_FIXTURE_PATTERN.to_string(),
            examples: default_examples(),
        }
    }
}

impl CheckSettings {
    pub fn with_repo_root(repo_root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
            ..Self::default()
        }
    }

    pub fn resolve(&self, path: &Utf8Path) -> Utf8PathBuf {
        self.repo_root.join(path)
    }

    pub fn schema_path(&self, kind: DocKind) -> &Utf8Path {
        match kind {
            DocKind::Packet => &self.packet_schema,
            DocKind::Patch => &self.patch_schema,
        }
    }

    /// Examples in check order: packets first, then patches, each group in
    /// declared order.
    pub fn ordered_examples(&self) -> Vec<&ExampleEntry> {
        let mut out: Vec<&ExampleEntry> = self.examples.iter().collect();
        out.sort_by_key(|e| e.kind);
        out
    }

    /// Renders `path` relative to the repo root with `/` separators.
    pub fn display_path(&self, path: &Utf8Path) -> String {
        let rel = path.strip_prefix(&self.repo_root).unwrap_or(path);
        rel.as_str().replace('\\', "/")
    }
}

/// The reference example manifest.
pub fn default_examples() -> Vec<ExampleEntry> {
    let dir = Utf8Path::new(DEFAULT_EXAMPLES_DIR);
    let mut out = vec![ExampleEntry::new(
        dir.join("edit-packet.min.json"),
        DocKind::Packet,
    )];
    for name in [
        "patch.example.json",
        "patch.min.example.json",
        "patch.suggest.example.json",
        "patch.suggest.min.example.json",
    ] {
        out.push(ExampleEntry::new(dir.join(name), DocKind::Patch));
    }
    out
}
