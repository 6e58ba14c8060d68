//! Configuration file loading for schemacheck.
//!
//! Discovers and loads `schemacheck.toml` from the repository root.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use schemacheck_core::{CheckSettings, ExampleEntry};
use schemacheck_types::DocKind;
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "schemacheck.toml";

/// Top-level configuration from schemacheck.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchemacheckConfig {
    /// Schema locations.
    pub schemas: SchemasConfig,

    /// Fixture discovery.
    pub fixtures: FixturesConfig,

    /// Example manifest. When set, replaces the built-in manifest.
    pub examples: Option<Vec<ExampleConfig>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchemasConfig {
    pub packet: Option<Utf8PathBuf>,
    pub patch: Option<Utf8PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FixturesConfig {
    pub dir: Option<Utf8PathBuf>,
    pub pattern: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExampleConfig {
    pub path: Utf8PathBuf,
    pub kind: DocKind,
}

/// Discover the schemacheck.toml config file.
///
/// Returns `None` if no config file is found.
pub fn discover_config(repo_root: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = repo_root.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a schemacheck.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<SchemacheckConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<SchemacheckConfig> {
    let config: SchemacheckConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from repo root, or return default if not found.
pub fn load_or_default(repo_root: &Utf8Path) -> anyhow::Result<SchemacheckConfig> {
    match discover_config(repo_root) {
        Some(path) => load_config(&path),
        None => Ok(SchemacheckConfig::default()),
    }
}

/// Path and pattern overrides given on the command line.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub packet_schema: Option<Utf8PathBuf>,
    pub patch_schema: Option<Utf8PathBuf>,
    pub fixtures_dir: Option<Utf8PathBuf>,
    pub fixture_pattern: Option<String>,
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: SchemacheckConfig,
}

impl ConfigMerger {
    pub fn new(config: SchemacheckConfig) -> Self {
        Self { config }
    }

    /// Produces run settings: CLI over config file over built-in defaults.
    pub fn merge(self, repo_root: Utf8PathBuf, cli: CliOverrides) -> CheckSettings {
        let defaults = CheckSettings::with_repo_root(repo_root);
        let SchemacheckConfig {
            schemas,
            fixtures,
            examples,
        } = self.config;

        let examples = match examples {
            Some(list) => list
                .into_iter()
                .map(|e| ExampleEntry::new(e.path, e.kind))
                .collect(),
            None => defaults.examples,
        };

        CheckSettings {
            packet_schema: cli
                .packet_schema
                .or(schemas.packet)
                .unwrap_or(defaults.packet_schema),
            patch_schema: cli
                .patch_schema
                .or(schemas.patch)
                .unwrap_or(defaults.patch_schema),
            fixtures_dir: cli
                .fixtures_dir
                .or(fixtures.dir)
                .unwrap_or(defaults.fixtures_dir),
            fixture_pattern: cli
                .fixture_pattern
                .or(fixtures.pattern)
                .unwrap_or(defaults.fixture_pattern),
            examples,
            repo_root: defaults.repo_root,
        }
    }
}
