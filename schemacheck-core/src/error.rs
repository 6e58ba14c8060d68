//! Error types for schemacheck-core.
//!
//! Every error here aborts the run. Schema violations are not errors; they
//! are data, and become failures only through the fixture/example policies.
//! - Configuration errors: a schema cannot be read, parsed, or compiled
//! - Corpus errors: a fixture or example cannot be read or parsed, or the
//!   fixture directory cannot be listed

use camino::Utf8PathBuf;
use schemacheck_types::{DocKind, FixtureShapeError};
use thiserror::Error;

/// Exit code for a run that could not complete.
pub const EXIT_ABORTED: u8 = 2;

/// A document could not be loaded from the corpus source.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("read {path}: {source}")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse {path}: {source}")]
    Parse {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The fixture pattern is malformed or a directory entry is unreadable.
    #[error("discover {pattern}: {message}")]
    Discover { pattern: String, message: String },
}

/// A fatal error that stops the run before a report is produced.
#[derive(Debug, Error)]
pub enum CheckError {
    /// A schema file is missing, unreadable, or not JSON.
    #[error("configuration error: {kind} schema: {source}")]
    Configuration {
        kind: DocKind,
        #[source]
        source: LoadError,
    },

    /// A schema is well-formed JSON but not a usable draft 2020-12 schema.
    #[error("configuration error: {kind} schema {path} does not compile: {message}")]
    SchemaCompile {
        kind: DocKind,
        path: Utf8PathBuf,
        message: String,
    },

    /// A fixture or example is unreadable or malformed.
    #[error("corpus error: {0}")]
    Corpus(#[from] LoadError),

    /// A fixture parsed as JSON but does not have the fixture shape.
    #[error("corpus error: {path}: {source}")]
    FixtureShape {
        path: Utf8PathBuf,
        #[source]
        source: FixtureShapeError,
    },
}

impl CheckError {
    /// Returns true if the schemas themselves could not be loaded.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            CheckError::Configuration { .. } | CheckError::SchemaCompile { .. }
        )
    }

    /// Returns the recommended exit code for this error.
    ///
    /// Distinct from the `1` a completed run with failures returns.
    pub fn exit_code(&self) -> u8 {
        EXIT_ABORTED
    }
}

/// Result type alias using CheckError.
pub type CheckResult<T> = Result<T, CheckError>;
