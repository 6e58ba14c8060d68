//! Embeddable core library for schemacheck.
//!
//! Checks a corpus of validation fixtures and canonical examples against the
//! edit-packet and patch schemas, and decides which schema violations count
//! as run failures.
//!
//! # Port traits
//!
//! All I/O is abstracted behind [`CorpusSource`](ports::CorpusSource).
//! The [`adapters`] module provides a filesystem-backed implementation and an
//! in-memory one for embedding and tests.
//!
//! # Entry point
//!
//! - [`run_check`](pipeline::run_check) — load schemas, check every fixture
//!   and example, and return a [`CheckReport`](schemacheck_types::CheckReport)

pub mod adapters;
pub mod engine;
pub mod error;
pub mod pipeline;
pub mod policy;
pub mod ports;
pub mod settings;

pub use error::{CheckError, LoadError};
pub use pipeline::run_check;
pub use settings::{CheckSettings, ExampleEntry};
