//! Shared data model for the schemacheck workspace.
//!
//! # Design constraints
//! - Values are immutable once constructed; policies return fresh values.
//! - Ordering and rendering of violations must be stable across runs.
//! - `CheckReport` is serialized for the JSON output format; prefer adding
//!   optional fields over changing semantics.

pub mod failure;
pub mod fixture;
pub mod path;
pub mod violation;

pub use failure::{CheckReport, CheckStatus, Failure};
pub use fixture::{DocKind, Expect, Fixture, FixtureShapeError};
pub use path::{InstancePath, PathSegment};
pub use violation::{Violation, sort_violations};

/// Messages printed by the text report.
pub mod messages {
    pub const SUCCESS: &str = "OK: fixtures and examples validate against schemas";
    pub const FAILURE_HEADER: &str = "Schema validation failures:";
}
