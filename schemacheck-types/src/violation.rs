use crate::path::InstancePath;
use std::fmt;

/// One structural mismatch between an instance and a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: InstancePath,
    pub message: String,
}

impl Violation {
    pub fn new(path: InstancePath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    /// `<path>: <message>`; a root violation starts with `": "`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Orders violations by location path.
///
/// The sort is stable, so violations sharing a path keep discovery order.
pub fn sort_violations(violations: &mut [Violation]) {
    violations.sort_by(|a, b| a.path.cmp(&b.path));
}
