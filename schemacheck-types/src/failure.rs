use serde::{Deserialize, Serialize};

/// A run-level problem: the file it came from and what was wrong.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    /// Repo-relative path, `/`-separated.
    pub file: String,
    pub message: String,
}

impl Failure {
    pub fn new(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Pass,
    Fail,
}

/// Outcome of a completed run.
///
/// `failures` is kept in accumulation order: fixtures in filename order, then
/// examples in manifest order. It is never deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckReport {
    pub fixtures_checked: u64,
    pub examples_checked: u64,
    pub examples_skipped: u64,
    pub failures: Vec<Failure>,
}

impl CheckReport {
    pub fn status(&self) -> CheckStatus {
        if self.failures.is_empty() {
            CheckStatus::Pass
        } else {
            CheckStatus::Fail
        }
    }

    pub fn is_pass(&self) -> bool {
        self.status() == CheckStatus::Pass
    }

    /// `0` when nothing failed, `1` otherwise.
    pub fn exit_code(&self) -> u8 {
        match self.status() {
            CheckStatus::Pass => 0,
            CheckStatus::Fail => 1,
        }
    }
}
