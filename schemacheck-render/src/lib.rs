//! Rendering helpers for check reports.

use schemacheck_types::messages::{FAILURE_HEADER, SUCCESS};
use schemacheck_types::{CheckReport, CheckStatus, Failure};
use serde::Serialize;

/// The line-oriented report printed to stdout.
///
/// On success a single line; otherwise a header, a blank line, and one
/// `- <file>: <message>` line per failure in accumulation order.
pub fn render_text(report: &CheckReport) -> String {
    if report.failures.is_empty() {
        return format!("{SUCCESS}\n");
    }

    let mut out = String::new();
    out.push_str(FAILURE_HEADER);
    out.push_str("\n\n");
    for f in &report.failures {
        out.push_str(&format!("- {}: {}\n", f.file, f.message));
    }
    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    status: CheckStatus,
    fixtures_checked: u64,
    examples_checked: u64,
    examples_skipped: u64,
    failures: &'a [Failure],
}

pub fn render_json(report: &CheckReport) -> serde_json::Result<String> {
    let doc = JsonReport {
        status: report.status(),
        fixtures_checked: report.fixtures_checked,
        examples_checked: report.examples_checked,
        examples_skipped: report.examples_skipped,
        failures: &report.failures,
    };
    serde_json::to_string_pretty(&doc)
}
