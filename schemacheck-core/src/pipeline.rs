//! The check pipeline: load schemas, check fixtures, check examples.
//!
//! A run either completes with a [`CheckReport`] (which may carry failures)
//! or aborts with a [`CheckError`]. Nothing is retried.

use crate::engine::{Validators, load_schema};
use crate::error::CheckResult;
use crate::policy::{ExampleOutcome, check_fixture, evaluate_example};
use crate::ports::CorpusSource;
use crate::settings::CheckSettings;
use schemacheck_types::{CheckReport, DocKind};
use tracing::{debug, info};

/// Loads and compiles both schemas.
pub fn load_validators(
    settings: &CheckSettings,
    source: &dyn CorpusSource,
) -> CheckResult<Validators> {
    let packet = load_schema(
        source,
        DocKind::Packet,
        &settings.resolve(settings.schema_path(DocKind::Packet)),
    )?;
    let patch = load_schema(
        source,
        DocKind::Patch,
        &settings.resolve(settings.schema_path(DocKind::Patch)),
    )?;
    Ok(Validators { packet, patch })
}

/// Runs a full check and returns the report.
pub fn run_check(settings: &CheckSettings, source: &dyn CorpusSource) -> CheckResult<CheckReport> {
    let validators = load_validators(settings, source)?;
    let mut report = CheckReport::default();

    let fixtures_dir = settings.resolve(&settings.fixtures_dir);
    let fixtures = source.list_files(&fixtures_dir, &settings.fixture_pattern)?;
    debug!(
        dir = fixtures_dir.as_str(),
        count = fixtures.len(),
        "discovered fixtures"
    );

    for path in &fixtures {
        let file = settings.display_path(path);
        debug!(file = file.as_str(), "checking fixture");
        let failures = check_fixture(source, &validators, path, &file)?;
        report.fixtures_checked += 1;
        report.failures.extend(failures);
    }

    for entry in settings.ordered_examples() {
        let path = settings.resolve(&entry.path);
        let file = settings.display_path(&path);
        match evaluate_example(source, &validators, &path, &file, entry.kind)? {
            ExampleOutcome::Skipped => report.examples_skipped += 1,
            ExampleOutcome::Checked(failures) => {
                debug!(file = file.as_str(), kind = %entry.kind, "checked example");
                report.examples_checked += 1;
                report.failures.extend(failures);
            }
        }
    }

    info!(
        fixtures = report.fixtures_checked,
        examples = report.examples_checked,
        skipped = report.examples_skipped,
        failures = report.failures.len(),
        "check complete"
    );
    Ok(report)
}
