//! Pass/fail policy for fixtures and examples.
//!
//! Fixtures declare whether they are expected to be schema-valid; only
//! fixtures expected to be valid turn violations into failures. Examples are
//! canonical documents and every violation is a failure.

use crate::engine::{Validators, load_document};
use crate::error::{CheckError, CheckResult, LoadError};
use crate::ports::CorpusSource;
use camino::Utf8Path;
use schemacheck_types::{DocKind, Failure, Fixture};
use tracing::debug;

/// Failures contributed by one fixture.
///
/// Each failure message is `<kind><path>: <message>`, e.g. `packet/blocks/0: ...`.
pub fn evaluate_fixture(validators: &Validators, file: &str, fixture: &Fixture) -> Vec<Failure> {
    let expected_valid = fixture.expected_valid();
    let mut failures = Vec::new();

    for (kind, doc) in fixture.documents() {
        let violations = validators.get(kind).check(doc);
        if !expected_valid {
            debug!(
                file,
                %kind,
                tolerated = violations.len(),
                "fixture expects invalid; violations not counted"
            );
            continue;
        }
        failures.extend(
            violations
                .iter()
                .map(|v| Failure::new(file, format!("{kind}{v}"))),
        );
    }

    failures
}

/// Loads the fixture at `path` and evaluates it.
///
/// Unreadable, malformed, or wrongly shaped fixtures abort the run.
pub fn check_fixture(
    source: &dyn CorpusSource,
    validators: &Validators,
    path: &Utf8Path,
    file: &str,
) -> CheckResult<Vec<Failure>> {
    let value = load_document(source, path)?;
    let fixture = Fixture::try_from(value).map_err(|e| CheckError::FixtureShape {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(evaluate_fixture(validators, file, &fixture))
}

/// What happened to one example manifest entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExampleOutcome {
    /// The file does not exist; examples are optional.
    Skipped,
    Checked(Vec<Failure>),
}

/// Checks the example at `path` against the validator for `kind`.
///
/// A missing file is skipped. A present but unreadable or malformed file is
/// an error.
pub fn evaluate_example(
    source: &dyn CorpusSource,
    validators: &Validators,
    path: &Utf8Path,
    file: &str,
    kind: DocKind,
) -> Result<ExampleOutcome, LoadError> {
    if !source.exists(path) {
        debug!(file, "example not present; skipping");
        return Ok(ExampleOutcome::Skipped);
    }

    let doc = load_document(source, path)?;
    let failures = validators
        .get(kind)
        .check(&doc)
        .iter()
        .map(|v| Failure::new(file, v.to_string()))
        .collect();
    Ok(ExampleOutcome::Checked(failures))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryCorpusSource;
    use crate::engine::DocValidator;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    fn validators() -> Validators {
        let packet = json!({
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "type": "object",
            "required": ["block_id"],
            "properties": { "block_id": { "type": "string" } }
        });
        let patch = json!({
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "type": "object",
            "required": ["ops"],
            "properties": { "ops": { "type": "array" } }
        });
        Validators {
            packet: DocValidator::compile(DocKind::Packet, Utf8Path::new("packet.json"), &packet)
                .unwrap(),
            patch: DocValidator::compile(DocKind::Patch, Utf8Path::new("patch.json"), &patch)
                .unwrap(),
        }
    }

    fn fixture(v: Value) -> Fixture {
        Fixture::try_from(v).unwrap()
    }

    #[test]
    fn tolerant_fixture_yields_no_failures() {
        let f = fixture(json!({"packet": {}, "expect": {"valid": false}}));
        assert!(evaluate_fixture(&validators(), "v1.json", &f).is_empty());
    }

    #[test]
    fn strict_fixture_yields_failures() {
        let f = fixture(json!({"packet": {}, "expect": {"valid": true}}));
        let failures = evaluate_fixture(&validators(), "v1.json", &f);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].file, "v1.json");
        assert!(failures[0].message.starts_with("packet: "));
        assert!(failures[0].message.contains("block_id"));
    }

    #[test]
    fn default_expectation_is_valid() {
        let ok = fixture(json!({"packet": {"block_id": "b1"}}));
        assert!(evaluate_fixture(&validators(), "v1.json", &ok).is_empty());

        let bad = fixture(json!({"packet": {"block_id": 7}}));
        let failures = evaluate_fixture(&validators(), "v1.json", &bad);
        assert_eq!(failures.len(), 1);
        assert!(failures[0].message.starts_with("packet/block_id: "));
    }

    #[test]
    fn packet_failures_precede_patch_failures() {
        let f = fixture(json!({"patch": {}, "packet": {}}));
        let failures = evaluate_fixture(&validators(), "v2.json", &f);
        let prefixes: Vec<&str> = failures
            .iter()
            .map(|f| f.message.split(':').next().unwrap())
            .collect();
        assert_eq!(prefixes, vec!["packet", "patch"]);
    }

    #[test]
    fn fixture_without_documents_contributes_nothing() {
        let f = fixture(json!({"expect": {"valid": true}}));
        assert!(evaluate_fixture(&validators(), "v3.json", &f).is_empty());
    }

    #[test]
    fn null_packet_is_checked() {
        let f = fixture(json!({"packet": null}));
        let failures = evaluate_fixture(&validators(), "v4.json", &f);
        assert!(!failures.is_empty());
        assert!(failures[0].message.starts_with("packet: "));
    }

    #[test]
    fn malformed_fixture_is_corpus_error() {
        let source = InMemoryCorpusSource::new().with_file("fx/v1.json", "{\"packet\":");
        let err = check_fixture(&source, &validators(), Utf8Path::new("fx/v1.json"), "fx/v1.json")
            .unwrap_err();
        assert!(matches!(err, CheckError::Corpus(LoadError::Parse { .. })));
    }

    #[test]
    fn non_object_fixture_is_shape_error() {
        let source = InMemoryCorpusSource::new().with_json("fx/v1.json", &json!([]));
        let err = check_fixture(&source, &validators(), Utf8Path::new("fx/v1.json"), "fx/v1.json")
            .unwrap_err();
        assert!(matches!(err, CheckError::FixtureShape { .. }));
    }

    #[test]
    fn missing_example_is_skipped() {
        let source = InMemoryCorpusSource::new();
        let outcome = evaluate_example(
            &source,
            &validators(),
            Utf8Path::new("ex/patch.example.json"),
            "ex/patch.example.json",
            DocKind::Patch,
        )
        .unwrap();
        assert_eq!(outcome, ExampleOutcome::Skipped);
    }

    #[test]
    fn invalid_example_always_fails_without_kind_prefix() {
        // An `expect` member has no effect on examples.
        let source = InMemoryCorpusSource::new()
            .with_json("ex/patch.json", &json!({"expect": {"valid": false}}));
        let outcome = evaluate_example(
            &source,
            &validators(),
            Utf8Path::new("ex/patch.json"),
            "ex/patch.json",
            DocKind::Patch,
        )
        .unwrap();
        let ExampleOutcome::Checked(failures) = outcome else {
            panic!("expected a checked outcome");
        };
        assert_eq!(failures.len(), 1);
        assert!(failures[0].message.starts_with(": "));
        assert!(failures[0].message.contains("ops"));
    }

    #[test]
    fn malformed_example_is_error() {
        let source = InMemoryCorpusSource::new().with_file("ex/packet.json", "nope");
        let err = evaluate_example(
            &source,
            &validators(),
            Utf8Path::new("ex/packet.json"),
            "ex/packet.json",
            DocKind::Packet,
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }
}
