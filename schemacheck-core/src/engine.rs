//! Schema loading and the validation engine.
//!
//! Schemas are compiled once per run against draft 2020-12 and shared
//! read-only by every check of that kind.

use crate::error::{CheckError, CheckResult, LoadError};
use crate::ports::CorpusSource;
use camino::{Utf8Path, Utf8PathBuf};
use schemacheck_types::{DocKind, InstancePath, Violation, sort_violations};
use serde_json::Value;
use tracing::debug;

/// A compiled schema bound to one document kind.
pub struct DocValidator {
    kind: DocKind,
    path: Utf8PathBuf,
    validator: jsonschema::Validator,
}

impl std::fmt::Debug for DocValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocValidator")
            .field("kind", &self.kind)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl DocValidator {
    /// Compiles an already-parsed schema document.
    pub fn compile(kind: DocKind, path: &Utf8Path, schema: &Value) -> CheckResult<Self> {
        let validator =
            jsonschema::draft202012::new(schema).map_err(|e| CheckError::SchemaCompile {
                kind,
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        Ok(Self {
            kind,
            path: path.to_path_buf(),
            validator,
        })
    }

    pub fn kind(&self) -> DocKind {
        self.kind
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Every violation of `instance`, ordered by location path.
    ///
    /// An empty vector means the instance conforms.
    pub fn check(&self, instance: &Value) -> Vec<Violation> {
        let mut violations: Vec<Violation> = self
            .validator
            .iter_errors(instance)
            .map(|err| {
                let path = InstancePath::from_pointer(err.instance_path().as_str(), instance);
                Violation::new(path, err.to_string())
            })
            .collect();
        sort_violations(&mut violations);
        violations
    }

    /// [`check`](Self::check), rendered as `<path>: <message>` strings.
    pub fn check_formatted(&self, instance: &Value) -> Vec<String> {
        self.check(instance).iter().map(ToString::to_string).collect()
    }
}

/// Reads and compiles the schema for `kind`.
///
/// Any failure is a configuration error.
pub fn load_schema(
    source: &dyn CorpusSource,
    kind: DocKind,
    path: &Utf8Path,
) -> CheckResult<DocValidator> {
    debug!(%kind, path = path.as_str(), "loading schema");
    let schema = source
        .load_json(path)
        .map_err(|source| CheckError::Configuration { kind, source })?;
    DocValidator::compile(kind, path, &schema)
}

/// Reads one fixture or example document.
pub fn load_document(source: &dyn CorpusSource, path: &Utf8Path) -> Result<Value, LoadError> {
    source.load_json(path)
}

/// The packet and patch validators for one run.
#[derive(Debug)]
pub struct Validators {
    pub packet: DocValidator,
    pub patch: DocValidator,
}

impl Validators {
    pub fn get(&self, kind: DocKind) -> &DocValidator {
        match kind {
            DocKind::Packet => &self.packet,
            DocKind::Patch => &self.patch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryCorpusSource;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn schema() -> Value {
        json!({
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "type": "object",
            "required": ["id"],
            "properties": {
                "id": { "type": "string" },
                "a": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": { "field": { "type": "string" } }
                    },
                    "maxItems": 1
                }
            }
        })
    }

    fn validator() -> DocValidator {
        DocValidator::compile(DocKind::Packet, Utf8Path::new("packet.schema.json"), &schema())
            .expect("compile")
    }

    #[test]
    fn conforming_instance_has_no_violations() {
        let v = validator();
        let doc = json!({"id": "x"});
        assert!(v.check(&doc).is_empty());
        assert!(v.check(&doc).is_empty());
    }

    #[test]
    fn root_violation_renders_without_slash() {
        let v = validator();
        let out = v.check_formatted(&json!({}));
        assert_eq!(out.len(), 1);
        assert!(out[0].starts_with(": "), "got {:?}", out[0]);
        assert!(out[0].contains("id"));
    }

    #[test]
    fn collects_all_violations_in_path_order() {
        let v = validator();
        let doc = json!({
            "a": [{"field": 1}, {"field": "ok"}]
        });
        let violations = v.check(&doc);
        let paths: Vec<String> = violations.iter().map(|v| v.path.to_string()).collect();
        assert_eq!(paths, vec!["", "/a", "/a/0/field"]);
    }

    #[test]
    fn repeated_checks_are_identical() {
        let v = validator();
        let doc = json!({"id": 3, "a": [{"field": 1}, {"field": 2}]});
        assert_eq!(v.check_formatted(&doc), v.check_formatted(&doc));
    }

    #[test]
    fn non_schema_is_compile_error() {
        let err = DocValidator::compile(
            DocKind::Patch,
            Utf8Path::new("patch.schema.json"),
            &json!({"type": 12}),
        )
        .unwrap_err();
        assert!(matches!(err, CheckError::SchemaCompile { kind: DocKind::Patch, .. }));
    }

    #[test]
    fn missing_schema_is_configuration_error() {
        let source = InMemoryCorpusSource::new();
        let err = load_schema(&source, DocKind::Packet, Utf8Path::new("nope.json")).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn malformed_schema_is_configuration_error() {
        let source = InMemoryCorpusSource::new().with_file("s.json", "{");
        let err = load_schema(&source, DocKind::Patch, Utf8Path::new("s.json")).unwrap_err();
        assert!(matches!(
            err,
            CheckError::Configuration {
                source: LoadError::Parse { .. },
                ..
            }
        ));
    }

    #[test]
    fn loaded_schema_keeps_kind_and_path() {
        let source = InMemoryCorpusSource::new().with_json("s.json", &schema());
        let v = load_schema(&source, DocKind::Patch, Utf8Path::new("s.json")).unwrap();
        assert_eq!(v.kind(), DocKind::Patch);
        assert_eq!(v.path().as_str(), "s.json");
    }
}
