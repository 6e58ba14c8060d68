use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// The two document kinds the schemas describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocKind {
    Packet,
    Patch,
}

impl DocKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DocKind::Packet => "packet",
            DocKind::Patch => "patch",
        }
    }
}

impl fmt::Display for DocKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validation fixture.
///
/// `packet` and `patch` are `Some` whenever the key is present, even when its
/// value is `null`; presence is what triggers a check.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Fixture {
    #[serde(default, deserialize_with = "present")]
    pub packet: Option<Value>,

    #[serde(default, deserialize_with = "present")]
    pub patch: Option<Value>,

    #[serde(default)]
    pub expect: Expect,
}

/// Why a parsed JSON document cannot be read as a fixture.
#[derive(Debug, Error)]
pub enum FixtureShapeError {
    #[error("fixture must be a JSON object, found {0}")]
    NotAnObject(&'static str),

    #[error("fixture `expect` must be a JSON object, found {0}")]
    ExpectNotAnObject(&'static str),

    #[error("malformed fixture: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl TryFrom<Value> for Fixture {
    type Error = FixtureShapeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let Value::Object(map) = &value else {
            return Err(FixtureShapeError::NotAnObject(type_name(&value)));
        };
        if let Some(expect) = map.get("expect")
            && !expect.is_object()
        {
            return Err(FixtureShapeError::ExpectNotAnObject(type_name(expect)));
        }
        Ok(serde_json::from_value(value)?)
    }
}

impl Fixture {
    pub fn expected_valid(&self) -> bool {
        self.expect.is_valid()
    }

    /// Embedded documents in check order: packet, then patch.
    pub fn documents(&self) -> impl Iterator<Item = (DocKind, &Value)> {
        [
            (DocKind::Packet, self.packet.as_ref()),
            (DocKind::Patch, self.patch.as_ref()),
        ]
        .into_iter()
        .filter_map(|(kind, doc)| doc.map(|d| (kind, d)))
    }
}

/// The `expect` member of a fixture. Other keys are ignored.
///
/// `valid` is `Some(Value::Null)` for an explicit `null`, which is falsy.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Expect {
    #[serde(default, deserialize_with = "present")]
    pub valid: Option<Value>,
}

impl Expect {
    /// Absent means valid; otherwise JSON truthiness decides.
    pub fn is_valid(&self) -> bool {
        match &self.valid {
            None => true,
            Some(v) => truthy(v),
        }
    }
}

fn truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}
