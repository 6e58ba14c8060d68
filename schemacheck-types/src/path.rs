//! Location paths inside a JSON instance.

use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;

/// One step from a parent node to a child node.
///
/// Indices sort before keys when the two meet at the same depth.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Index(usize),
    Key(String),
}

impl Ord for PathSegment {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (PathSegment::Index(a), PathSegment::Index(b)) => a.cmp(b),
            (PathSegment::Key(a), PathSegment::Key(b)) => a.cmp(b),
            (PathSegment::Index(_), PathSegment::Key(_)) => Ordering::Less,
            (PathSegment::Key(_), PathSegment::Index(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for PathSegment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Index(i) => write!(f, "{i}"),
            PathSegment::Key(k) => f.write_str(k),
        }
    }
}

impl From<usize> for PathSegment {
    fn from(i: usize) -> Self {
        PathSegment::Index(i)
    }
}

impl From<&str> for PathSegment {
    fn from(k: &str) -> Self {
        PathSegment::Key(k.to_string())
    }
}

/// Root-to-leaf sequence of segments.
///
/// Ordering is lexicographic element by element; a strict prefix sorts first.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InstancePath(Vec<PathSegment>);

impl InstancePath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Builds a path from a JSON Pointer, resolving it against `instance`.
    ///
    /// A numeric token is an index only where the node it addresses is an
    /// array; inside objects it stays a key. Tokens that walk off the
    /// instance are kept as keys.
    pub fn from_pointer(pointer: &str, instance: &Value) -> Self {
        if pointer.is_empty() {
            return Self::root();
        }

        let mut node = Some(instance);
        let mut segments = Vec::new();
        for raw in pointer.split('/').skip(1) {
            let token = raw.replace("~1", "/").replace("~0", "~");
            match node {
                Some(Value::Array(items)) => match token.parse::<usize>() {
                    Ok(i) => {
                        node = items.get(i);
                        segments.push(PathSegment::Index(i));
                    }
                    Err(_) => {
                        node = None;
                        segments.push(PathSegment::Key(token));
                    }
                },
                Some(Value::Object(map)) => {
                    node = map.get(&token);
                    segments.push(PathSegment::Key(token));
                }
                _ => {
                    node = None;
                    segments.push(PathSegment::Key(token));
                }
            }
        }
        Self(segments)
    }
}

impl fmt::Display for InstancePath {
    /// Renders `/a/0/b`, or nothing at all for the root.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for seg in &self.0 {
            write!(f, "/{seg}")?;
        }
        Ok(())
    }
}
