use std::{collections::BTreeMap, fmt};

use serde::{Serialize, Serializer};
use serde_json::Number;

/// A single entry of a flattened translation tree.
///
/// Primitive JSON values are stored as-is. Objects and arrays leave a
/// structural marker at their own path, so shape comparisons between two
/// trees never need to walk the original JSON again.
#[derive(Debug, Clone, PartialEq)]
pub enum FlatValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    /// Marker for a JSON object: `"Object"`.
    Object,
    /// Marker for a JSON array of the given length: `"Array:<len>"`.
    Array(usize),
}

impl FlatValue {
    /// Returns true unless this is an `Object` or `Array` marker.
    pub fn is_leaf(&self) -> bool {
        !self.is_structural()
    }

    pub fn is_structural(&self) -> bool {
        matches!(self, FlatValue::Object | FlatValue::Array(_))
    }

    /// Short kind name used in structural mismatch messages.
    pub fn kind(&self) -> &'static str {
        match self {
            FlatValue::Null => "null",
            FlatValue::Bool(_) => "boolean",
            FlatValue::Number(_) => "number",
            FlatValue::String(_) => "string",
            FlatValue::Object => "object",
            FlatValue::Array(_) => "array",
        }
    }
}

impl fmt::Display for FlatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlatValue::Null => write!(f, "null"),
            FlatValue::Bool(b) => write!(f, "{}", b),
            FlatValue::Number(n) => write!(f, "{}", n),
            FlatValue::String(s) => write!(f, "{}", s),
            FlatValue::Object => write!(f, "Object"),
            FlatValue::Array(len) => write!(f, "Array:{}", len),
        }
    }
}

impl Serialize for FlatValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FlatValue::Null => serializer.serialize_none(),
            FlatValue::Bool(b) => serializer.serialize_bool(*b),
            FlatValue::Number(n) => n.serialize(serializer),
            FlatValue::String(s) => serializer.serialize_str(s),
            FlatValue::Object | FlatValue::Array(_) => serializer.collect_str(self),
        }
    }
}

/// Dotted path (`greenhouse.items[0].label`) to flattened value.
///
/// Ordered so that reports built from it are deterministic.
pub type FlatKeyMap = BTreeMap<String, FlatValue>;

/// Iterate the leaf paths of a flattened map, in order.
pub fn leaf_paths(map: &FlatKeyMap) -> impl Iterator<Item = &str> {
    map.iter()
        .filter(|(_, value)| value.is_leaf())
        .map(|(path, _)| path.as_str())
}
