//! Node identifiers
//!
//! A [`Key`] is either an integer or a string. The two variants never
//! compare equal, so `1` and `"1"` are distinct keys.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a tree node, unique within one tree
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    /// Integer identifier
    Int(i64),
    /// String identifier
    Str(String),
}

impl Key {
    /// Borrow the string form, if this is a string key
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            Self::Int(_) => None,
        }
    }

    /// Integer form, if this is an integer key
    #[inline]
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Str(_) => None,
        }
    }

    /// Convert a JSON scalar into a key
    ///
    /// Accepts strings and integral numbers; everything else yields `None`.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) => Some(Self::Str(s.clone())),
            serde_json::Value::Number(n) => n.as_i64().map(Self::Int),
            _ => None,
        }
    }

    /// JSON scalar form of this key
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Int(n) => serde_json::Value::from(*n),
            Self::Str(s) => serde_json::Value::String(s.clone()),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for Key {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for Key {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_and_string_keys_are_distinct() {
        assert_ne!(Key::from(1), Key::from("1"));
        assert_eq!(Key::from(1).to_string(), Key::from("1").to_string());
    }

    #[test]
    fn key_deserializes_untagged() {
        let keys: Vec<Key> = serde_json::from_str(r#"[1, "a", -7]"#).unwrap();
        assert_eq!(keys, vec![Key::Int(1), Key::from("a"), Key::Int(-7)]);
    }

    #[test]
    fn key_from_json_rejects_non_scalars() {
        assert_eq!(Key::from_json(&serde_json::json!(3)), Some(Key::Int(3)));
        assert_eq!(Key::from_json(&serde_json::json!(1.5)), None);
        assert_eq!(Key::from_json(&serde_json::json!(null)), None);
        assert_eq!(Key::from_json(&serde_json::json!([1])), None);
    }
}
