//! Entity identity values.

use entidoc_document::Value;
use serde::{Serialize, Serializer};
use std::fmt;

/// A plain identity value, without provenance.
///
/// This is what an identity looks like in a document and what the store's
/// lookup receives.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RawId {
    /// Numeric identity (row id, sequence value).
    Integer(i64),
    /// Textual identity (UUID text, external key).
    Text(String),
}

impl RawId {
    /// Reads an identity from a document value.
    ///
    /// Returns `None` for any value that is neither an integer nor text.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Integer(n) => Some(Self::Integer(*n)),
            Value::Text(s) => Some(Self::Text(s.clone())),
            _ => None,
        }
    }

    /// Converts to the document value written for this identity.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Integer(n) => Value::Integer(*n),
            Self::Text(s) => Value::Text(s.clone()),
        }
    }

    /// Returns the integer form, if numeric.
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    /// Returns the text form, if textual.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Integer(_) => None,
            Self::Text(s) => Some(s),
        }
    }
}

impl fmt::Display for RawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s:?}"),
        }
    }
}

impl Serialize for RawId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Integer(n) => serializer.serialize_i64(*n),
            Self::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl From<i64> for RawId {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<i32> for RawId {
    fn from(n: i32) -> Self {
        Self::Integer(i64::from(n))
    }
}

impl From<u32> for RawId {
    fn from(n: u32) -> Self {
        Self::Integer(i64::from(n))
    }
}

impl From<String> for RawId {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for RawId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// Identity wrapper of a stored entity.
///
/// Pairs the raw identity with the name of the entity type that owns it.
/// Only the raw part is ever written to a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    entity: &'static str,
    raw: RawId,
}

impl Identity {
    /// Creates an identity for an entity type.
    #[must_use]
    pub fn new(entity: &'static str, raw: impl Into<RawId>) -> Self {
        Self {
            entity,
            raw: raw.into(),
        }
    }

    /// Returns the owning entity type name.
    #[inline]
    #[must_use]
    pub const fn entity(&self) -> &'static str {
        self.entity
    }

    /// Returns the raw identity value.
    #[inline]
    #[must_use]
    pub const fn raw(&self) -> &RawId {
        &self.raw
    }

    /// Strips provenance and returns the raw identity value.
    #[must_use]
    pub fn into_raw(self) -> RawId {
        self.raw
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.entity, self.raw)
    }
}

impl Serialize for Identity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entidoc_document::to_value;

    #[test]
    fn from_value_accepts_scalars() {
        assert_eq!(RawId::from_value(&Value::Integer(7)), Some(RawId::Integer(7)));
        assert_eq!(
            RawId::from_value(&Value::from("abc")),
            Some(RawId::Text("abc".into()))
        );
        assert_eq!(RawId::from_value(&Value::Float(7.0)), None);
        assert_eq!(RawId::from_value(&Value::Bool(true)), None);
        assert_eq!(RawId::from_value(&Value::Null), None);
    }

    #[test]
    fn to_value_is_plain_scalar() {
        assert_eq!(RawId::from(7).to_value(), Value::Integer(7));
        assert_eq!(RawId::from("k").to_value(), Value::from("k"));
    }

    #[test]
    fn identity_serializes_without_provenance() {
        let id = Identity::new("Person", 7);
        assert_eq!(to_value(&id).unwrap(), Value::Integer(7));

        let ids = vec![Identity::new("Tag", "red"), Identity::new("Tag", "blue")];
        assert_eq!(
            to_value(&ids).unwrap(),
            Value::Array(vec![Value::from("red"), Value::from("blue")])
        );
    }

    #[test]
    fn display() {
        assert_eq!(Identity::new("Person", 7).to_string(), "Person#7");
        assert_eq!(Identity::new("Account", "x").to_string(), "Account#\"x\"");
    }

    #[test]
    fn accessors() {
        let id = Identity::new("Person", 3);
        assert_eq!(id.entity(), "Person");
        assert_eq!(id.raw().as_integer(), Some(3));
        assert_eq!(id.into_raw().as_text(), None);
    }
}
