//! Values stored by `set` commands.
//!
//! A [`Value`] is either a [`Scalar`] or a [`FieldMap`] of scalars. Field
//! maps never nest, so the one-level depth limit holds by construction.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A scalar value.
///
/// Serialized untagged so the JSON payload carries plain JSON scalars.
/// Variant order matters for decoding: integers are tried before floats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    Null,
}

impl Scalar {
    /// Check if this scalar is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Approximate in-memory footprint in bytes.
    pub fn size_hint(&self) -> usize {
        match self {
            Self::Str(s) => s.len(),
            Self::Int(_) | Self::Float(_) => 8,
            Self::Bool(_) | Self::Null => 1,
        }
    }
}

/// Ordered mapping from field names to scalars.
///
/// Insertion order is preserved through serialization, which a plain
/// `HashMap` would not guarantee.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap(Vec<(String, Scalar)>);

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    /// Append a field. Later duplicates shadow earlier ones on lookup.
    pub fn push(&mut self, name: impl Into<String>, value: Scalar) {
        self.0.push((name.into(), value));
    }

    pub fn get(&self, name: &str) -> Option<&Scalar> {
        self.0.iter().rev().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<const N: usize> From<[(&str, Scalar); N]> for FieldMap {
    fn from(fields: [(&str, Scalar); N]) -> Self {
        Self(
            fields
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }
}

impl FromIterator<(String, Scalar)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (String, Scalar)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for FieldMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FieldMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FieldMapVisitor;

        impl<'de> Visitor<'de> for FieldMapVisitor {
            type Value = FieldMap;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a map of field names to scalar values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<FieldMap, A::Error> {
                let mut fields = FieldMap::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((k, v)) = access.next_entry::<String, Scalar>()? {
                    fields.push(k, v);
                }
                Ok(fields)
            }
        }

        deserializer.deserialize_map(FieldMapVisitor)
    }
}

/// A value written by `set`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Scalar(Scalar),
    Map(FieldMap),
}

impl Value {
    /// Approximate in-memory footprint in bytes.
    pub fn size_hint(&self) -> usize {
        match self {
            Self::Scalar(s) => s.size_hint(),
            Self::Map(fields) => fields.iter().map(|(k, v)| k.len() + v.size_hint()).sum(),
        }
    }

    pub fn as_map(&self) -> Option<&FieldMap> {
        match self {
            Self::Map(fields) => Some(fields),
            Self::Scalar(_) => None,
        }
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        Self::Scalar(scalar)
    }
}

impl From<FieldMap> for Value {
    fn from(fields: FieldMap) -> Self {
        Self::Map(fields)
    }
}
