//! ValuesRecord holds the submitted or stored data for one form instance.
//!
//! A value is resolved to `Scalar` or `Multi` exactly once, when the record
//! is built (form decode or JSON load). Render sites dispatch on the enum
//! instead of re-inspecting dynamic types.

use std::borrow::Cow;
use std::fmt;

use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single form value: one string, or the selections of a checkbox group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Scalar(String),
    Multi(Vec<String>),
}

impl FieldValue {
    /// String form used wherever a single text value is needed:
    /// scalars as-is, multi values joined with `", "`.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Scalar(s) => Cow::Borrowed(s),
            FieldValue::Multi(items) => Cow::Owned(items.join(", ")),
        }
    }

    /// First element of a multi value, or the scalar itself.
    /// Mirrors how the detail-schema lookup treats checkbox submissions.
    pub fn first(&self) -> Option<&str> {
        match self {
            FieldValue::Scalar(s) => Some(s),
            FieldValue::Multi(items) => items.first().map(String::as_str),
        }
    }

    /// True when the value matches `option`: multi values by membership,
    /// scalars by comma-split membership (no trimming, exact parts).
    pub fn contains_option(&self, option: &str) -> bool {
        match self {
            FieldValue::Multi(items) => items.iter().any(|v| v == option),
            FieldValue::Scalar(s) => s.split(',').any(|part| part == option),
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Scalar(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Scalar(s.to_string())
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        FieldValue::Multi(items)
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Scalar(s) => serializer.serialize_str(s),
            FieldValue::Multi(items) => items.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = FieldValue;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a string, number, bool, or array of strings")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<FieldValue, E> {
                Ok(FieldValue::Scalar(v.to_string()))
            }

            fn visit_string<E: serde::de::Error>(self, v: String) -> Result<FieldValue, E> {
                Ok(FieldValue::Scalar(v))
            }

            // Stored submissions carry the numeric initiative id; coerce
            // scalars the way the original stringified them.
            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<FieldValue, E> {
                Ok(FieldValue::Scalar(v.to_string()))
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<FieldValue, E> {
                Ok(FieldValue::Scalar(v.to_string()))
            }

            fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<FieldValue, E> {
                Ok(FieldValue::Scalar(v.to_string()))
            }

            fn visit_bool<E: serde::de::Error>(self, v: bool) -> Result<FieldValue, E> {
                Ok(FieldValue::Scalar(v.to_string()))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<FieldValue, A::Error> {
                let mut items = Vec::new();
                while let Some(item) = seq.next_element::<FieldValue>()? {
                    items.push(item.as_text().into_owned());
                }
                Ok(FieldValue::Multi(items))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

/// Insertion-ordered mapping from field name to [`FieldValue`].
///
/// Serializes as a plain JSON object; deserialization preserves document
/// order, which drives both template substitution and list rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValuesRecord {
    entries: Vec<(String, FieldValue)>,
}

impl ValuesRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from decoded form pairs, folding repeated keys
    /// (checkbox groups share a name) into `Multi`.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut record = Self::new();
        for (key, value) in pairs {
            record.push_value(key, value);
        }
        record
    }

    fn push_value(&mut self, key: String, value: String) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => match &mut *slot {
                FieldValue::Multi(items) => items.push(value),
                FieldValue::Scalar(first) => {
                    let first = std::mem::take(first);
                    *slot = FieldValue::Multi(vec![first, value]);
                }
            },
            None => self.entries.push((key, FieldValue::Scalar(value))),
        }
    }

    /// Inserts or replaces a value, keeping the original position on replace.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Scalar string form of a value, if present.
    pub fn get_text(&self, key: &str) -> Option<Cow<'_, str>> {
        self.get(key).map(FieldValue::as_text)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Overlays `other` onto this record: colliding keys are replaced in
    /// place, new keys appended in `other`'s order. Detail submissions win
    /// over base submissions.
    pub fn merge(&mut self, other: ValuesRecord) {
        for (key, value) in other.entries {
            self.insert(key, value);
        }
    }
}

impl Serialize for ValuesRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ValuesRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = ValuesRecord;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a JSON object of form values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<ValuesRecord, A::Error> {
                let mut entries = Vec::new();
                while let Some((key, value)) = map.next_entry::<String, FieldValue>()? {
                    entries.push((key, value));
                }
                Ok(ValuesRecord { entries })
            }
        }

        deserializer.deserialize_map(RecordVisitor)
    }
}
