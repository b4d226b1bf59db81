use itertools::Itertools;
use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A single payload value as handed over by a caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    /// The key was supplied without a value. Never transmitted.
    Undefined,
    Defined(Value),
}

impl Field {
    pub fn is_undefined(&self) -> bool {
        matches!(self, Field::Undefined)
    }

    /// `null`, `false`, `0`, `""` and undefined values are falsy. Everything else is truthy,
    /// including empty arrays and objects.
    pub fn is_truthy(&self) -> bool {
        match self {
            Field::Undefined => false,
            Field::Defined(value) => match value {
                Value::Null => false,
                Value::Bool(b) => *b,
                Value::Number(n) => n.as_f64().is_some_and(|it| it != 0.0 && !it.is_nan()),
                Value::String(s) => !s.is_empty(),
                Value::Array(_) | Value::Object(_) => true,
            },
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Field::Undefined => None,
            Field::Defined(value) => Some(value),
        }
    }
}

macro_rules! defined_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Field {
                fn from(value: $ty) -> Self {
                    Field::Defined(Value::from(value))
                }
            }
        )*
    };
}

defined_from!(Value, &str, String, bool, i32, i64, u32, u64, f64);

/// Data attached to a notification.
///
/// Field order carries no meaning. Serializing a payload always skips undefined fields, so
/// the encoded form is what a channel may put on the wire.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload {
    fields: BTreeMap<String, Field>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Field>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn with_undefined(mut self, key: impl Into<String>) -> Self {
        self.fields.insert(key.into(), Field::Undefined);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Field>) -> Option<Field> {
        self.fields.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Field> {
        self.fields.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&Field> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn has_undefined(&self) -> bool {
        self.fields.values().any(Field::is_undefined)
    }

    /// A copy of this payload without its undefined fields.
    pub fn scrubbed(&self) -> Payload {
        Payload {
            fields: self
                .fields
                .iter()
                .filter(|(_, v)| !v.is_undefined())
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }

    /// Comma separated field names, suitable for logs. Values are never included.
    pub(crate) fn describe_keys(&self) -> String {
        self.keys().join(", ")
    }
}

impl<K: Into<String>, V: Into<Field>> FromIterator<(K, V)> for Payload {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Payload {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl Serialize for Payload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let defined = self
            .fields
            .iter()
            .filter_map(|(k, v)| v.as_value().map(|v| (k, v)))
            .collect::<Vec<_>>();
        let mut map = serializer.serialize_map(Some(defined.len()))?;
        for (k, v) in defined {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Payload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
        Ok(raw.into_iter().collect())
    }
}
