//! The flat parameter set of a single gateway request.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::btree_map;
use std::collections::BTreeMap;

use crate::error::AlipayError;

/// Request or response parameters keyed by field name.
///
/// Keys iterate in ascending byte order, which is the order the gateway signs
/// them in. Values keep their JSON shape until they are rendered: strings are
/// used verbatim, numbers and booleans in their JSON text, arrays and objects
/// as compact JSON.
///
/// `Null` stands for an absent value. Absent values and empty strings are
/// skipped by [`ParamMap::signable`]; `0` and `false` are not.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamMap(BTreeMap<String, Value>);

impl ParamMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from any value that serializes to a JSON object.
    pub fn from_serializable<T: Serialize>(value: &T) -> Result<Self, AlipayError> {
        Self::from_value(serde_json::to_value(value)?)
    }

    /// Build a map from a JSON object, e.g. a parsed notification body.
    pub fn from_value(value: Value) -> Result<Self, AlipayError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Set `key`, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Set `key` only when `value` is present.
    pub fn insert_opt<V: Into<Value>>(&mut self, key: impl Into<String>, value: Option<V>) {
        if let Some(v) = value {
            self.0.insert(key.into(), v.into());
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The value of `key` if it is a JSON string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.0.iter()
    }

    /// Entries that take part in the signature, rendered to their string form,
    /// in ascending key order.
    pub fn signable(&self) -> impl Iterator<Item = (&str, String)> + '_ {
        self.0
            .iter()
            .filter(|(_, v)| is_present(v))
            .map(|(k, v)| (k.as_str(), render_value(v)))
    }
}

/// Whether a value survives canonicalization.
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// String form of a parameter value. Composite values are JSON-serialized once.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ParamMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<'a> IntoIterator for &'a ParamMap {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
