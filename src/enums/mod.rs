//! Enum factory
//!
//! Builds immutable key↔value maps with introspection metadata. Keys
//! map to integer values; lookups work in both directions. The factory
//! validates its input eagerly: reserved keys and non-integer values
//! are definition errors, never runtime diagnostics.

use std::collections::HashMap;

use serde_json::Value;

use crate::diag::DefineError;

/// Largest integer magnitude losslessly representable in a 53-bit
/// mantissa.
const SAFE_INTEGER_MAX: i64 = (1 << 53) - 1;

/// Key names reserved for the factory's own surface.
const RESERVED_KEYS: &[&str] = &[
    "$",
    "hasKey",
    "hasValue",
    "keyToValue",
    "valueToKey",
    "prototype",
];

/// An immutable enumeration of named integer values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enum {
    entries: Vec<(String, i64)>,
    key_map: HashMap<String, i64>,
    value_map: Vec<(i64, String)>,
}

impl Enum {
    /// Builds an enum from `(key, value)` pairs in insertion order.
    ///
    /// Rejects reserved keys, duplicate keys, and nothing else — the
    /// `i64` domain already excludes non-finite and fractional values.
    pub fn new<K, I>(pairs: I) -> Result<Self, DefineError>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, i64)>,
    {
        let mut entries: Vec<(String, i64)> = Vec::new();
        let mut key_map = HashMap::new();
        for (key, value) in pairs {
            let key = key.into();
            if RESERVED_KEYS.contains(&key.as_str()) {
                return Err(DefineError::ReservedEnumKey(key));
            }
            if key_map.contains_key(&key) {
                return Err(DefineError::BadDescriptor(format!(
                    "duplicate enum key '{}'",
                    key
                )));
            }
            key_map.insert(key.clone(), value);
            entries.push((key, value));
        }

        // value -> first key in insertion order wins on collision
        let mut value_map: Vec<(i64, String)> = Vec::new();
        for (key, value) in &entries {
            if !value_map.iter().any(|(v, _)| v == value) {
                value_map.push((*value, key.clone()));
            }
        }

        Ok(Self {
            entries,
            key_map,
            value_map,
        })
    }

    /// Builds an enum from a JSON object of `key: integer` members.
    ///
    /// Non-integer and non-finite values are definition errors.
    pub fn from_json(value: &Value) -> Result<Self, DefineError> {
        let map = value
            .as_object()
            .ok_or_else(|| DefineError::BadDescriptor("enum source must be an object".into()))?;
        let mut pairs = Vec::with_capacity(map.len());
        for (key, v) in map {
            let n = v
                .as_i64()
                .ok_or_else(|| DefineError::NonIntegerEnumValue { key: key.clone() })?;
            pairs.push((key.clone(), n));
        }
        Self::new(pairs)
    }

    /// Looks up a value by key (`Enum.Cat` access).
    pub fn get(&self, key: &str) -> Option<i64> {
        self.key_map.get(key).copied()
    }

    /// True when the key is defined.
    pub fn has_key(&self, key: &str) -> bool {
        self.key_map.contains_key(key)
    }

    /// True when any key maps to the value.
    pub fn has_value(&self, value: i64) -> bool {
        self.entries.iter().any(|(_, v)| *v == value)
    }

    /// Key → value lookup.
    pub fn key_to_value(&self, key: &str) -> Option<i64> {
        self.get(key)
    }

    /// Value → key lookup. When several keys share a value, the first
    /// key in insertion order wins.
    pub fn value_to_key(&self, value: i64) -> Option<&str> {
        self.value_map
            .iter()
            .find(|(v, _)| *v == value)
            .map(|(_, k)| k.as_str())
    }

    /// Keys in insertion order.
    pub fn key_array(&self) -> Vec<&str> {
        self.entries.iter().map(|(k, _)| k.as_str()).collect()
    }

    /// Values sorted ascending.
    pub fn value_array(&self) -> Vec<i64> {
        let mut values: Vec<i64> = self.entries.iter().map(|(_, v)| *v).collect();
        values.sort_unstable();
        values
    }

    /// Iterates `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Smallest value, if any entries exist.
    pub fn min(&self) -> Option<i64> {
        self.entries.iter().map(|(_, v)| *v).min()
    }

    /// Largest value, if any entries exist.
    pub fn max(&self) -> Option<i64> {
        self.entries.iter().map(|(_, v)| *v).max()
    }

    /// True when every value fits in the 53-bit safe-integer range.
    pub fn safe(&self) -> bool {
        self.entries
            .iter()
            .all(|(_, v)| v.abs() <= SAFE_INTEGER_MAX)
    }

    /// True when no two keys share a value.
    pub fn unique(&self) -> bool {
        self.value_map.len() == self.entries.len()
    }

    /// True when the sorted values form a contiguous block starting at
    /// `min`.
    pub fn sequential(&self) -> bool {
        let values = self.value_array();
        match values.first() {
            None => true,
            Some(&min) => values
                .iter()
                .enumerate()
                .all(|(i, &v)| v == min + i as i64),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no entries are defined.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
