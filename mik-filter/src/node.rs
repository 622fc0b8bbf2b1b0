//! The generic nested structure emitted by the builder.
//!
//! A [`Node`] is deliberately schema-free: the persistence layer that consumes
//! it decides what `AND`, `OR`, `contains` or `some` mean. Maps are ordered by
//! key so two builds of the same request render identically.

use crate::value::Value;
use miniserde::json::{Array, Object, Value as JsonValue};
use std::collections::BTreeMap;

/// Key of the top-level conjunction.
pub const AND: &str = "AND";
/// Key of a disjunction group.
pub const OR: &str = "OR";

/// A node of the nested condition tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A scalar leaf.
    Value(Value),
    /// An ordered list, used for `AND` / `OR` members.
    List(Vec<Node>),
    /// A mapping from key to child node.
    Map(BTreeMap<String, Node>),
}

impl Node {
    /// A map holding exactly one entry.
    ///
    /// This is the shape every fold step produces.
    pub fn entry(key: impl Into<String>, child: Self) -> Self {
        let mut map = BTreeMap::new();
        map.insert(key.into(), child);
        Self::Map(map)
    }

    /// A map built from `(key, child)` pairs.
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Self)>,
    {
        Self::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// `{OR: [members...]}`.
    #[must_use]
    pub fn or(members: Vec<Self>) -> Self {
        Self::entry(OR, Self::List(members))
    }

    /// `{AND: [members...]}`.
    #[must_use]
    pub fn and(members: Vec<Self>) -> Self {
        Self::entry(AND, Self::List(members))
    }

    /// Look up a child of a map node.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        match self {
            Self::Map(map) => map.get(key),
            _ => None,
        }
    }

    /// Follow a sequence of map keys.
    #[must_use]
    pub fn pointer<'a, I>(&self, keys: I) -> Option<&Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        keys.into_iter().try_fold(self, |node, key| node.get(key))
    }

    /// The list members, if this is a list node.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// The map entries, if this is a map node.
    #[must_use]
    pub const fn as_map(&self) -> Option<&BTreeMap<String, Self>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// The scalar, if this is a value node.
    #[must_use]
    pub const fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Returns `true` if this is a map with an `OR` key.
    #[must_use]
    pub fn is_or_group(&self) -> bool {
        self.get(OR).is_some()
    }

    /// Number of single-entry maps wrapping the innermost non-map node.
    ///
    /// `{a: {b: 1}}` has depth 2, a bare value has depth 0. Multi-entry maps
    /// stop the descent and count as one level.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self;
        while let Self::Map(map) = current {
            depth += 1;
            match map.values().next() {
                Some(child) if map.len() == 1 => current = child,
                _ => break,
            }
        }
        depth
    }

    /// Render into a miniserde JSON value.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Value(v) => v.to_json(),
            Self::List(items) => {
                let mut arr = Array::new();
                for item in items {
                    arr.push(item.to_json());
                }
                JsonValue::Array(arr)
            },
            Self::Map(map) => {
                let mut obj = Object::new();
                for (key, child) in map {
                    obj.insert(key.clone(), child.to_json());
                }
                JsonValue::Object(obj)
            },
        }
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Self::Value(Value::from(s))
    }
}
