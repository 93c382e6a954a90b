//! Description dictionaries: the merged, queryable shape of an event payload.
//!
//! A dictionary maps field names to either a leaf (the field exists, its value
//! shape is not modelled) or a nested dictionary, each with an optional
//! description. Hover, completion, and expression validation only need to
//! know that a field exists and what it means.
//!
//! Keys are matched ASCII-case-insensitively, like property access in the
//! workflow expression language. The spelling of the first insert is kept.

use std::collections::HashMap;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Value half of a dictionary entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptionValue {
    /// The field exists; its value is not modelled.
    Leaf,
    /// Object-shaped field with known members.
    Nested(DescriptionDictionary),
}

impl DescriptionValue {
    /// Nested dictionary, if this entry is object-shaped.
    #[must_use]
    pub const fn as_nested(&self) -> Option<&DescriptionDictionary> {
        match self {
            Self::Nested(nested) => Some(nested),
            Self::Leaf => None,
        }
    }

    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf)
    }
}

/// A single entry in a [`DescriptionDictionary`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionPair {
    pub key: String,
    pub value: DescriptionValue,
    /// `None` when the source has no description. Parameter records with an
    /// empty `description` string are merged as `None` as well.
    pub description: Option<String>,
}

/// Recursive name → (shape, description) mapping with first-write-wins adds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescriptionDictionary {
    pairs: Vec<DescriptionPair>,
    index: HashMap<String, usize>,
}

impl DescriptionDictionary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry unless `key` is already present.
    ///
    /// Returns `true` if the entry was inserted. An existing entry is never
    /// replaced, neither its value nor its description.
    pub fn add(
        &mut self,
        key: impl Into<String>,
        value: DescriptionValue,
        description: Option<String>,
    ) -> bool {
        let key = key.into();
        let folded = key.to_ascii_lowercase();
        if self.index.contains_key(&folded) {
            return false;
        }

        self.index.insert(folded, self.pairs.len());
        self.pairs.push(DescriptionPair {
            key,
            value,
            description,
        });
        true
    }

    /// Look up an entry by name.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&DescriptionPair> {
        self.index
            .get(&key.to_ascii_lowercase())
            .map(|&position| &self.pairs[position])
    }

    /// Resolve a dotted path such as `pull_request.head.ref` through nested
    /// dictionaries.
    ///
    /// Returns `None` if any segment is missing or a non-final segment is a
    /// leaf.
    #[must_use]
    pub fn get_path(&self, path: &str) -> Option<&DescriptionPair> {
        let mut segments = path.split('.');
        let mut current = self.get(segments.next()?)?;
        for segment in segments {
            current = current.value.as_nested()?.get(segment)?;
        }
        Some(current)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &DescriptionPair> {
        self.pairs.iter()
    }

    /// Entry names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|pair| pair.key.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<'a> IntoIterator for &'a DescriptionDictionary {
    type Item = &'a DescriptionPair;
    type IntoIter = std::slice::Iter<'a, DescriptionPair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

/// Serializes as `{"name": {"description": ..., "properties": {...}}}`.
impl Serialize for DescriptionDictionary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.pairs.len()))?;
        for pair in &self.pairs {
            map.serialize_entry(&pair.key, &EntryView(pair))?;
        }
        map.end()
    }
}

struct EntryView<'a>(&'a DescriptionPair);

impl Serialize for EntryView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let pair = self.0;
        let nested = pair.value.as_nested();
        let len = usize::from(pair.description.is_some()) + usize::from(nested.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        if let Some(description) = &pair.description {
            map.serialize_entry("description", description)?;
        }
        if let Some(nested) = nested {
            map.serialize_entry("properties", nested)?;
        }
        map.end()
    }
}
