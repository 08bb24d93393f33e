//! Nested keyword dictionaries.
//!
//! A [`Keywords`] tree holds one locale's translations. Leaves are strings,
//! inner nodes are further dictionaries, and a dotted keyword such as
//! `general.home` walks one level per `.`-separated segment.

use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Separator between keyword segments.
pub const SEPARATOR: char = '.';

/// Locale code to that locale's keyword tree.
pub type TranslationsList = BTreeMap<String, Keywords>;

/// A node in a keyword tree.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Entry {
    Text(String),
    Group(Keywords),
}

impl Entry {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Entry::Text(s) => Some(s),
            Entry::Group(_) => None,
        }
    }
}

impl From<String> for Entry {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for Entry {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<Keywords> for Entry {
    fn from(v: Keywords) -> Self {
        Self::Group(v)
    }
}

/// One locale's translation tree.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Keywords {
    entries: BTreeMap<String, Entry>,
}

impl Keywords {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Builder form of [`Keywords::insert`].
    pub fn with(mut self, key: impl Into<String>, entry: impl Into<Entry>) -> Self {
        self.insert(key, entry);
        self
    }

    /// Insert a direct child, replacing whatever was there.
    pub fn insert(&mut self, key: impl Into<String>, entry: impl Into<Entry>) -> Option<Entry> {
        self.entries.insert(key.into(), entry.into())
    }

    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Entry> {
        self.entries.iter()
    }

    /// Resolve a dotted keyword to its string leaf.
    ///
    /// A path that stops at a dictionary, or runs through a string before
    /// its last segment, is a miss.
    pub fn lookup(&self, keyword: &str) -> Option<&str> {
        let mut node = self;
        let mut segments = keyword.split(SEPARATOR).peekable();
        loop {
            let segment = segments.next()?;
            match node.entries.get(segment)? {
                Entry::Text(s) => {
                    return if segments.peek().is_none() {
                        Some(s.as_str())
                    } else {
                        None
                    };
                }
                Entry::Group(group) => node = group,
            }
        }
    }

    /// Deep-merge `other` into `self`.
    ///
    /// Dictionaries present on both sides merge key by key; anything else
    /// at a path is replaced by the incoming entry.
    pub fn merge(&mut self, other: Keywords) {
        for (key, incoming) in other.entries {
            match self.entries.entry(key) {
                btree_map::Entry::Vacant(slot) => {
                    slot.insert(incoming);
                }
                btree_map::Entry::Occupied(mut slot) => match (slot.get_mut(), incoming) {
                    (Entry::Group(existing), Entry::Group(incoming)) => existing.merge(incoming),
                    (existing, incoming) => *existing = incoming,
                },
            }
        }
    }

    /// Store `text` at the given segment path, creating groups on the way.
    ///
    /// A string sitting where a group is needed gets replaced by one.
    pub fn set_path<S: AsRef<str>>(&mut self, path: &[S], text: impl Into<String>) {
        match path {
            [] => {}
            [last] => {
                self.entries
                    .insert(last.as_ref().to_string(), Entry::Text(text.into()));
            }
            [head, rest @ ..] => {
                let slot = self
                    .entries
                    .entry(head.as_ref().to_string())
                    .or_insert_with(|| Entry::Group(Keywords::new()));
                if let Entry::Text(_) = slot {
                    *slot = Entry::Group(Keywords::new());
                }
                if let Entry::Group(group) = slot {
                    group.set_path(rest, text);
                }
            }
        }
    }

    /// All string leaves keyed by their dotted path.
    pub fn flatten(&self) -> BTreeMap<String, String> {
        fn walk(node: &Keywords, prefix: &str, out: &mut BTreeMap<String, String>) {
            for (key, entry) in &node.entries {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}{SEPARATOR}{key}")
                };
                match entry {
                    Entry::Text(s) => {
                        out.insert(path, s.clone());
                    }
                    Entry::Group(group) => walk(group, &path, out),
                }
            }
        }

        let mut out = BTreeMap::new();
        walk(self, "", &mut out);
        out
    }
}

impl<K: Into<String>, V: Into<Entry>> FromIterator<(K, V)> for Keywords {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut keywords = Keywords::new();
        for (k, v) in iter {
            keywords.insert(k, v);
        }
        keywords
    }
}

impl<'a> IntoIterator for &'a Keywords {
    type Item = (&'a String, &'a Entry);
    type IntoIter = btree_map::Iter<'a, String, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
