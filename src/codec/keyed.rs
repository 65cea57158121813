//! Accumulation of repeated blocks while decoding.
//!
//! A repeated block reaches the decoder as several statements sharing a key,
//! e.g. `policy p1 match source-address any` then `policy p1 then permit`.
//! [`KeyedBlocks`] merges them into one entry per key and yields the entries
//! in the order their key was first seen.

use indexmap::map::Entry;
use indexmap::IndexMap;
use std::hash::Hash;

/// Insertion-ordered map of block key to block value.
#[derive(Debug, Clone)]
pub struct KeyedBlocks<K, V> {
    entries: IndexMap<K, V>,
}

impl<K, V> Default for KeyedBlocks<K, V> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<K: Hash + Eq, V> KeyedBlocks<K, V> {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// The entry for `key`, created with `make` the first time the key is seen.
    pub fn entry_with<F>(&mut self, key: K, make: F) -> &mut V
    where
        F: FnOnce(&K) -> V,
    {
        match self.entries.entry(key) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let value = make(entry.key());
                entry.insert(value)
            }
        }
    }

    /// Existing entry for `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.entries.get_mut(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no key was seen.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-seen order.
    pub fn into_values(self) -> Vec<V> {
        self.entries.into_values().collect()
    }
}

/// Find the element of a small nested list matching `matches`, appending
/// `make()` when none does.
pub fn entry_in<V, P, F>(list: &mut Vec<V>, matches: P, make: F) -> &mut V
where
    P: Fn(&V) -> bool,
    F: FnOnce() -> V,
{
    let idx = match list.iter().position(|v| matches(v)) {
        Some(idx) => idx,
        None => {
            list.push(make());
            list.len() - 1
        }
    };
    &mut list[idx]
}
