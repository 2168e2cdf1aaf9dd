//! Per-kind record containers.

use std::collections::BTreeMap;

use crate::name::NameHash;

/// Records of one kind, keyed by name hash.
///
/// A key can hold several records (overloads share a name, unnamed fields all
/// key on the empty name). Iteration is ascending by key and in insertion order
/// within a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimitiveStore<T> {
    entries: BTreeMap<NameHash, Vec<T>>,
    len: usize,
}

impl<T> Default for PrimitiveStore<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            len: 0,
        }
    }
}

impl<T> PrimitiveStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: NameHash, record: T) {
        self.entries.entry(key).or_default().push(record);
        self.len += 1;
    }

    /// All records stored under `key`.
    pub fn get(&self, key: NameHash) -> &[T] {
        self.entries.get(&key).map_or(&[], Vec::as_slice)
    }

    /// First record stored under `key`.
    pub fn first(&self, key: NameHash) -> Option<&T> {
        self.get(key).first()
    }

    /// Total number of records.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate over records in key order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.values().flatten()
    }

    /// Iterate over `(key, record)` pairs in key order.
    pub fn entries(&self) -> impl Iterator<Item = (NameHash, &T)> {
        self.entries
            .iter()
            .flat_map(|(&key, records)| records.iter().map(move |r| (key, r)))
    }

    /// Move every record of `other` into this store.
    pub fn append(&mut self, other: Self) {
        for (key, records) in other.entries {
            for record in records {
                self.insert(key, record);
            }
        }
    }
}
