//! Interned identifier names.
//!
//! Every identifier in the database is stored once in a [`NameTable`] and
//! referenced everywhere else by its 32-bit hash. A [`Name`] carries both the
//! hash and a shared handle to the text, so comparing two names is an integer
//! comparison and cloning one never copies the string.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Hash of a name's text.
pub type NameHash = u32;

/// Hash a name's text.
///
/// CRC-32 of the UTF-8 bytes: stable across runs, builds and hosts.
/// The empty string hashes to 0, which doubles as the "no name" value. So does
/// any other text whose CRC-32 happens to be 0 (about one in 2^32 strings,
/// e.g. `"field_558_McOV"`): such a name is indistinguishable from no name.
#[inline]
pub fn hash_name(text: &str) -> NameHash {
    crc32fast::hash(text.as_bytes())
}

/// An interned identifier.
///
/// Immutable once created. `Name::default()` is the empty name (hash 0).
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Name {
    hash: NameHash,
    text: Arc<str>,
}

impl Name {
    /// Create a name, hashing its text.
    pub fn new(text: &str) -> Self {
        Self {
            hash: hash_name(text),
            text: Arc::from(text),
        }
    }

    /// Create a name from an already-known hash. Use only for deserialization.
    pub fn from_parts(hash: NameHash, text: impl Into<Arc<str>>) -> Self {
        Self {
            hash,
            text: text.into(),
        }
    }

    #[inline]
    pub fn hash(&self) -> NameHash {
        self.hash
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether this is the empty name.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hash == 0
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({:#010x} {:?})", self.hash, &*self.text)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Hash-keyed name store. Holds at most one [`Name`] per hash.
///
/// The empty name is never stored; [`get`](Self::get) and
/// [`resolve`](Self::resolve) do not special-case it, callers that accept
/// "no name" check for hash 0 first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameTable {
    names: BTreeMap<NameHash, Name>,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a string, returning its Name.
    ///
    /// If a name with the same hash is already present, that entry is returned.
    /// Text hashing to 0 yields the empty name and is not stored; see
    /// [`hash_name`].
    pub fn intern(&mut self, text: &str) -> Name {
        let hash = hash_name(text);
        if hash == 0 {
            return Name::default();
        }
        self.names
            .entry(hash)
            .or_insert_with(|| Name::from_parts(hash, text))
            .clone()
    }

    /// Insert a name, replacing any entry with the same hash.
    pub fn insert(&mut self, name: Name) -> Option<Name> {
        if name.is_empty() {
            return None;
        }
        self.names.insert(name.hash, name)
    }

    #[inline]
    pub fn get(&self, hash: NameHash) -> Option<&Name> {
        self.names.get(&hash)
    }

    /// Resolve a hash back to its text.
    #[inline]
    pub fn resolve(&self, hash: NameHash) -> Option<&str> {
        self.names.get(&hash).map(Name::text)
    }

    #[inline]
    pub fn contains(&self, hash: NameHash) -> bool {
        self.names.contains_key(&hash)
    }

    /// Number of interned names.
    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate over all names in ascending hash order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Name> {
        self.names.values()
    }
}

impl Extend<Name> for NameTable {
    fn extend<I: IntoIterator<Item = Name>>(&mut self, iter: I) {
        for name in iter {
            self.insert(name);
        }
    }
}
