//! Type descriptors: flattened field layouts for packing records.
//!
//! Each record type declares its fields one inheritance level at a time
//! ([`LevelDecl`]). A [`TypeDescriptor`] walks that chain from the topmost
//! ancestor down, appending every level's fields and assigning packed offsets
//! as a running sum. The packed layout therefore has base fields first, own
//! fields last and no padding, whatever the host's alignment rules are.

use std::collections::BTreeMap;
use std::fmt;

use crate::invariants;
use crate::record::Record;

/// Packed width of a name reference (its hash).
pub const NAME_REF_SIZE: u32 = 4;

/// How a field travels between native and packed form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Copied byte-for-byte; packed width equals native width.
    Basic,
    /// A full `Name` in memory, only its hash on disk.
    NameRef,
}

/// A field as declared by one level of an inheritance chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldDecl {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Packed width in bytes.
    pub size: u32,
    /// Offset within the native record.
    pub native_offset: usize,
}

impl FieldDecl {
    pub const fn basic(name: &'static str, size: usize, native_offset: usize) -> Self {
        Self {
            name,
            kind: FieldKind::Basic,
            size: size as u32,
            native_offset,
        }
    }

    pub const fn name_ref(name: &'static str, native_offset: usize) -> Self {
        Self {
            name,
            kind: FieldKind::NameRef,
            size: NAME_REF_SIZE,
            native_offset,
        }
    }
}

/// One level of a record's inheritance chain.
#[derive(Debug)]
pub struct LevelDecl {
    pub name: &'static str,
    pub base: Option<&'static LevelDecl>,
    /// Size of the native record at this level.
    pub native_size: usize,
    /// Fields this level adds, in declaration order.
    pub fields: &'static [FieldDecl],
}

impl LevelDecl {
    /// Number of fields inherited from the base chain.
    pub const fn inherited_count(&self) -> usize {
        match self.base {
            Some(base) => base.field_count(),
            None => 0,
        }
    }

    /// Number of fields including the whole base chain.
    pub const fn field_count(&self) -> usize {
        self.inherited_count() + self.fields.len()
    }

    /// Map a flattened field index to an index into this level's own fields.
    /// `None` means the field belongs to a base level.
    #[inline]
    pub fn own_index(&self, index: usize) -> Option<usize> {
        index.checked_sub(self.inherited_count())
    }

    /// The chain from the topmost ancestor down to this level.
    fn chain(&'static self) -> Vec<&'static LevelDecl> {
        let mut chain = Vec::new();
        let mut current = Some(self);
        while let Some(level) = current {
            chain.push(level);
            current = level.base;
        }
        chain.reverse();
        chain
    }
}

/// A field in its flattened position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Packed width in bytes.
    pub size: u32,
    pub native_offset: u32,
    pub packed_offset: u32,
    /// Position in the flattened field list; the record accessor index.
    pub index: usize,
}

/// Flattened layout of one record type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub name: &'static str,
    pub base: Option<&'static str>,
    /// Every field, base levels first.
    pub fields: Vec<FieldDescriptor>,
    /// Native record size, padding included.
    pub native_size: u32,
    /// Sum of all packed field sizes.
    pub packed_size: u32,
}

impl TypeDescriptor {
    /// Flatten a level and its base chain.
    pub fn build(level: &'static LevelDecl) -> Self {
        let mut fields = Vec::with_capacity(level.field_count());
        let mut packed_size = 0u32;

        for decl in level.chain().into_iter().flat_map(|l| l.fields) {
            fields.push(FieldDescriptor {
                name: decl.name,
                kind: decl.kind,
                size: decl.size,
                native_offset: decl.native_offset as u32,
                packed_offset: packed_size,
                index: fields.len(),
            });
            packed_size += decl.size;
        }

        Self {
            name: level.name,
            base: level.base.map(|b| b.name),
            fields,
            native_size: level.native_size as u32,
            packed_size,
        }
    }

    /// Packed size of `count` records.
    pub fn packed_len(&self, count: usize) -> Option<usize> {
        count.checked_mul(self.packed_size as usize)
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}

impl fmt::Display for FieldDescriptor {
    /// Packed shape: `name`, `u8`..`u64`, or `[N]` for opaque bytes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, self.size) {
            (FieldKind::NameRef, _) => f.write_str("name"),
            (FieldKind::Basic, 1 | 2 | 4 | 8) => write!(f, "u{}", self.size * 8),
            (FieldKind::Basic, n) => write!(f, "[{n}]"),
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}: {} packed bytes", self.name, self.packed_size)?;
        let width = self.fields.iter().map(|d| d.name.len()).max().unwrap_or(0);
        for d in &self.fields {
            writeln!(f, "{:<width$} @{:<3} {}", d.name, d.packed_offset, d)?;
        }
        Ok(())
    }
}

/// Descriptors for every record type, keyed by type name.
///
/// Derived data: rebuilt for each serialize or deserialize pass and never
/// mutated once the pass starts.
#[derive(Clone, Debug, Default)]
pub struct TypeRegistry {
    types: BTreeMap<&'static str, TypeDescriptor>,
}

impl TypeRegistry {
    /// Registry describing every database record type.
    pub fn new() -> Self {
        use crdb_core::{Class, Enum, EnumConstant, Field, Function, Namespace, Type};

        let mut registry = Self::empty();
        registry.register::<Namespace>();
        registry.register::<Type>();
        registry.register::<Class>();
        registry.register::<Enum>();
        registry.register::<EnumConstant>();
        registry.register::<Function>();
        registry.register::<Field>();
        registry
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Register a record type and every level of its base chain.
    pub fn register<T: Record>(&mut self) -> &TypeDescriptor {
        self.register_level(T::level())
    }

    fn register_level(&mut self, level: &'static LevelDecl) -> &TypeDescriptor {
        if let Some(base) = level.base {
            self.register_level(base);
        }
        self.types
            .entry(level.name)
            .or_insert_with(|| TypeDescriptor::build(level))
    }

    pub fn get(&self, name: &str) -> Option<&TypeDescriptor> {
        self.types.get(name)
    }

    /// Descriptor of a registered record type.
    pub fn descriptor<T: Record>(&self) -> &TypeDescriptor {
        let name = T::level().name;
        self.get(name)
            .unwrap_or_else(|| invariants::unregistered_type(name))
    }
}
