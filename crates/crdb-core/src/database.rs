//! The in-memory reflection database.

use crate::name::{Name, NameHash, NameTable};
use crate::primitives::{Class, Entity, Enum, EnumConstant, Field, Function, Namespace, Type};
use crate::store::PrimitiveStore;

/// Names plus one store per record kind.
///
/// Fields are split across two stores: named fields (data members,
/// parameters) and unnamed ones (return slots, anonymous parameters).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Database {
    names: NameTable,
    namespaces: PrimitiveStore<Namespace>,
    types: PrimitiveStore<Type>,
    classes: PrimitiveStore<Class>,
    enums: PrimitiveStore<Enum>,
    enum_constants: PrimitiveStore<EnumConstant>,
    functions: PrimitiveStore<Function>,
    fields: PrimitiveStore<Field>,
    unnamed_fields: PrimitiveStore<Field>,
}

/// Records that have a home in a [`Database`].
pub trait Stored: Entity {
    fn store(db: &Database, named: bool) -> &PrimitiveStore<Self>;
    fn store_mut(db: &mut Database, named: bool) -> &mut PrimitiveStore<Self>;
}

macro_rules! impl_stored {
    ($ty:ty, $store:ident) => {
        impl Stored for $ty {
            #[inline]
            fn store(db: &Database, _named: bool) -> &PrimitiveStore<Self> {
                &db.$store
            }

            #[inline]
            fn store_mut(db: &mut Database, _named: bool) -> &mut PrimitiveStore<Self> {
                &mut db.$store
            }
        }
    };
}

impl_stored!(Namespace, namespaces);
impl_stored!(Type, types);
impl_stored!(Class, classes);
impl_stored!(Enum, enums);
impl_stored!(EnumConstant, enum_constants);
impl_stored!(Function, functions);

impl Stored for Field {
    #[inline]
    fn store(db: &Database, named: bool) -> &PrimitiveStore<Self> {
        if named {
            &db.fields
        } else {
            &db.unnamed_fields
        }
    }

    #[inline]
    fn store_mut(db: &mut Database, named: bool) -> &mut PrimitiveStore<Self> {
        if named {
            &mut db.fields
        } else {
            &mut db.unnamed_fields
        }
    }
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `text` and return its name.
    pub fn intern(&mut self, text: &str) -> Name {
        self.names.intern(text)
    }

    /// Look up a name by hash. Hash 0 yields the empty name.
    pub fn name(&self, hash: NameHash) -> Option<Name> {
        if hash == 0 {
            return Some(Name::default());
        }
        self.names.get(hash).cloned()
    }

    pub fn names(&self) -> &NameTable {
        &self.names
    }

    pub fn names_mut(&mut self) -> &mut NameTable {
        &mut self.names
    }

    /// The store for `T`. `named` selects between the two field stores and is
    /// ignored for every other kind.
    pub fn primitive_store<T: Stored>(&self, named: bool) -> &PrimitiveStore<T> {
        T::store(self, named)
    }

    /// Insert a record into the store it belongs to, keyed by its own name.
    pub fn add_primitive<T: Stored>(&mut self, record: T) {
        let key = record.key();
        let named = record.is_named();
        T::store_mut(self, named).insert(key, record);
    }

    /// Move all names and records of `other` into this database.
    pub fn merge(&mut self, other: Database) {
        let Database {
            names,
            namespaces,
            types,
            classes,
            enums,
            enum_constants,
            functions,
            fields,
            unnamed_fields,
        } = other;

        self.names.extend(names.iter().cloned());
        self.namespaces.append(namespaces);
        self.types.append(types);
        self.classes.append(classes);
        self.enums.append(enums);
        self.enum_constants.append(enum_constants);
        self.functions.append(functions);
        self.fields.append(fields);
        self.unnamed_fields.append(unnamed_fields);
    }

    /// Total number of records across all stores.
    pub fn primitive_count(&self) -> usize {
        self.namespaces.len()
            + self.types.len()
            + self.classes.len()
            + self.enums.len()
            + self.enum_constants.len()
            + self.functions.len()
            + self.fields.len()
            + self.unnamed_fields.len()
    }

    /// No names and no records.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.primitive_count() == 0
    }
}
