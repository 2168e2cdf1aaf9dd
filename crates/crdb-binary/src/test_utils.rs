//! Shared fixtures for tests.

use std::mem::{offset_of, size_of};

use crdb_core::{
    Class, Database, Enum, EnumConstant, Field, Function, Modifier, Name, Namespace, Type,
};

use crate::error::DecodeError;
use crate::meta::{FieldDecl, LevelDecl};
use crate::record::{FieldRef, FieldValue, Record};

/// A database touching every table.
///
/// 8 names (19 bytes of text); 2 classes, one of every other kind, one
/// unnamed return slot.
pub(crate) fn sample_database() -> Database {
    let mut db = Database::new();
    let n = db.intern("N");
    let c = db.intern("C");
    let base = db.intern("Base");
    let int = db.intern("int");
    let color = db.intern("Color");
    let red = db.intern("Red");
    let f = db.intern("f");
    let x = db.intern("x");

    db.add_primitive(Namespace::new(n.clone(), Name::default()));
    db.add_primitive(Type::new(int.clone(), Name::default(), 4));
    db.add_primitive(Class::new(base.clone(), n.clone(), Name::default(), 4));
    db.add_primitive(Class::new(c.clone(), n.clone(), base, 8));
    db.add_primitive(Enum::new(color.clone(), n, 4));
    db.add_primitive(EnumConstant::new(red, color, -1));
    db.add_primitive(Function::new(f.clone(), c.clone(), 7));
    db.add_primitive(
        Field::new(x, c, int.clone())
            .with_index(0)
            .with_modifier(Modifier::Pointer, true),
    );
    db.add_primitive(
        Field::new(Name::default(), f, int)
            .with_index(-1)
            .with_parent_unique_id(7),
    );
    db
}

// Three-level hierarchy: Base(u32) <- Middle(u16) <- Leaf(name, [u8; 3]).

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[repr(C)]
pub(crate) struct Base {
    pub id: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[repr(C)]
pub(crate) struct Middle {
    pub base: Base,
    pub flags: u16,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[repr(C)]
pub(crate) struct Leaf {
    pub middle: Middle,
    pub label: Name,
    pub tag: [u8; 3],
}

impl Leaf {
    pub(crate) fn new(id: u32, flags: u16, label: Name, tag: [u8; 3]) -> Self {
        Self {
            middle: Middle {
                base: Base { id },
                flags,
            },
            label,
            tag,
        }
    }
}

pub(crate) static BASE: LevelDecl = LevelDecl {
    name: "Base",
    base: None,
    native_size: size_of::<Base>(),
    fields: &[FieldDecl::basic("id", size_of::<u32>(), offset_of!(Base, id))],
};

pub(crate) static MIDDLE: LevelDecl = LevelDecl {
    name: "Middle",
    base: Some(&BASE),
    native_size: size_of::<Middle>(),
    fields: &[FieldDecl::basic("flags", size_of::<u16>(), offset_of!(Middle, flags))],
};

pub(crate) static LEAF: LevelDecl = LevelDecl {
    name: "Leaf",
    base: Some(&MIDDLE),
    native_size: size_of::<Leaf>(),
    fields: &[
        FieldDecl::name_ref("label", offset_of!(Leaf, label)),
        FieldDecl::basic("tag", 3, offset_of!(Leaf, tag)),
    ],
};

impl Record for Base {
    fn level() -> &'static LevelDecl {
        &BASE
    }

    fn field(&self, index: usize) -> FieldRef<'_> {
        assert_eq!(index, 0);
        FieldRef::U32(self.id)
    }

    fn set_field(&mut self, index: usize, value: FieldValue<'_>) -> Result<(), DecodeError> {
        match (index, value) {
            (0, FieldValue::U32(id)) => self.id = id,
            (index, value) => panic!("Base: field {index} got {value:?}"),
        }
        Ok(())
    }
}

impl Record for Middle {
    fn level() -> &'static LevelDecl {
        &MIDDLE
    }

    fn field(&self, index: usize) -> FieldRef<'_> {
        match MIDDLE.own_index(index) {
            None => self.base.field(index),
            Some(0) => FieldRef::U16(self.flags),
            Some(i) => panic!("Middle: no field {i}"),
        }
    }

    fn set_field(&mut self, index: usize, value: FieldValue<'_>) -> Result<(), DecodeError> {
        match (MIDDLE.own_index(index), value) {
            (None, value) => return self.base.set_field(index, value),
            (Some(0), FieldValue::U16(flags)) => self.flags = flags,
            (index, value) => panic!("Middle: field {index:?} got {value:?}"),
        }
        Ok(())
    }
}

impl Record for Leaf {
    fn level() -> &'static LevelDecl {
        &LEAF
    }

    fn field(&self, index: usize) -> FieldRef<'_> {
        match LEAF.own_index(index) {
            None => self.middle.field(index),
            Some(0) => FieldRef::Name(&self.label),
            Some(1) => FieldRef::Bytes(&self.tag),
            Some(i) => panic!("Leaf: no field {i}"),
        }
    }

    fn set_field(&mut self, index: usize, value: FieldValue<'_>) -> Result<(), DecodeError> {
        match (LEAF.own_index(index), value) {
            (None, value) => return self.middle.set_field(index, value),
            (Some(0), FieldValue::Name(label)) => self.label = label,
            (Some(1), FieldValue::Bytes(tag)) => self.tag.copy_from_slice(tag),
            (index, value) => panic!("Leaf: field {index:?} got {value:?}"),
        }
        Ok(())
    }
}
