//! Typed field access for packable records.
//!
//! The copier never touches native memory directly: it reads and writes one
//! field at a time through [`Record::field`] and [`Record::set_field`], using
//! the flattened field index from the record's [`TypeDescriptor`]. A derived
//! record answers for its own fields and forwards lower indices to its base.
//!
//! [`TypeDescriptor`]: crate::meta::TypeDescriptor

use std::mem::{offset_of, size_of};

use crdb_core::{
    Class, Enum, EnumConstant, Field, Function, Modifier, Name, Namespace, Primitive, Type,
};

use crate::error::DecodeError;
use crate::invariants;
use crate::meta::{FieldDecl, LevelDecl};

/// A field read from a native record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldRef<'a> {
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    /// Opaque basic field of any other width.
    Bytes(&'a [u8]),
    Name(&'a Name),
}

/// A field value to store into a native record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue<'a> {
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Bytes(&'a [u8]),
    Name(Name),
}

impl FieldRef<'_> {
    pub fn shape(&self) -> &'static str {
        match self {
            Self::U8(_) => "u8",
            Self::U16(_) => "u16",
            Self::U32(_) => "u32",
            Self::U64(_) => "u64",
            Self::Bytes(_) => "bytes",
            Self::Name(_) => "name",
        }
    }
}

impl FieldValue<'_> {
    pub fn shape(&self) -> &'static str {
        match self {
            Self::U8(_) => "u8",
            Self::U16(_) => "u16",
            Self::U32(_) => "u32",
            Self::U64(_) => "u64",
            Self::Bytes(_) => "bytes",
            Self::Name(_) => "name",
        }
    }
}

/// A record type the table codec can pack.
///
/// `field` and `set_field` must agree with the declared level chain: index
/// `i` has the kind and width of the `i`-th flattened field.
pub trait Record: Default + Clone {
    /// The most derived level of this record's inheritance chain.
    fn level() -> &'static LevelDecl;

    fn field(&self, index: usize) -> FieldRef<'_>;

    /// Store a decoded value. Fails only for values the field's type cannot
    /// represent.
    fn set_field(&mut self, index: usize, value: FieldValue<'_>) -> Result<(), DecodeError>;
}

pub static PRIMITIVE: LevelDecl = LevelDecl {
    name: "Primitive",
    base: None,
    native_size: size_of::<Primitive>(),
    fields: &[
        FieldDecl::name_ref("name", offset_of!(Primitive, name)),
        FieldDecl::name_ref("parent", offset_of!(Primitive, parent)),
    ],
};

pub static NAMESPACE: LevelDecl = LevelDecl {
    name: "Namespace",
    base: Some(&PRIMITIVE),
    native_size: size_of::<Namespace>(),
    fields: &[],
};

pub static TYPE: LevelDecl = LevelDecl {
    name: "Type",
    base: Some(&PRIMITIVE),
    native_size: size_of::<Type>(),
    fields: &[FieldDecl::basic("size", size_of::<u32>(), offset_of!(Type, size))],
};

pub static CLASS: LevelDecl = LevelDecl {
    name: "Class",
    base: Some(&TYPE),
    native_size: size_of::<Class>(),
    fields: &[FieldDecl::name_ref("base_class", offset_of!(Class, base_class))],
};

pub static ENUM: LevelDecl = LevelDecl {
    name: "Enum",
    base: Some(&TYPE),
    native_size: size_of::<Enum>(),
    fields: &[],
};

pub static ENUM_CONSTANT: LevelDecl = LevelDecl {
    name: "EnumConstant",
    base: Some(&PRIMITIVE),
    native_size: size_of::<EnumConstant>(),
    fields: &[FieldDecl::basic(
        "value",
        size_of::<i64>(),
        offset_of!(EnumConstant, value),
    )],
};

pub static FUNCTION: LevelDecl = LevelDecl {
    name: "Function",
    base: Some(&PRIMITIVE),
    native_size: size_of::<Function>(),
    fields: &[FieldDecl::basic(
        "unique_id",
        size_of::<u32>(),
        offset_of!(Function, unique_id),
    )],
};

pub static FIELD: LevelDecl = LevelDecl {
    name: "Field",
    base: Some(&PRIMITIVE),
    native_size: size_of::<Field>(),
    fields: &[
        FieldDecl::name_ref("type_name", offset_of!(Field, type_name)),
        FieldDecl::basic("modifier", size_of::<Modifier>(), offset_of!(Field, modifier)),
        FieldDecl::basic("is_const", size_of::<bool>(), offset_of!(Field, is_const)),
        FieldDecl::basic("index", size_of::<i32>(), offset_of!(Field, index)),
        FieldDecl::basic(
            "parent_unique_id",
            size_of::<u32>(),
            offset_of!(Field, parent_unique_id),
        ),
    ],
};

impl Record for Primitive {
    fn level() -> &'static LevelDecl {
        &PRIMITIVE
    }

    fn field(&self, index: usize) -> FieldRef<'_> {
        match index {
            0 => FieldRef::Name(&self.name),
            1 => FieldRef::Name(&self.parent),
            _ => invariants::no_such_field(PRIMITIVE.name, index),
        }
    }

    fn set_field(&mut self, index: usize, value: FieldValue<'_>) -> Result<(), DecodeError> {
        match (index, value) {
            (0, FieldValue::Name(name)) => self.name = name,
            (1, FieldValue::Name(name)) => self.parent = name,
            (_, value) => invariants::shape_mismatch(PRIMITIVE.name, index, value.shape()),
        }
        Ok(())
    }
}

impl Record for Namespace {
    fn level() -> &'static LevelDecl {
        &NAMESPACE
    }

    fn field(&self, index: usize) -> FieldRef<'_> {
        self.primitive.field(index)
    }

    fn set_field(&mut self, index: usize, value: FieldValue<'_>) -> Result<(), DecodeError> {
        self.primitive.set_field(index, value)
    }
}

impl Record for Type {
    fn level() -> &'static LevelDecl {
        &TYPE
    }

    fn field(&self, index: usize) -> FieldRef<'_> {
        match TYPE.own_index(index) {
            None => self.primitive.field(index),
            Some(0) => FieldRef::U32(self.size),
            Some(_) => invariants::no_such_field(TYPE.name, index),
        }
    }

    fn set_field(&mut self, index: usize, value: FieldValue<'_>) -> Result<(), DecodeError> {
        match (TYPE.own_index(index), value) {
            (None, value) => return self.primitive.set_field(index, value),
            (Some(0), FieldValue::U32(size)) => self.size = size,
            (_, value) => invariants::shape_mismatch(TYPE.name, index, value.shape()),
        }
        Ok(())
    }
}

impl Record for Class {
    fn level() -> &'static LevelDecl {
        &CLASS
    }

    fn field(&self, index: usize) -> FieldRef<'_> {
        match CLASS.own_index(index) {
            None => self.ty.field(index),
            Some(0) => FieldRef::Name(&self.base_class),
            Some(_) => invariants::no_such_field(CLASS.name, index),
        }
    }

    fn set_field(&mut self, index: usize, value: FieldValue<'_>) -> Result<(), DecodeError> {
        match (CLASS.own_index(index), value) {
            (None, value) => return self.ty.set_field(index, value),
            (Some(0), FieldValue::Name(name)) => self.base_class = name,
            (_, value) => invariants::shape_mismatch(CLASS.name, index, value.shape()),
        }
        Ok(())
    }
}

impl Record for Enum {
    fn level() -> &'static LevelDecl {
        &ENUM
    }

    fn field(&self, index: usize) -> FieldRef<'_> {
        self.ty.field(index)
    }

    fn set_field(&mut self, index: usize, value: FieldValue<'_>) -> Result<(), DecodeError> {
        self.ty.set_field(index, value)
    }
}

impl Record for EnumConstant {
    fn level() -> &'static LevelDecl {
        &ENUM_CONSTANT
    }

    fn field(&self, index: usize) -> FieldRef<'_> {
        match ENUM_CONSTANT.own_index(index) {
            None => self.primitive.field(index),
            Some(0) => FieldRef::U64(self.value as u64),
            Some(_) => invariants::no_such_field(ENUM_CONSTANT.name, index),
        }
    }

    fn set_field(&mut self, index: usize, value: FieldValue<'_>) -> Result<(), DecodeError> {
        match (ENUM_CONSTANT.own_index(index), value) {
            (None, value) => return self.primitive.set_field(index, value),
            (Some(0), FieldValue::U64(v)) => self.value = v as i64,
            (_, value) => invariants::shape_mismatch(ENUM_CONSTANT.name, index, value.shape()),
        }
        Ok(())
    }
}

impl Record for Function {
    fn level() -> &'static LevelDecl {
        &FUNCTION
    }

    fn field(&self, index: usize) -> FieldRef<'_> {
        match FUNCTION.own_index(index) {
            None => self.primitive.field(index),
            Some(0) => FieldRef::U32(self.unique_id),
            Some(_) => invariants::no_such_field(FUNCTION.name, index),
        }
    }

    fn set_field(&mut self, index: usize, value: FieldValue<'_>) -> Result<(), DecodeError> {
        match (FUNCTION.own_index(index), value) {
            (None, value) => return self.primitive.set_field(index, value),
            (Some(0), FieldValue::U32(id)) => self.unique_id = id,
            (_, value) => invariants::shape_mismatch(FUNCTION.name, index, value.shape()),
        }
        Ok(())
    }
}

impl Record for Field {
    fn level() -> &'static LevelDecl {
        &FIELD
    }

    fn field(&self, index: usize) -> FieldRef<'_> {
        match FIELD.own_index(index) {
            None => self.primitive.field(index),
            Some(0) => FieldRef::Name(&self.type_name),
            Some(1) => FieldRef::U8(self.modifier as u8),
            Some(2) => FieldRef::U8(self.is_const as u8),
            Some(3) => FieldRef::U32(self.index as u32),
            Some(4) => FieldRef::U32(self.parent_unique_id),
            Some(_) => invariants::no_such_field(FIELD.name, index),
        }
    }

    fn set_field(&mut self, index: usize, value: FieldValue<'_>) -> Result<(), DecodeError> {
        let invalid = |field: &'static str, value: u8| DecodeError::InvalidFieldValue {
            record: FIELD.name,
            field,
            value: value as u64,
        };

        match (FIELD.own_index(index), value) {
            (None, value) => return self.primitive.set_field(index, value),
            (Some(0), FieldValue::Name(name)) => self.type_name = name,
            (Some(1), FieldValue::U8(v)) => {
                self.modifier = Modifier::from_u8(v).ok_or_else(|| invalid("modifier", v))?;
            }
            (Some(2), FieldValue::U8(v)) => {
                self.is_const = match v {
                    0 => false,
                    1 => true,
                    _ => return Err(invalid("is_const", v)),
                };
            }
            (Some(3), FieldValue::U32(v)) => self.index = v as i32,
            (Some(4), FieldValue::U32(v)) => self.parent_unique_id = v,
            (_, value) => invariants::shape_mismatch(FIELD.name, index, value.shape()),
        }
        Ok(())
    }
}
