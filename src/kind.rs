//! Field kinds and typed views of a single field slot.
//!
//! [`Slot`] is implemented for every type a record field may have. Primitive
//! types yield a bindable kind; `Option`, collections and maps yield a
//! non-bindable kind so they can sit in a declaration and be skipped.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::duration;

/// The kind of a record field, used to pick a coercion rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    String,
    /// `std::time::Duration`; stored as a duration literal.
    Duration,
    Optional,
    Sequence,
    Map,
}

impl Kind {
    /// Whether fields of this kind can be bound to a store key.
    pub fn is_bindable(self) -> bool {
        !matches!(self, Kind::Optional | Kind::Sequence | Kind::Map)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Bool => "bool",
            Kind::I8 => "i8",
            Kind::I16 => "i16",
            Kind::I32 => "i32",
            Kind::I64 => "i64",
            Kind::Isize => "isize",
            Kind::U8 => "u8",
            Kind::U16 => "u16",
            Kind::U32 => "u32",
            Kind::U64 => "u64",
            Kind::Usize => "usize",
            Kind::F32 => "f32",
            Kind::F64 => "f64",
            Kind::String => "string",
            Kind::Duration => "duration",
            Kind::Optional => "option",
            Kind::Sequence => "sequence",
            Kind::Map => "map",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only view of a field's current value.
///
/// `Display` renders the value the way it is written to a store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldRef<'a> {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Usize(usize),
    F32(f32),
    F64(f64),
    Str(&'a str),
    Duration(Duration),
    /// An `Option`; carries whether a value is present.
    Optional(bool),
    Opaque(Kind),
}

impl FieldRef<'_> {
    pub fn kind(&self) -> Kind {
        match self {
            FieldRef::Bool(_) => Kind::Bool,
            FieldRef::I8(_) => Kind::I8,
            FieldRef::I16(_) => Kind::I16,
            FieldRef::I32(_) => Kind::I32,
            FieldRef::I64(_) => Kind::I64,
            FieldRef::Isize(_) => Kind::Isize,
            FieldRef::U8(_) => Kind::U8,
            FieldRef::U16(_) => Kind::U16,
            FieldRef::U32(_) => Kind::U32,
            FieldRef::U64(_) => Kind::U64,
            FieldRef::Usize(_) => Kind::Usize,
            FieldRef::F32(_) => Kind::F32,
            FieldRef::F64(_) => Kind::F64,
            FieldRef::Str(_) => Kind::String,
            FieldRef::Duration(_) => Kind::Duration,
            FieldRef::Optional(_) => Kind::Optional,
            FieldRef::Opaque(kind) => *kind,
        }
    }
}

impl fmt::Display for FieldRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldRef::Bool(v) => write!(f, "{v}"),
            FieldRef::I8(v) => write!(f, "{v}"),
            FieldRef::I16(v) => write!(f, "{v}"),
            FieldRef::I32(v) => write!(f, "{v}"),
            FieldRef::I64(v) => write!(f, "{v}"),
            FieldRef::Isize(v) => write!(f, "{v}"),
            FieldRef::U8(v) => write!(f, "{v}"),
            FieldRef::U16(v) => write!(f, "{v}"),
            FieldRef::U32(v) => write!(f, "{v}"),
            FieldRef::U64(v) => write!(f, "{v}"),
            FieldRef::Usize(v) => write!(f, "{v}"),
            FieldRef::F32(v) => write!(f, "{v}"),
            FieldRef::F64(v) => write!(f, "{v}"),
            FieldRef::Str(v) => f.write_str(v),
            FieldRef::Duration(d) => f.write_str(&duration::format_nanos(d.as_nanos())),
            FieldRef::Optional(true) => f.write_str("<some>"),
            FieldRef::Optional(false) => f.write_str("<none>"),
            FieldRef::Opaque(kind) => write!(f, "<{kind}>"),
        }
    }
}

/// Mutable view of a field slot.
#[derive(Debug)]
pub enum FieldMut<'a> {
    Bool(&'a mut bool),
    I8(&'a mut i8),
    I16(&'a mut i16),
    I32(&'a mut i32),
    I64(&'a mut i64),
    Isize(&'a mut isize),
    U8(&'a mut u8),
    U16(&'a mut u16),
    U32(&'a mut u32),
    U64(&'a mut u64),
    Usize(&'a mut usize),
    F32(&'a mut f32),
    F64(&'a mut f64),
    Str(&'a mut String),
    Duration(&'a mut Duration),
    Opaque(Kind),
}

impl FieldMut<'_> {
    pub fn kind(&self) -> Kind {
        match self {
            FieldMut::Bool(_) => Kind::Bool,
            FieldMut::I8(_) => Kind::I8,
            FieldMut::I16(_) => Kind::I16,
            FieldMut::I32(_) => Kind::I32,
            FieldMut::I64(_) => Kind::I64,
            FieldMut::Isize(_) => Kind::Isize,
            FieldMut::U8(_) => Kind::U8,
            FieldMut::U16(_) => Kind::U16,
            FieldMut::U32(_) => Kind::U32,
            FieldMut::U64(_) => Kind::U64,
            FieldMut::Usize(_) => Kind::Usize,
            FieldMut::F32(_) => Kind::F32,
            FieldMut::F64(_) => Kind::F64,
            FieldMut::Str(_) => Kind::String,
            FieldMut::Duration(_) => Kind::Duration,
            FieldMut::Opaque(kind) => *kind,
        }
    }
}

/// A type that can occupy a record field.
pub trait Slot {
    fn field_ref(&self) -> FieldRef<'_>;
    fn field_mut(&mut self) -> FieldMut<'_>;
}

macro_rules! scalar_slot {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Slot for $ty {
                fn field_ref(&self) -> FieldRef<'_> {
                    FieldRef::$variant(*self)
                }

                fn field_mut(&mut self) -> FieldMut<'_> {
                    FieldMut::$variant(self)
                }
            }
        )*
    };
}

scalar_slot! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    Duration => Duration,
}

impl Slot for String {
    fn field_ref(&self) -> FieldRef<'_> {
        FieldRef::Str(self)
    }

    fn field_mut(&mut self) -> FieldMut<'_> {
        FieldMut::Str(self)
    }
}

impl<T> Slot for Option<T> {
    fn field_ref(&self) -> FieldRef<'_> {
        FieldRef::Optional(self.is_some())
    }

    fn field_mut(&mut self) -> FieldMut<'_> {
        FieldMut::Opaque(Kind::Optional)
    }
}

macro_rules! opaque_slot {
    ($kind:ident => $($ty:ty),* $(,)?) => {
        $(
            impl<T> Slot for $ty {
                fn field_ref(&self) -> FieldRef<'_> {
                    FieldRef::Opaque(Kind::$kind)
                }

                fn field_mut(&mut self) -> FieldMut<'_> {
                    FieldMut::Opaque(Kind::$kind)
                }
            }
        )*
    };
}

opaque_slot!(Sequence => Vec<T>, BTreeSet<T>, HashSet<T>);

impl<K, V> Slot for BTreeMap<K, V> {
    fn field_ref(&self) -> FieldRef<'_> {
        FieldRef::Opaque(Kind::Map)
    }

    fn field_mut(&mut self) -> FieldMut<'_> {
        FieldMut::Opaque(Kind::Map)
    }
}

impl<K, V, S> Slot for HashMap<K, V, S> {
    fn field_ref(&self) -> FieldRef<'_> {
        FieldRef::Opaque(Kind::Map)
    }

    fn field_mut(&mut self) -> FieldMut<'_> {
        FieldMut::Opaque(Kind::Map)
    }
}
