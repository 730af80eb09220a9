use std::cmp::Ordering;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::{hash::hash_bytes, HashCode, TypeRef};

/// Numeric scalar tagged with its primitive kind.
///
/// Every kind compares natively against the same kind. Floats use a total
/// order so that `NaN` equals itself and `-0.0` sorts before `0.0`.
#[derive(Clone, Copy, Debug)]
pub enum Number {
    /// `i8`
    I8(i8),
    /// `i16`
    I16(i16),
    /// `i32`
    I32(i32),
    /// `i64` (also used for `isize`)
    I64(i64),
    /// `u8`
    U8(u8),
    /// `u16`
    U16(u16),
    /// `u32`
    U32(u32),
    /// `u64` (also used for `usize`)
    U64(u64),
    /// `f32`
    F32(f32),
    /// `f64`
    F64(f64),
}

/// The primitive kind of a [`Number`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NumberKind {
    /// `i8`
    I8,
    /// `i16`
    I16,
    /// `i32`
    I32,
    /// `i64`
    I64,
    /// `u8`
    U8,
    /// `u16`
    U16,
    /// `u32`
    U32,
    /// `u64`
    U64,
    /// `f32`
    F32,
    /// `f64`
    F64,
}

impl NumberKind {
    /// Primitive type name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }

    /// Type reference for the primitive.
    #[must_use]
    pub const fn type_ref(self) -> TypeRef {
        TypeRef::named(self.name())
    }
}

impl Number {
    /// Returns the primitive kind.
    #[must_use]
    pub fn kind(self) -> NumberKind {
        match self {
            Self::I8(_) => NumberKind::I8,
            Self::I16(_) => NumberKind::I16,
            Self::I32(_) => NumberKind::I32,
            Self::I64(_) => NumberKind::I64,
            Self::U8(_) => NumberKind::U8,
            Self::U16(_) => NumberKind::U16,
            Self::U32(_) => NumberKind::U32,
            Self::U64(_) => NumberKind::U64,
            Self::F32(_) => NumberKind::F32,
            Self::F64(_) => NumberKind::F64,
        }
    }

    /// Native comparison for equal kinds.
    ///
    /// Mixed kinds never meet inside the engine because the type check runs
    /// first; they fall back to comparing as `f64` so that natural ordering
    /// of heterogeneous collections stays total.
    ///
    /// ```
    /// # use std::cmp::Ordering;
    /// # use structdiff_core::Number;
    /// assert_eq!(Number::I64(3).compare(Number::I64(7)), Ordering::Less);
    /// assert_eq!(Number::F64(f64::NAN).compare(Number::F64(f64::NAN)), Ordering::Equal);
    /// ```
    #[must_use]
    pub fn compare(self, other: Self) -> Ordering {
        match (self, other) {
            (Self::I8(a), Self::I8(b)) => a.cmp(&b),
            (Self::I16(a), Self::I16(b)) => a.cmp(&b),
            (Self::I32(a), Self::I32(b)) => a.cmp(&b),
            (Self::I64(a), Self::I64(b)) => a.cmp(&b),
            (Self::U8(a), Self::U8(b)) => a.cmp(&b),
            (Self::U16(a), Self::U16(b)) => a.cmp(&b),
            (Self::U32(a), Self::U32(b)) => a.cmp(&b),
            (Self::U64(a), Self::U64(b)) => a.cmp(&b),
            (Self::F32(a), Self::F32(b)) => a.total_cmp(&b),
            (Self::F64(a), Self::F64(b)) => a.total_cmp(&b),
            (a, b) => a.as_f64().total_cmp(&b.as_f64()),
        }
    }

    /// Lossy widening used only for cross-kind ordering.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::I8(v) => f64::from(v),
            Self::I16(v) => f64::from(v),
            Self::I32(v) => f64::from(v),
            Self::I64(v) => v as f64,
            Self::U8(v) => f64::from(v),
            Self::U16(v) => f64::from(v),
            Self::U32(v) => f64::from(v),
            Self::U64(v) => v as f64,
            Self::F32(v) => f64::from(v),
            Self::F64(v) => v,
        }
    }

    /// Hash over the kind and the native little-endian bytes.
    #[must_use]
    pub fn hash_code(self) -> HashCode {
        let mut bytes = Vec::with_capacity(9);
        bytes.push(self.kind() as u8);
        match self {
            Self::I8(v) => bytes.extend_from_slice(&v.to_le_bytes()),
            Self::I16(v) => bytes.extend_from_slice(&v.to_le_bytes()),
            Self::I32(v) => bytes.extend_from_slice(&v.to_le_bytes()),
            Self::I64(v) => bytes.extend_from_slice(&v.to_le_bytes()),
            Self::U8(v) => bytes.extend_from_slice(&v.to_le_bytes()),
            Self::U16(v) => bytes.extend_from_slice(&v.to_le_bytes()),
            Self::U32(v) => bytes.extend_from_slice(&v.to_le_bytes()),
            Self::U64(v) => bytes.extend_from_slice(&v.to_le_bytes()),
            Self::F32(v) => bytes.extend_from_slice(&v.to_bits().to_le_bytes()),
            Self::F64(v) => bytes.extend_from_slice(&v.to_bits().to_le_bytes()),
        }
        hash_bytes(&bytes)
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.kind() == other.kind() && self.compare(*other) == Ordering::Equal
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::I8(v) => write!(f, "{v}"),
            Self::I16(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::U8(v) => write!(f, "{v}"),
            Self::U16(v) => write!(f, "{v}"),
            Self::U32(v) => write!(f, "{v}"),
            Self::U64(v) => write!(f, "{v}"),
            Self::F32(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
        }
    }
}

impl Serialize for Number {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match *self {
            Self::I8(v) => serializer.serialize_i8(v),
            Self::I16(v) => serializer.serialize_i16(v),
            Self::I32(v) => serializer.serialize_i32(v),
            Self::I64(v) => serializer.serialize_i64(v),
            Self::U8(v) => serializer.serialize_u8(v),
            Self::U16(v) => serializer.serialize_u16(v),
            Self::U32(v) => serializer.serialize_u32(v),
            Self::U64(v) => serializer.serialize_u64(v),
            Self::F32(v) => serializer.serialize_f32(v),
            Self::F64(v) => serializer.serialize_f64(v),
        }
    }
}
