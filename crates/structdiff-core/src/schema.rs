//! Static type descriptors used by the introspection layer.
//!
//! Rust carries no runtime field metadata, so composite types describe
//! themselves with a [`Schema`]: a type name, the declared [`Field`]s, and an
//! optional parent schema whose fields are inherited. Schemas are meant to be
//! declared as `static` items next to the type they describe.
//!
//! ```
//! use structdiff_core::{Field, Modifiers, Schema};
//!
//! static ENTITY: Schema = Schema::new(
//!     "Entity",
//!     &[Field::new("id", "u64")],
//! );
//! static ACCOUNT: Schema = Schema::new(
//!     "Account",
//!     &[
//!         Field::new("owner", "String"),
//!         Field::new("cache", "String").with(Modifiers::TRANSIENT),
//!     ],
//! )
//! .extends(&ENTITY);
//!
//! assert_eq!(ACCOUNT.parent().map(Schema::name), Some("Entity"));
//! assert!(ACCOUNT.fields()[1].is_transient());
//! ```

use std::borrow::Cow;
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use serde::{Serialize, Serializer};

/// Name of a declared or runtime type.
///
/// Two values with different type references are never compared beyond the
/// type check; the engine reports a single type mismatch instead.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeRef(Cow<'static, str>);

impl TypeRef {
    /// Creates a type reference from a static name.
    #[must_use]
    pub const fn named(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Creates a type reference from an owned name.
    #[must_use]
    pub fn owned(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    /// Returns the type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }

}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for TypeRef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl From<&'static str> for TypeRef {
    fn from(value: &'static str) -> Self {
        Self::named(value)
    }
}

/// Storage and visibility flags attached to a [`Field`].
///
/// ```
/// # use structdiff_core::Modifiers;
/// let flags = Modifiers::TRANSIENT | Modifiers::FINAL;
/// assert!(flags.contains(Modifiers::TRANSIENT));
/// assert!(!flags.contains(Modifiers::STATIC));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// Derived or cached state that does not take part in the value's identity.
    pub const TRANSIENT: Self = Self(1);
    /// Type-level state shared by all instances.
    pub const STATIC: Self = Self(1 << 1);
    /// State that is never reassigned after construction.
    pub const FINAL: Self = Self(1 << 2);
    /// State not visible outside the declaring type.
    pub const PRIVATE: Self = Self(1 << 3);

    /// Returns `true` when every flag in `other` is also set in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns `true` when at least one flag in `other` is set in `self`.
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Const-friendly union.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl BitOr for Modifiers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl BitOrAssign for Modifiers {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

/// A declared field of a composite type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    name: &'static str,
    declared_type: &'static str,
    modifiers: Modifiers,
}

impl Field {
    /// Declares a field with no modifiers.
    #[must_use]
    pub const fn new(name: &'static str, declared_type: &'static str) -> Self {
        Self { name, declared_type, modifiers: Modifiers::NONE }
    }

    /// Adds modifier flags.
    #[must_use]
    pub const fn with(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = self.modifiers.union(modifiers);
        self
    }

    /// Field name as it appears in diff paths.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared type, reported on scalar diffs.
    #[must_use]
    pub const fn declared_type(&self) -> TypeRef {
        TypeRef::named(self.declared_type)
    }

    /// Modifier flags.
    #[must_use]
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Shorthand for `modifiers().contains(Modifiers::TRANSIENT)`.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        self.modifiers.contains(Modifiers::TRANSIENT)
    }

    /// Shorthand for `modifiers().contains(Modifiers::STATIC)`.
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.modifiers.contains(Modifiers::STATIC)
    }

    /// Shorthand for `modifiers().contains(Modifiers::FINAL)`.
    #[must_use]
    pub fn is_final(&self) -> bool {
        self.modifiers.contains(Modifiers::FINAL)
    }
}

/// Descriptor of a composite type: its name, declared fields and parent.
#[derive(Debug)]
pub struct Schema {
    name: &'static str,
    fields: &'static [Field],
    parent: Option<&'static Schema>,
}

impl Schema {
    /// Declares a schema without a parent.
    #[must_use]
    pub const fn new(name: &'static str, fields: &'static [Field]) -> Self {
        Self { name, fields, parent: None }
    }

    /// Sets the parent schema whose fields are inherited.
    #[must_use]
    pub const fn extends(mut self, parent: &'static Schema) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Type name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Fields declared directly on this type, without inherited ones.
    #[must_use]
    pub fn fields(&self) -> &'static [Field] {
        self.fields
    }

    /// Parent schema, if any.
    #[must_use]
    pub fn parent(&self) -> Option<&'static Schema> {
        self.parent
    }

    /// Type reference naming this schema.
    #[must_use]
    pub const fn type_ref(&self) -> TypeRef {
        TypeRef::named(self.name)
    }

    /// Address of this descriptor. Schemas sharing a name are still distinct.
    pub(crate) fn key(&'static self) -> usize {
        std::ptr::from_ref(self) as usize
    }

    /// Returns `true` when both references point at the same descriptor.
    #[must_use]
    pub fn same(&'static self, other: &'static Schema) -> bool {
        std::ptr::eq(self, other)
    }

    /// Iterates this schema followed by its ancestors, nearest first.
    pub fn lineage(&'static self) -> impl Iterator<Item = &'static Schema> {
        std::iter::successors(Some(self), |schema| schema.parent)
    }
}
