//! Materialized value model traversed by the engine.
//!
//! Every compared operand is converted into a [`Value`] through the
//! [`Inspect`](crate::Inspect) trait. The model is closed: each value maps to
//! exactly one [`Shape`], which drives null-handling verbosity and the
//! scalar-versus-recursive branch of the comparison.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::ser::{SerializeMap, SerializeSeq, SerializeStruct};
use serde::{Serialize, Serializer};
use uuid::Uuid;

use crate::hash::{combine, hash_bytes, sequence, HashCode};
use crate::{Decimal, Inspect, Number, NumberKind, Schema, TypeRef};

const NULL_HASH: HashCode = [0xFE, 0x73, 0xAB, 0xCC, 0xE6, 0x32, 0xE0, 0x88];
const BOOL_TRUE_HASH: HashCode = [0x24, 0x6B, 0xE3, 0xE4, 0xAF, 0x59, 0xDC, 0x1C];
const BOOL_FALSE_HASH: HashCode = [0xC6, 0x38, 0x77, 0xD1, 0x0A, 0x7E, 0x1F, 0xBF];
const LIST_SEED: [u8; 8] = [0xF5, 0x18, 0x0A, 0x71, 0xA4, 0xC4, 0x03, 0xF3];
const ARRAY_SEED: [u8; 8] = [0x6A, 0x0E, 0x91, 0x3C, 0x55, 0xB2, 0x7D, 0x14];
const RECORD_SEED: [u8; 8] = [0x00, 0x5D, 0x39, 0xA4, 0x18, 0x10, 0xEA, 0xD5];

/// A value of the compared object graph.
#[derive(Clone, Debug)]
pub enum Value {
    /// Absent value.
    Null,
    /// Boolean.
    Bool(bool),
    /// Unicode scalar.
    Char(char),
    /// Integer or floating point number.
    Number(Number),
    /// Text.
    String(String),
    /// Arbitrary-precision decimal.
    Decimal(Decimal),
    /// Enumeration constant.
    Enum(EnumValue),
    /// UTC instant.
    DateTime(DateTime<Utc>),
    /// Calendar date.
    Date(NaiveDate),
    /// UUID.
    Uuid(Uuid),
    /// Identity-like value compared through its text, such as a path or address.
    Atom(Atom),
    /// Ordered, index-addressable sequence.
    List(Sequence),
    /// Unordered collection of distinct elements.
    Set(Sequence),
    /// Iteration-ordered collection without index access.
    Collection(Sequence),
    /// Key-value mapping.
    Map(Mapping),
    /// Fixed-size array with a known component kind.
    Array(Array),
    /// Composite value compared field by field.
    Record(Record),
}

/// Classification of a scalar value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// `bool`
    Bool,
    /// `char`
    Char,
    /// Any numeric primitive.
    Number(NumberKind),
    /// Text.
    String,
    /// Arbitrary-precision decimal.
    Decimal,
    /// Enumeration constant.
    Enum,
    /// UTC instant.
    DateTime,
    /// Calendar date.
    Date,
    /// UUID.
    Uuid,
    /// Identity-like value.
    Atom,
}

/// Component kind of an [`Array`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// `bool` components.
    Bool,
    /// `char` components.
    Char,
    /// Numeric primitive components.
    Number(NumberKind),
    /// Any other component type.
    #[default]
    Object,
}

/// Shape of a value, computed once per comparison step.
///
/// ```
/// # use structdiff_core::{Inspect, Shape, ScalarKind};
/// assert_eq!("text".inspect().shape(), Shape::Simple(ScalarKind::String));
/// assert_eq!(vec![1_i32, 2].inspect().shape(), Shape::List);
/// assert!(Inspect::inspect(&Option::<i32>::None).shape().is_null());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Absent value.
    Null,
    /// Scalar compared by direct equality or ordering.
    Simple(ScalarKind),
    /// See [`Value::List`].
    List,
    /// See [`Value::Map`].
    Map,
    /// See [`Value::Set`].
    Set,
    /// See [`Value::Collection`].
    Collection,
    /// See [`Value::Array`].
    Array(ElementKind),
    /// See [`Value::Record`].
    Complex,
}

impl Shape {
    /// Returns `true` for scalar shapes.
    #[must_use]
    pub fn is_simple(self) -> bool {
        matches!(self, Self::Simple(_))
    }

    /// Returns `true` for [`Shape::Null`].
    #[must_use]
    pub fn is_null(self) -> bool {
        matches!(self, Self::Null)
    }
}

/// An enumeration constant: the enum's type, the variant name, and its
/// declaration position.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EnumValue {
    ty: &'static str,
    variant: &'static str,
    ordinal: u32,
}

impl EnumValue {
    /// Describes a variant declared at position `ordinal`.
    #[must_use]
    pub const fn new(ty: &'static str, variant: &'static str, ordinal: u32) -> Self {
        Self { ty, variant, ordinal }
    }

    /// Enum type name.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.ty
    }

    /// Variant name.
    #[must_use]
    pub fn variant(&self) -> &'static str {
        self.variant
    }

    /// Declaration position.
    #[must_use]
    pub fn ordinal(&self) -> u32 {
        self.ordinal
    }
}

/// Identity-like scalar compared through its textual form.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Atom {
    ty: TypeRef,
    text: String,
}

impl Atom {
    /// Creates an atom of type `ty`.
    #[must_use]
    pub fn new(ty: impl Into<TypeRef>, text: impl Into<String>) -> Self {
        Self { ty: ty.into(), text: text.into() }
    }

    /// Atom type.
    #[must_use]
    pub fn type_ref(&self) -> &TypeRef {
        &self.ty
    }

    /// Textual form.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Elements of a list, set or generic collection.
#[derive(Clone, Debug)]
pub struct Sequence {
    container: TypeRef,
    element: TypeRef,
    items: Vec<Value>,
}

impl Sequence {
    /// Creates a sequence of `element` values held in `container`.
    #[must_use]
    pub fn new(container: impl Into<TypeRef>, element: TypeRef, items: Vec<Value>) -> Self {
        Self { container: container.into(), element, items }
    }

    /// Container type, e.g. `Vec` or `BTreeSet`.
    #[must_use]
    pub fn container(&self) -> &TypeRef {
        &self.container
    }

    /// Declared element type.
    #[must_use]
    pub fn element(&self) -> &TypeRef {
        &self.element
    }

    /// Elements in iteration order.
    #[must_use]
    pub fn items(&self) -> &[Value] {
        &self.items
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` when there are no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Entries of a key-value map.
#[derive(Clone, Debug)]
pub struct Mapping {
    container: TypeRef,
    key: TypeRef,
    value: TypeRef,
    entries: Vec<(Value, Value)>,
}

impl Mapping {
    /// Creates a mapping held in `container`.
    #[must_use]
    pub fn new(
        container: impl Into<TypeRef>,
        key: TypeRef,
        value: TypeRef,
        entries: Vec<(Value, Value)>,
    ) -> Self {
        Self { container: container.into(), key, value, entries }
    }

    /// Container type, e.g. `HashMap`.
    #[must_use]
    pub fn container(&self) -> &TypeRef {
        &self.container
    }

    /// Declared key type.
    #[must_use]
    pub fn key_type(&self) -> &TypeRef {
        &self.key
    }

    /// Declared value type.
    #[must_use]
    pub fn value_type(&self) -> &TypeRef {
        &self.value
    }

    /// Entries in iteration order.
    #[must_use]
    pub fn entries(&self) -> &[(Value, Value)] {
        &self.entries
    }

    /// Looks up the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Fixed-size array.
#[derive(Clone, Debug)]
pub struct Array {
    element: TypeRef,
    kind: ElementKind,
    items: Vec<Value>,
}

impl Array {
    /// Creates an array of `element` components.
    #[must_use]
    pub fn new(element: TypeRef, kind: ElementKind, items: Vec<Value>) -> Self {
        Self { element, kind, items }
    }

    /// Component type.
    #[must_use]
    pub fn element(&self) -> &TypeRef {
        &self.element
    }

    /// Component kind.
    #[must_use]
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Components in index order.
    #[must_use]
    pub fn items(&self) -> &[Value] {
        &self.items
    }

    /// Array type name, e.g. `[i32]`.
    #[must_use]
    pub fn type_ref(&self) -> TypeRef {
        TypeRef::owned(format!("[{}]", self.element))
    }
}

/// A composite value: a schema plus the values of its fields.
///
/// Records are assembled with [`Record::builder`]. Inherited fields are
/// supplied either directly or by extending with the parent's value.
///
/// ```
/// use structdiff_core::{Field, Record, Schema};
///
/// static POINT: Schema = Schema::new("Point", &[Field::new("x", "i32"), Field::new("y", "i32")]);
///
/// let record = Record::builder(&POINT).field("x", &1).field("y", &2).build();
/// assert_eq!(record.get("y").map(ToString::to_string).as_deref(), Some("2"));
/// assert!(record.get("z").is_none());
/// ```
#[derive(Clone)]
pub struct Record {
    schema: &'static Schema,
    values: Vec<(&'static str, Value)>,
}

impl Record {
    /// Starts building a record of the given schema.
    #[must_use]
    pub fn builder(schema: &'static Schema) -> RecordBuilder {
        RecordBuilder { record: Self { schema, values: Vec::with_capacity(schema.fields().len()) } }
    }

    /// Runtime schema.
    #[must_use]
    pub fn schema(&self) -> &'static Schema {
        self.schema
    }

    /// Value recorded for the named field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.iter().find(|(field, _)| *field == name).map(|(_, value)| value)
    }

    /// Recorded values in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.values.iter().map(|(name, value)| (*name, value))
    }

    /// Orders by schema, then by the declared fields in lineage order, then by
    /// values recorded under undeclared names. Insertion order never matters.
    fn natural_cmp(&self, other: &Self) -> Ordering {
        self.schema
            .name()
            .cmp(other.schema.name())
            .then_with(|| self.schema.key().cmp(&other.schema.key()))
            .then_with(|| {
                for field in self.schema.lineage().flat_map(Schema::fields) {
                    let ord = match (self.get(field.name()), other.get(field.name())) {
                        (Some(a), Some(b)) => a.natural_cmp(b),
                        (a, b) => a.is_some().cmp(&b.is_some()),
                    };
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                let (left, right) = (self.undeclared(), other.undeclared());
                for ((ln, lv), (rn, rv)) in left.iter().zip(&right) {
                    let ord = ln.cmp(rn).then_with(|| lv.natural_cmp(rv));
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                left.len().cmp(&right.len())
            })
    }

    fn undeclared(&self) -> Vec<(&'static str, &Value)> {
        let mut extra: Vec<_> = self
            .iter()
            .filter(|(name, _)| {
                !self.schema.lineage().flat_map(Schema::fields).any(|field| field.name() == *name)
            })
            .collect();
        extra.sort_by_key(|(name, _)| *name);
        extra
    }

    fn set(&mut self, name: &'static str, value: Value) {
        match self.values.iter_mut().find(|(field, _)| *field == name) {
            Some(slot) => slot.1 = value,
            None => self.values.push((name, value)),
        }
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct(self.schema.name());
        for (name, value) in &self.values {
            out.field(name, value);
        }
        out.finish()
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.schema.same(other.schema)
            && self.values.len() == other.values.len()
            && self.values.iter().all(|(name, value)| other.get(name) == Some(value))
    }
}

/// Builder returned by [`Record::builder`].
#[must_use]
pub struct RecordBuilder {
    record: Record,
}

impl RecordBuilder {
    /// Records the value of a field.
    pub fn field<T>(mut self, name: &'static str, value: &T) -> Self
    where
        T: Inspect + ?Sized,
    {
        self.record.set(name, value.inspect());
        self
    }

    /// Records an already materialized value.
    pub fn value(mut self, name: &'static str, value: Value) -> Self {
        self.record.set(name, value);
        self
    }

    /// Copies the field values of an ancestor.
    ///
    /// Fields already recorded on the builder are kept. Values that do not
    /// inspect to a record contribute nothing.
    pub fn extend<T>(mut self, base: &T) -> Self
    where
        T: Inspect + ?Sized,
    {
        if let Value::Record(parent) = base.inspect() {
            for (name, value) in parent.values {
                if self.record.get(name).is_none() {
                    self.record.values.push((name, value));
                }
            }
        }
        self
    }

    /// Finishes the record.
    #[must_use]
    pub fn build(self) -> Record {
        self.record
    }

    /// Finishes the record as a [`Value`].
    #[must_use]
    pub fn finish(self) -> Value {
        Value::Record(self.record)
    }
}

impl Value {
    /// Classifies the value.
    #[must_use]
    pub fn shape(&self) -> Shape {
        match self {
            Self::Null => Shape::Null,
            Self::Bool(_) => Shape::Simple(ScalarKind::Bool),
            Self::Char(_) => Shape::Simple(ScalarKind::Char),
            Self::Number(n) => Shape::Simple(ScalarKind::Number(n.kind())),
            Self::String(_) => Shape::Simple(ScalarKind::String),
            Self::Decimal(_) => Shape::Simple(ScalarKind::Decimal),
            Self::Enum(_) => Shape::Simple(ScalarKind::Enum),
            Self::DateTime(_) => Shape::Simple(ScalarKind::DateTime),
            Self::Date(_) => Shape::Simple(ScalarKind::Date),
            Self::Uuid(_) => Shape::Simple(ScalarKind::Uuid),
            Self::Atom(_) => Shape::Simple(ScalarKind::Atom),
            Self::List(_) => Shape::List,
            Self::Map(_) => Shape::Map,
            Self::Set(_) => Shape::Set,
            Self::Collection(_) => Shape::Collection,
            Self::Array(array) => Shape::Array(array.kind),
            Self::Record(_) => Shape::Complex,
        }
    }

    /// Returns `true` for [`Value::Null`].
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Runtime type of the value.
    ///
    /// ```
    /// # use structdiff_core::Inspect;
    /// assert_eq!(7_u8.inspect().type_ref().name(), "u8");
    /// assert_eq!(vec!["a"].inspect().type_ref().name(), "Vec");
    /// ```
    #[must_use]
    pub fn type_ref(&self) -> TypeRef {
        match self {
            Self::Null => TypeRef::named("null"),
            Self::Bool(_) => TypeRef::named("bool"),
            Self::Char(_) => TypeRef::named("char"),
            Self::Number(n) => n.kind().type_ref(),
            Self::String(_) => TypeRef::named("String"),
            Self::Decimal(_) => TypeRef::named("BigDecimal"),
            Self::Enum(e) => TypeRef::named(e.ty),
            Self::DateTime(_) => TypeRef::named("DateTime<Utc>"),
            Self::Date(_) => TypeRef::named("NaiveDate"),
            Self::Uuid(_) => TypeRef::named("Uuid"),
            Self::Atom(atom) => atom.ty.clone(),
            Self::List(seq) | Self::Set(seq) | Self::Collection(seq) => seq.container.clone(),
            Self::Map(map) => map.container.clone(),
            Self::Array(array) => array.type_ref(),
            Self::Record(record) => record.schema.type_ref(),
        }
    }

    /// Total natural ordering.
    ///
    /// Values of different variants order by variant; within a variant
    /// scalars use their native ordering and containers compare their
    /// elements lexicographically. Decimals that fail to parse fall back to
    /// comparing their literals.
    ///
    /// ```
    /// # use std::cmp::Ordering;
    /// # use structdiff_core::Inspect;
    /// assert_eq!(3_i32.inspect().natural_cmp(&10_i32.inspect()), Ordering::Less);
    /// assert_eq!("b".inspect().natural_cmp(&"a".inspect()), Ordering::Greater);
    /// ```
    #[must_use]
    pub fn natural_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Null, Self::Null) => Ordering::Equal,
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Char(a), Self::Char(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => a.compare(*b),
            (Self::String(a), Self::String(b)) => a.cmp(b),
            (Self::Decimal(a), Self::Decimal(b)) => {
                a.compare(b).unwrap_or_else(|_| a.as_str().cmp(b.as_str()))
            }
            (Self::Enum(a), Self::Enum(b)) => {
                a.ty.cmp(b.ty).then_with(|| a.ordinal.cmp(&b.ordinal))
            }
            (Self::DateTime(a), Self::DateTime(b)) => a.cmp(b),
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            (Self::Uuid(a), Self::Uuid(b)) => a.cmp(b),
            (Self::Atom(a), Self::Atom(b)) => a.ty.cmp(&b.ty).then_with(|| a.text.cmp(&b.text)),
            (Self::List(a), Self::List(b))
            | (Self::Set(a), Self::Set(b))
            | (Self::Collection(a), Self::Collection(b)) => cmp_items(&a.items, &b.items),
            (Self::Array(a), Self::Array(b)) => cmp_items(&a.items, &b.items),
            (Self::Map(a), Self::Map(b)) => {
                let mut left = a.entries.iter();
                let mut right = b.entries.iter();
                loop {
                    match (left.next(), right.next()) {
                        (None, None) => return Ordering::Equal,
                        (None, Some(_)) => return Ordering::Less,
                        (Some(_), None) => return Ordering::Greater,
                        (Some((lk, lv)), Some((rk, rv))) => {
                            let ord = lk.natural_cmp(rk).then_with(|| lv.natural_cmp(rv));
                            if ord != Ordering::Equal {
                                return ord;
                            }
                        }
                    }
                }
            }
            (Self::Record(a), Self::Record(b)) => a.natural_cmp(b),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }

    /// Structural hash consistent with equality.
    ///
    /// Sets, maps and records hash their members independently of order.
    #[must_use]
    pub fn hash_code(&self) -> HashCode {
        match self {
            Self::Null => NULL_HASH,
            Self::Bool(true) => BOOL_TRUE_HASH,
            Self::Bool(false) => BOOL_FALSE_HASH,
            Self::Char(c) => tagged(b'c', &u32::from(*c).to_le_bytes()),
            Self::Number(n) => n.hash_code(),
            Self::String(s) => tagged(b's', s.as_bytes()),
            Self::Decimal(d) => tagged(b'd', d.as_str().as_bytes()),
            Self::Enum(e) => {
                let mut bytes = e.ty.as_bytes().to_vec();
                bytes.extend_from_slice(&e.ordinal.to_le_bytes());
                tagged(b'e', &bytes)
            }
            Self::DateTime(t) => {
                let mut bytes = t.timestamp().to_le_bytes().to_vec();
                bytes.extend_from_slice(&t.timestamp_subsec_nanos().to_le_bytes());
                tagged(b't', &bytes)
            }
            Self::Date(d) => tagged(b'D', &d.num_days_from_ce().to_le_bytes()),
            Self::Uuid(u) => tagged(b'u', u.as_bytes()),
            Self::Atom(a) => tagged(b'a', format!("{}\u{0}{}", a.ty, a.text).as_bytes()),
            Self::List(seq) | Self::Collection(seq) => {
                sequence(&LIST_SEED, seq.items.iter().map(Self::hash_code))
            }
            Self::Array(array) => sequence(&ARRAY_SEED, array.items.iter().map(Self::hash_code)),
            Self::Set(seq) => combine(seq.items.iter().map(Self::hash_code).collect()),
            Self::Map(map) => combine(
                map.entries
                    .iter()
                    .map(|(k, v)| sequence(&k.hash_code(), [v.hash_code()]))
                    .collect(),
            ),
            Self::Record(record) => {
                let fields = combine(
                    record
                        .values
                        .iter()
                        .map(|(name, value)| sequence(name.as_bytes(), [value.hash_code()]))
                        .collect(),
                );
                sequence(&RECORD_SEED, [hash_bytes(record.schema.name().as_bytes()), fields])
            }
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Char(_) => 2,
            Self::Number(_) => 3,
            Self::String(_) => 4,
            Self::Decimal(_) => 5,
            Self::Enum(_) => 6,
            Self::DateTime(_) => 7,
            Self::Date(_) => 8,
            Self::Uuid(_) => 9,
            Self::Atom(_) => 10,
            Self::List(_) => 11,
            Self::Collection(_) => 12,
            Self::Set(_) => 13,
            Self::Map(_) => 14,
            Self::Array(_) => 15,
            Self::Record(_) => 16,
        }
    }
}

fn tagged(tag: u8, payload: &[u8]) -> HashCode {
    let mut bytes = Vec::with_capacity(payload.len() + 1);
    bytes.push(tag);
    bytes.extend_from_slice(payload);
    hash_bytes(&bytes)
}

fn cmp_items(left: &[Value], right: &[Value]) -> Ordering {
    for (l, r) in left.iter().zip(right) {
        let ord = l.natural_cmp(r);
        if ord != Ordering::Equal {
            return ord;
        }
    }
    left.len().cmp(&right.len())
}

fn contains_all(haystack: &[Value], needles: &[Value]) -> bool {
    needles.iter().all(|needle| haystack.contains(needle))
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Char(a), Self::Char(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Decimal(a), Self::Decimal(b)) => a == b,
            (Self::Enum(a), Self::Enum(b)) => a == b,
            (Self::DateTime(a), Self::DateTime(b)) => a == b,
            (Self::Date(a), Self::Date(b)) => a == b,
            (Self::Uuid(a), Self::Uuid(b)) => a == b,
            (Self::Atom(a), Self::Atom(b)) => a == b,
            (Self::List(a), Self::List(b)) | (Self::Collection(a), Self::Collection(b)) => {
                a.container == b.container && a.items == b.items
            }
            (Self::Set(a), Self::Set(b)) => {
                a.container == b.container
                    && a.items.len() == b.items.len()
                    && contains_all(&b.items, &a.items)
            }
            (Self::Map(a), Self::Map(b)) => {
                a.container == b.container
                    && a.entries.len() == b.entries.len()
                    && a.entries.iter().all(|(k, v)| b.get(k) == Some(v))
            }
            (Self::Array(a), Self::Array(b)) => a.element == b.element && a.items == b.items,
            (Self::Record(a), Self::Record(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Char(v) => write!(f, "{v}"),
            Self::Number(v) => write!(f, "{v}"),
            Self::String(v) => f.write_str(v),
            Self::Decimal(v) => write!(f, "{v}"),
            Self::Enum(v) => f.write_str(v.variant),
            Self::DateTime(v) => f.write_str(&v.to_rfc3339()),
            Self::Date(v) => write!(f, "{v}"),
            Self::Uuid(v) => write!(f, "{v}"),
            Self::Atom(v) => f.write_str(&v.text),
            Self::List(seq) | Self::Set(seq) | Self::Collection(seq) => {
                write_joined(f, "[", &seq.items, "]")
            }
            Self::Array(array) => write_joined(f, "[", &array.items, "]"),
            Self::Map(map) => {
                f.write_str("{")?;
                for (index, (key, value)) in map.entries.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}={value}")?;
                }
                f.write_str("}")
            }
            Self::Record(record) => {
                write!(f, "{} {{", record.schema.name())?;
                for (index, (name, value)) in record.values.iter().enumerate() {
                    let sep = if index == 0 { " " } else { ", " };
                    write!(f, "{sep}{name}: {value}")?;
                }
                f.write_str(" }")
            }
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, open: &str, items: &[Value], close: &str) -> fmt::Result {
    f.write_str(open)?;
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str(close)
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(v) => serializer.serialize_bool(*v),
            Self::Char(v) => serializer.serialize_char(*v),
            Self::Number(v) => v.serialize(serializer),
            Self::String(v) => serializer.serialize_str(v),
            Self::Decimal(v) => v.serialize(serializer),
            Self::Enum(v) => serializer.serialize_str(v.variant),
            Self::DateTime(v) => v.serialize(serializer),
            Self::Date(v) => v.serialize(serializer),
            Self::Uuid(v) => v.serialize(serializer),
            Self::Atom(v) => serializer.serialize_str(&v.text),
            Self::List(seq) | Self::Set(seq) | Self::Collection(seq) => {
                serialize_items(serializer, &seq.items)
            }
            Self::Array(array) => serialize_items(serializer, &array.items),
            Self::Map(map) => {
                let mut out = serializer.serialize_map(Some(map.entries.len()))?;
                for (key, value) in &map.entries {
                    out.serialize_entry(&key.to_string(), value)?;
                }
                out.end()
            }
            Self::Record(record) => {
                let mut out = serializer.serialize_struct("Record", 2)?;
                out.serialize_field("type", record.schema.name())?;
                out.serialize_field("fields", &RecordFields(record))?;
                out.end()
            }
        }
    }
}

fn serialize_items<S>(serializer: S, items: &[Value]) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut out = serializer.serialize_seq(Some(items.len()))?;
    for item in items {
        out.serialize_element(item)?;
    }
    out.end()
}

struct RecordFields<'a>(&'a Record);

impl Serialize for RecordFields<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut out = serializer.serialize_map(Some(self.0.values.len()))?;
        for (name, value) in &self.0.values {
            out.serialize_entry(name, value)?;
        }
        out.end()
    }
}
