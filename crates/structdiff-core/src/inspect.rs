//! Conversion of Rust values into the [`Value`] model.
//!
//! Composite types implement [`Inspect`] by hand, pairing a static
//! [`Schema`](crate::Schema) with a [`Record`] built from their fields:
//!
//! ```
//! use structdiff_core::{Field, Inspect, Record, Schema, TypeRef, Value};
//!
//! struct Trade {
//!     book: String,
//!     quantity: i64,
//! }
//!
//! static TRADE: Schema = Schema::new(
//!     "Trade",
//!     &[Field::new("book", "String"), Field::new("quantity", "i64")],
//! );
//!
//! impl Inspect for Trade {
//!     fn type_ref() -> TypeRef {
//!         TRADE.type_ref()
//!     }
//!
//!     fn inspect(&self) -> Value {
//!         Record::builder(&TRADE)
//!             .field("book", &self.book)
//!             .field("quantity", &self.quantity)
//!             .finish()
//!     }
//! }
//!
//! let trade = Trade { book: "FX".into(), quantity: 10 };
//! assert_eq!(trade.inspect().type_ref().name(), "Trade");
//! ```

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::hash::BuildHasher;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;

use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::value::{Array, Atom, ElementKind, Mapping, Sequence};
use crate::{Decimal, Number, NumberKind, Record, TypeRef, Value};

/// Types that can be materialized into a [`Value`] for comparison.
pub trait Inspect {
    /// Declared type, used for collection element types and comparator lookup.
    fn type_ref() -> TypeRef;

    /// Component kind when the type is stored in an array.
    fn element_kind() -> ElementKind {
        ElementKind::Object
    }

    /// Materializes the value.
    fn inspect(&self) -> Value;
}

macro_rules! inspect_number {
    ($($ty:ty => $variant:ident, $kind:ident;)*) => {
        $(
            impl Inspect for $ty {
                fn type_ref() -> TypeRef {
                    NumberKind::$kind.type_ref()
                }

                fn element_kind() -> ElementKind {
                    ElementKind::Number(NumberKind::$kind)
                }

                fn inspect(&self) -> Value {
                    Value::Number(Number::$variant(*self))
                }
            }
        )*
    };
}

inspect_number! {
    i8 => I8, I8;
    i16 => I16, I16;
    i32 => I32, I32;
    i64 => I64, I64;
    u8 => U8, U8;
    u16 => U16, U16;
    u32 => U32, U32;
    u64 => U64, U64;
    f32 => F32, F32;
    f64 => F64, F64;
}

impl Inspect for isize {
    fn type_ref() -> TypeRef {
        NumberKind::I64.type_ref()
    }

    fn element_kind() -> ElementKind {
        ElementKind::Number(NumberKind::I64)
    }

    fn inspect(&self) -> Value {
        Value::Number(Number::I64(*self as i64))
    }
}

impl Inspect for usize {
    fn type_ref() -> TypeRef {
        NumberKind::U64.type_ref()
    }

    fn element_kind() -> ElementKind {
        ElementKind::Number(NumberKind::U64)
    }

    fn inspect(&self) -> Value {
        Value::Number(Number::U64(*self as u64))
    }
}

impl Inspect for bool {
    fn type_ref() -> TypeRef {
        TypeRef::named("bool")
    }

    fn element_kind() -> ElementKind {
        ElementKind::Bool
    }

    fn inspect(&self) -> Value {
        Value::Bool(*self)
    }
}

impl Inspect for char {
    fn type_ref() -> TypeRef {
        TypeRef::named("char")
    }

    fn element_kind() -> ElementKind {
        ElementKind::Char
    }

    fn inspect(&self) -> Value {
        Value::Char(*self)
    }
}

impl Inspect for str {
    fn type_ref() -> TypeRef {
        TypeRef::named("String")
    }

    fn inspect(&self) -> Value {
        Value::String(self.to_owned())
    }
}

impl Inspect for String {
    fn type_ref() -> TypeRef {
        TypeRef::named("String")
    }

    fn inspect(&self) -> Value {
        Value::String(self.clone())
    }
}

impl Inspect for Decimal {
    fn type_ref() -> TypeRef {
        TypeRef::named("BigDecimal")
    }

    fn inspect(&self) -> Value {
        Value::Decimal(self.clone())
    }
}

impl Inspect for BigDecimal {
    fn type_ref() -> TypeRef {
        TypeRef::named("BigDecimal")
    }

    fn inspect(&self) -> Value {
        Value::Decimal(Decimal::from(self))
    }
}

impl Inspect for DateTime<Utc> {
    fn type_ref() -> TypeRef {
        TypeRef::named("DateTime<Utc>")
    }

    fn inspect(&self) -> Value {
        Value::DateTime(*self)
    }
}

impl Inspect for NaiveDate {
    fn type_ref() -> TypeRef {
        TypeRef::named("NaiveDate")
    }

    fn inspect(&self) -> Value {
        Value::Date(*self)
    }
}

impl Inspect for Uuid {
    fn type_ref() -> TypeRef {
        TypeRef::named("Uuid")
    }

    fn inspect(&self) -> Value {
        Value::Uuid(*self)
    }
}

impl Inspect for Path {
    fn type_ref() -> TypeRef {
        TypeRef::named("PathBuf")
    }

    fn inspect(&self) -> Value {
        Value::Atom(Atom::new("PathBuf", self.to_string_lossy()))
    }
}

impl Inspect for PathBuf {
    fn type_ref() -> TypeRef {
        TypeRef::named("PathBuf")
    }

    fn inspect(&self) -> Value {
        self.as_path().inspect()
    }
}

impl Inspect for IpAddr {
    fn type_ref() -> TypeRef {
        TypeRef::named("IpAddr")
    }

    fn inspect(&self) -> Value {
        Value::Atom(Atom::new("IpAddr", self.to_string()))
    }
}

impl Inspect for Record {
    fn type_ref() -> TypeRef {
        TypeRef::named("Record")
    }

    fn inspect(&self) -> Value {
        Value::Record(self.clone())
    }
}

impl<T: Inspect> Inspect for Option<T> {
    fn type_ref() -> TypeRef {
        T::type_ref()
    }

    fn inspect(&self) -> Value {
        self.as_ref().map_or(Value::Null, Inspect::inspect)
    }
}

macro_rules! inspect_pointer {
    ($($ptr:ident),*) => {
        $(
            impl<T: Inspect + ?Sized> Inspect for $ptr<T> {
                fn type_ref() -> TypeRef {
                    T::type_ref()
                }

                fn element_kind() -> ElementKind {
                    T::element_kind()
                }

                fn inspect(&self) -> Value {
                    (**self).inspect()
                }
            }
        )*
    };
}

inspect_pointer!(Box, Rc, Arc);

impl<T: Inspect + ?Sized> Inspect for &T {
    fn type_ref() -> TypeRef {
        T::type_ref()
    }

    fn element_kind() -> ElementKind {
        T::element_kind()
    }

    fn inspect(&self) -> Value {
        (**self).inspect()
    }
}

fn items<'a, T: Inspect + 'a>(values: impl IntoIterator<Item = &'a T>) -> Vec<Value> {
    values.into_iter().map(Inspect::inspect).collect()
}

fn sorted(mut values: Vec<Value>) -> Vec<Value> {
    values.sort_by(Value::natural_cmp);
    values
}

impl<T: Inspect> Inspect for Vec<T> {
    fn type_ref() -> TypeRef {
        TypeRef::named("Vec")
    }

    fn inspect(&self) -> Value {
        Value::List(Sequence::new("Vec", T::type_ref(), items(self)))
    }
}

impl<T: Inspect> Inspect for VecDeque<T> {
    fn type_ref() -> TypeRef {
        TypeRef::named("VecDeque")
    }

    fn inspect(&self) -> Value {
        Value::Collection(Sequence::new("VecDeque", T::type_ref(), items(self)))
    }
}

impl<T: Inspect> Inspect for LinkedList<T> {
    fn type_ref() -> TypeRef {
        TypeRef::named("LinkedList")
    }

    fn inspect(&self) -> Value {
        Value::Collection(Sequence::new("LinkedList", T::type_ref(), items(self)))
    }
}

impl<T: Inspect, S: BuildHasher> Inspect for HashSet<T, S> {
    fn type_ref() -> TypeRef {
        TypeRef::named("HashSet")
    }

    fn inspect(&self) -> Value {
        Value::Set(Sequence::new("HashSet", T::type_ref(), sorted(items(self))))
    }
}

impl<T: Inspect> Inspect for BTreeSet<T> {
    fn type_ref() -> TypeRef {
        TypeRef::named("BTreeSet")
    }

    fn inspect(&self) -> Value {
        Value::Set(Sequence::new("BTreeSet", T::type_ref(), items(self)))
    }
}

impl<K: Inspect, V: Inspect, S: BuildHasher> Inspect for HashMap<K, V, S> {
    fn type_ref() -> TypeRef {
        TypeRef::named("HashMap")
    }

    fn inspect(&self) -> Value {
        let mut entries: Vec<(Value, Value)> =
            self.iter().map(|(k, v)| (k.inspect(), v.inspect())).collect();
        entries.sort_by(|(a, _), (b, _)| a.natural_cmp(b));
        Value::Map(Mapping::new("HashMap", K::type_ref(), V::type_ref(), entries))
    }
}

impl<K: Inspect, V: Inspect> Inspect for BTreeMap<K, V> {
    fn type_ref() -> TypeRef {
        TypeRef::named("BTreeMap")
    }

    fn inspect(&self) -> Value {
        let entries = self.iter().map(|(k, v)| (k.inspect(), v.inspect())).collect();
        Value::Map(Mapping::new("BTreeMap", K::type_ref(), V::type_ref(), entries))
    }
}

impl<T: Inspect> Inspect for [T] {
    fn type_ref() -> TypeRef {
        TypeRef::owned(format!("[{}]", T::type_ref()))
    }

    fn inspect(&self) -> Value {
        Value::Array(Array::new(T::type_ref(), T::element_kind(), items(self)))
    }
}

impl<T: Inspect, const N: usize> Inspect for [T; N] {
    fn type_ref() -> TypeRef {
        <[T]>::type_ref()
    }

    fn inspect(&self) -> Value {
        self.as_slice().inspect()
    }
}

impl Inspect for JsonValue {
    fn type_ref() -> TypeRef {
        TypeRef::named("json::Value")
    }

    fn inspect(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(v) => Value::Bool(*v),
            Self::Number(n) => {
                if let Some(v) = n.as_i64() {
                    Value::Number(Number::I64(v))
                } else if let Some(v) = n.as_u64() {
                    Value::Number(Number::U64(v))
                } else {
                    Value::Number(Number::F64(n.as_f64().unwrap_or(f64::NAN)))
                }
            }
            Self::String(v) => Value::String(v.clone()),
            Self::Array(values) => {
                Value::List(Sequence::new("Vec", Self::type_ref(), items(values)))
            }
            Self::Object(map) => {
                let entries =
                    map.iter().map(|(k, v)| (Value::String(k.clone()), v.inspect())).collect();
                Value::Map(Mapping::new("Map", TypeRef::named("String"), Self::type_ref(), entries))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::Shape;

    #[test]
    fn hash_collections_materialize_in_natural_order() {
        let set: HashSet<i32> = [5, 1, 3].into_iter().collect();
        let Value::Set(seq) = set.inspect() else { panic!("expected a set") };
        assert_eq!(seq.items(), &[1_i32.inspect(), 3_i32.inspect(), 5_i32.inspect()]);

        let map: HashMap<String, i32> =
            [("b".to_owned(), 2), ("a".to_owned(), 1)].into_iter().collect();
        let Value::Map(mapping) = map.inspect() else { panic!("expected a map") };
        assert_eq!(mapping.entries()[0].0, "a".inspect());
    }

    #[test]
    fn option_none_is_null_and_keeps_declared_type() {
        assert!(Inspect::inspect(&Option::<String>::None).is_null());
        assert_eq!(Option::<i64>::type_ref().name(), "i64");
    }

    #[test]
    fn arrays_carry_component_kind() {
        let Value::Array(array) = [1.5_f32, 2.5].inspect() else { panic!("expected an array") };
        assert_eq!(array.kind(), ElementKind::Number(NumberKind::F32));
        assert_eq!(array.type_ref().name(), "[f32]");
        assert_eq!(<[String; 2]>::type_ref().name(), "[String]");
    }

    #[test]
    fn json_documents_map_to_lists_and_maps() {
        let doc: JsonValue = serde_json::json!({"a": [1, 2.5, "x"], "b": null});
        let value = doc.inspect();
        assert_eq!(value.shape(), Shape::Map);
        let Value::Map(map) = value else { unreachable!() };
        let Some(Value::List(list)) = map.get(&"a".inspect()) else { panic!("expected a list") };
        assert_eq!(list.items()[0].type_ref().name(), "i64");
        assert_eq!(list.items()[1].type_ref().name(), "f64");
    }

    #[test]
    fn atoms_and_decimals_are_scalars() {
        let addr = IpAddr::from_str("10.0.0.1").unwrap();
        assert_eq!(addr.inspect().shape(), Shape::Simple(crate::ScalarKind::Atom));
        let amount = BigDecimal::from_str("10.50").unwrap();
        assert_eq!(amount.inspect().to_string(), "10.50");
    }
}
