//! Structural deep comparison of value graphs.
//!
//! `structdiff-core` walks two graphs of records, collections and scalars in
//! lockstep and reports every leaf where they disagree, addressed by a dotted
//! path such as `positions.4.positionAmt`. Which fields are traversed, which
//! subtrees are pruned and how nulls are reported are all pluggable through
//! [`DiffOptions`], and collections can be ordered per element type before
//! they are compared positionally.
//!
//! ```
//! use structdiff_core::{Comparer, Field, Inspect, Record, Schema, TypeRef, Value};
//!
//! struct Position {
//!     book: String,
//!     amount: f64,
//! }
//!
//! static POSITION: Schema = Schema::new(
//!     "Position",
//!     &[Field::new("book", "String"), Field::new("amount", "f64")],
//! );
//!
//! impl Inspect for Position {
//!     fn type_ref() -> TypeRef {
//!         POSITION.type_ref()
//!     }
//!
//!     fn inspect(&self) -> Value {
//!         Record::builder(&POSITION)
//!             .field("book", &self.book)
//!             .field("amount", &self.amount)
//!             .finish()
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let before = vec![Position { book: "FX".into(), amount: 10.0 }];
//!     let after = vec![Position { book: "FX".into(), amount: 12.5 }];
//!
//!     let diffs = Comparer::new().diff(&before, &after)?;
//!     assert_eq!(diffs.len(), 1);
//!     assert_eq!(diffs[0].to_string(), "0.amount (f64): 10 => 12.5");
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod decimal;
pub mod diff;
mod error;
mod hash;
mod inspect;
mod introspect;
mod number;
mod options;
mod registry;
mod schema;
mod value;

pub use decimal::Decimal;
pub use diff::{check_nulls, compare_scalars, Comparer, Comparison, Diff, Operand, Sentinel};
pub use error::{DecimalError, DiffError};
pub use hash::{combine, hash_bytes, HashCode};
pub use inspect::Inspect;
pub use introspect::FieldCache;
pub use number::{Number, NumberKind};
pub use options::{ContextFilter, DiffOptions, FieldFilter, NullCheck};
pub use registry::{OrderingRegistry, ValueComparator};
pub use schema::{Field, Modifiers, Schema, TypeRef};
pub use value::{
    Array, Atom, ElementKind, EnumValue, Mapping, Record, RecordBuilder, ScalarKind, Sequence,
    Shape, Value,
};

/// Returns the semantic version of the `structdiff-core` crate.
///
/// ```
/// assert!(!structdiff_core::version().is_empty());
/// ```
#[must_use]
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
