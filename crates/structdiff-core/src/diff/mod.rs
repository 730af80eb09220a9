//! Comparison engine and the difference records it produces.
//!
//! [`Comparer`] walks two value graphs side by side and reports every leaf
//! where they disagree as a [`Diff`] addressed by a dotted path such as
//! `positions.4.positionAmt`. Traversal policy is supplied per call through
//! [`DiffOptions`]; the comparator registry and the field cache live on the
//! comparer and are shared by every call.

mod guard;
mod list;
mod object;
mod path;
mod primitives;

pub use guard::check_nulls;
pub use primitives::{compare_scalars, Comparison};

use std::fmt;

use serde::Serialize;

use self::path::PathContext;
use crate::{
    ContextFilter, DiffError, DiffOptions, Field, FieldCache, FieldFilter, Inspect,
    OrderingRegistry, Record, Schema, TypeRef, Value, ValueComparator,
};

/// Placeholder standing in for a value that is absent or deliberately elided.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Sentinel {
    /// The side is null, or a positional counterpart does not exist.
    #[serde(rename = "NULL")]
    Null,
    /// The side holds a composite value that is not rendered.
    #[serde(rename = "NON-NULL")]
    NonNull,
    /// A map key or set element has no counterpart.
    #[serde(rename = "MISSING")]
    Missing,
}

impl Sentinel {
    /// Rendered token.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Null => "NULL",
            Self::NonNull => "NON-NULL",
            Self::Missing => "MISSING",
        }
    }
}

impl fmt::Display for Sentinel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One side of a [`Diff`].
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Operand {
    /// The value found at the path.
    Value(Value),
    /// A placeholder for an absent or elided value.
    Sentinel(Sentinel),
    /// Runtime type name, reported when the two sides have different types.
    TypeName(TypeRef),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => value.fmt(f),
            Self::Sentinel(sentinel) => sentinel.fmt(f),
            Self::TypeName(ty) => ty.fmt(f),
        }
    }
}

impl Operand {
    fn to_value(&self) -> Value {
        match self {
            Self::Value(value) => value.clone(),
            Self::Sentinel(sentinel) => Value::String(sentinel.as_str().to_owned()),
            Self::TypeName(ty) => Value::String(ty.name().to_owned()),
        }
    }
}

/// A single reported difference.
///
/// ```
/// # use structdiff_core::{Diff, Inspect, Operand, TypeRef};
/// let diff = Diff::new(
///     "positions.4.positionAmt",
///     Some(TypeRef::named("f64")),
///     Operand::Value(5000.0_f64.inspect()),
///     Operand::Value(100.0_f64.inspect()),
/// );
/// assert_eq!(diff.to_string(), "positions.4.positionAmt (f64): 5000 => 100");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Diff {
    /// Dotted path of the differing node. Empty for a top-level scalar.
    pub path: String,
    /// Declared type of the field, or the runtime type of the left value.
    #[serde(rename = "type")]
    pub declared_type: Option<TypeRef>,
    /// Left-hand side.
    pub left: Operand,
    /// Right-hand side.
    pub right: Operand,
}

impl Diff {
    /// Creates a diff.
    pub fn new(
        path: impl Into<String>,
        declared_type: Option<TypeRef>,
        left: Operand,
        right: Operand,
    ) -> Self {
        Self { path: path.into(), declared_type, left, right }
    }
}

impl fmt::Display for Diff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.declared_type {
            Some(ty) => write!(f, "{} ({ty}): {} => {}", self.path, self.left, self.right),
            None => write!(f, "{}: {} => {}", self.path, self.left, self.right),
        }
    }
}

static DIFF: Schema = Schema::new(
    "Diff",
    &[
        Field::new("path", "String"),
        Field::new("type", "String"),
        Field::new("left", "Operand"),
        Field::new("right", "Operand"),
    ],
);

/// Diff lists can themselves be compared, which is how two reports are
/// checked against each other.
impl Inspect for Diff {
    fn type_ref() -> TypeRef {
        DIFF.type_ref()
    }

    fn inspect(&self) -> Value {
        Record::builder(&DIFF)
            .field("path", &self.path)
            .field("type", &self.declared_type.as_ref().map(|ty| ty.name().to_owned()))
            .value("left", self.left.to_value())
            .value("right", self.right.to_value())
            .finish()
    }
}

/// Deep structural comparison of value graphs.
///
/// ```
/// # use structdiff_core::Comparer;
/// # fn main() -> Result<(), structdiff_core::DiffError> {
/// let comparer = Comparer::new();
/// let diffs = comparer.diff(&vec!["a", "b"], &vec!["a", "c"])?;
/// assert_eq!(diffs[0].to_string(), "1 (String): b => c");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct Comparer {
    ordering: OrderingRegistry,
    fields: FieldCache,
}

impl Comparer {
    /// Creates a comparer with no registered comparators.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Differences seen from the left side under the default policy.
    ///
    /// # Errors
    ///
    /// Returns [`DiffError::FieldAccess`] when a record lacks a field its
    /// schema declares.
    pub fn diff<T>(&self, left: &T, right: &T) -> Result<Vec<Diff>, DiffError>
    where
        T: Inspect + ?Sized,
    {
        self.diff_with(left, right, &DiffOptions::default())
    }

    /// Differences seen from the left side, traversing only fields accepted
    /// by `field_filter`.
    ///
    /// # Errors
    ///
    /// See [`Comparer::diff`].
    pub fn diff_filtered<T>(
        &self,
        left: &T,
        right: &T,
        field_filter: FieldFilter,
    ) -> Result<Vec<Diff>, DiffError>
    where
        T: Inspect + ?Sized,
    {
        self.diff_with(left, right, &DiffOptions::default().with_field_filter(field_filter))
    }

    /// Differences seen from the left side with both filters supplied.
    ///
    /// # Errors
    ///
    /// See [`Comparer::diff`].
    pub fn diff_with_context<T>(
        &self,
        left: &T,
        right: &T,
        context_filter: ContextFilter,
        field_filter: FieldFilter,
    ) -> Result<Vec<Diff>, DiffError>
    where
        T: Inspect + ?Sized,
    {
        let options = DiffOptions::default()
            .with_field_filter(field_filter)
            .with_context_filter(context_filter);
        self.diff_with(left, right, &options)
    }

    /// Differences seen from the left side under `options`.
    ///
    /// # Errors
    ///
    /// See [`Comparer::diff`].
    pub fn diff_with<T>(
        &self,
        left: &T,
        right: &T,
        options: &DiffOptions,
    ) -> Result<Vec<Diff>, DiffError>
    where
        T: Inspect + ?Sized,
    {
        self.diff_values(&left.inspect(), &right.inspect(), options)
    }

    /// Differences between two already materialized values.
    ///
    /// # Errors
    ///
    /// See [`Comparer::diff`].
    pub fn diff_values(
        &self,
        left: &Value,
        right: &Value,
        options: &DiffOptions,
    ) -> Result<Vec<Diff>, DiffError> {
        let mut walk = Walk::new(self, options);
        walk.compare(left, right, None)?;
        Ok(walk.finish())
    }

    /// Differences seen from both sides: the left-to-right pass followed by
    /// the right-to-left pass, without deduplication.
    ///
    /// # Errors
    ///
    /// See [`Comparer::diff`].
    pub fn full_diff<T>(&self, left: &T, right: &T) -> Result<Vec<Diff>, DiffError>
    where
        T: Inspect + ?Sized,
    {
        self.full_diff_with(left, right, &DiffOptions::default())
    }

    /// Bidirectional variant of [`Comparer::diff_filtered`].
    ///
    /// # Errors
    ///
    /// See [`Comparer::diff`].
    pub fn full_diff_filtered<T>(
        &self,
        left: &T,
        right: &T,
        field_filter: FieldFilter,
    ) -> Result<Vec<Diff>, DiffError>
    where
        T: Inspect + ?Sized,
    {
        self.full_diff_with(left, right, &DiffOptions::default().with_field_filter(field_filter))
    }

    /// Bidirectional variant of [`Comparer::diff_with_context`].
    ///
    /// # Errors
    ///
    /// See [`Comparer::diff`].
    pub fn full_diff_with_context<T>(
        &self,
        left: &T,
        right: &T,
        context_filter: ContextFilter,
        field_filter: FieldFilter,
    ) -> Result<Vec<Diff>, DiffError>
    where
        T: Inspect + ?Sized,
    {
        let options = DiffOptions::default()
            .with_field_filter(field_filter)
            .with_context_filter(context_filter);
        self.full_diff_with(left, right, &options)
    }

    /// Bidirectional variant of [`Comparer::diff_with`].
    ///
    /// # Errors
    ///
    /// See [`Comparer::diff`].
    pub fn full_diff_with<T>(
        &self,
        left: &T,
        right: &T,
        options: &DiffOptions,
    ) -> Result<Vec<Diff>, DiffError>
    where
        T: Inspect + ?Sized,
    {
        self.full_diff_values(&left.inspect(), &right.inspect(), options)
    }

    /// Bidirectional variant of [`Comparer::diff_values`].
    ///
    /// # Errors
    ///
    /// See [`Comparer::diff`].
    pub fn full_diff_values(
        &self,
        left: &Value,
        right: &Value,
        options: &DiffOptions,
    ) -> Result<Vec<Diff>, DiffError> {
        let mut diffs = self.diff_values(left, right, options)?;
        diffs.extend(self.diff_values(right, left, options)?);
        Ok(diffs)
    }

    /// Registers `comparator` for collections whose element type is `ty`,
    /// replacing any earlier registration.
    pub fn register_comparator<F>(&mut self, ty: TypeRef, comparator: F)
    where
        F: Fn(&Value, &Value) -> std::cmp::Ordering + Send + Sync + 'static,
    {
        tracing::debug!(element = %ty, "registering comparator");
        self.ordering.register(ty, comparator);
    }

    /// Registers natural ordering for collections whose element type is `ty`.
    pub fn register_natural(&mut self, ty: TypeRef) {
        tracing::debug!(element = %ty, "registering natural ordering");
        self.ordering.register_natural(ty);
    }

    /// Comparator registered for `ty`.
    #[must_use]
    pub fn comparator(&self, ty: &TypeRef) -> Option<ValueComparator> {
        self.ordering.get(ty)
    }

    /// Whether a comparator is registered for `ty`.
    #[must_use]
    pub fn has_comparator(&self, ty: &TypeRef) -> bool {
        self.ordering.contains(ty)
    }

    /// Removes every registered comparator.
    pub fn clear_comparators(&mut self) {
        self.ordering.clear();
    }

    /// Registered comparators.
    #[must_use]
    pub fn ordering(&self) -> &OrderingRegistry {
        &self.ordering
    }

    /// Field metadata cache.
    #[must_use]
    pub fn field_cache(&self) -> &FieldCache {
        &self.fields
    }
}

/// State of a single top-level comparison pass.
pub(crate) struct Walk<'a> {
    comparer: &'a Comparer,
    options: &'a DiffOptions,
    path: PathContext,
    diffs: Vec<Diff>,
}

impl<'a> Walk<'a> {
    fn new(comparer: &'a Comparer, options: &'a DiffOptions) -> Self {
        Self { comparer, options, path: PathContext::new(), diffs: Vec::new() }
    }

    fn finish(self) -> Vec<Diff> {
        debug_assert_eq!(self.path.depth(), 0);
        tracing::trace!(diffs = self.diffs.len(), "comparison pass finished");
        self.diffs
    }

    fn push(&mut self, diff: Diff) {
        self.diffs.push(diff);
    }

    /// Runs `body` one level deeper, popping the frame again afterwards.
    fn descend<T>(
        &mut self,
        field: Option<&'static Field>,
        prefix: Option<String>,
        body: impl FnOnce(&mut Self) -> T,
    ) -> T {
        self.path.push(field, prefix);
        let out = body(self);
        self.path.pop();
        out
    }

    /// Compares one pair of nodes reached through `field`, or through a
    /// collection position when `field` is `None`.
    fn compare(
        &mut self,
        left: &Value,
        right: &Value,
        field: Option<&'static Field>,
    ) -> Result<(), DiffError> {
        let path = self.path.full_name(field.map(Field::name));

        let nulls = self.options.null_check().check(&path, left, right);
        if !nulls.is_empty() {
            self.diffs.extend(nulls);
            return Ok(());
        }
        if left.is_null() || right.is_null() {
            return Ok(());
        }
        if let Some(diff) = guard::check_types(&path, left, right) {
            self.push(diff);
            return Ok(());
        }
        if left == right {
            return Ok(());
        }
        if left.shape().is_simple() {
            self.compare_simple(path, left, right, field);
            return Ok(());
        }

        let before = self.diffs.len();
        match field {
            Some(field) => self.descend(Some(field), None, |walk| walk.dispatch(left, right))?,
            None => self.dispatch(left, right)?,
        }
        if self.diffs.len() > before && matches!(left, Value::Record(_)) {
            tracing::debug!(path = %path, left = %left, right = %right, "nested values differ");
        }
        Ok(())
    }

    fn dispatch(&mut self, left: &Value, right: &Value) -> Result<(), DiffError> {
        if let Some(field) = self.path.innermost_field() {
            let path = self.path.full_name(Some(left.type_ref().name()));
            if !self.options.context_filter().accepts(&path, left, right, field) {
                tracing::trace!(path = %path, "subtree pruned by context filter");
                return Ok(());
            }
        }

        match (left, right) {
            (Value::List(l), Value::List(r)) => {
                self.compare_sequences(l.element(), l.items(), r.items())
            }
            (Value::Map(l), Value::Map(r)) => self.compare_maps(l, r),
            (Value::Set(l), Value::Set(r)) => {
                self.compare_sets(l.element(), l.items(), r.items());
                Ok(())
            }
            (Value::Collection(l), Value::Collection(r)) => {
                self.compare_sequences(l.element(), l.items(), r.items())
            }
            (Value::Array(l), Value::Array(r)) => {
                self.compare_sequences(l.element(), l.items(), r.items())
            }
            (Value::Record(l), Value::Record(r)) => self.compare_records(l, r),
            // Runtime types already matched, so mixed shapes cannot reach here.
            _ => Ok(()),
        }
    }
}
