use std::fmt;
use std::sync::Arc;

use crate::diff::check_nulls;
use crate::{Diff, Field, Modifiers, Value};

/// Static predicate over field metadata deciding which declared fields are traversed.
///
/// ```
/// # use structdiff_core::{Field, FieldFilter, Modifiers};
/// let cached = Field::new("cache", "String").with(Modifiers::TRANSIENT);
/// let id = Field::new("id", "u64").with(Modifiers::FINAL);
///
/// assert!(!FieldFilter::default().accepts(&cached));
/// assert!(FieldFilter::default().accepts(&id));
/// assert!(!FieldFilter::excluding_transient_static_or_final().accepts(&id));
/// assert!(FieldFilter::all().accepts(&cached));
/// ```
#[derive(Clone)]
pub struct FieldFilter(Arc<dyn Fn(&Field) -> bool + Send + Sync>);

impl FieldFilter {
    /// Wraps a predicate.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Field) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(predicate))
    }

    /// Accepts every field.
    #[must_use]
    pub fn all() -> Self {
        Self::new(|_| true)
    }

    /// Rejects fields carrying any of `modifiers`.
    #[must_use]
    pub fn excluding(modifiers: Modifiers) -> Self {
        Self::new(move |field| !field.modifiers().intersects(modifiers))
    }

    /// Rejects transient, static and final fields.
    #[must_use]
    pub fn excluding_transient_static_or_final() -> Self {
        Self::excluding(Modifiers::TRANSIENT | Modifiers::STATIC | Modifiers::FINAL)
    }

    /// Accepts fields accepted by both filters.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        Self::new(move |field| self.accepts(field) && other.accepts(field))
    }

    /// Accepts fields accepted by either filter.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        Self::new(move |field| self.accepts(field) || other.accepts(field))
    }

    /// Inverts the filter.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Self::new(move |field| !self.accepts(field))
    }

    /// Evaluates the filter.
    #[must_use]
    pub fn accepts(&self, field: &Field) -> bool {
        (self.0)(field)
    }
}

impl Default for FieldFilter {
    /// Rejects transient and static fields.
    fn default() -> Self {
        Self::excluding(Modifiers::TRANSIENT | Modifiers::STATIC)
    }
}

impl fmt::Debug for FieldFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FieldFilter(..)")
    }
}

/// Data-dependent predicate deciding whether a subtree is compared.
///
/// The predicate receives the full path of the node, both values and the
/// field being entered. Returning `false` prunes the node and everything
/// below it.
///
/// ```
/// # use structdiff_core::ContextFilter;
/// let skip_notes = ContextFilter::new(|path, _, _, _| !path.ends_with(".notes"));
/// # let _ = skip_notes;
/// ```
#[derive(Clone)]
pub struct ContextFilter(Arc<dyn Fn(&str, &Value, &Value, &Field) -> bool + Send + Sync>);

impl ContextFilter {
    /// Wraps a predicate.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&str, &Value, &Value, &Field) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(predicate))
    }

    /// Accepts everything.
    #[must_use]
    pub fn all() -> Self {
        Self::new(|_, _, _, _| true)
    }

    /// Evaluates the filter.
    #[must_use]
    pub fn accepts(&self, path: &str, left: &Value, right: &Value, field: &Field) -> bool {
        (self.0)(path, left, right, field)
    }
}

impl Default for ContextFilter {
    fn default() -> Self {
        Self::all()
    }
}

impl fmt::Debug for ContextFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ContextFilter(..)")
    }
}

/// Null-handling strategy run before any other check on a node.
///
/// A non-empty result is reported as is and stops the comparison of the node.
#[derive(Clone)]
pub struct NullCheck(Arc<dyn Fn(&str, &Value, &Value) -> Vec<Diff> + Send + Sync>);

impl NullCheck {
    /// Wraps a strategy.
    pub fn new<F>(check: F) -> Self
    where
        F: Fn(&str, &Value, &Value) -> Vec<Diff> + Send + Sync + 'static,
    {
        Self(Arc::new(check))
    }

    /// Runs the strategy.
    #[must_use]
    pub fn check(&self, path: &str, left: &Value, right: &Value) -> Vec<Diff> {
        (self.0)(path, left, right)
    }
}

impl Default for NullCheck {
    fn default() -> Self {
        Self::new(check_nulls)
    }
}

impl fmt::Debug for NullCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NullCheck(..)")
    }
}

/// Policy applied to a single comparison.
///
/// ```
/// # use structdiff_core::{ContextFilter, DiffOptions, FieldFilter};
/// let options = DiffOptions::default()
///     .with_field_filter(FieldFilter::all())
///     .with_context_filter(ContextFilter::new(|path, _, _, _| path != "audit"));
/// # let _ = options;
/// ```
#[derive(Clone, Debug, Default)]
pub struct DiffOptions {
    field_filter: FieldFilter,
    context_filter: ContextFilter,
    null_check: NullCheck,
}

impl DiffOptions {
    /// Replaces the field filter.
    #[must_use]
    pub fn with_field_filter(mut self, filter: FieldFilter) -> Self {
        self.field_filter = filter;
        self
    }

    /// Replaces the context filter.
    #[must_use]
    pub fn with_context_filter(mut self, filter: ContextFilter) -> Self {
        self.context_filter = filter;
        self
    }

    /// Replaces the null-handling strategy.
    #[must_use]
    pub fn with_null_check(mut self, check: NullCheck) -> Self {
        self.null_check = check;
        self
    }

    /// Field filter in effect.
    #[must_use]
    pub fn field_filter(&self) -> &FieldFilter {
        &self.field_filter
    }

    /// Context filter in effect.
    #[must_use]
    pub fn context_filter(&self) -> &ContextFilter {
        &self.context_filter
    }

    /// Null-handling strategy in effect.
    #[must_use]
    pub fn null_check(&self) -> &NullCheck {
        &self.null_check
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Inspect;

    #[test]
    fn combinators_compose() {
        let named_id = FieldFilter::new(|field| field.name() == "id");
        let either = named_id.clone().or(FieldFilter::excluding(Modifiers::PRIVATE));
        let both = named_id.and(FieldFilter::excluding(Modifiers::PRIVATE));

        let hidden_id = Field::new("id", "u64").with(Modifiers::PRIVATE);
        let name = Field::new("name", "String");
        assert!(either.accepts(&hidden_id));
        assert!(either.accepts(&name));
        assert!(!both.accepts(&hidden_id));
        assert!(both.not().accepts(&name));
    }

    #[test]
    fn default_null_check_reports_simple_nulls() {
        let diffs = NullCheck::default().check("qty", &Value::Null, &5_i32.inspect());
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].path, "qty");
    }
}
