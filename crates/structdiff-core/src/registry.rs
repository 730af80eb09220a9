use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::{TypeRef, Value};

/// Shared ordering function over materialized values.
pub type ValueComparator = Arc<dyn Fn(&Value, &Value) -> Ordering + Send + Sync>;

/// Per-element-type comparators used to pre-sort collections and arrays.
///
/// No comparator is registered by default; without one, collections are
/// compared in their input order and rely on membership matching.
///
/// ```
/// # use structdiff_core::{Inspect, OrderingRegistry, TypeRef};
/// let mut registry = OrderingRegistry::new();
/// assert!(!registry.contains(&TypeRef::named("i32")));
/// registry.register_natural(TypeRef::named("i32"));
/// assert!(registry.contains(&TypeRef::named("i32")));
///
/// let items = [3_i32.inspect(), 1_i32.inspect()];
/// let sorted = registry.order(&TypeRef::named("i32"), &items);
/// assert_eq!(sorted[0], 1_i32.inspect());
/// registry.clear();
/// assert!(registry.is_empty());
/// ```
#[derive(Clone, Default)]
pub struct OrderingRegistry {
    comparators: HashMap<TypeRef, ValueComparator>,
}

impl OrderingRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `comparator` for elements of type `ty`, replacing any previous one.
    pub fn register<F>(&mut self, ty: TypeRef, comparator: F)
    where
        F: Fn(&Value, &Value) -> Ordering + Send + Sync + 'static,
    {
        self.comparators.insert(ty, Arc::new(comparator));
    }

    /// Registers [`Value::natural_cmp`] for elements of type `ty`.
    pub fn register_natural(&mut self, ty: TypeRef) {
        self.register(ty, Value::natural_cmp);
    }

    /// Comparator registered for `ty`.
    #[must_use]
    pub fn get(&self, ty: &TypeRef) -> Option<ValueComparator> {
        self.comparators.get(ty).cloned()
    }

    /// Returns `true` if a comparator is registered for `ty`.
    #[must_use]
    pub fn contains(&self, ty: &TypeRef) -> bool {
        self.comparators.contains_key(ty)
    }

    /// Removes every comparator.
    pub fn clear(&mut self) {
        self.comparators.clear();
    }

    /// Number of registered comparators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.comparators.len()
    }

    /// Returns `true` when no comparator is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.comparators.is_empty()
    }

    /// Items sorted by the comparator registered for `element`, or the items
    /// unchanged when there is none. The input is never reordered in place.
    #[must_use]
    pub fn order<'v>(&self, element: &TypeRef, items: &'v [Value]) -> Cow<'v, [Value]> {
        match self.comparators.get(element) {
            Some(comparator) => {
                let mut sorted = items.to_vec();
                sorted.sort_by(|a, b| comparator(a, b));
                Cow::Owned(sorted)
            }
            None => Cow::Borrowed(items),
        }
    }

    /// Items sorted by the registered comparator, falling back to natural order.
    #[must_use]
    pub fn sorted<'v>(&self, element: &TypeRef, items: &'v [Value]) -> Vec<&'v Value> {
        let mut view: Vec<&Value> = items.iter().collect();
        match self.comparators.get(element) {
            Some(comparator) => view.sort_by(|a, b| comparator(a, b)),
            None => view.sort_by(|a, b| a.natural_cmp(b)),
        }
        view
    }
}

impl fmt::Debug for OrderingRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<_> = self.comparators.keys().map(TypeRef::name).collect();
        types.sort_unstable();
        f.debug_struct("OrderingRegistry").field("types", &types).finish()
    }
}
