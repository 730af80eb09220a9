use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::{DiffError, Field, FieldFilter, Record, Schema, Value};

/// Cache of declared field lists, keyed by schema identity.
///
/// Entries are immutable once inserted. Readers share the lock; a miss builds
/// the list outside the lock and inserts it unless another thread won the
/// race, in which case the existing (equal) entry is returned.
///
/// ```
/// use structdiff_core::{Field, FieldCache, FieldFilter, Modifiers, Schema};
///
/// static BASE: Schema = Schema::new("Base", &[Field::new("id", "u64")]);
/// static ITEM: Schema = Schema::new(
///     "Item",
///     &[Field::new("name", "String"), Field::new("memo", "String").with(Modifiers::TRANSIENT)],
/// )
/// .extends(&BASE);
///
/// let cache = FieldCache::new();
/// let names: Vec<_> = cache
///     .fields(&ITEM, &FieldFilter::default())
///     .iter()
///     .map(|f| f.name())
///     .collect();
/// assert_eq!(names, ["name", "id"]);
/// ```
#[derive(Debug, Default)]
pub struct FieldCache {
    entries: RwLock<HashMap<usize, Arc<[&'static Field]>>>,
}

impl FieldCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All declared fields of `schema`, own fields first, then each ancestor's.
    pub fn declared_fields(&self, schema: &'static Schema) -> Arc<[&'static Field]> {
        if let Some(found) = self.read(schema.key()) {
            return found;
        }
        let built: Arc<[&'static Field]> =
            schema.lineage().flat_map(|s| s.fields().iter()).collect();
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(entries.entry(schema.key()).or_insert(built))
    }

    /// Declared fields of `schema` accepted by `filter`.
    #[must_use]
    pub fn fields(&self, schema: &'static Schema, filter: &FieldFilter) -> Vec<&'static Field> {
        self.declared_fields(schema).iter().copied().filter(|field| filter.accepts(field)).collect()
    }

    /// Reads the value a record holds for `field`.
    ///
    /// A record built without a value for one of its declared fields cannot be
    /// compared; the error aborts the whole comparison.
    pub fn value<'r>(&self, record: &'r Record, field: &Field) -> Result<&'r Value, DiffError> {
        record.get(field.name()).ok_or_else(|| DiffError::FieldAccess {
            type_name: record.schema().name().to_owned(),
            field: field.name().to_owned(),
        })
    }

    /// Number of cached schemas.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns `true` when nothing has been cached yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self, key: usize) -> Option<Arc<[&'static Field]>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).get(&key).cloned()
    }
}
