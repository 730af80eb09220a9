use super::list::HashIndex;
use super::{Diff, Operand, Sentinel, Walk};
use crate::value::Mapping;
use crate::{DiffError, Record};

impl Walk<'_> {
    /// Compares every declared field accepted by the field filter, in
    /// declaration order starting with the most derived type.
    pub(super) fn compare_records(&mut self, left: &Record, right: &Record) -> Result<(), DiffError> {
        let fields = self.comparer.field_cache().fields(left.schema(), self.options.field_filter());
        for field in fields {
            let lhs = self.comparer.field_cache().value(left, field)?;
            let rhs = self.comparer.field_cache().value(right, field)?;
            let path = self.path.full_name(Some(field.name()));
            if !self.options.context_filter().accepts(&path, lhs, rhs, field) {
                tracing::trace!(path = %path, "field skipped by context filter");
                continue;
            }
            self.compare(lhs, rhs, Some(field))?;
        }
        Ok(())
    }

    /// Compares values under equal keys and reports left keys absent on the
    /// right. Keys only present on the right are left to the reverse pass.
    pub(super) fn compare_maps(&mut self, left: &Mapping, right: &Mapping) -> Result<(), DiffError> {
        let index = HashIndex::new(right.entries().iter().map(|entry| (&entry.0, &entry.1)));
        for (key, value) in left.entries() {
            self.descend(None, Some(key.to_string()), |walk| match index.get(key) {
                Some(other) => walk.compare(value, other, None),
                None => {
                    let path = walk.path.full_name(None);
                    walk.push(Diff::new(
                        path,
                        Some(value.type_ref()),
                        Operand::Value(value.clone()),
                        Operand::Sentinel(Sentinel::Missing),
                    ));
                    Ok(())
                }
            })?;
        }
        Ok(())
    }
}
