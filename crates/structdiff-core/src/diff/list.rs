use std::collections::HashMap;

use super::{Diff, Operand, Sentinel, Walk};
use crate::hash::HashCode;
use crate::{DiffError, TypeRef, Value};

/// Lookup of values by structural hash, confirmed by equality.
pub(super) struct HashIndex<'v, T> {
    buckets: HashMap<HashCode, Vec<(&'v Value, T)>>,
}

impl<'v, T> HashIndex<'v, T> {
    pub(super) fn new(entries: impl IntoIterator<Item = (&'v Value, T)>) -> Self {
        let mut buckets: HashMap<HashCode, Vec<(&'v Value, T)>> = HashMap::new();
        for (key, payload) in entries {
            buckets.entry(key.hash_code()).or_default().push((key, payload));
        }
        Self { buckets }
    }

    pub(super) fn get(&self, key: &Value) -> Option<&T> {
        self.buckets
            .get(&key.hash_code())?
            .iter()
            .find(|(candidate, _)| *candidate == key)
            .map(|(_, payload)| payload)
    }

    pub(super) fn contains(&self, key: &Value) -> bool {
        self.get(key).is_some()
    }
}

fn membership(items: &[Value]) -> HashIndex<'_, ()> {
    HashIndex::new(items.iter().map(|item| (item, ())))
}

impl Walk<'_> {
    /// Lists, generic collections and arrays.
    ///
    /// Left elements present anywhere on the right are skipped. The rest are
    /// compared with the right element at the same position, after both sides
    /// have been sorted by the comparator registered for `element`, if any.
    pub(super) fn compare_sequences(
        &mut self,
        element: &TypeRef,
        left: &[Value],
        right: &[Value],
    ) -> Result<(), DiffError> {
        let ordering = self.comparer.ordering();
        let present = membership(right);
        let left = ordering.order(element, left);
        let right = ordering.order(element, right);

        for (index, item) in left.iter().enumerate() {
            if present.contains(item) {
                continue;
            }
            self.descend(None, Some(index.to_string()), |walk| match right.get(index) {
                Some(other) => walk.compare(item, other, None),
                None => {
                    let path = walk.path.full_name(None);
                    walk.push(Diff::new(
                        path,
                        Some(item.type_ref()),
                        Operand::Value(item.clone()),
                        Operand::Sentinel(Sentinel::Null),
                    ));
                    Ok(())
                }
            })?;
        }
        Ok(())
    }

    /// Reports left set elements absent from the right set.
    ///
    /// The path token is the element's position in the left set sorted by the
    /// registered comparator, or by natural order when none is registered.
    pub(super) fn compare_sets(&mut self, element: &TypeRef, left: &[Value], right: &[Value]) {
        let present = membership(right);
        let missing: Vec<&Value> = left.iter().filter(|item| !present.contains(item)).collect();
        if missing.is_empty() {
            return;
        }

        let sorted = self.comparer.ordering().sorted(element, left);
        for item in missing {
            let index = sorted.iter().position(|candidate| *candidate == item).unwrap_or_default();
            self.descend(None, Some(index.to_string()), |walk| {
                let path = walk.path.full_name(None);
                walk.push(Diff::new(
                    path,
                    Some(item.type_ref()),
                    Operand::Value(item.clone()),
                    Operand::Sentinel(Sentinel::Missing),
                ));
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use crate::{Comparer, Inspect};

    use super::*;

    #[test]
    fn index_confirms_hash_hits_by_equality() {
        let items = [1_i32.inspect(), 2_i32.inspect()];
        let index = membership(&items);
        assert!(index.contains(&2_i32.inspect()));
        assert!(!index.contains(&2_i64.inspect()));
        assert!(!index.contains(&3_i32.inspect()));
    }

    #[test]
    fn permuted_lists_are_equal_without_comparator() {
        let comparer = Comparer::new();
        let diffs = comparer.diff(&vec![1_i32, 2, 3], &vec![3_i32, 1, 2]).unwrap();
        assert!(diffs.is_empty());
    }

    #[test]
    fn registered_ordering_exposes_positional_differences() {
        let mut comparer = Comparer::new();
        comparer.register_natural(TypeRef::named("i32"));
        let diffs = comparer.diff(&vec![1_i32, 2, 4], &vec![5_i32, 1, 2]).unwrap();
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].path, "2");
        assert_eq!(diffs[0].left, Operand::Value(4_i32.inspect()));
        assert_eq!(diffs[0].right, Operand::Value(5_i32.inspect()));
    }

    #[test]
    fn extra_left_elements_report_null_on_the_right() {
        let comparer = Comparer::new();
        let diffs = comparer.diff(&[1_u8, 2, 3][..], &[1_u8, 2][..]).unwrap();
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].to_string(), "2 (u8): 3 => NULL");
    }

    #[test]
    fn set_tokens_index_the_sorted_left_set() {
        let comparer = Comparer::new();
        let left = BTreeSet::from(["a", "c", "e"].map(String::from));
        let right = BTreeSet::from(["a", "b", "c"].map(String::from));
        let diffs = comparer.diff(&left, &right).unwrap();
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].path, "2");
        assert_eq!(diffs[0].right, Operand::Sentinel(Sentinel::Missing));
    }
}
