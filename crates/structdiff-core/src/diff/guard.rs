use super::{Diff, Operand, Sentinel};
use crate::Value;

/// Default null-handling strategy.
///
/// When exactly one side is null, a scalar on the other side is reported as
/// is, while a composite value is replaced by the `NON-NULL` sentinel so that
/// an entire subtree is never dumped into the report. Two nulls are equal.
///
/// ```
/// # use structdiff_core::{check_nulls, Inspect, Operand, Sentinel, Value};
/// let diffs = check_nulls("qty", &5_i32.inspect(), &Value::Null);
/// assert_eq!(diffs[0].left, Operand::Value(5_i32.inspect()));
/// assert_eq!(diffs[0].right, Operand::Sentinel(Sentinel::Null));
///
/// let diffs = check_nulls("tags", &Value::Null, &vec!["a"].inspect());
/// assert_eq!(diffs[0].right, Operand::Sentinel(Sentinel::NonNull));
///
/// assert!(check_nulls("x", &Value::Null, &Value::Null).is_empty());
/// ```
#[must_use]
pub fn check_nulls(path: &str, left: &Value, right: &Value) -> Vec<Diff> {
    match (left.is_null(), right.is_null()) {
        (false, true) => vec![Diff::new(
            path,
            Some(left.type_ref()),
            present(left),
            Operand::Sentinel(Sentinel::Null),
        )],
        (true, false) => vec![Diff::new(
            path,
            Some(right.type_ref()),
            Operand::Sentinel(Sentinel::Null),
            present(right),
        )],
        _ => Vec::new(),
    }
}

fn present(value: &Value) -> Operand {
    if value.shape().is_simple() {
        Operand::Value(value.clone())
    } else {
        Operand::Sentinel(Sentinel::NonNull)
    }
}

/// Reports differing runtime types of two non-null values.
pub(super) fn check_types(path: &str, left: &Value, right: &Value) -> Option<Diff> {
    let (left_type, right_type) = (left.type_ref(), right.type_ref());
    let distinct_schemas = matches!(
        (left, right),
        (Value::Record(a), Value::Record(b)) if !a.schema().same(b.schema())
    );
    (left_type != right_type || distinct_schemas).then(|| {
        Diff::new(
            path,
            Some(left_type.clone()),
            Operand::TypeName(left_type),
            Operand::TypeName(right_type),
        )
    })
}
