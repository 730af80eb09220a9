use std::cmp::Ordering;

use super::{Diff, Operand, Walk};
use crate::{Field, Value};

/// Outcome of comparing two scalars of the same type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Comparison {
    /// The values are equal under the scalar's rule.
    Equal,
    /// The values differ.
    Different,
    /// The comparison could not be carried out; no difference is reported.
    Skipped {
        /// Why the comparison was abandoned.
        reason: String,
    },
}

/// Compares two scalar values.
///
/// Text, numbers, dates and identifiers use their native ordering; booleans
/// and characters direct equality. Decimals ignore trailing fractional zeros,
/// and a decimal that cannot be parsed yields [`Comparison::Skipped`]. Enum
/// constants compare by declaration position, not by name.
///
/// ```
/// # use structdiff_core::{compare_scalars, Comparison, Decimal, Inspect};
/// let a = Decimal::new("1.0").inspect();
/// assert_eq!(compare_scalars(&a, &Decimal::new("1.00").inspect()), Comparison::Equal);
/// assert_eq!(compare_scalars(&a, &Decimal::new("1.1").inspect()), Comparison::Different);
/// assert!(matches!(
///     compare_scalars(&a, &Decimal::new("one").inspect()),
///     Comparison::Skipped { .. }
/// ));
/// ```
#[must_use]
pub fn compare_scalars(left: &Value, right: &Value) -> Comparison {
    let ordering = match (left, right) {
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => a.compare(*b),
        (Value::Decimal(a), Value::Decimal(b)) => match a.compare(b) {
            Ok(ordering) => ordering,
            Err(err) => return Comparison::Skipped { reason: err.to_string() },
        },
        (Value::Enum(a), Value::Enum(b)) => a.ordinal().cmp(&b.ordinal()),
        (Value::DateTime(a), Value::DateTime(b)) => a.cmp(b),
        (Value::Date(a), Value::Date(b)) => a.cmp(b),
        (Value::Uuid(a), Value::Uuid(b)) => a.cmp(b),
        (Value::Atom(a), Value::Atom(b)) => a.text().cmp(b.text()),
        (a, b) => {
            return if a == b { Comparison::Equal } else { Comparison::Different };
        }
    };
    if ordering == Ordering::Equal {
        Comparison::Equal
    } else {
        Comparison::Different
    }
}

impl Walk<'_> {
    pub(super) fn compare_simple(
        &mut self,
        path: String,
        left: &Value,
        right: &Value,
        field: Option<&'static Field>,
    ) {
        match compare_scalars(left, right) {
            Comparison::Equal => {}
            Comparison::Different => {
                if matches!(left, Value::Decimal(_)) {
                    tracing::debug!(path = %path, left = %left, right = %right, "decimal values differ");
                }
                let declared = field.map_or_else(|| left.type_ref(), Field::declared_type);
                self.push(Diff::new(
                    path,
                    Some(declared),
                    Operand::Value(left.clone()),
                    Operand::Value(right.clone()),
                ));
            }
            Comparison::Skipped { reason } => {
                tracing::warn!(
                    path = %path,
                    left = %left,
                    right = %right,
                    error = %reason,
                    "decimal comparison skipped"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EnumValue, Inspect, Number};

    #[test]
    fn enums_compare_by_ordinal_not_name() {
        let a = Value::Enum(EnumValue::new("Side", "Buy", 0));
        let renamed = Value::Enum(EnumValue::new("Side", "Purchase", 0));
        let other = Value::Enum(EnumValue::new("Side", "Sell", 1));
        assert_eq!(compare_scalars(&a, &renamed), Comparison::Equal);
        assert_eq!(compare_scalars(&a, &other), Comparison::Different);
    }

    #[test]
    fn numbers_compare_natively() {
        let nan = Value::Number(Number::F64(f64::NAN));
        assert_eq!(compare_scalars(&nan, &nan.clone()), Comparison::Equal);
        assert_eq!(compare_scalars(&3_i16.inspect(), &4_i16.inspect()), Comparison::Different);
    }

    #[test]
    fn booleans_and_chars_use_equality() {
        assert_eq!(compare_scalars(&true.inspect(), &true.inspect()), Comparison::Equal);
        assert_eq!(compare_scalars(&'a'.inspect(), &'b'.inspect()), Comparison::Different);
    }
}
