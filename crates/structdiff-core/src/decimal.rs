use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde::{Serialize, Serializer};

use crate::DecimalError;

/// Arbitrary-precision decimal kept in its textual form.
///
/// Equality and hashing are scale-sensitive (`1.0` and `1.00` are distinct
/// values), while [`Decimal::compare`] strips trailing fractional zeros before
/// ordering. The literal is parsed lazily, so a malformed literal surfaces as
/// a [`DecimalError`] at comparison time.
///
/// ```
/// # use std::cmp::Ordering;
/// # use structdiff_core::Decimal;
/// let a = Decimal::new("1.0");
/// let b = Decimal::new("1.00");
/// assert_ne!(a, b);
/// assert_eq!(a.compare(&b)?, Ordering::Equal);
/// # Ok::<(), structdiff_core::DecimalError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Decimal(String);

impl Decimal {
    /// Wraps a decimal literal without validating it.
    #[must_use]
    pub fn new(literal: impl Into<String>) -> Self {
        Self(literal.into())
    }

    /// The literal as supplied.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the literal.
    pub fn parse(&self) -> Result<BigDecimal, DecimalError> {
        BigDecimal::from_str(self.0.trim()).map_err(|err| DecimalError::Parse {
            literal: self.0.clone(),
            reason: err.to_string(),
        })
    }

    /// Parses the literal and strips trailing fractional zeros.
    pub fn normalized(&self) -> Result<BigDecimal, DecimalError> {
        Ok(self.parse()?.normalized())
    }

    /// Compares two decimals by numeric value, ignoring scale.
    pub fn compare(&self, other: &Self) -> Result<Ordering, DecimalError> {
        Ok(self.normalized()?.cmp(&other.normalized()?))
    }
}

impl From<BigDecimal> for Decimal {
    fn from(value: BigDecimal) -> Self {
        Self(value.to_string())
    }
}

impl From<&BigDecimal> for Decimal {
    fn from(value: &BigDecimal) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Decimal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_does_not_affect_comparison() {
        let one = Decimal::new("1.0");
        assert_eq!(one.compare(&Decimal::new("1.000")), Ok(Ordering::Equal));
        assert_eq!(one.compare(&Decimal::new("1.1")), Ok(Ordering::Less));
    }

    #[test]
    fn malformed_literal_reports_parse_error() {
        let err = Decimal::new("12..5").compare(&Decimal::new("1")).unwrap_err();
        let DecimalError::Parse { literal, .. } = err;
        assert_eq!(literal, "12..5");
    }

    #[test]
    fn conversion_preserves_scale() {
        let value = BigDecimal::from_str("2.50").unwrap();
        assert_eq!(Decimal::from(&value).as_str(), "2.50");
    }
}
