//! Fuzzing harnesses for `structdiff-core`.
//!
//! Each public function accepts raw bytes, builds documents from them and
//! drives the comparison engine, panicking only when an engine invariant is
//! violated.
//!
//! # Examples
//!
//! ```
//! structdiff_fuzz::fuzz_parsed(b"{\"a\":[1,2]}");
//! structdiff_fuzz::fuzz_diff(&[1, 2, 3, 4]);
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

use arbitrary::Unstructured;
use serde_json::{Map as JsonMap, Number as JsonNumber, Value as JsonValue};
use structdiff_core::{Comparer, Inspect};

const MAX_DEPTH: usize = 4;
const MAX_ARRAY_LEN: u8 = 6;
const MAX_OBJECT_LEN: u8 = 6;
const MAX_STRING_LEN: u8 = 12;

/// Parses the bytes as JSON and checks that the document equals itself.
///
/// ```
/// structdiff_fuzz::fuzz_parsed(b"[{\"k\":null}]");
/// ```
pub fn fuzz_parsed(data: &[u8]) {
    if let Ok(value) = serde_json::from_slice::<JsonValue>(data) {
        assert_reflexive(&Comparer::new(), &value);
    }
}

/// Compares two generated documents in both directions, with and without
/// ordering registered for array elements.
///
/// ```
/// structdiff_fuzz::fuzz_diff(b"seed");
/// ```
pub fn fuzz_diff(data: &[u8]) {
    let mut unstructured = Unstructured::new(data);
    let Ok(lhs) = json_value_from_unstructured(&mut unstructured, 0) else {
        return;
    };
    let Ok(rhs) = json_value_from_unstructured(&mut unstructured, 0) else {
        return;
    };

    let mut comparer = Comparer::new();
    check_pair(&comparer, &lhs, &rhs);
    comparer.register_natural(JsonValue::type_ref());
    check_pair(&comparer, &lhs, &rhs);
}

fn check_pair(comparer: &Comparer, lhs: &JsonValue, rhs: &JsonValue) {
    assert_reflexive(comparer, lhs);
    assert_reflexive(comparer, rhs);

    let Ok(forward) = comparer.diff(lhs, rhs) else {
        return;
    };
    let Ok(backward) = comparer.diff(rhs, lhs) else {
        return;
    };
    let Ok(full) = comparer.full_diff(lhs, rhs) else {
        return;
    };
    assert_eq!(full.len(), forward.len() + backward.len());
    assert_eq!(&full[..forward.len()], forward.as_slice());
    if lhs.inspect() == rhs.inspect() {
        assert!(full.is_empty(), "equal documents reported {full:?}");
    }
}

fn assert_reflexive(comparer: &Comparer, value: &JsonValue) {
    if let Ok(diffs) = comparer.diff(value, value) {
        assert!(diffs.is_empty(), "{value} differs from itself: {diffs:?}");
    }
}

fn json_value_from_unstructured(
    unstructured: &mut Unstructured<'_>,
    depth: usize,
) -> Result<JsonValue, arbitrary::Error> {
    if depth >= MAX_DEPTH {
        return json_leaf(unstructured);
    }

    let choice = unstructured.int_in_range::<u8>(0..=5)?;
    match choice {
        0 => Ok(JsonValue::Null),
        1 => Ok(JsonValue::Bool(unstructured.arbitrary()?)),
        2 => Ok(JsonValue::Number(random_number(unstructured)?)),
        3 => Ok(JsonValue::String(random_string(unstructured)?)),
        4 => {
            let len = usize::from(unstructured.int_in_range::<u8>(0..=MAX_ARRAY_LEN)?);
            let mut items = Vec::with_capacity(len);
            for _ in 0..len {
                items.push(json_value_from_unstructured(unstructured, depth + 1)?);
            }
            Ok(JsonValue::Array(items))
        }
        _ => {
            let len = usize::from(unstructured.int_in_range::<u8>(0..=MAX_OBJECT_LEN)?);
            let mut map = JsonMap::new();
            for _ in 0..len {
                let key = random_string(unstructured)?;
                let value = json_value_from_unstructured(unstructured, depth + 1)?;
                map.insert(key, value);
            }
            Ok(JsonValue::Object(map))
        }
    }
}

fn json_leaf(unstructured: &mut Unstructured<'_>) -> Result<JsonValue, arbitrary::Error> {
    let choice = unstructured.int_in_range::<u8>(0..=3)?;
    match choice {
        0 => Ok(JsonValue::Null),
        1 => Ok(JsonValue::Bool(unstructured.arbitrary()?)),
        2 => Ok(JsonValue::Number(random_number(unstructured)?)),
        _ => Ok(JsonValue::String(random_string(unstructured)?)),
    }
}

fn random_number(unstructured: &mut Unstructured<'_>) -> Result<JsonNumber, arbitrary::Error> {
    if unstructured.arbitrary()? {
        let int = unstructured.arbitrary::<i64>()?;
        Ok(JsonNumber::from(int))
    } else {
        let numerator = f64::from(unstructured.arbitrary::<i32>()?);
        let denominator = f64::from(unstructured.int_in_range::<u16>(1..=1024)?);
        JsonNumber::from_f64(numerator / denominator).ok_or(arbitrary::Error::IncorrectFormat)
    }
}

fn random_string(unstructured: &mut Unstructured<'_>) -> Result<String, arbitrary::Error> {
    let len = usize::from(unstructured.int_in_range::<u8>(0..=MAX_STRING_LEN)?);
    let mut string = String::with_capacity(len);
    for _ in 0..len {
        let byte = unstructured.int_in_range::<u8>(0x20..=0x7e)?;
        string.push(char::from(byte));
    }
    Ok(string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsed_harness_accepts_garbage() {
        fuzz_parsed(b"{not json");
        fuzz_parsed(br#"{"a":[1,1.5,"x",null,{"b":true}]}"#);
    }

    #[test]
    fn diff_harness_runs() {
        fuzz_diff(b"diff");
        fuzz_diff(&[0xff; 64]);
    }

    #[test]
    fn signed_zeros_are_not_treated_as_equal_documents() {
        let (positive, negative) = (serde_json::json!([0.0]), serde_json::json!([-0.0]));
        assert_eq!(positive, negative);
        let comparer = Comparer::new();
        check_pair(&comparer, &positive, &negative);
        assert_eq!(comparer.full_diff(&positive, &negative).unwrap().len(), 2);
    }
}
