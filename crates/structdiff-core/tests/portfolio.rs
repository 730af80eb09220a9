mod common;

use std::collections::BTreeSet;

use chrono::NaiveDate;
use common::{portfolio, PositionKind};
use structdiff_core::{
    Comparer, ContextFilter, Decimal, DiffOptions, FieldFilter, Inspect, Number, TypeRef, Value,
};

fn rendered(diffs: &[structdiff_core::Diff]) -> Vec<String> {
    diffs.iter().map(ToString::to_string).collect()
}

fn is_book(value: &Value, book: &str) -> bool {
    matches!(value, Value::Record(record)
        if record.get("book") == Some(&Value::String(book.to_owned())))
}

/// Ignores `size` and `book` everywhere and prunes positions booked in TMF.
fn tmf_filter() -> ContextFilter {
    ContextFilter::new(|path, left, _right, field| {
        let excluded = matches!(field.name(), "size" | "book");
        let tmf = path.starts_with("positions.") && path.contains("Position") && is_book(left, "TMF");
        !excluded && !tmf
    })
}

#[test]
fn identical_portfolios_have_no_diffs() {
    let diffs = Comparer::new().diff(&portfolio(), &portfolio()).unwrap();
    assert!(diffs.is_empty(), "{diffs:?}");
}

#[test]
fn leaf_changes_are_addressed_through_the_graph() {
    let left = portfolio();
    let mut right = portfolio();
    right.positions[4].position_amt = 7500.0;
    right.positions[1].kind = PositionKind::Long;
    right.positions[5].book = "LOANS".to_owned();

    let diffs = Comparer::new().diff(&left, &right).unwrap();
    assert_eq!(
        rendered(&diffs),
        [
            "positions.1.kind (PositionKind): Short => Long",
            "positions.4.positionAmt (f64): 5000 => 7500",
            "positions.5.book (String): CREDIT => LOANS",
        ]
    );
}

#[test]
fn map_keys_and_list_indices_interleave_with_field_names() {
    let left = portfolio();
    let mut right = portfolio();
    right.positions[4].book_to_products.insert("EQ".to_owned(), vec!["product-4".into(), "swap-4".into()]);

    let diffs = Comparer::new().diff(&left, &right).unwrap();
    assert_eq!(rendered(&diffs), ["positions.4.bookToProducts.EQ.1 (String): hedge-4 => swap-4"]);
}

#[test]
fn transient_fields_need_an_explicit_filter() {
    let left = portfolio();
    let mut right = portfolio();
    right.cached_total = 0.0;

    let comparer = Comparer::new();
    assert!(comparer.diff(&left, &right).unwrap().is_empty());

    let diffs = comparer.diff_filtered(&left, &right, FieldFilter::all()).unwrap();
    assert_eq!(rendered(&diffs), ["cachedTotal (f64): 21000 => 0"]);
}

#[test]
fn context_filter_prunes_tmf_positions_and_excluded_fields() {
    let left = portfolio();
    let mut right = portfolio();
    right.positions[3].position_amt = 1.0;
    right.positions[4].size = 99;
    right.positions[1].book = "FX2".to_owned();

    let diffs = Comparer::new()
        .diff_with_context(&left, &right, tmf_filter(), FieldFilter::default())
        .unwrap();
    assert!(diffs.is_empty(), "{diffs:?}");
}

#[test]
fn context_filter_only_prunes_matching_subtrees() {
    let left = portfolio();
    let mut right = portfolio();
    right.positions[3].position_amt = 1.0;
    right.positions[4].position_amt = 2.0;

    let comparer = Comparer::new();
    let diffs = comparer
        .diff_with_context(&left, &right, tmf_filter(), FieldFilter::default())
        .unwrap();
    assert_eq!(diffs.len(), 1);
    assert_eq!(diffs[0].path, "positions.4.positionAmt");
    assert_eq!(diffs[0].declared_type, Some(TypeRef::named("f64")));

    let diffs = comparer
        .diff_with_context(&left, &right, ContextFilter::all(), FieldFilter::default())
        .unwrap();
    let paths: Vec<_> = diffs.iter().map(|d| d.path.as_str()).collect();
    assert_eq!(paths, ["positions.3.positionAmt", "positions.4.positionAmt"]);
}

#[test]
fn rejected_field_paths_are_pruned_but_siblings_are_not() {
    let left = portfolio();
    let mut right = portfolio();
    right.positions[2].size = 0;
    right.positions[2].position_amt = 0.0;

    let options = DiffOptions::default()
        .with_context_filter(ContextFilter::new(|path, _, _, _| path != "positions.2.size"));
    let diffs = Comparer::new().diff_with(&left, &right, &options).unwrap();
    assert_eq!(rendered(&diffs), ["positions.2.positionAmt (f64): 3000 => 0"]);
}

#[test]
fn different_record_types_short_circuit() {
    let left = portfolio();
    let position = left.positions[0].clone();
    let diffs = Comparer::new()
        .diff_values(&left.inspect(), &position.inspect(), &DiffOptions::default())
        .unwrap();
    assert_eq!(rendered(&diffs), [" (Portfolio): Portfolio => Position"]);
}

#[test]
fn null_records_are_not_expanded() {
    let diffs = Comparer::new()
        .diff_values(&Value::Null, &portfolio().inspect(), &DiffOptions::default())
        .unwrap();
    assert_eq!(rendered(&diffs), [" (Portfolio): NULL => NON-NULL"]);
}

fn amount(value: &Value) -> f64 {
    match value {
        Value::Record(record) => match record.get("positionAmt") {
            Some(Value::Number(Number::F64(amount))) => *amount,
            _ => f64::NAN,
        },
        _ => f64::NAN,
    }
}

#[test]
fn registered_comparator_aligns_reordered_positions() {
    let left = portfolio();
    let mut right = portfolio();
    right.positions.reverse();
    right.positions[0].size = 1;

    let mut comparer = Comparer::new();
    let unordered = comparer.diff(&left, &right).unwrap();
    assert!(unordered.len() > 1);

    comparer.register_comparator(TypeRef::named("Position"), |a, b| amount(a).total_cmp(&amount(b)));
    let diffs = comparer.diff(&left, &right).unwrap();
    assert_eq!(rendered(&diffs), ["positions.5.size (i32): 60 => 1"]);

    comparer.clear_comparators();
    assert_eq!(comparer.diff(&left, &right).unwrap(), unordered);
}

#[test]
fn decimals_ignore_scale_but_report_value_changes() {
    let left = portfolio();
    let mut right = portfolio();
    right.positions[0].notional = Decimal::new("100.500");
    assert!(Comparer::new().diff(&left, &right).unwrap().is_empty());

    right.positions[0].notional = Decimal::new("101.5");
    let diffs = Comparer::new().diff(&left, &right).unwrap();
    assert_eq!(rendered(&diffs), ["positions.0.notional (BigDecimal): 100.50 => 101.5"]);
}

#[test]
fn dates_sets_and_arrays_report_element_paths() {
    let left = portfolio();
    let mut right = portfolio();
    right.positions[1].trade_date = NaiveDate::from_ymd_opt(2024, 2, 2).expect("valid date");
    right.positions[1].stats[2] = 4;
    right.positions[2].tags = BTreeSet::from(["core".to_owned(), "desk-x".to_owned()]);

    let diffs = Comparer::new().diff(&left, &right).unwrap();
    assert_eq!(
        rendered(&diffs),
        [
            "positions.1.tradeDate (NaiveDate): 2024-01-02 => 2024-02-02",
            "positions.1.stats.2 (i32): 3 => 4",
            "positions.2.tags.1 (String): desk-2 => MISSING",
        ]
    );
}

#[test]
fn full_diff_reports_both_directions() {
    let left = portfolio();
    let mut right = portfolio();
    right.positions[2].tags.insert("desk-y".to_owned());
    right.positions.pop();

    let diffs = Comparer::new().full_diff(&left, &right).unwrap();
    let paths: Vec<_> = diffs.iter().map(ToString::to_string).collect();
    assert_eq!(paths.len(), 2, "{paths:?}");
    assert!(paths[0].starts_with("positions.5 (Position): Position {"), "{}", paths[0]);
    assert!(paths[0].ends_with("=> NULL"));
    assert_eq!(paths[1], "positions.2.tags.2 (String): desk-y => MISSING");
}
