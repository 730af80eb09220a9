mod common;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use common::portfolio;
use structdiff_core::{Comparer, Decimal};
use tracing::field::{Field, Visit};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{Layer, Registry};

#[derive(Clone, Debug)]
struct CapturedEvent {
    level: Level,
    fields: HashMap<String, String>,
}

impl CapturedEvent {
    fn message(&self) -> Option<&str> {
        self.fields.get("message").map(String::as_str)
    }

    fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

#[derive(Default)]
struct FieldVisitor {
    fields: HashMap<String, String>,
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.fields.insert(field.name().to_owned(), format!("{value:?}"));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.fields.insert(field.name().to_owned(), value.to_owned());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.fields.insert(field.name().to_owned(), value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.fields.insert(field.name().to_owned(), value.to_string());
    }
}

#[derive(Clone, Default)]
struct CaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        let captured = CapturedEvent { level: *event.metadata().level(), fields: visitor.fields };
        self.events.lock().map(|mut events| events.push(captured)).ok();
    }
}

fn capture<T>(body: impl FnOnce() -> T) -> (T, Vec<CapturedEvent>) {
    let layer = CaptureLayer::default();
    let events = Arc::clone(&layer.events);
    let subscriber = Registry::default().with(layer);
    let out = tracing::subscriber::with_default(subscriber, body);
    let events = events.lock().map(|events| events.clone()).unwrap_or_default();
    (out, events)
}

#[test]
fn unparsable_decimals_are_skipped_with_a_warning() {
    let left = portfolio();
    let mut right = portfolio();
    right.positions[0].notional = Decimal::new("n/a");

    let (diffs, events) = capture(|| Comparer::new().diff(&left, &right).unwrap());
    assert!(diffs.is_empty(), "{diffs:?}");

    let warning = events
        .iter()
        .find(|event| event.message() == Some("decimal comparison skipped"))
        .expect("warning emitted");
    assert_eq!(warning.level, Level::WARN);
    assert_eq!(warning.field("path"), Some("positions.0.notional"));
    assert_eq!(warning.field("left"), Some("100.50"));
    assert_eq!(warning.field("right"), Some("n/a"));
    assert!(warning.field("error").is_some_and(|error| error.contains("n/a")));
}

#[test]
fn differing_decimals_and_records_emit_debug_events() {
    let left = portfolio();
    let mut right = portfolio();
    right.positions[4].notional = Decimal::new("1");

    let (diffs, events) = capture(|| Comparer::new().diff(&left, &right).unwrap());
    assert_eq!(diffs.len(), 1);

    let decimal = events
        .iter()
        .find(|event| event.message() == Some("decimal values differ"))
        .expect("decimal event emitted");
    assert_eq!(decimal.level, Level::DEBUG);
    assert_eq!(decimal.field("path"), Some("positions.4.notional"));

    let nested: Vec<_> = events
        .iter()
        .filter(|event| event.message() == Some("nested values differ"))
        .filter_map(|event| event.field("path"))
        .collect();
    assert_eq!(nested, ["positions.4", ""]);
}

#[test]
fn each_pass_reports_its_diff_count() {
    let left = vec![1_i32, 2, 3];
    let right = vec![1_i32, 2];

    let (diffs, events) = capture(|| Comparer::new().full_diff(&left, &right).unwrap());
    assert_eq!(diffs.len(), 1);

    let counts: Vec<_> = events
        .iter()
        .filter(|event| event.message() == Some("comparison pass finished"))
        .map(|event| (event.level, event.field("diffs")))
        .collect();
    assert_eq!(counts, [(Level::TRACE, Some("1")), (Level::TRACE, Some("0"))]);
}

#[test]
fn identical_graphs_log_nothing_above_trace() {
    let (diffs, events) = capture(|| Comparer::new().diff(&portfolio(), &portfolio()).unwrap());
    assert!(diffs.is_empty());
    assert!(events.iter().all(|event| event.level == Level::TRACE), "{events:?}");
}
