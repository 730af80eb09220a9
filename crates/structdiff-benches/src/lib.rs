//! Benchmark corpora for `structdiff-core`.
//!
//! Each corpus generates a deterministic book of trades and a copy in which
//! every `stride`-th trade has been modified, so benchmarks measure both the
//! equal fast path and the diff-reporting path.
//!
//! # Examples
//!
//! ```
//! use structdiff_benches::available_corpora;
//! use structdiff_core::{Comparer, DiffOptions};
//!
//! let corpus = &available_corpora()[0];
//! let dataset = corpus.load();
//! let diffs = dataset.diff(&Comparer::new(), &DiffOptions::default()).unwrap();
//! assert_eq!(diffs.len(), corpus.expected_diffs());
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::collections::BTreeMap;

use bigdecimal::BigDecimal;
use structdiff_core::{
    Comparer, Diff, DiffError, DiffOptions, Field, Inspect, Modifiers, Record, Schema, TypeRef,
    Value,
};

static LEG: Schema =
    Schema::new("Leg", &[Field::new("currency", "String"), Field::new("amount", "f64")]);

static TRADE: Schema = Schema::new(
    "Trade",
    &[
        Field::new("id", "u64").with(Modifiers::FINAL),
        Field::new("book", "String"),
        Field::new("notional", "BigDecimal"),
        Field::new("legs", "Vec"),
        Field::new("attributes", "BTreeMap"),
        Field::new("checksum", "u64").with(Modifiers::TRANSIENT),
    ],
);

/// One leg of a trade.
#[derive(Clone, Debug)]
pub struct Leg {
    /// ISO currency code.
    pub currency: String,
    /// Signed amount.
    pub amount: f64,
}

impl Inspect for Leg {
    fn type_ref() -> TypeRef {
        LEG.type_ref()
    }

    fn inspect(&self) -> Value {
        Record::builder(&LEG)
            .field("currency", &self.currency)
            .field("amount", &self.amount)
            .finish()
    }
}

/// A synthetic trade record.
#[derive(Clone, Debug)]
pub struct Trade {
    /// Trade identifier.
    pub id: u64,
    /// Booking desk.
    pub book: String,
    /// Notional amount.
    pub notional: BigDecimal,
    /// Settlement legs.
    pub legs: Vec<Leg>,
    /// Free-form attributes.
    pub attributes: BTreeMap<String, String>,
    /// Cached hash, never compared.
    pub checksum: u64,
}

impl Inspect for Trade {
    fn type_ref() -> TypeRef {
        TRADE.type_ref()
    }

    fn inspect(&self) -> Value {
        Record::builder(&TRADE)
            .field("id", &self.id)
            .field("book", &self.book)
            .field("notional", &self.notional)
            .field("legs", &self.legs)
            .field("attributes", &self.attributes)
            .field("checksum", &self.checksum)
            .finish()
    }
}

/// A named corpus configuration.
#[derive(Clone, Copy, Debug)]
pub struct Corpus {
    name: &'static str,
    trades: usize,
    legs: usize,
    stride: usize,
}

const CORPORA: [Corpus; 3] = [
    Corpus { name: "small-book", trades: 50, legs: 2, stride: 10 },
    Corpus { name: "wide-book", trades: 2_000, legs: 2, stride: 100 },
    Corpus { name: "deep-legs", trades: 100, legs: 64, stride: 5 },
];

/// Returns every registered corpus.
#[must_use]
pub fn available_corpora() -> &'static [Corpus] {
    &CORPORA
}

impl Corpus {
    /// Corpus name, used as the benchmark id.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of trades on each side.
    #[must_use]
    pub fn trades(&self) -> usize {
        self.trades
    }

    /// Number of differences a forward comparison reports.
    #[must_use]
    pub fn expected_diffs(&self) -> usize {
        self.trades.div_ceil(self.stride)
    }

    /// Generates both sides of the corpus.
    #[must_use]
    pub fn load(&self) -> Dataset {
        let before: Vec<Trade> = (0..self.trades).map(|i| trade(i, self.legs)).collect();
        let mut after = before.clone();
        for trade in after.iter_mut().step_by(self.stride) {
            if let Some(leg) = trade.legs.last_mut() {
                leg.amount += 1.0;
            }
            trade.checksum = trade.checksum.wrapping_add(1);
        }
        Dataset { before, after }
    }
}

fn trade(index: usize, legs: usize) -> Trade {
    let id = index as u64;
    Trade {
        id,
        book: ["EQ", "FX", "RATES", "CREDIT"][index % 4].to_owned(),
        notional: BigDecimal::from(id * 1_000 + 250) / BigDecimal::from(100),
        legs: (0..legs)
            .map(|leg| Leg {
                currency: ["USD", "EUR", "JPY"][leg % 3].to_owned(),
                amount: (index * 31 + leg) as f64 * 0.5,
            })
            .collect(),
        attributes: BTreeMap::from([
            ("desk".to_owned(), format!("desk-{}", index % 7)),
            ("trader".to_owned(), format!("t{}", index % 13)),
        ]),
        checksum: id.wrapping_mul(0x9e37_79b9_7f4a_7c15),
    }
}

/// Both sides of a corpus.
#[derive(Clone, Debug)]
pub struct Dataset {
    before: Vec<Trade>,
    after: Vec<Trade>,
}

impl Dataset {
    /// Original trades.
    #[must_use]
    pub fn before(&self) -> &[Trade] {
        &self.before
    }

    /// Modified trades.
    #[must_use]
    pub fn after(&self) -> &[Trade] {
        &self.after
    }

    /// Compares the two sides, materializing them on every call.
    ///
    /// # Errors
    ///
    /// Propagates [`DiffError`] from the engine.
    pub fn diff(&self, comparer: &Comparer, options: &DiffOptions) -> Result<Vec<Diff>, DiffError> {
        comparer.diff_with(&self.before, &self.after, options)
    }

    /// Both sides materialized once, for benchmarks that exclude conversion.
    #[must_use]
    pub fn materialize(&self) -> (Value, Value) {
        (self.before.inspect(), self.after.inspect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corpora_report_one_diff_per_modified_trade() {
        let comparer = Comparer::new();
        for corpus in available_corpora() {
            let diffs = corpus.load().diff(&comparer, &DiffOptions::default()).unwrap();
            assert_eq!(diffs.len(), corpus.expected_diffs(), "{}", corpus.name());
            assert!(diffs.iter().all(|diff| diff.path.ends_with(".amount")));
        }
    }

    #[test]
    fn identical_sides_compare_equal() {
        let dataset = available_corpora()[0].load();
        let (before, _) = dataset.materialize();
        let diffs = Comparer::new().diff_values(&before, &before, &DiffOptions::default()).unwrap();
        assert!(diffs.is_empty());
    }
}
