#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use structdiff_core::{Decimal, EnumValue, Field, Inspect, Modifiers, Record, Schema, TypeRef, Value};

#[derive(Clone, Copy, Debug)]
pub enum PositionKind {
    Long,
    Short,
}

impl Inspect for PositionKind {
    fn type_ref() -> TypeRef {
        TypeRef::named("PositionKind")
    }

    fn inspect(&self) -> Value {
        let constant = match self {
            Self::Long => EnumValue::new("PositionKind", "Long", 0),
            Self::Short => EnumValue::new("PositionKind", "Short", 1),
        };
        Value::Enum(constant)
    }
}

static INSTRUMENT: Schema = Schema::new("Instrument", &[Field::new("book", "String")]);

static POSITION: Schema = Schema::new(
    "Position",
    &[
        Field::new("size", "i32"),
        Field::new("positionAmt", "f64"),
        Field::new("kind", "PositionKind"),
        Field::new("bookToProducts", "BTreeMap"),
        Field::new("notional", "BigDecimal"),
        Field::new("tradeDate", "NaiveDate"),
        Field::new("tags", "BTreeSet"),
        Field::new("stats", "[i32]"),
    ],
)
.extends(&INSTRUMENT);

#[derive(Clone, Debug)]
pub struct Position {
    pub book: String,
    pub size: i32,
    pub position_amt: f64,
    pub kind: PositionKind,
    pub book_to_products: BTreeMap<String, Vec<String>>,
    pub notional: Decimal,
    pub trade_date: NaiveDate,
    pub tags: BTreeSet<String>,
    pub stats: [i32; 3],
}

impl Inspect for Position {
    fn type_ref() -> TypeRef {
        POSITION.type_ref()
    }

    fn inspect(&self) -> Value {
        Record::builder(&POSITION)
            .field("book", &self.book)
            .field("size", &self.size)
            .field("positionAmt", &self.position_amt)
            .field("kind", &self.kind)
            .field("bookToProducts", &self.book_to_products)
            .field("notional", &self.notional)
            .field("tradeDate", &self.trade_date)
            .field("tags", &self.tags)
            .field("stats", &self.stats)
            .finish()
    }
}

static PORTFOLIO: Schema = Schema::new(
    "Portfolio",
    &[
        Field::new("name", "String"),
        Field::new("positions", "Vec"),
        Field::new("cachedTotal", "f64").with(Modifiers::TRANSIENT),
    ],
);

#[derive(Clone, Debug)]
pub struct Portfolio {
    pub name: String,
    pub positions: Vec<Position>,
    pub cached_total: f64,
}

impl Inspect for Portfolio {
    fn type_ref() -> TypeRef {
        PORTFOLIO.type_ref()
    }

    fn inspect(&self) -> Value {
        Record::builder(&PORTFOLIO)
            .field("name", &self.name)
            .field("positions", &self.positions)
            .field("cachedTotal", &self.cached_total)
            .finish()
    }
}

pub const BOOKS: [&str; 6] = ["EQ", "FX", "RATES", "TMF", "EQ", "CREDIT"];

/// Six positions with distinct amounts; position 3 is booked in `TMF`.
pub fn portfolio() -> Portfolio {
    let positions = BOOKS
        .iter()
        .zip(0_i32..)
        .map(|(book, i)| Position {
            book: (*book).to_owned(),
            size: 10 * (i + 1),
            position_amt: 1000.0 * f64::from(i + 1),
            kind: if i % 2 == 0 { PositionKind::Long } else { PositionKind::Short },
            book_to_products: BTreeMap::from([(
                (*book).to_owned(),
                vec![format!("product-{i}"), format!("hedge-{i}")],
            )]),
            notional: Decimal::new(format!("{}.50", 100 * (i + 1))),
            trade_date: NaiveDate::from_ymd_opt(2024, 1, 1 + i.unsigned_abs())
                .expect("valid trade date"),
            tags: BTreeSet::from(["core".to_owned(), format!("desk-{i}")]),
            stats: [i, i * 2, i * 3],
        })
        .collect();
    Portfolio { name: "global".to_owned(), positions, cached_total: 21_000.0 }
}
