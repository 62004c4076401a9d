//! Time features: statement date parsing, weekend flag and monthly bucket.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::error::{Error, Result};
use crate::transaction::{Transaction, YearMonth};

/// Layouts with no day/month ambiguity, tried first.
const UNAMBIGUOUS_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d %b %Y",
    "%d-%b-%Y",
    "%d %B %Y",
    "%b %d, %Y",
];

const DAY_FIRST_FORMATS: &[&str] = &["%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y"];
const MONTH_FIRST_FORMATS: &[&str] = &["%m/%d/%Y", "%m-%d-%Y", "%m.%d.%Y"];

/// How to read an all-numeric date such as `02/03/2024`.
///
/// The preferred order is tried first; the other order is only used when the
/// preferred reading is not a valid date (e.g. `31/12/2024` under `Mdy`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateOrder {
    /// Month first, `02/03/2024` is February 3
    #[default]
    Mdy,
    /// Day first, `02/03/2024` is March 2
    Dmy,
}

impl DateOrder {
    fn numeric_formats(self) -> [&'static [&'static str]; 2] {
        match self {
            DateOrder::Mdy => [MONTH_FIRST_FORMATS, DAY_FIRST_FORMATS],
            DateOrder::Dmy => [DAY_FIRST_FORMATS, MONTH_FIRST_FORMATS],
        }
    }
}

impl fmt::Display for DateOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateOrder::Mdy => write!(f, "mdy"),
            DateOrder::Dmy => write!(f, "dmy"),
        }
    }
}

impl FromStr for DateOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mdy" => Ok(DateOrder::Mdy),
            "dmy" => Ok(DateOrder::Dmy),
            other => Err(format!("unknown date order '{other}' (expected mdy or dmy)")),
        }
    }
}

/// Parse a statement date cell. `row` is only used for error reporting.
pub fn parse_statement_date(raw: &str, row: usize, order: DateOrder) -> Result<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(Error::validation(row, "date", raw, "missing date"));
    }

    let [preferred, fallback] = order.numeric_formats();
    for fmt in UNAMBIGUOUS_FORMATS.iter().chain(preferred).chain(fallback) {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }

    // ISO datetime such as 2024-03-01T09:30:00 or "2024-03-01 09:30"
    if let (Some(head), Some(sep)) = (s.get(..10), s.get(10..11)) {
        if sep == "T" || sep == " " {
            if let Ok(d) = NaiveDate::parse_from_str(head, "%Y-%m-%d") {
                return Ok(d);
            }
        }
    }

    Err(Error::validation(row, "date", raw, "unrecognised date format"))
}

/// A transaction with its derived calendar features
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimedTransaction {
    #[serde(flatten)]
    pub transaction: Transaction,
    /// Saturday or Sunday
    pub is_weekend: bool,
    /// Recurrence and averaging bucket
    pub year_month: YearMonth,
}

impl TimedTransaction {
    pub fn new(transaction: Transaction) -> Self {
        let date = transaction.date;
        Self {
            is_weekend: is_weekend(date),
            year_month: YearMonth::from_date(date),
            transaction,
        }
    }

    pub fn description(&self) -> &str {
        &self.transaction.description
    }

    pub fn debit_amount(&self) -> f64 {
        self.transaction.debit_amount
    }

    pub fn credit_amount(&self) -> f64 {
        self.transaction.credit_amount
    }

    pub fn is_debit(&self) -> bool {
        self.transaction.is_debit()
    }
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Attach weekend flag and year-month to every transaction, preserving order.
pub fn derive_time_features(txns: &[Transaction]) -> Vec<TimedTransaction> {
    let out: Vec<TimedTransaction> = txns.iter().cloned().map(TimedTransaction::new).collect();
    debug!(
        rows = out.len(),
        weekend = out.iter().filter(|t| t.is_weekend).count(),
        "derived time features"
    );
    out
}
