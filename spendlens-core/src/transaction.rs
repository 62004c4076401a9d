//! Ledger entry types and the monthly grouping key

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One bank-statement ledger entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Position in the statement export (0-based). Balance checks order by this.
    pub seq: usize,
    /// Calendar date of the entry
    pub date: NaiveDate,
    /// Amount withdrawn, 0.0 if none
    pub debit_amount: f64,
    /// Amount deposited, 0.0 if none
    pub credit_amount: f64,
    /// Running account balance after this entry
    pub balance: f64,
    /// Merchant/label text, used as the categorization key
    pub description: String,
}

impl Transaction {
    /// Create a new Transaction
    pub fn new(
        seq: usize,
        date: NaiveDate,
        description: impl Into<String>,
        debit_amount: f64,
        credit_amount: f64,
        balance: f64,
    ) -> Self {
        Self {
            seq,
            date,
            debit_amount,
            credit_amount,
            balance,
            description: description.into(),
        }
    }

    /// Returns true if money left the account
    pub fn is_debit(&self) -> bool {
        self.debit_amount > 0.0
    }

    /// Returns true if money entered the account
    pub fn is_credit(&self) -> bool {
        self.credit_amount > 0.0
    }
}

/// Calendar month bucket. Orders chronologically and renders as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (y, m) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| format!("expected YYYY-MM, got '{s}'"))?;
        let year: i32 = y.parse().map_err(|_| format!("invalid year in '{s}'"))?;
        let month: u32 = m.parse().map_err(|_| format!("invalid month in '{s}'"))?;
        YearMonth::new(year, month).ok_or_else(|| format!("month out of range in '{s}'"))
    }
}

impl TryFrom<String> for YearMonth {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(ym: YearMonth) -> Self {
        ym.to_string()
    }
}
