//! Amount cell parsing.
//!
//! Accepts `1234.5`, `1,234.50`, `₹ 1,234.50`, `-$12.00`. Rejects anything else.

use regex::Regex;
use spendlens_core::{Error, Result};
use std::sync::LazyLock;

static AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<neg>-)?\s*[₹$€£]?\s*(?P<num>\d{1,3}(?:,\d{2,3})*(?:\.\d+)?|\d+(?:\.\d+)?|\.\d+)$")
        .expect("amount pattern is valid")
});

/// How a blank or negative cell is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountKind {
    /// Debit/credit column: blank means 0.0, negatives are invalid
    Flow,
    /// Running balance: must be present, may be negative (overdraft)
    Balance,
}

pub fn parse_amount(raw: &str, row: usize, column: &str, kind: AmountKind) -> Result<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return match kind {
            AmountKind::Flow => Ok(0.0),
            AmountKind::Balance => Err(Error::validation(row, column, raw, "missing value")),
        };
    }

    let caps = AMOUNT_RE
        .captures(s)
        .ok_or_else(|| Error::validation(row, column, raw, "not a number"))?;

    let value: f64 = caps["num"]
        .replace(',', "")
        .parse()
        .map_err(|_| Error::validation(row, column, raw, "not a number"))?;
    if !value.is_finite() {
        return Err(Error::validation(row, column, raw, "amount out of range"));
    }
    let value = if caps.name("neg").is_some() { -value } else { value };

    if kind == AmountKind::Flow && value < 0.0 {
        return Err(Error::validation(row, column, raw, "amount must not be negative"));
    }
    Ok(value)
}
