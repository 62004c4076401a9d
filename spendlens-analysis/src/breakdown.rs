//! Per-merchant and per-day spend series for charting.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use spendlens_core::TimedTransaction;
use std::collections::{BTreeMap, HashMap};

pub const DEFAULT_TOP_MERCHANTS: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MerchantSpend {
    pub description: String,
    pub total_debit: f64,
    pub transaction_count: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DailySpend {
    pub date: NaiveDate,
    pub debit_total: f64,
}

/// Merchants ranked by total debit, highest first. Ties break by name.
pub fn top_merchants(txns: &[TimedTransaction], limit: usize) -> Vec<MerchantSpend> {
    let mut by_merchant: HashMap<&str, (f64, usize)> = HashMap::new();
    for t in txns.iter().filter(|t| t.is_debit()) {
        let entry = by_merchant.entry(t.description()).or_insert((0.0, 0));
        entry.0 += t.debit_amount();
        entry.1 += 1;
    }

    let mut ranked: Vec<MerchantSpend> = by_merchant
        .into_iter()
        .map(|(description, (total_debit, transaction_count))| MerchantSpend {
            description: description.to_string(),
            total_debit,
            transaction_count,
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.total_debit
            .total_cmp(&a.total_debit)
            .then_with(|| a.description.cmp(&b.description))
    });
    ranked.truncate(limit);
    ranked
}

/// Debit total per calendar date, oldest first. Dates with only credits
/// appear with 0.0.
pub fn daily_spend(txns: &[TimedTransaction]) -> Vec<DailySpend> {
    let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for t in txns {
        *by_date.entry(t.transaction.date).or_insert(0.0) += t.debit_amount();
    }
    by_date
        .into_iter()
        .map(|(date, debit_total)| DailySpend { date, debit_total })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use spendlens_core::{derive_time_features, Transaction};

    fn txn(seq: usize, day: u32, desc: &str, debit: f64, credit: f64) -> Transaction {
        let date = NaiveDate::from_ymd_opt(2024, 3, day).unwrap();
        Transaction::new(seq, date, desc, debit, credit, 0.0)
    }

    fn sample() -> Vec<TimedTransaction> {
        derive_time_features(&[
            txn(0, 1, "SALARY", 0.0, 60000.0),
            txn(1, 2, "RENT", 15000.0, 0.0),
            txn(2, 2, "CAFE", 150.0, 0.0),
            txn(3, 5, "CAFE", 250.0, 0.0),
            txn(4, 6, "BOOKS", 400.0, 0.0),
        ])
    }

    #[test]
    fn test_top_merchants_ranking() {
        let top = top_merchants(&sample(), DEFAULT_TOP_MERCHANTS);
        let names: Vec<&str> = top.iter().map(|m| m.description.as_str()).collect();
        // CAFE and BOOKS tie at 400; name order breaks it
        assert_eq!(names, vec!["RENT", "BOOKS", "CAFE"]);
        assert_eq!(top[2].transaction_count, 2);
        assert!(!names.contains(&"SALARY"));
    }

    #[test]
    fn test_top_merchants_limit() {
        assert_eq!(top_merchants(&sample(), 1).len(), 1);
        assert!(top_merchants(&sample(), 0).is_empty());
    }

    #[test]
    fn test_daily_spend_series() {
        let daily = daily_spend(&sample());
        assert_eq!(daily.len(), 4);
        assert_eq!(daily[0].debit_total, 0.0);
        assert_eq!(daily[1].debit_total, 15150.0);
        assert!(daily.windows(2).all(|w| w[0].date < w[1].date));
    }
}
