//! Observed spending aggregates: monthly average, weekday vs weekend.

use serde::{Deserialize, Serialize};
use spendlens_core::{TimedTransaction, YearMonth};
use std::collections::BTreeMap;
use tracing::debug;

use crate::monthly::{mean_of_months, monthly_totals};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SpendingAggregate {
    /// Mean over months with any debit of that month's debit total
    pub monthly_total_spend: f64,
    pub weekend_total: f64,
    pub weekday_total: f64,
    pub weekend_txn_count: usize,
    pub weekday_txn_count: usize,
    /// Per-transaction average; 0.0 when there are no weekend debits
    pub weekend_avg: f64,
    /// Per-transaction average; 0.0 when there are no weekday debits
    pub weekday_avg: f64,
    pub spend_by_month: BTreeMap<YearMonth, f64>,
}

fn per_txn_avg(total: f64, count: usize) -> f64 {
    if count > 0 { total / count as f64 } else { 0.0 }
}

pub fn compute_spending_aggregates(txns: &[TimedTransaction]) -> SpendingAggregate {
    let expenses: Vec<&TimedTransaction> = txns.iter().filter(|t| t.is_debit()).collect();

    let spend_by_month = monthly_totals(expenses.iter().map(|t| (t.year_month, t.debit_amount())));

    let (mut weekend_total, mut weekday_total) = (0.0, 0.0);
    let (mut weekend_txn_count, mut weekday_txn_count) = (0usize, 0usize);
    for t in &expenses {
        if t.is_weekend {
            weekend_total += t.debit_amount();
            weekend_txn_count += 1;
        } else {
            weekday_total += t.debit_amount();
            weekday_txn_count += 1;
        }
    }

    debug!(
        expenses = expenses.len(),
        months = spend_by_month.len(),
        weekend_txn_count,
        weekday_txn_count,
        "computed spending aggregates"
    );

    SpendingAggregate {
        monthly_total_spend: mean_of_months(&spend_by_month),
        weekend_total,
        weekday_total,
        weekend_txn_count,
        weekday_txn_count,
        weekend_avg: per_txn_avg(weekend_total, weekend_txn_count),
        weekday_avg: per_txn_avg(weekday_total, weekday_txn_count),
        spend_by_month,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use spendlens_core::{derive_time_features, Transaction};

    fn txn(seq: usize, date: (i32, u32, u32), debit: f64, credit: f64) -> Transaction {
        let date = NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap();
        Transaction::new(seq, date, "X", debit, credit, 0.0)
    }

    #[test]
    fn test_weekday_weekend_split() {
        // 2024-03-09 Sat, 2024-03-10 Sun, 2024-03-11 Mon, 2024-04-02 Tue
        let txns = derive_time_features(&[
            txn(0, (2024, 3, 9), 300.0, 0.0),
            txn(1, (2024, 3, 10), 100.0, 0.0),
            txn(2, (2024, 3, 11), 600.0, 0.0),
            txn(3, (2024, 4, 2), 1000.0, 0.0),
            txn(4, (2024, 4, 6), 0.0, 5000.0),
        ]);
        let agg = compute_spending_aggregates(&txns);

        assert_eq!(agg.weekend_total, 400.0);
        assert_eq!(agg.weekend_txn_count, 2);
        assert_eq!(agg.weekend_avg, 200.0);
        assert_eq!(agg.weekday_total, 1600.0);
        assert_eq!(agg.weekday_txn_count, 2);
        assert_eq!(agg.weekday_avg, 800.0);
        // March 1000, April 1000
        assert_eq!(agg.monthly_total_spend, 1000.0);
    }

    #[test]
    fn test_no_weekend_spend_is_zero_average() {
        let txns = derive_time_features(&[txn(0, (2024, 3, 11), 600.0, 0.0)]);
        let agg = compute_spending_aggregates(&txns);
        assert_eq!(agg.weekend_txn_count, 0);
        assert_eq!(agg.weekend_avg, 0.0);
        assert_eq!(agg.weekday_avg, 600.0);
    }

    #[test]
    fn test_no_debits_at_all() {
        let txns = derive_time_features(&[txn(0, (2024, 3, 11), 0.0, 100.0)]);
        let agg = compute_spending_aggregates(&txns);
        assert_eq!(agg, SpendingAggregate::default());
        assert!(!agg.monthly_total_spend.is_nan());
    }

    #[test]
    fn test_idempotent() {
        let txns = derive_time_features(&[
            txn(0, (2024, 3, 9), 300.0, 0.0),
            txn(1, (2024, 5, 11), 42.0, 0.0),
        ]);
        assert_eq!(compute_spending_aggregates(&txns), compute_spending_aggregates(&txns));
    }
}
