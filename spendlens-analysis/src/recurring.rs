//! Recurring merchant detection: debit activity in at least `min_months`
//! distinct months.

use spendlens_core::{TimedTransaction, YearMonth};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// Merchants (by exact description) with debits in `>= min_months` distinct
/// months. With `min_months <= 1` every merchant with a debit qualifies.
pub fn detect_recurring_merchants(txns: &[TimedTransaction], min_months: usize) -> BTreeSet<String> {
    let mut months_by_merchant: HashMap<&str, BTreeSet<YearMonth>> = HashMap::new();

    for t in txns.iter().filter(|t| t.is_debit()) {
        months_by_merchant
            .entry(t.description())
            .or_default()
            .insert(t.year_month);
    }

    let recurring: BTreeSet<String> = months_by_merchant
        .into_iter()
        .filter(|(_, months)| months.len() >= min_months)
        .map(|(merchant, _)| merchant.to_string())
        .collect();

    debug!(min_months, recurring = recurring.len(), "detected recurring merchants");
    recurring
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use spendlens_core::{derive_time_features, Transaction};

    fn txn(seq: usize, date: (i32, u32, u32), desc: &str, debit: f64, credit: f64) -> Transaction {
        let date = NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap();
        Transaction::new(seq, date, desc, debit, credit, 0.0)
    }

    fn sample() -> Vec<TimedTransaction> {
        derive_time_features(&[
            txn(0, (2024, 1, 5), "NETFLIX", 649.0, 0.0),
            txn(1, (2024, 2, 5), "NETFLIX", 649.0, 0.0),
            txn(2, (2024, 1, 9), "GYM", 1500.0, 0.0),
            txn(3, (2024, 1, 20), "GYM", 1500.0, 0.0),
            txn(4, (2024, 1, 1), "SALARY", 0.0, 60000.0),
            txn(5, (2024, 2, 1), "SALARY", 0.0, 60000.0),
            txn(6, (2024, 3, 1), "SALARY", 0.0, 60000.0),
            txn(7, (2024, 1, 14), "CAFE", 200.0, 0.0),
            txn(8, (2024, 2, 14), "CAFE", 180.0, 0.0),
            txn(9, (2024, 3, 14), "CAFE", 220.0, 0.0),
        ])
    }

    #[test]
    fn test_exactly_min_months_qualifies() {
        let txns = sample();
        let two = detect_recurring_merchants(&txns, 2);
        assert!(two.contains("NETFLIX"));
        let three = detect_recurring_merchants(&txns, 3);
        assert!(!three.contains("NETFLIX"));
        assert!(three.contains("CAFE"));
    }

    #[test]
    fn test_same_month_repeats_do_not_count() {
        let txns = sample();
        assert!(!detect_recurring_merchants(&txns, 2).contains("GYM"));
    }

    #[test]
    fn test_credit_only_merchant_never_recurring() {
        let txns = sample();
        for k in 0..=4 {
            assert!(!detect_recurring_merchants(&txns, k).contains("SALARY"));
        }
    }

    #[test]
    fn test_min_months_one_takes_every_debit_merchant() {
        let txns = sample();
        let all = detect_recurring_merchants(&txns, 1);
        let expected: BTreeSet<String> =
            ["CAFE", "GYM", "NETFLIX"].iter().map(|s| s.to_string()).collect();
        assert_eq!(all, expected);
        assert_eq!(detect_recurring_merchants(&txns, 0), expected);
    }

    #[test]
    fn test_monotonic_in_min_months() {
        let txns = sample();
        for k in 0..5 {
            let looser = detect_recurring_merchants(&txns, k);
            let stricter = detect_recurring_merchants(&txns, k + 1);
            assert!(stricter.is_subset(&looser), "k={k}");
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(detect_recurring_merchants(&[], 2).is_empty());
    }
}
