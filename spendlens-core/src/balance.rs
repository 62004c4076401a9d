//! Ledger balance consistency: `balance[i] == balance[i-1] + credit[i] - debit[i]`.
//!
//! Diagnostic only. Rows are annotated, never rejected.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::transaction::Transaction;

/// Consistency flag for one statement row
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BalanceCheck {
    pub seq: usize,
    /// Previous balance + credit - debit. `None` for the first row.
    pub expected_balance: Option<f64>,
    pub balance_consistent: bool,
}

/// Amounts are compared in minor units (cents). Saturates at the `i128` range.
fn to_minor_units(amount: f64) -> i128 {
    (amount * 100.0).round() as i128
}

/// `prev + credit - debit` in minor units, `None` if it leaves the `i128` range.
fn expected_minor_units(prev: f64, credit: f64, debit: f64) -> Option<i128> {
    to_minor_units(prev)
        .checked_add(to_minor_units(credit))?
        .checked_sub(to_minor_units(debit))
}

/// Check every row against its predecessor in statement order.
///
/// Input is ordered by `seq` first (stable), so the result does not depend on
/// how the caller happened to sort the slice. The first row is consistent by
/// definition.
pub fn check_balance_consistency(txns: &[Transaction]) -> Vec<BalanceCheck> {
    let mut ordered: Vec<&Transaction> = txns.iter().collect();
    ordered.sort_by_key(|t| t.seq);

    let mut checks = Vec::with_capacity(ordered.len());
    let mut prev: Option<&Transaction> = None;

    for txn in ordered {
        let check = match prev {
            None => BalanceCheck {
                seq: txn.seq,
                expected_balance: None,
                balance_consistent: true,
            },
            Some(p) => {
                match expected_minor_units(p.balance, txn.credit_amount, txn.debit_amount) {
                    Some(expected) => BalanceCheck {
                        seq: txn.seq,
                        expected_balance: Some(expected as f64 / 100.0),
                        balance_consistent: expected == to_minor_units(txn.balance),
                    },
                    // Out of range cannot be reconciled
                    None => BalanceCheck {
                        seq: txn.seq,
                        expected_balance: Some(p.balance + txn.credit_amount - txn.debit_amount),
                        balance_consistent: false,
                    },
                }
            }
        };
        checks.push(check);
        prev = Some(txn);
    }

    debug!(
        rows = checks.len(),
        inconsistent = checks.iter().filter(|c| !c.balance_consistent).count(),
        "balance consistency checked"
    );
    checks
}

/// Roll-up of a balance check run, for warning surfaces
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BalanceSummary {
    pub checked: usize,
    pub inconsistent: usize,
    /// Statement positions whose balance did not reconcile
    pub inconsistent_seqs: Vec<usize>,
}

impl BalanceSummary {
    pub fn from_checks(checks: &[BalanceCheck]) -> Self {
        let inconsistent_seqs: Vec<usize> = checks
            .iter()
            .filter(|c| !c.balance_consistent)
            .map(|c| c.seq)
            .collect();
        Self {
            checked: checks.len(),
            inconsistent: inconsistent_seqs.len(),
            inconsistent_seqs,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.inconsistent == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn txn(seq: usize, debit: f64, credit: f64, balance: f64) -> Transaction {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1 + seq as u32).unwrap();
        Transaction::new(seq, date, "X", debit, credit, balance)
    }

    #[test]
    fn test_first_row_always_consistent() {
        // Balance is nonsense relative to the amounts, still consistent.
        let checks = check_balance_consistency(&[txn(0, 500.0, 0.0, -12345.67)]);
        assert_eq!(checks.len(), 1);
        assert!(checks[0].balance_consistent);
        assert_eq!(checks[0].expected_balance, None);
    }

    #[test]
    fn test_large_balances_do_not_overflow() {
        let checks = check_balance_consistency(&[
            txn(0, 0.0, 0.0, 1e17),
            txn(1, 0.0, 5.0, 1e17 + 5.0),
            txn(2, 0.0, 0.0, 2e17),
        ]);
        assert_eq!(checks.len(), 3);
        assert!(checks[0].balance_consistent);
        assert!(!checks[2].balance_consistent);

        let extreme = check_balance_consistency(&[
            txn(0, 0.0, 0.0, f64::MAX),
            txn(1, 0.0, f64::MAX, f64::MAX),
            txn(2, f64::MAX, 0.0, -f64::MAX),
        ]);
        assert_eq!(extreme.len(), 3);
        assert!(!extreme[1].balance_consistent);
    }

    #[test]
    fn test_consistent_chain() {
        let txns = vec![
            txn(0, 0.0, 1000.0, 1000.0),
            txn(1, 250.5, 0.0, 749.5),
            txn(2, 0.0, 50.25, 799.75),
        ];
        let checks = check_balance_consistency(&txns);
        assert!(checks.iter().all(|c| c.balance_consistent));
        assert_eq!(checks[1].expected_balance, Some(749.5));
    }

    #[test]
    fn test_float_noise_is_not_a_mismatch() {
        // 0.1 + 0.2 != 0.3 in f64; cents comparison must absorb that.
        let txns = vec![txn(0, 0.0, 0.1, 0.1), txn(1, 0.0, 0.2, 0.3)];
        let checks = check_balance_consistency(&txns);
        assert!(checks[1].balance_consistent);
    }

    #[test]
    fn test_flags_mismatch_without_rejecting() {
        let txns = vec![
            txn(0, 0.0, 1000.0, 1000.0),
            txn(1, 100.0, 0.0, 950.0),
            txn(2, 50.0, 0.0, 900.0),
        ];
        let checks = check_balance_consistency(&txns);
        assert_eq!(checks.len(), 3);
        assert!(!checks[1].balance_consistent);
        assert_eq!(checks[1].expected_balance, Some(900.0));
        // Row 2 reconciles against row 1's recorded balance.
        assert!(checks[2].balance_consistent);

        let summary = BalanceSummary::from_checks(&checks);
        assert_eq!(summary.inconsistent, 1);
        assert_eq!(summary.inconsistent_seqs, vec![1]);
        assert!(!summary.is_clean());
    }

    #[test]
    fn test_orders_by_statement_sequence() {
        let shuffled = vec![
            txn(2, 50.0, 0.0, 850.0),
            txn(0, 0.0, 1000.0, 1000.0),
            txn(1, 100.0, 0.0, 900.0),
        ];
        let checks = check_balance_consistency(&shuffled);
        let seqs: Vec<usize> = checks.iter().map(|c| c.seq).collect();
        assert_eq!(seqs, vec![0, 1, 2]);
        assert!(checks.iter().all(|c| c.balance_consistent));
    }

    #[test]
    fn test_empty_input() {
        assert!(check_balance_consistency(&[]).is_empty());
        assert!(BalanceSummary::from_checks(&[]).is_clean());
    }
}
