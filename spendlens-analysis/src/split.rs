//! Fixed vs habitual split of recurring spend.
//!
//! Fixed = recurring merchants on the obligation allow-list (rent, EMIs,
//! insurance, subscriptions). Habitual = every other recurring merchant.

use serde::{Deserialize, Serialize};
use spendlens_core::{TimedTransaction, YearMonth};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use crate::monthly::{mean_of_months, monthly_totals};

/// Merchant labels treated as fixed obligations. Matched exactly against
/// transaction descriptions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedMerchantRegistry {
    labels: BTreeSet<String>,
}

impl FixedMerchantRegistry {
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, description: &str) -> bool {
        self.labels.contains(description)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl Default for FixedMerchantRegistry {
    fn default() -> Self {
        Self::from_labels([
            "RENT",
            "HOME LOAN EMI",
            "CAR LOAN EMI",
            "PERSONAL LOAN EMI",
            "LIC PREMIUM",
            "HEALTH INSURANCE",
            "ELECTRICITY BILL",
            "BROADBAND",
            "MOBILE POSTPAID",
            "NETFLIX",
            "SPOTIFY",
            "AMAZON PRIME",
        ])
    }
}

/// Average monthly recurring spend, split fixed/habitual
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RecurringSplit {
    /// Mean over months with any fixed spend; 0.0 when there is none
    pub fixed_monthly_avg: f64,
    /// Mean over months with any habitual spend; 0.0 when there is none
    pub habitual_monthly_avg: f64,
    pub fixed_by_month: BTreeMap<YearMonth, f64>,
    pub habitual_by_month: BTreeMap<YearMonth, f64>,
}

/// Partition recurring debits by the registry and average each side per month.
pub fn split_fixed_habitual(
    txns: &[TimedTransaction],
    recurring: &BTreeSet<String>,
    registry: &FixedMerchantRegistry,
) -> RecurringSplit {
    let (fixed, habitual): (Vec<&TimedTransaction>, Vec<&TimedTransaction>) = txns
        .iter()
        .filter(|t| t.is_debit() && recurring.contains(t.description()))
        .partition(|t| registry.contains(t.description()));

    let fixed_by_month = monthly_totals(fixed.iter().map(|t| (t.year_month, t.debit_amount())));
    let habitual_by_month =
        monthly_totals(habitual.iter().map(|t| (t.year_month, t.debit_amount())));

    if fixed_by_month.is_empty() {
        debug!("no fixed recurring spend; fixed average is 0");
    }
    if habitual_by_month.is_empty() {
        debug!("no habitual recurring spend; habitual average is 0");
    }

    RecurringSplit {
        fixed_monthly_avg: mean_of_months(&fixed_by_month),
        habitual_monthly_avg: mean_of_months(&habitual_by_month),
        fixed_by_month,
        habitual_by_month,
    }
}
