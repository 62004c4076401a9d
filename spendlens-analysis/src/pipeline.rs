//! End-to-end run: time features, balance check, recurring detection,
//! fixed/habitual split, aggregation, feasibility verdict.

use serde::{Deserialize, Serialize};
use spendlens_core::{
    check_balance_consistency, derive_time_features, evaluate_savings_feasibility, BalanceCheck,
    BalanceSummary, Error, FeasibilityInput, Result, SavingsFeasibilityResult, TimedTransaction,
    Transaction,
};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info};

use crate::aggregate::{compute_spending_aggregates, SpendingAggregate};
use crate::breakdown::{daily_spend, top_merchants, DailySpend, MerchantSpend, DEFAULT_TOP_MERCHANTS};
use crate::income::estimate_monthly_income;
use crate::recurring::detect_recurring_merchants;
use crate::split::{split_fixed_habitual, FixedMerchantRegistry, RecurringSplit};

pub const DEFAULT_MIN_MONTHS: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Distinct months of debit activity for a merchant to count as recurring
    pub min_months: usize,
    pub fixed_merchants: FixedMerchantRegistry,
    pub target_savings: f64,
    /// Overrides the credit-derived income estimate when set
    pub monthly_income: Option<f64>,
    pub top_merchants: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_months: DEFAULT_MIN_MONTHS,
            fixed_merchants: FixedMerchantRegistry::default(),
            target_savings: 0.0,
            monthly_income: None,
            top_merchants: DEFAULT_TOP_MERCHANTS,
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_months == 0 {
            return Err(Error::Config("min_months must be at least 1".to_string()));
        }
        if !self.target_savings.is_finite() || self.target_savings < 0.0 {
            return Err(Error::Config(format!(
                "target_savings must be a non-negative number, got {}",
                self.target_savings
            )));
        }
        if let Some(income) = self.monthly_income {
            if !income.is_finite() {
                return Err(Error::Config(format!("monthly_income must be finite, got {income}")));
            }
        }
        Ok(())
    }
}

/// A statement row with every derived annotation, for per-row views
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnnotatedTransaction {
    #[serde(flatten)]
    pub timed: TimedTransaction,
    pub balance_consistent: bool,
    pub expected_balance: Option<f64>,
}

/// Everything one run produces. `feasibility` is the only part handed to narration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisReport {
    pub transactions: Vec<AnnotatedTransaction>,
    pub balance: BalanceSummary,
    pub recurring_merchants: BTreeSet<String>,
    pub recurring_split: RecurringSplit,
    pub spending: SpendingAggregate,
    pub top_merchants: Vec<MerchantSpend>,
    pub daily_spend: Vec<DailySpend>,
    pub income_estimated: bool,
    pub feasibility: SavingsFeasibilityResult,
}

fn annotate(timed: Vec<TimedTransaction>, checks: &[BalanceCheck]) -> Vec<AnnotatedTransaction> {
    let by_seq: HashMap<usize, &BalanceCheck> = checks.iter().map(|c| (c.seq, c)).collect();
    timed
        .into_iter()
        .map(|t| {
            let check = by_seq.get(&t.transaction.seq);
            AnnotatedTransaction {
                balance_consistent: check.is_none_or(|c| c.balance_consistent),
                expected_balance: check.and_then(|c| c.expected_balance),
                timed: t,
            }
        })
        .collect()
}

/// Run the full pipeline over a loaded statement.
pub fn analyze(txns: &[Transaction], config: &AnalysisConfig) -> Result<AnalysisReport> {
    config.validate()?;

    let timed = derive_time_features(txns);
    let checks = check_balance_consistency(txns);
    let balance = BalanceSummary::from_checks(&checks);

    let recurring_merchants = detect_recurring_merchants(&timed, config.min_months);
    let recurring_split = split_fixed_habitual(&timed, &recurring_merchants, &config.fixed_merchants);
    let spending = compute_spending_aggregates(&timed);

    let (monthly_income, income_estimated) = match config.monthly_income {
        Some(income) => (income, false),
        None => (estimate_monthly_income(&timed), true),
    };
    debug!(monthly_income, income_estimated, "resolved monthly income");

    let feasibility = evaluate_savings_feasibility(FeasibilityInput {
        monthly_income,
        fixed_monthly: recurring_split.fixed_monthly_avg,
        habitual_monthly: recurring_split.habitual_monthly_avg,
        total_spend: spending.monthly_total_spend,
        target_savings: config.target_savings,
    });

    let top = top_merchants(&timed, config.top_merchants);
    let daily = daily_spend(&timed);

    info!(
        transactions = txns.len(),
        recurring = recurring_merchants.len(),
        inconsistent_balances = balance.inconsistent,
        verdict = %feasibility.feasibility(),
        "analysis complete"
    );

    Ok(AnalysisReport {
        transactions: annotate(timed, &checks),
        balance,
        recurring_merchants,
        recurring_split,
        spending,
        top_merchants: top,
        daily_spend: daily,
        income_estimated,
        feasibility,
    })
}
