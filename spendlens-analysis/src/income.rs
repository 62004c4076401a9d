//! Monthly income estimate from statement credits.

use spendlens_core::TimedTransaction;
use tracing::debug;

use crate::monthly::{mean_of_months, monthly_totals};

/// Mean, over months with any credit, of that month's summed credits.
/// No credits at all gives 0.0.
pub fn estimate_monthly_income(txns: &[TimedTransaction]) -> f64 {
    let by_month = monthly_totals(
        txns.iter()
            .filter(|t| t.transaction.is_credit())
            .map(|t| (t.year_month, t.credit_amount())),
    );
    let income = mean_of_months(&by_month);
    debug!(months = by_month.len(), income, "estimated monthly income");
    income
}
