//! Savings feasibility rule engine.
//!
//! A total function over numeric inputs: no input produces an error or a
//! non-finite field.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Closed set of feasibility outcomes, in decision priority order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Verdict {
    #[serde(rename = "Feasible without changes")]
    FeasibleWithoutChanges,
    #[serde(rename = "Feasible with habit adjustment")]
    FeasibleWithHabitAdjustment,
    #[serde(rename = "Not feasible without structural changes")]
    NotFeasibleWithoutStructuralChanges,
}

impl Verdict {
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::FeasibleWithoutChanges => "Feasible without changes",
            Verdict::FeasibleWithHabitAdjustment => "Feasible with habit adjustment",
            Verdict::NotFeasibleWithoutStructuralChanges => {
                "Not feasible without structural changes"
            }
        }
    }

    pub fn is_feasible(&self) -> bool {
        !matches!(self, Verdict::NotFeasibleWithoutStructuralChanges)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Monthly figures fed to the engine
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct FeasibilityInput {
    pub monthly_income: f64,
    pub fixed_monthly: f64,
    pub habitual_monthly: f64,
    pub total_spend: f64,
    pub target_savings: f64,
}

/// Terminal artifact of an analysis run. Every figure is final; consumers
/// narrate or render it and never recompute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavingsFeasibilityResult {
    monthly_income: f64,
    fixed_monthly: f64,
    habitual_monthly: f64,
    monthly_total_spend: f64,
    available_to_save: f64,
    target_savings: f64,
    shortfall: f64,
    feasibility: Verdict,
    fixed_load_pct: f64,
    habitual_load_pct: f64,
    max_possible_behavioral_cut: f64,
}

impl SavingsFeasibilityResult {
    pub fn monthly_income(&self) -> f64 {
        self.monthly_income
    }
    pub fn fixed_monthly(&self) -> f64 {
        self.fixed_monthly
    }
    pub fn habitual_monthly(&self) -> f64 {
        self.habitual_monthly
    }
    pub fn monthly_total_spend(&self) -> f64 {
        self.monthly_total_spend
    }
    pub fn available_to_save(&self) -> f64 {
        self.available_to_save
    }
    pub fn target_savings(&self) -> f64 {
        self.target_savings
    }
    /// Target minus available. Negative when there is headroom.
    pub fn shortfall(&self) -> f64 {
        self.shortfall
    }
    pub fn feasibility(&self) -> Verdict {
        self.feasibility
    }
    pub fn fixed_load_pct(&self) -> f64 {
        self.fixed_load_pct
    }
    pub fn habitual_load_pct(&self) -> f64 {
        self.habitual_load_pct
    }
    pub fn max_possible_behavioral_cut(&self) -> f64 {
        self.max_possible_behavioral_cut
    }
}

fn finite_or_zero(x: f64) -> f64 {
    if x.is_finite() { x } else { 0.0 }
}

fn load_pct(part: f64, income: f64) -> f64 {
    if income > 0.0 {
        finite_or_zero(part / income * 100.0)
    } else {
        0.0
    }
}

/// Decide whether `target_savings` is reachable from the observed monthly figures.
pub fn evaluate_savings_feasibility(input: FeasibilityInput) -> SavingsFeasibilityResult {
    let monthly_income = finite_or_zero(input.monthly_income);
    let fixed_monthly = finite_or_zero(input.fixed_monthly);
    let habitual_monthly = finite_or_zero(input.habitual_monthly);
    let total_spend = finite_or_zero(input.total_spend);
    let target_savings = finite_or_zero(input.target_savings);

    let available_to_save = monthly_income - total_spend;
    let shortfall = target_savings - available_to_save;

    let feasibility = if available_to_save >= target_savings {
        Verdict::FeasibleWithoutChanges
    } else if habitual_monthly >= shortfall {
        Verdict::FeasibleWithHabitAdjustment
    } else {
        Verdict::NotFeasibleWithoutStructuralChanges
    };

    if monthly_income <= 0.0 {
        debug!(monthly_income, "non-positive income; load percentages set to 0");
    }

    SavingsFeasibilityResult {
        monthly_income,
        fixed_monthly,
        habitual_monthly,
        monthly_total_spend: total_spend,
        available_to_save,
        target_savings,
        shortfall,
        feasibility,
        fixed_load_pct: load_pct(fixed_monthly, monthly_income),
        habitual_load_pct: load_pct(habitual_monthly, monthly_income),
        max_possible_behavioral_cut: habitual_monthly,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(income: f64, fixed: f64, habitual: f64, spend: f64, target: f64) -> FeasibilityInput {
        FeasibilityInput {
            monthly_income: income,
            fixed_monthly: fixed,
            habitual_monthly: habitual,
            total_spend: spend,
            target_savings: target,
        }
    }

    #[test]
    fn test_feasible_without_changes() {
        let r = evaluate_savings_feasibility(input(60000.0, 15000.0, 5000.0, 35000.0, 20000.0));
        assert_eq!(r.available_to_save(), 25000.0);
        assert_eq!(r.shortfall(), -5000.0);
        assert_eq!(r.feasibility(), Verdict::FeasibleWithoutChanges);
        assert_eq!(r.fixed_load_pct(), 25.0);
    }

    #[test]
    fn test_feasible_with_habit_adjustment() {
        let r = evaluate_savings_feasibility(input(50000.0, 20000.0, 4000.0, 48000.0, 5000.0));
        assert_eq!(r.available_to_save(), 2000.0);
        assert_eq!(r.shortfall(), 3000.0);
        assert_eq!(r.feasibility(), Verdict::FeasibleWithHabitAdjustment);
        assert_eq!(r.max_possible_behavioral_cut(), 4000.0);
    }

    #[test]
    fn test_not_feasible_without_structural_changes() {
        let r = evaluate_savings_feasibility(input(50000.0, 20000.0, 2000.0, 48000.0, 5000.0));
        assert_eq!(r.shortfall(), 3000.0);
        assert_eq!(r.feasibility(), Verdict::NotFeasibleWithoutStructuralChanges);
        assert!(!r.feasibility().is_feasible());
    }

    #[test]
    fn test_habitual_equal_to_shortfall_is_enough() {
        let r = evaluate_savings_feasibility(input(50000.0, 0.0, 3000.0, 48000.0, 5000.0));
        assert_eq!(r.feasibility(), Verdict::FeasibleWithHabitAdjustment);
    }

    #[test]
    fn test_exactly_on_target_is_feasible() {
        let r = evaluate_savings_feasibility(input(50000.0, 0.0, 0.0, 30000.0, 20000.0));
        assert_eq!(r.feasibility(), Verdict::FeasibleWithoutChanges);
    }

    #[test]
    fn test_zero_income_degrades_percentages() {
        let r = evaluate_savings_feasibility(input(0.0, 1000.0, 500.0, 1500.0, 100.0));
        assert_eq!(r.fixed_load_pct(), 0.0);
        assert_eq!(r.habitual_load_pct(), 0.0);
        assert_eq!(r.available_to_save(), -1500.0);
        assert_eq!(r.shortfall(), 1600.0);
        assert_eq!(r.feasibility(), Verdict::NotFeasibleWithoutStructuralChanges);
    }

    #[test]
    fn test_negative_income_degrades_percentages() {
        let r = evaluate_savings_feasibility(input(-10.0, 1000.0, 500.0, 0.0, 0.0));
        assert_eq!(r.fixed_load_pct(), 0.0);
        assert_eq!(r.habitual_load_pct(), 0.0);
    }

    #[test]
    fn test_all_zero_is_feasible() {
        let r = evaluate_savings_feasibility(FeasibilityInput::default());
        assert_eq!(r.feasibility(), Verdict::FeasibleWithoutChanges);
    }

    #[test]
    fn test_every_field_finite_over_a_grid() {
        let values = [0.0, 1.0, 999.99, 50000.0, 1e9];
        for &income in &values {
            for &fixed in &values {
                for &habitual in &values {
                    for &spend in &values {
                        for &target in &values {
                            let r = evaluate_savings_feasibility(input(
                                income, fixed, habitual, spend, target,
                            ));
                            let fields = [
                                r.monthly_income(),
                                r.fixed_monthly(),
                                r.habitual_monthly(),
                                r.monthly_total_spend(),
                                r.available_to_save(),
                                r.target_savings(),
                                r.shortfall(),
                                r.fixed_load_pct(),
                                r.habitual_load_pct(),
                                r.max_possible_behavioral_cut(),
                            ];
                            assert!(fields.iter().all(|f| f.is_finite()));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_non_finite_input_is_sanitized() {
        let r = evaluate_savings_feasibility(input(f64::NAN, f64::INFINITY, 10.0, 0.0, 0.0));
        assert_eq!(r.monthly_income(), 0.0);
        assert_eq!(r.fixed_monthly(), 0.0);
        assert_eq!(r.fixed_load_pct(), 0.0);
    }

    #[test]
    fn test_serialized_shape() {
        let r = evaluate_savings_feasibility(input(60000.0, 15000.0, 5000.0, 35000.0, 20000.0));
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["feasibility"], "Feasible without changes");
        assert_eq!(v["monthly_total_spend"], 35000.0);
        assert_eq!(v["max_possible_behavioral_cut"], 5000.0);
        assert_eq!(v.as_object().unwrap().len(), 11);
    }

    #[test]
    fn test_verdict_labels() {
        assert_eq!(
            Verdict::NotFeasibleWithoutStructuralChanges.to_string(),
            "Not feasible without structural changes"
        );
        let v: Verdict = serde_json::from_str("\"Feasible with habit adjustment\"").unwrap();
        assert_eq!(v, Verdict::FeasibleWithHabitAdjustment);
    }
}
