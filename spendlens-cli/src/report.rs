//! Terminal rendering of an analysis report.

use spendlens_analysis::AnalysisReport;
use std::fmt::Write;

/// Whole-unit amount with thousands separators: 1234567.8 -> "1,234,568"
pub fn format_amount(x: f64) -> String {
    let rounded = x.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

pub fn render_text(report: &AnalysisReport, currency_symbol: &str) -> String {
    let money = |x: f64| format!("{}{}", currency_symbol, format_amount(x));
    let f = &report.feasibility;
    let split = &report.recurring_split;
    let spend = &report.spending;
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "## Monthly summary\n");
    let _ = writeln!(
        out,
        "Income:            {}{}",
        money(f.monthly_income()),
        if report.income_estimated { " (from credits)" } else { "" }
    );
    let _ = writeln!(out, "Spend:             {}", money(f.monthly_total_spend()));
    let _ = writeln!(out, "Available to save: {}", money(f.available_to_save()));
    let _ = writeln!(out, "Target savings:    {}", money(f.target_savings()));
    let _ = writeln!(out, "Shortfall:         {}", money(f.shortfall()));
    let _ = writeln!(out, "Status:            {}\n", f.feasibility());

    let _ = writeln!(out, "## Fixed vs habitual (recurring)\n");
    let _ = writeln!(
        out,
        "Fixed:    {}/month ({:.1}% of income)",
        money(split.fixed_monthly_avg),
        f.fixed_load_pct()
    );
    let _ = writeln!(
        out,
        "Habitual: {}/month ({:.1}% of income)",
        money(split.habitual_monthly_avg),
        f.habitual_load_pct()
    );
    let _ = writeln!(
        out,
        "Max behavioral cut: {}\n",
        money(f.max_possible_behavioral_cut())
    );

    let _ = writeln!(out, "## Weekday vs weekend\n");
    let _ = writeln!(
        out,
        "Weekend: {} across {} txns (avg {})",
        money(spend.weekend_total),
        spend.weekend_txn_count,
        money(spend.weekend_avg)
    );
    let _ = writeln!(
        out,
        "Weekday: {} across {} txns (avg {})\n",
        money(spend.weekday_total),
        spend.weekday_txn_count,
        money(spend.weekday_avg)
    );

    if !report.top_merchants.is_empty() {
        let _ = writeln!(out, "## Top merchants\n");
        for m in &report.top_merchants {
            let tag = if report.recurring_merchants.contains(&m.description) {
                " [recurring]"
            } else {
                ""
            };
            let _ = writeln!(
                out,
                "- {} | {} | count={}{}",
                m.description,
                money(m.total_debit),
                m.transaction_count,
                tag
            );
        }
        out.push('\n');
    }

    if !report.balance.is_clean() {
        let rows: Vec<String> = report
            .balance
            .inconsistent_seqs
            .iter()
            .map(|s| (s + 1).to_string())
            .collect();
        let _ = writeln!(
            out,
            "Warning: {} of {} rows do not reconcile with the previous balance (rows {})",
            report.balance.inconsistent,
            report.balance.checked,
            rows.join(", ")
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use spendlens_analysis::{analyze, AnalysisConfig};
    use spendlens_core::Transaction;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(999.4), "999");
        assert_eq!(format_amount(1000.0), "1,000");
        assert_eq!(format_amount(1234567.8), "1,234,568");
        assert_eq!(format_amount(-25000.0), "-25,000");
        assert_eq!(format_amount(-0.2), "0");
    }

    #[test]
    fn test_render_mentions_verdict_and_warning() {
        let d = |day| chrono::NaiveDate::from_ymd_opt(2024, 5, day).unwrap();
        let txns = vec![
            Transaction::new(0, d(1), "SALARY", 0.0, 40000.0, 40000.0),
            Transaction::new(1, d(2), "RENT", 15000.0, 0.0, 20000.0),
        ];
        let cfg = AnalysisConfig {
            target_savings: 10000.0,
            ..AnalysisConfig::default()
        };
        let report = analyze(&txns, &cfg).unwrap();
        let text = render_text(&report, "₹");

        assert!(text.contains("Income:            ₹40,000 (from credits)"));
        assert!(text.contains("Status:            Feasible without changes"));
        assert!(text.contains("- RENT | ₹15,000 | count=1"));
        assert!(text.contains("rows 2"));
    }
}
