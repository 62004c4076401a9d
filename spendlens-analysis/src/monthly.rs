//! Month bucketing shared by every monthly average.

use spendlens_core::YearMonth;
use std::collections::BTreeMap;

/// Sum amounts per month. Only months that appear in `items` get an entry.
pub fn monthly_totals(items: impl IntoIterator<Item = (YearMonth, f64)>) -> BTreeMap<YearMonth, f64> {
    let mut totals = BTreeMap::new();
    for (ym, amount) in items {
        *totals.entry(ym).or_insert(0.0) += amount;
    }
    totals
}

/// Mean of the per-month totals. An empty map is 0.0, never NaN.
pub fn mean_of_months(totals: &BTreeMap<YearMonth, f64>) -> f64 {
    if totals.is_empty() {
        return 0.0;
    }
    totals.values().sum::<f64>() / totals.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(y: i32, m: u32) -> YearMonth {
        YearMonth::new(y, m).unwrap()
    }

    #[test]
    fn test_totals_and_mean() {
        let totals = monthly_totals(vec![
            (ym(2024, 1), 100.0),
            (ym(2024, 1), 50.0),
            (ym(2024, 3), 250.0),
        ]);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[&ym(2024, 1)], 150.0);
        // February has no entries, so it does not drag the mean down
        assert_eq!(mean_of_months(&totals), 200.0);
    }

    #[test]
    fn test_empty_mean_is_zero() {
        let totals = monthly_totals(Vec::new());
        let mean = mean_of_months(&totals);
        assert_eq!(mean, 0.0);
        assert!(!mean.is_nan());
    }
}
