//! spendlens-analysis: recurring merchant detection, fixed/habitual split,
//! spending aggregates and the end-to-end feasibility pipeline

pub mod aggregate;
pub mod breakdown;
pub mod income;
pub mod monthly;
pub mod pipeline;
pub mod recurring;
pub mod split;

pub use aggregate::{compute_spending_aggregates, SpendingAggregate};
pub use breakdown::{daily_spend, top_merchants, DailySpend, MerchantSpend};
pub use income::estimate_monthly_income;
pub use pipeline::{analyze, AnalysisConfig, AnalysisReport, AnnotatedTransaction};
pub use recurring::detect_recurring_merchants;
pub use split::{split_fixed_habitual, FixedMerchantRegistry, RecurringSplit};
