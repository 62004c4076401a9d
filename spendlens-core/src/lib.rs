//! spendlens-core: ledger types, time features, balance checks and the savings feasibility engine

pub mod balance;
pub mod error;
pub mod feasibility;
pub mod time;
pub mod transaction;

pub use balance::{check_balance_consistency, BalanceCheck, BalanceSummary};
pub use error::{Error, Result};
pub use feasibility::{
    evaluate_savings_feasibility, FeasibilityInput, SavingsFeasibilityResult, Verdict,
};
pub use time::{derive_time_features, parse_statement_date, DateOrder, TimedTransaction};
pub use transaction::{Transaction, YearMonth};
