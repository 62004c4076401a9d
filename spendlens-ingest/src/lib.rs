//! spendlens-ingest: bank statement CSV loading with schema and cell validation.

pub mod amount;
pub mod statement_csv;
pub mod types;

pub use statement_csv::{load_statement_csv, read_statement};
pub use types::{ColumnIndex, StatementColumn};
