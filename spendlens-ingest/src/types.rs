use serde::{Deserialize, Serialize};
use spendlens_core::{Error, Result};

/// Columns every statement must carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementColumn {
    Date,
    DebitAmount,
    CreditAmount,
    Balance,
    Description,
}

impl StatementColumn {
    pub const ALL: [StatementColumn; 5] = [
        StatementColumn::Date,
        StatementColumn::DebitAmount,
        StatementColumn::CreditAmount,
        StatementColumn::Balance,
        StatementColumn::Description,
    ];

    /// Header name as it appears in the CSV
    pub fn name(&self) -> &'static str {
        match self {
            StatementColumn::Date => "date",
            StatementColumn::DebitAmount => "debit_amount",
            StatementColumn::CreditAmount => "credit_amount",
            StatementColumn::Balance => "balance",
            StatementColumn::Description => "description",
        }
    }
}

/// Header positions of the required columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndex {
    pub date: usize,
    pub debit_amount: usize,
    pub credit_amount: usize,
    pub balance: usize,
    pub description: usize,
}

impl ColumnIndex {
    /// Locate required columns in a header row. Matching ignores case and
    /// surrounding whitespace; extra columns are ignored.
    pub fn from_headers<'a>(headers: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        let normalized: Vec<String> = headers
            .into_iter()
            .map(|h| h.trim().trim_start_matches('\u{feff}').to_lowercase())
            .collect();

        let find = |col: StatementColumn| normalized.iter().position(|h| h == col.name());

        let missing: Vec<String> = StatementColumn::ALL
            .iter()
            .filter(|c| find(**c).is_none())
            .map(|c| c.name().to_string())
            .collect();
        if !missing.is_empty() {
            return Err(Error::Schema { missing });
        }

        let pos = |col: StatementColumn| find(col).unwrap_or_default();
        Ok(Self {
            date: pos(StatementColumn::Date),
            debit_amount: pos(StatementColumn::DebitAmount),
            credit_amount: pos(StatementColumn::CreditAmount),
            balance: pos(StatementColumn::Balance),
            description: pos(StatementColumn::Description),
        })
    }
}
