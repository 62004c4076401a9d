//! Parse bank statement CSV exports into typed transactions.
//!
//! Expected header (any order, any case, extra columns ignored):
//! date,debit_amount,credit_amount,balance,description
//!
//! A bad cell fails the whole load. Dropping rows would skew every monthly
//! average downstream.

use spendlens_core::{parse_statement_date, DateOrder, Error, Result, Transaction};
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::amount::{parse_amount, AmountKind};
use crate::types::{ColumnIndex, StatementColumn};

fn read_error(e: csv::Error) -> Error {
    match e.into_kind() {
        csv::ErrorKind::Io(io) => Error::Io(io),
        other => Error::Read(format!("{other:?}")),
    }
}

/// Parse a statement CSV file. Transactions keep statement order in `seq`.
///
/// `order` decides how all-numeric dates like `02/03/2024` are read.
pub fn load_statement_csv(path: impl AsRef<Path>, order: DateOrder) -> Result<Vec<Transaction>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let txns = read_statement(file, order)?;
    debug!(path = %path.display(), rows = txns.len(), %order, "loaded statement");
    Ok(txns)
}

/// Parse statement CSV from any reader.
pub fn read_statement<R: Read>(reader: R, order: DateOrder) -> Result<Vec<Transaction>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let headers = rdr.headers().map_err(read_error)?.clone();
    let idx = ColumnIndex::from_headers(headers.iter())?;

    let mut txns = Vec::new();

    for (i, result) in rdr.records().enumerate() {
        let record = result.map_err(read_error)?;
        // Spreadsheet exports often pad the end with ",,,," rows
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        let row = i + 1;
        let cell = |pos: usize| record.get(pos).unwrap_or("");

        let date = parse_statement_date(cell(idx.date), row, order)?;
        let debit_amount = parse_amount(
            cell(idx.debit_amount),
            row,
            StatementColumn::DebitAmount.name(),
            AmountKind::Flow,
        )?;
        let credit_amount = parse_amount(
            cell(idx.credit_amount),
            row,
            StatementColumn::CreditAmount.name(),
            AmountKind::Flow,
        )?;
        let balance = parse_amount(
            cell(idx.balance),
            row,
            StatementColumn::Balance.name(),
            AmountKind::Balance,
        )?;

        txns.push(Transaction::new(
            txns.len(),
            date,
            cell(idx.description).trim(),
            debit_amount,
            credit_amount,
            balance,
        ));
    }

    Ok(txns)
}
