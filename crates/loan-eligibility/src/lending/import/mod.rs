mod parser;

use std::io::Read;
use std::path::Path;

use super::domain::{ClientRecord, TransactionEntry};

#[derive(Debug)]
pub enum LedgerImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidDate { entry_id: u64, value: String },
}

impl std::fmt::Display for LedgerImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LedgerImportError::Io(err) => write!(f, "failed to read ledger export: {}", err),
            LedgerImportError::Csv(err) => write!(f, "invalid ledger CSV data: {}", err),
            LedgerImportError::InvalidDate { entry_id, value } => write!(
                f,
                "history entry {} has an unreadable change date '{}'",
                entry_id, value
            ),
        }
    }
}

impl std::error::Error for LedgerImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LedgerImportError::Io(err) => Some(err),
            LedgerImportError::Csv(err) => Some(err),
            LedgerImportError::InvalidDate { .. } => None,
        }
    }
}

impl From<std::io::Error> for LedgerImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for LedgerImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Loads client records and transaction history from CSV exports.
///
/// Clients: `id,rut,name,salary,age,job_tenure_years,bad_credit_history`.
/// History: `id,client_id,change,change_date`.
pub struct LedgerImporter;

impl LedgerImporter {
    pub fn clients_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<ClientRecord>, LedgerImportError> {
        let file = std::fs::File::open(path)?;
        Self::clients_from_reader(file)
    }

    pub fn clients_from_reader<R: Read>(reader: R) -> Result<Vec<ClientRecord>, LedgerImportError> {
        parser::parse_clients(reader)
    }

    pub fn history_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<TransactionEntry>, LedgerImportError> {
        let file = std::fs::File::open(path)?;
        Self::history_from_reader(file)
    }

    pub fn history_from_reader<R: Read>(
        reader: R,
    ) -> Result<Vec<TransactionEntry>, LedgerImportError> {
        parser::parse_history(reader)
    }
}
