use chrono::NaiveDate;
use clap::ValueEnum;
use loan_eligibility::error::AppError;
use loan_eligibility::lending::{
    InMemoryClientDirectory, InMemoryLedger, LedgerImporter, PropertyType,
};
use serde::Serialize;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum PropertyArg {
    FirstHome,
    Other,
}

impl From<PropertyArg> for PropertyType {
    fn from(value: PropertyArg) -> Self {
        match value {
            PropertyArg::FirstHome => PropertyType::FirstHome,
            PropertyArg::Other => PropertyType::Other,
        }
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// Hydrate the in-memory providers from client and history CSV exports.
pub(crate) fn load_providers(
    clients_csv: &Path,
    history_csv: &Path,
) -> Result<(InMemoryClientDirectory, InMemoryLedger), AppError> {
    let clients = InMemoryClientDirectory::default();
    for client in LedgerImporter::clients_from_path(clients_csv)? {
        clients.register(client)?;
    }

    let ledger = InMemoryLedger::default();
    let mut entries = 0_usize;
    for entry in LedgerImporter::history_from_path(history_csv)? {
        ledger.append(entry)?;
        entries += 1;
    }

    info!(clients = clients.len(), entries, "ledger exports loaded");
    Ok((clients, ledger))
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
