use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use std::io::Read;

use crate::lending::domain::{ClientId, ClientRecord, TransactionEntry};

use super::LedgerImportError;

#[derive(Debug, Deserialize)]
struct ClientRow {
    id: u64,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    rut: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    name: Option<String>,
    salary: i64,
    age: u32,
    job_tenure_years: u32,
    #[serde(deserialize_with = "flexible_bool")]
    bad_credit_history: bool,
}

#[derive(Debug, Deserialize)]
struct HistoryRow {
    id: u64,
    client_id: u64,
    change: i64,
    change_date: String,
}

pub(crate) fn parse_clients<R: Read>(reader: R) -> Result<Vec<ClientRecord>, LedgerImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut clients = Vec::new();

    for record in csv_reader.deserialize::<ClientRow>() {
        let row = record?;
        clients.push(ClientRecord {
            id: ClientId(row.id),
            rut: row.rut,
            name: row.name,
            salary: row.salary,
            age: row.age,
            job_tenure_years: row.job_tenure_years,
            has_bad_credit_history: row.bad_credit_history,
        });
    }

    Ok(clients)
}

pub(crate) fn parse_history<R: Read>(
    reader: R,
) -> Result<Vec<TransactionEntry>, LedgerImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut entries = Vec::new();

    for record in csv_reader.deserialize::<HistoryRow>() {
        let row = record?;
        let change_date =
            parse_date(&row.change_date).ok_or_else(|| LedgerImportError::InvalidDate {
                entry_id: row.id,
                value: row.change_date.clone(),
            })?;

        entries.push(TransactionEntry {
            id: row.id,
            client_id: ClientId(row.client_id),
            change: row.change,
            change_date,
        });
    }

    Ok(entries)
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Ok(true),
        "false" | "no" | "n" | "0" | "" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "expected a boolean flag, found '{other}'"
        ))),
    }
}

/// Accepts plain `YYYY-MM-DD` dates or RFC 3339 timestamps.
fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.naive_utc().date())
}
