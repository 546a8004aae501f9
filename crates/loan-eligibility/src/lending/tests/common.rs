use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;

use crate::lending::domain::{
    ClientId, ClientRecord, LoanKind, LoanParameters, PropertyType, TransactionEntry,
};
use crate::lending::eligibility::EligibilityConfig;
use crate::lending::memory::{InMemoryClientDirectory, InMemoryLedger, InMemoryLoanRequests};
use crate::lending::repository::{ClientDirectory, RepositoryError, TransactionLedger};
use crate::lending::service::{LoanApplication, LoanRequestService, ReviewTerms};

pub(super) const CLIENT: ClientId = ClientId(1);

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Reference evaluation date shared by every history fixture.
pub(super) fn as_of() -> NaiveDate {
    date(2025, 6, 30)
}

pub(super) fn client() -> ClientRecord {
    ClientRecord {
        id: CLIENT,
        rut: Some("12345678-9".to_string()),
        name: Some("Ana Rojas".to_string()),
        salary: 500_000,
        age: 40,
        job_tenure_years: 3,
        has_bad_credit_history: false,
    }
}

pub(super) fn params() -> LoanParameters {
    LoanParameters {
        amount: 100_000,
        term_years: 20,
        annual_interest_rate: 0.045,
        property_type: PropertyType::FirstHome,
        property_cost: 800_000,
        existing_debt: 50_000,
    }
}

pub(super) fn entry(id: u64, change: i64, change_date: NaiveDate) -> TransactionEntry {
    TransactionEntry {
        id,
        client_id: CLIENT,
        change,
        change_date,
    }
}

/// History that satisfies every savings sub-rule for `params()` at `as_of()`.
pub(super) fn healthy_history() -> Vec<TransactionEntry> {
    vec![
        entry(1, 12_500, date(2024, 7, 10)),
        entry(2, 12_500, date(2024, 10, 10)),
        entry(3, -25_000, date(2024, 12, 1)),
        entry(4, 100, date(2025, 2, 10)),
        entry(5, 100, date(2025, 5, 10)),
        entry(6, -60, date(2025, 6, 1)),
    ]
}

pub(super) fn config() -> EligibilityConfig {
    EligibilityConfig::default()
}

pub(super) fn providers(
    history: Vec<TransactionEntry>,
) -> (InMemoryClientDirectory, InMemoryLedger) {
    let clients = InMemoryClientDirectory::default();
    clients.register(client()).expect("client registers");
    let ledger = InMemoryLedger::default();
    for item in history {
        ledger.append(item).expect("entry appends");
    }
    (clients, ledger)
}

pub(super) type MemoryService =
    LoanRequestService<InMemoryLoanRequests, InMemoryClientDirectory, InMemoryLedger>;

pub(super) fn build_service(history: Vec<TransactionEntry>) -> MemoryService {
    let (clients, ledger) = providers(history);
    LoanRequestService::new(
        Arc::new(InMemoryLoanRequests::default()),
        Arc::new(clients),
        Arc::new(ledger),
        config(),
    )
}

pub(super) fn application() -> LoanApplication {
    LoanApplication {
        client_id: CLIENT,
        kind: LoanKind::FirstHome,
        amount: 100_000,
        term_years: 20,
        document: b"%PDF-1.4 salary slips".to_vec(),
    }
}

pub(super) fn review_terms() -> ReviewTerms {
    ReviewTerms {
        annual_interest_rate: 0.045,
        property_cost: 800_000,
        existing_debt: 50_000,
        relationship_years: 3,
        as_of: as_of(),
    }
}

/// Wraps a directory and counts lookups.
#[derive(Default)]
pub(super) struct CountingDirectory {
    pub(super) inner: InMemoryClientDirectory,
    pub(super) calls: AtomicUsize,
}

impl CountingDirectory {
    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ClientDirectory for CountingDirectory {
    fn client_by_id(&self, id: ClientId) -> Result<Option<ClientRecord>, RepositoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.client_by_id(id)
    }

    fn client_by_rut(&self, rut: &str) -> Result<Option<ClientRecord>, RepositoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.client_by_rut(rut)
    }
}

/// Wraps a ledger and counts history fetches.
#[derive(Default)]
pub(super) struct CountingLedger {
    pub(super) inner: InMemoryLedger,
    pub(super) calls: AtomicUsize,
}

impl CountingLedger {
    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TransactionLedger for CountingLedger {
    fn history_for(&self, client_id: ClientId) -> Result<Vec<TransactionEntry>, RepositoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.history_for(client_id)
    }
}

pub(super) struct UnavailableLedger;

impl TransactionLedger for UnavailableLedger {
    fn history_for(&self, _client_id: ClientId) -> Result<Vec<TransactionEntry>, RepositoryError> {
        Err(RepositoryError::Unavailable("ledger offline".to_string()))
    }
}
