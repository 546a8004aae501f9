use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use super::domain::{ClientId, ClientRecord, LoanRequest, LoanRequestId, TransactionEntry};
use super::repository::{
    ClientDirectory, LoanRequestRepository, RepositoryError, TransactionLedger,
};

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable("in-memory store poisoned".to_string()))
}

/// Client registry backed by a map; used by the CLI and tests.
#[derive(Default, Clone)]
pub struct InMemoryClientDirectory {
    clients: Arc<Mutex<BTreeMap<ClientId, ClientRecord>>>,
}

impl InMemoryClientDirectory {
    pub fn register(&self, client: ClientRecord) -> Result<ClientRecord, RepositoryError> {
        let mut guard = lock(&self.clients)?;
        let rut_taken = client.rut.as_ref().is_some_and(|rut| {
            guard
                .values()
                .any(|existing| existing.rut.as_deref() == Some(rut.as_str()))
        });
        if guard.contains_key(&client.id) || rut_taken {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(client.id, client.clone());
        Ok(client)
    }

    pub fn len(&self) -> usize {
        lock(&self.clients).map(|guard| guard.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ClientDirectory for InMemoryClientDirectory {
    fn client_by_id(&self, id: ClientId) -> Result<Option<ClientRecord>, RepositoryError> {
        Ok(lock(&self.clients)?.get(&id).cloned())
    }

    fn client_by_rut(&self, rut: &str) -> Result<Option<ClientRecord>, RepositoryError> {
        Ok(lock(&self.clients)?
            .values()
            .find(|client| client.rut.as_deref() == Some(rut))
            .cloned())
    }
}

/// Append-only transaction log keyed by client.
#[derive(Default, Clone)]
pub struct InMemoryLedger {
    entries: Arc<Mutex<HashMap<ClientId, Vec<TransactionEntry>>>>,
}

impl InMemoryLedger {
    pub fn append(&self, entry: TransactionEntry) -> Result<TransactionEntry, RepositoryError> {
        let mut guard = lock(&self.entries)?;
        if guard
            .values()
            .flatten()
            .any(|existing| existing.id == entry.id)
        {
            return Err(RepositoryError::Conflict);
        }
        guard
            .entry(entry.client_id)
            .or_default()
            .push(entry.clone());
        Ok(entry)
    }

    pub fn entry(&self, id: u64) -> Result<Option<TransactionEntry>, RepositoryError> {
        Ok(lock(&self.entries)?
            .values()
            .flatten()
            .find(|entry| entry.id == id)
            .cloned())
    }
}

impl TransactionLedger for InMemoryLedger {
    fn history_for(&self, client_id: ClientId) -> Result<Vec<TransactionEntry>, RepositoryError> {
        Ok(lock(&self.entries)?
            .get(&client_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[derive(Default, Clone)]
pub struct InMemoryLoanRequests {
    requests: Arc<Mutex<BTreeMap<LoanRequestId, LoanRequest>>>,
}

impl LoanRequestRepository for InMemoryLoanRequests {
    fn insert(&self, request: LoanRequest) -> Result<LoanRequest, RepositoryError> {
        let mut guard = lock(&self.requests)?;
        if guard.contains_key(&request.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(request.id, request.clone());
        Ok(request)
    }

    fn update(&self, request: LoanRequest) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.requests)?;
        match guard.get_mut(&request.id) {
            Some(slot) => {
                *slot = request;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: LoanRequestId) -> Result<Option<LoanRequest>, RepositoryError> {
        Ok(lock(&self.requests)?.get(&id).cloned())
    }

    fn all(&self) -> Result<Vec<LoanRequest>, RepositoryError> {
        Ok(lock(&self.requests)?.values().cloned().collect())
    }

    fn by_client(&self, client_id: ClientId) -> Result<Vec<LoanRequest>, RepositoryError> {
        Ok(lock(&self.requests)?
            .values()
            .filter(|request| request.client_id == client_id)
            .cloned()
            .collect())
    }
}
