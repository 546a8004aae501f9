use super::domain::{ClientId, ClientRecord, LoanRequest, LoanRequestId, TransactionEntry};

/// Read access to client records so the rule engine never depends on storage details.
pub trait ClientDirectory: Send + Sync {
    fn client_by_id(&self, id: ClientId) -> Result<Option<ClientRecord>, RepositoryError>;
    fn client_by_rut(&self, rut: &str) -> Result<Option<ClientRecord>, RepositoryError>;
}

/// Read access to a client's transaction history. Clients without entries yield an empty list.
pub trait TransactionLedger: Send + Sync {
    fn history_for(&self, client_id: ClientId) -> Result<Vec<TransactionEntry>, RepositoryError>;
}

/// Storage abstraction for loan requests.
pub trait LoanRequestRepository: Send + Sync {
    fn insert(&self, request: LoanRequest) -> Result<LoanRequest, RepositoryError>;
    fn update(&self, request: LoanRequest) -> Result<(), RepositoryError>;
    fn fetch(&self, id: LoanRequestId) -> Result<Option<LoanRequest>, RepositoryError>;
    fn all(&self) -> Result<Vec<LoanRequest>, RepositoryError>;
    fn by_client(&self, client_id: ClientId) -> Result<Vec<LoanRequest>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
