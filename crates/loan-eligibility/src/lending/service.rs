use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::domain::{ClientId, LoanKind, LoanParameters, LoanRequest, LoanRequestId, RequestStage};
use super::eligibility::{EligibilityConfig, EligibilityEngine, EligibilityError, EvaluationReport};
use super::repository::{
    ClientDirectory, LoanRequestRepository, RepositoryError, TransactionLedger,
};

/// Loan request as filed by a client, before an id and stage are assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanApplication {
    pub client_id: ClientId,
    pub kind: LoanKind,
    pub amount: i64,
    pub term_years: i32,
    #[serde(default)]
    pub document: Vec<u8>,
}

/// Pricing and context the request itself does not carry but the rules need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewTerms {
    pub annual_interest_rate: f64,
    pub property_cost: i64,
    #[serde(default)]
    pub existing_debt: i64,
    /// Years the client has held an account with the lender.
    pub relationship_years: u32,
    pub as_of: NaiveDate,
}

/// Service composing the request repository, the data providers, and the rule engine.
pub struct LoanRequestService<R, C, L> {
    requests: Arc<R>,
    clients: Arc<C>,
    ledger: Arc<L>,
    engine: Arc<EligibilityEngine>,
    sequence: AtomicU64,
}

impl<R, C, L> LoanRequestService<R, C, L>
where
    R: LoanRequestRepository + 'static,
    C: ClientDirectory + 'static,
    L: TransactionLedger + 'static,
{
    pub fn new(
        requests: Arc<R>,
        clients: Arc<C>,
        ledger: Arc<L>,
        config: EligibilityConfig,
    ) -> Self {
        Self {
            requests,
            clients,
            ledger,
            engine: Arc::new(EligibilityEngine::new(config)),
            sequence: AtomicU64::new(1),
        }
    }

    pub fn engine(&self) -> &EligibilityEngine {
        &self.engine
    }

    fn next_request_id(&self) -> LoanRequestId {
        LoanRequestId(self.sequence.fetch_add(1, Ordering::Relaxed))
    }

    /// Record a new request in the `Submitted` stage.
    pub fn submit(&self, application: LoanApplication) -> Result<LoanRequest, LoanRequestError> {
        let request = LoanRequest {
            id: self.next_request_id(),
            client_id: application.client_id,
            kind: application.kind,
            stage: RequestStage::Submitted,
            amount: application.amount,
            term_years: application.term_years,
            document: application.document,
        };

        let stored = self.requests.insert(request)?;
        info!(request_id = %stored.id, client_id = %stored.client_id, "loan request submitted");
        Ok(stored)
    }

    pub fn update_stage(
        &self,
        id: LoanRequestId,
        stage: RequestStage,
    ) -> Result<LoanRequest, LoanRequestError> {
        let mut request = self.get(id)?;
        request.stage = stage;
        self.requests.update(request.clone())?;
        Ok(request)
    }

    pub fn get(&self, id: LoanRequestId) -> Result<LoanRequest, LoanRequestError> {
        self.requests
            .fetch(id)?
            .ok_or(LoanRequestError::RequestNotFound(id))
    }

    pub fn all(&self) -> Result<Vec<LoanRequest>, LoanRequestError> {
        Ok(self.requests.all()?)
    }

    pub fn for_client(&self, client_id: ClientId) -> Result<Vec<LoanRequest>, LoanRequestError> {
        Ok(self.requests.by_client(client_id)?)
    }

    /// Run the eligibility rules for a stored request and move it to `PreApproved` or
    /// `Rejected` accordingly.
    pub fn review(
        &self,
        id: LoanRequestId,
        terms: &ReviewTerms,
    ) -> Result<EvaluationReport, LoanRequestError> {
        let mut request = self.get(id)?;
        if request.stage.is_terminal() {
            return Err(LoanRequestError::Closed {
                id,
                stage: request.stage.label(),
            });
        }

        let params = LoanParameters {
            amount: request.amount,
            term_years: request.term_years,
            annual_interest_rate: terms.annual_interest_rate,
            property_type: request.kind.property_type(),
            property_cost: terms.property_cost,
            existing_debt: terms.existing_debt,
        };
        let report = self.engine.report(
            self.clients.as_ref(),
            self.ledger.as_ref(),
            request.client_id,
            &params,
            terms.relationship_years,
            terms.as_of,
        )?;

        request.stage = if report.decision.is_approved() {
            RequestStage::PreApproved
        } else {
            RequestStage::Rejected
        };
        self.requests.update(request.clone())?;

        info!(
            request_id = %id,
            stage = request.stage.label(),
            decision = %report.decision.summary(),
            "loan request reviewed"
        );
        Ok(report)
    }
}

/// Error raised by the loan request service.
#[derive(Debug, thiserror::Error)]
pub enum LoanRequestError {
    #[error("Request with ID {0} not found.")]
    RequestNotFound(LoanRequestId),
    #[error("request {id} is already {stage}")]
    Closed { id: LoanRequestId, stage: &'static str },
    #[error(transparent)]
    Eligibility(#[from] EligibilityError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
