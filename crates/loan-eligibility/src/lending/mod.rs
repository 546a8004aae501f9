//! Loan eligibility: client snapshots, savings history rules, and the request workflow.

pub mod calculator;
pub mod domain;
pub mod eligibility;
pub mod import;
pub mod memory;
pub mod repository;
pub mod service;

#[cfg(test)]
mod tests;

pub use calculator::{
    cost_breakdown, monthly_payment, total_cost, CalculatorError, CostBreakdown, LoanCharges,
};
pub use domain::{
    ClientId, ClientRecord, LoanKind, LoanParameters, LoanRequest, LoanRequestId, PropertyType,
    RequestStage, TransactionEntry,
};
pub use eligibility::{
    decide, EligibilityConfig, EligibilityEngine, EligibilityError, EvaluationReport,
    HistoryVerdict, LoanDecision, RejectionReason, Rule, RuleResult,
};
pub use import::{LedgerImportError, LedgerImporter};
pub use memory::{InMemoryClientDirectory, InMemoryLedger, InMemoryLoanRequests};
pub use repository::{ClientDirectory, LoanRequestRepository, RepositoryError, TransactionLedger};
pub use service::{LoanApplication, LoanRequestError, LoanRequestService, ReviewTerms};
