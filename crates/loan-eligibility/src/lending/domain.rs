use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for registered clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClientId(pub u64);

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Snapshot of the client attributes consumed by the eligibility rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub id: ClientId,
    #[serde(default)]
    pub rut: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Gross monthly income in whole currency units.
    pub salary: i64,
    pub age: u32,
    pub job_tenure_years: u32,
    /// DICOM flag: the client carries an adverse credit history.
    pub has_bad_credit_history: bool,
}

/// Single balance change on a client's account. Entries are append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionEntry {
    pub id: u64,
    pub client_id: ClientId,
    /// Positive for deposits, negative for withdrawals.
    pub change: i64,
    pub change_date: NaiveDate,
}

impl TransactionEntry {
    pub fn is_deposit(&self) -> bool {
        self.change > 0
    }

    pub fn is_withdrawal(&self) -> bool {
        self.change < 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    FirstHome,
    Other,
}

impl PropertyType {
    pub const fn label(self) -> &'static str {
        match self {
            PropertyType::FirstHome => "first_home",
            PropertyType::Other => "other",
        }
    }
}

/// Loan terms requested by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    pub amount: i64,
    pub term_years: i32,
    /// Annual interest rate as a fraction, e.g. `0.045` for 4.5%.
    pub annual_interest_rate: f64,
    pub property_type: PropertyType,
    pub property_cost: i64,
    #[serde(default)]
    pub existing_debt: i64,
}

/// Product a loan request is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanKind {
    FirstHome,
    SecondHome,
    CommercialProperty,
    Remodeling,
}

impl LoanKind {
    /// Property category the eligibility rules apply to this product.
    pub const fn property_type(self) -> PropertyType {
        match self {
            LoanKind::FirstHome => PropertyType::FirstHome,
            _ => PropertyType::Other,
        }
    }
}

/// Lifecycle stage tracked for each loan request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStage {
    Submitted,
    UnderReview,
    PendingDocumentation,
    PreApproved,
    FinalApproval,
    Approved,
    Rejected,
    Cancelled,
    Disbursed,
}

impl RequestStage {
    pub const fn label(self) -> &'static str {
        match self {
            RequestStage::Submitted => "submitted",
            RequestStage::UnderReview => "under_review",
            RequestStage::PendingDocumentation => "pending_documentation",
            RequestStage::PreApproved => "pre_approved",
            RequestStage::FinalApproval => "final_approval",
            RequestStage::Approved => "approved",
            RequestStage::Rejected => "rejected",
            RequestStage::Cancelled => "cancelled",
            RequestStage::Disbursed => "disbursed",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            RequestStage::Rejected | RequestStage::Cancelled | RequestStage::Disbursed
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LoanRequestId(pub u64);

impl fmt::Display for LoanRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Loan request as filed by a client, including the supporting document payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanRequest {
    pub id: LoanRequestId,
    pub client_id: ClientId,
    pub kind: LoanKind,
    pub stage: RequestStage,
    pub amount: i64,
    pub term_years: i32,
    #[serde(default)]
    pub document: Vec<u8>,
}
