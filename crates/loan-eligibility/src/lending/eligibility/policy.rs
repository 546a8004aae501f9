use serde::{Deserialize, Serialize};

use super::{Rule, RuleResult};

/// Overall verdict derived from the rule vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanDecision {
    Approved,
    Rejected { reasons: Vec<RejectionReason> },
}

impl LoanDecision {
    pub fn is_approved(&self) -> bool {
        matches!(self, LoanDecision::Approved)
    }

    pub fn summary(&self) -> String {
        match self {
            LoanDecision::Approved => "loan approved".to_string(),
            LoanDecision::Rejected { reasons } => {
                let details: Vec<&str> = reasons.iter().map(|reason| reason.summary()).collect();
                format!("loan rejected: {}", details.join("; "))
            }
        }
    }
}

/// One rejection cause per failed rule, suitable for adverse action notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectionReason {
    PaymentExceedsIncome,
    AdverseCreditHistory,
    InsufficientJobTenure,
    DebtToIncomeTooHigh,
    FinancingAboveLimit,
    AgeLimitReached,
    InsufficientSavingsHistory,
}

impl RejectionReason {
    pub const fn for_rule(rule: Rule) -> Self {
        match rule {
            Rule::R1 => RejectionReason::PaymentExceedsIncome,
            Rule::R2 => RejectionReason::AdverseCreditHistory,
            Rule::R3 => RejectionReason::InsufficientJobTenure,
            Rule::R4 => RejectionReason::DebtToIncomeTooHigh,
            Rule::R5 => RejectionReason::FinancingAboveLimit,
            Rule::R6 => RejectionReason::AgeLimitReached,
            Rule::R7 => RejectionReason::InsufficientSavingsHistory,
        }
    }

    pub const fn summary(self) -> &'static str {
        match self {
            RejectionReason::PaymentExceedsIncome => "installment exceeds the income share",
            RejectionReason::AdverseCreditHistory => "adverse credit history",
            RejectionReason::InsufficientJobTenure => "insufficient job tenure",
            RejectionReason::DebtToIncomeTooHigh => "debt-to-income ratio too high",
            RejectionReason::FinancingAboveLimit => "amount above the financing limit",
            RejectionReason::AgeLimitReached => "applicant above the age limit",
            RejectionReason::InsufficientSavingsHistory => "savings history insufficient",
        }
    }
}

/// Approve only when every rule passes under its own polarity.
pub fn decide(result: &RuleResult) -> LoanDecision {
    let reasons: Vec<RejectionReason> = result
        .iter()
        .filter(|(rule, value)| !rule.passes(*value))
        .map(|(rule, _)| RejectionReason::for_rule(rule))
        .collect();

    if reasons.is_empty() {
        LoanDecision::Approved
    } else {
        LoanDecision::Rejected { reasons }
    }
}
