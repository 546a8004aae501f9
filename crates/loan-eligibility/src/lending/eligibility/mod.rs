mod config;
pub mod history;
mod policy;
pub mod rules;

pub use config::EligibilityConfig;
pub use history::{has_quarterly_deposits, HistoryVerdict};
pub use policy::{decide, LoanDecision, RejectionReason};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::calculator::{monthly_payment, CalculatorError};
use super::domain::{ClientId, ClientRecord, LoanParameters, TransactionEntry};
use super::repository::{ClientDirectory, RepositoryError, TransactionLedger};

/// Eligibility rules in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rule {
    R1,
    R2,
    R3,
    R4,
    R5,
    R6,
    R7,
}

impl Rule {
    pub const ALL: [Rule; 7] = [
        Rule::R1,
        Rule::R2,
        Rule::R3,
        Rule::R4,
        Rule::R5,
        Rule::R6,
        Rule::R7,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn label(self) -> &'static str {
        match self {
            Rule::R1 => "R1",
            Rule::R2 => "R2",
            Rule::R3 => "R3",
            Rule::R4 => "R4",
            Rule::R5 => "R5",
            Rule::R6 => "R6",
            Rule::R7 => "R7",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Rule::R1 => "installment exceeds the salary share",
            Rule::R2 => "adverse credit history (DICOM)",
            Rule::R3 => "job tenure above the minimum",
            Rule::R4 => "debt-to-income under the cap",
            Rule::R5 => "amount within financing limit",
            Rule::R6 => "applicant under age limit",
            Rule::R7 => "savings history sound",
        }
    }

    /// R1 and R2 report a disqualifying condition; the others report a qualifying one.
    pub const fn passes(self, value: bool) -> bool {
        match self {
            Rule::R1 | Rule::R2 => !value,
            _ => value,
        }
    }
}

/// Ordered rule values `[R1, R2, R3, R4, R5, R6, R7]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleResult([bool; 7]);

impl RuleResult {
    pub const fn new(values: [bool; 7]) -> Self {
        Self(values)
    }

    pub fn get(&self, rule: Rule) -> bool {
        self.0[rule.index()]
    }

    pub fn as_array(&self) -> [bool; 7] {
        self.0
    }

    pub fn to_vec(&self) -> Vec<bool> {
        self.0.to_vec()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Rule, bool)> + '_ {
        Rule::ALL.iter().map(move |rule| (*rule, self.get(*rule)))
    }
}

/// Full evaluation trail for a single loan request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub client_id: ClientId,
    pub as_of: NaiveDate,
    pub monthly_payment: i64,
    pub rules: RuleResult,
    pub history: HistoryVerdict,
    pub decision: LoanDecision,
}

/// Error raised when an evaluation cannot complete.
#[derive(Debug, thiserror::Error)]
pub enum EligibilityError {
    #[error(transparent)]
    InvalidInput(#[from] CalculatorError),
    #[error("client {0} not found")]
    ClientNotFound(ClientId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Stateless evaluator applying the configured thresholds. Data providers are passed per call.
#[derive(Debug, Clone, Default)]
pub struct EligibilityEngine {
    config: EligibilityConfig,
}

impl EligibilityEngine {
    pub fn new(config: EligibilityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EligibilityConfig {
        &self.config
    }

    /// Evaluate R1..R7 over snapshots already in hand.
    pub fn evaluate(
        &self,
        client: &ClientRecord,
        history: &[TransactionEntry],
        params: &LoanParameters,
        relationship_years: u32,
        as_of: NaiveDate,
    ) -> Result<EvaluationReport, CalculatorError> {
        let config = &self.config;
        let payment = monthly_payment(
            params.amount,
            params.term_years,
            params.annual_interest_rate,
        )?;
        let history_verdict = history::history_verdict(
            client,
            history,
            relationship_years,
            params.amount,
            as_of,
            config,
        );

        let values = RuleResult::new([
            rules::installment_exceeds_income(client, payment, config),
            rules::adverse_credit_history(client),
            rules::stable_employment(client, config),
            rules::debt_to_income_within_limit(client, params, config),
            rules::financing_within_limit(params, config),
            rules::below_age_limit(client, config),
            history_verdict.holds(),
        ]);
        let decision = policy::decide(&values);

        Ok(EvaluationReport {
            client_id: client.id,
            as_of,
            monthly_payment: payment,
            rules: values,
            history: history_verdict,
            decision,
        })
    }

    /// Fetch the client and history once each, then evaluate every rule.
    pub fn report<C, L>(
        &self,
        clients: &C,
        ledger: &L,
        client_id: ClientId,
        params: &LoanParameters,
        relationship_years: u32,
        as_of: NaiveDate,
    ) -> Result<EvaluationReport, EligibilityError>
    where
        C: ClientDirectory + ?Sized,
        L: TransactionLedger + ?Sized,
    {
        let client = require_client(clients, client_id)?;
        let history = ledger.history_for(client_id)?;

        let report = self.evaluate(&client, &history, params, relationship_years, as_of)?;
        debug!(
            client_id = %client_id,
            rules = ?report.rules.as_array(),
            "eligibility rules evaluated"
        );
        Ok(report)
    }

    /// Ordered `[R1..R7]` values for a client and loan request.
    pub fn evaluate_all<C, L>(
        &self,
        clients: &C,
        ledger: &L,
        client_id: ClientId,
        params: &LoanParameters,
        relationship_years: u32,
        as_of: NaiveDate,
    ) -> Result<RuleResult, EligibilityError>
    where
        C: ClientDirectory + ?Sized,
        L: TransactionLedger + ?Sized,
    {
        self.report(clients, ledger, client_id, params, relationship_years, as_of)
            .map(|report| report.rules)
    }

    /// R7: the conjunction of the savings-history sub-rules.
    pub fn r7_complete<C, L>(
        &self,
        clients: &C,
        ledger: &L,
        client_id: ClientId,
        relationship_years: u32,
        amount: i64,
        as_of: NaiveDate,
    ) -> Result<bool, EligibilityError>
    where
        C: ClientDirectory + ?Sized,
        L: TransactionLedger + ?Sized,
    {
        if amount <= 0 {
            return Err(CalculatorError::NonPositiveAmount(amount).into());
        }

        let client = require_client(clients, client_id)?;
        let history = ledger.history_for(client_id)?;

        let verdict = history::history_verdict(
            &client,
            &history,
            relationship_years,
            amount,
            as_of,
            &self.config,
        );
        Ok(verdict.holds())
    }
}

fn require_client<C>(clients: &C, client_id: ClientId) -> Result<ClientRecord, EligibilityError>
where
    C: ClientDirectory + ?Sized,
{
    match clients.client_by_id(client_id)? {
        Some(client) => Ok(client),
        None => {
            warn!(client_id = %client_id, "eligibility requested for unknown client");
            Err(EligibilityError::ClientNotFound(client_id))
        }
    }
}
