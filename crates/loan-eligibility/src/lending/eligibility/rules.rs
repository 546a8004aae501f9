use super::super::calculator::{monthly_payment, CalculatorError};
use super::super::domain::{ClientRecord, LoanParameters, PropertyType};
use super::config::EligibilityConfig;

/// `value` is at least `pct` percent of `base`.
pub(crate) fn meets_share(value: i64, base: i64, pct: u32) -> bool {
    i128::from(value) * 100 >= i128::from(base) * i128::from(pct)
}

/// `value` is strictly more than `pct` percent of `base`.
pub(crate) fn exceeds_share(value: i64, base: i64, pct: u32) -> bool {
    i128::from(value) * 100 > i128::from(base) * i128::from(pct)
}

/// R1: the installment takes more than the allowed share of salary. `true` disqualifies.
pub fn payment_exceeds_income(
    client: &ClientRecord,
    params: &LoanParameters,
    config: &EligibilityConfig,
) -> Result<bool, CalculatorError> {
    let payment = monthly_payment(
        params.amount,
        params.term_years,
        params.annual_interest_rate,
    )?;
    Ok(installment_exceeds_income(client, payment, config))
}

pub(crate) fn installment_exceeds_income(
    client: &ClientRecord,
    payment: i64,
    config: &EligibilityConfig,
) -> bool {
    exceeds_share(payment, client.salary, config.max_payment_to_income_pct)
}

/// R2: the client is flagged in DICOM. `true` disqualifies.
pub fn adverse_credit_history(client: &ClientRecord) -> bool {
    client.has_bad_credit_history
}

/// R3: job tenure beyond the minimum.
pub fn stable_employment(client: &ClientRecord, config: &EligibilityConfig) -> bool {
    client.job_tenure_years > config.min_job_tenure_years
}

/// R4: existing debt plus the new loan stays under the debt-to-income cap.
pub fn debt_to_income_within_limit(
    client: &ClientRecord,
    params: &LoanParameters,
    config: &EligibilityConfig,
) -> bool {
    if client.salary <= 0 {
        return false;
    }

    let obligations = params.existing_debt.saturating_add(params.amount);
    !meets_share(obligations, client.salary, config.max_debt_to_income_pct)
}

/// R5: the amount is within the maximum financing share of the property's cost.
pub fn financing_within_limit(params: &LoanParameters, config: &EligibilityConfig) -> bool {
    if params.property_cost <= 0 {
        return false;
    }

    let pct = match params.property_type {
        PropertyType::FirstHome => config.first_home_financing_pct,
        PropertyType::Other => config.other_property_financing_pct,
    };
    !exceeds_share(params.amount, params.property_cost, pct)
}

/// R6: the client is younger than the age limit.
pub fn below_age_limit(client: &ClientRecord, config: &EligibilityConfig) -> bool {
    client.age < config.age_limit
}
