use serde::{Deserialize, Serialize};

const MONTHS_PER_YEAR: i32 = 12;

/// Input validation failures raised by the loan calculator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalculatorError {
    #[error("invalid input: loan amount must be positive (found {0})")]
    NonPositiveAmount(i64),
    #[error("invalid input: term must be at least one year (found {0})")]
    NonPositiveTerm(i32),
    #[error("invalid input: annual interest rate must be positive (found {0})")]
    NonPositiveRate(f64),
    #[error("invalid input: {field} must be a non-negative number (found {value})")]
    NegativeCharge { field: &'static str, value: f64 },
    #[error(
        "invalid input: {amount} over {term_years} years at {annual_interest_rate} \
         has no finite installment"
    )]
    Unrepresentable {
        amount: i64,
        term_years: i32,
        annual_interest_rate: f64,
    },
}

/// Itemized cost of a loan over its full term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub monthly_payment: i64,
    pub installments_total: i64,
    pub life_insurance: i64,
    pub fire_insurance: i64,
    pub admin_fee: i64,
    pub total: i64,
}

/// Insurance and fee settings applied on top of the amortized installments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanCharges {
    /// Fraction of the principal charged per year of term.
    pub life_insurance_rate: f64,
    /// Flat fire-insurance premium for the whole loan.
    pub fire_insurance_flat: f64,
    /// Fraction of the principal charged once at origination.
    pub admin_fee_rate: f64,
}

/// Fixed installment for an amortized loan, rounded to the nearest currency unit.
pub fn monthly_payment(
    amount: i64,
    term_years: i32,
    annual_interest_rate: f64,
) -> Result<i64, CalculatorError> {
    let exact = amortized_payment(amount, term_years, annual_interest_rate)?;
    // A positive loan never rounds down to a zero installment.
    Ok((exact.round() as i64).max(1))
}

/// Total amount paid over the term, including insurance and the administration fee.
pub fn total_cost(
    amount: i64,
    term_years: i32,
    annual_interest_rate: f64,
    life_insurance_rate: f64,
    fire_insurance_flat: f64,
    admin_fee_rate: f64,
) -> Result<i64, CalculatorError> {
    let charges = LoanCharges {
        life_insurance_rate,
        fire_insurance_flat,
        admin_fee_rate,
    };
    cost_breakdown(amount, term_years, annual_interest_rate, &charges).map(|cost| cost.total)
}

pub fn cost_breakdown(
    amount: i64,
    term_years: i32,
    annual_interest_rate: f64,
    charges: &LoanCharges,
) -> Result<CostBreakdown, CalculatorError> {
    ensure_charge("life insurance rate", charges.life_insurance_rate)?;
    ensure_charge("fire insurance", charges.fire_insurance_flat)?;
    ensure_charge("admin fee rate", charges.admin_fee_rate)?;

    let exact = amortized_payment(amount, term_years, annual_interest_rate)?;
    let months = f64::from(term_years.saturating_mul(MONTHS_PER_YEAR));
    let principal = amount as f64;

    let monthly_payment = (exact.round() as i64).max(1);
    // Summed from the unrounded installment so the total never undercuts the principal.
    let installments_total = (exact * months).round() as i64;
    let life_insurance =
        (charges.life_insurance_rate * principal * f64::from(term_years)).round() as i64;
    let fire_insurance = charges.fire_insurance_flat.round() as i64;
    let admin_fee = (charges.admin_fee_rate * principal).round() as i64;

    let total = installments_total
        .saturating_add(life_insurance)
        .saturating_add(fire_insurance)
        .saturating_add(admin_fee);

    Ok(CostBreakdown {
        monthly_payment,
        installments_total,
        life_insurance,
        fire_insurance,
        admin_fee,
        total,
    })
}

fn amortized_payment(
    amount: i64,
    term_years: i32,
    annual_interest_rate: f64,
) -> Result<f64, CalculatorError> {
    if amount <= 0 {
        return Err(CalculatorError::NonPositiveAmount(amount));
    }
    if term_years <= 0 {
        return Err(CalculatorError::NonPositiveTerm(term_years));
    }
    if !annual_interest_rate.is_finite() || annual_interest_rate <= 0.0 {
        return Err(CalculatorError::NonPositiveRate(annual_interest_rate));
    }

    let principal = amount as f64;
    let monthly_rate = annual_interest_rate / f64::from(MONTHS_PER_YEAR);
    let months = f64::from(term_years.saturating_mul(MONTHS_PER_YEAR));

    // 1 - (1 + r)^-n, stable for tiny rates and long terms.
    let discount = -(-months * monthly_rate.ln_1p()).exp_m1();
    let payment = if discount > 0.0 && discount.is_finite() {
        principal * monthly_rate / discount
    } else {
        principal / months
    };

    if payment.is_finite() {
        Ok(payment)
    } else {
        Err(CalculatorError::Unrepresentable {
            amount,
            term_years,
            annual_interest_rate,
        })
    }
}

fn ensure_charge(field: &'static str, value: f64) -> Result<(), CalculatorError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(CalculatorError::NegativeCharge { field, value })
    }
}
