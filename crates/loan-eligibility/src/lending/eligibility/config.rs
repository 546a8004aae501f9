use serde::{Deserialize, Serialize};

/// Thresholds backing the eligibility rules. Percentages are whole numbers (35 = 35%).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityConfig {
    pub max_payment_to_income_pct: u32,
    pub min_job_tenure_years: u32,
    pub max_debt_to_income_pct: u32,
    pub first_home_financing_pct: u32,
    pub other_property_financing_pct: u32,
    pub age_limit: u32,
    pub min_savings_to_amount_pct: u32,
    pub balance_ceiling: i64,
    pub savings_window_months: u32,
    pub min_deposits_to_salary_pct: u32,
    pub quarterly_buckets: u32,
    pub established_relationship_years: u32,
    pub established_deposit_pct: u32,
    pub new_relationship_deposit_pct: u32,
    pub withdrawal_window_months: u32,
    pub max_withdrawal_pct: u32,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            max_payment_to_income_pct: 35,
            min_job_tenure_years: 1,
            max_debt_to_income_pct: 50,
            first_home_financing_pct: 80,
            other_property_financing_pct: 70,
            age_limit: 70,
            min_savings_to_amount_pct: 15,
            balance_ceiling: 300,
            savings_window_months: 12,
            min_deposits_to_salary_pct: 5,
            quarterly_buckets: 4,
            established_relationship_years: 2,
            established_deposit_pct: 10,
            new_relationship_deposit_pct: 20,
            withdrawal_window_months: 6,
            max_withdrawal_pct: 30,
        }
    }
}
