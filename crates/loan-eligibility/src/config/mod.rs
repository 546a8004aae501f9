use std::env;
use std::fmt;
use std::str::FromStr;

use crate::lending::EligibilityConfig;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub eligibility: EligibilityConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );
        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            eligibility: load_eligibility()?,
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

fn load_eligibility() -> Result<EligibilityConfig, ConfigError> {
    let defaults = EligibilityConfig::default();

    Ok(EligibilityConfig {
        max_payment_to_income_pct: env_or(
            "LOAN_MAX_PAYMENT_TO_INCOME_PCT",
            defaults.max_payment_to_income_pct,
        )?,
        min_job_tenure_years: env_or("LOAN_MIN_JOB_TENURE_YEARS", defaults.min_job_tenure_years)?,
        max_debt_to_income_pct: env_or(
            "LOAN_MAX_DEBT_TO_INCOME_PCT",
            defaults.max_debt_to_income_pct,
        )?,
        first_home_financing_pct: env_or(
            "LOAN_FIRST_HOME_FINANCING_PCT",
            defaults.first_home_financing_pct,
        )?,
        other_property_financing_pct: env_or(
            "LOAN_OTHER_PROPERTY_FINANCING_PCT",
            defaults.other_property_financing_pct,
        )?,
        age_limit: env_or("LOAN_AGE_LIMIT", defaults.age_limit)?,
        min_savings_to_amount_pct: env_or(
            "LOAN_MIN_SAVINGS_TO_AMOUNT_PCT",
            defaults.min_savings_to_amount_pct,
        )?,
        balance_ceiling: env_or("LOAN_BALANCE_CEILING", defaults.balance_ceiling)?,
        savings_window_months: env_or(
            "LOAN_SAVINGS_WINDOW_MONTHS",
            defaults.savings_window_months,
        )?,
        min_deposits_to_salary_pct: env_or(
            "LOAN_MIN_DEPOSITS_TO_SALARY_PCT",
            defaults.min_deposits_to_salary_pct,
        )?,
        quarterly_buckets: env_or("LOAN_QUARTERLY_BUCKETS", defaults.quarterly_buckets)?,
        established_relationship_years: env_or(
            "LOAN_ESTABLISHED_RELATIONSHIP_YEARS",
            defaults.established_relationship_years,
        )?,
        established_deposit_pct: env_or(
            "LOAN_ESTABLISHED_DEPOSIT_PCT",
            defaults.established_deposit_pct,
        )?,
        new_relationship_deposit_pct: env_or(
            "LOAN_NEW_RELATIONSHIP_DEPOSIT_PCT",
            defaults.new_relationship_deposit_pct,
        )?,
        withdrawal_window_months: env_or(
            "LOAN_WITHDRAWAL_WINDOW_MONTHS",
            defaults.withdrawal_window_months,
        )?,
        max_withdrawal_pct: env_or("LOAN_MAX_WITHDRAWAL_PCT", defaults.max_withdrawal_pct)?,
    })
}

fn env_or<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
        Err(_) => Ok(default),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidValue { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue { key, value } => {
                write!(f, "{key} must be a whole number (found '{value}')")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
