use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::super::domain::{ClientRecord, TransactionEntry};
use super::config::EligibilityConfig;
use super::rules::{exceeds_share, meets_share};

const MONTHS_PER_QUARTER: u32 = 3;

/// Outcome of the savings-history sub-rules that make up R7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryVerdict {
    pub sufficient_savings: bool,
    pub balance_within_ceiling: bool,
    pub periodic_savings: bool,
    pub seniority_savings: bool,
    pub stable_withdrawals: bool,
}

impl HistoryVerdict {
    /// R7 holds only when every sub-rule holds.
    pub fn holds(&self) -> bool {
        self.sufficient_savings
            && self.balance_within_ceiling
            && self.periodic_savings
            && self.seniority_savings
            && self.stable_withdrawals
    }

    pub fn failed_checks(&self) -> Vec<&'static str> {
        [
            ("R71 minimum savings", self.sufficient_savings),
            ("R72 balance ceiling", self.balance_within_ceiling),
            ("R73 periodic savings", self.periodic_savings),
            ("R74 savings for relationship age", self.seniority_savings),
            ("R75 recent withdrawals", self.stable_withdrawals),
        ]
        .into_iter()
        .filter_map(|(label, passed)| (!passed).then_some(label))
        .collect()
    }
}

/// Runs R71 through R75 over a single history snapshot.
pub fn history_verdict(
    client: &ClientRecord,
    history: &[TransactionEntry],
    relationship_years: u32,
    amount: i64,
    as_of: NaiveDate,
    config: &EligibilityConfig,
) -> HistoryVerdict {
    HistoryVerdict {
        sufficient_savings: sufficient_savings(history, amount, as_of, config),
        balance_within_ceiling: balance_within_ceiling(history, as_of, config),
        periodic_savings: periodic_savings(client, history, as_of, config),
        seniority_savings: seniority_savings(history, relationship_years, amount, as_of, config),
        stable_withdrawals: stable_withdrawals(history, as_of, config),
    }
}

/// R71: deposits up to `as_of` cover the minimum share of the requested amount.
pub fn sufficient_savings(
    history: &[TransactionEntry],
    amount: i64,
    as_of: NaiveDate,
    config: &EligibilityConfig,
) -> bool {
    let deposits = history
        .iter()
        .filter(|entry| entry.is_deposit() && entry.change_date <= as_of)
        .fold(0_i64, |sum, entry| sum.saturating_add(entry.change));

    meets_share(deposits, amount, config.min_savings_to_amount_pct)
}

/// R72: the balance as of `as_of` stays at or under the ceiling. Vacuously true when empty.
pub fn balance_within_ceiling(
    history: &[TransactionEntry],
    as_of: NaiveDate,
    config: &EligibilityConfig,
) -> bool {
    let balance = history
        .iter()
        .filter(|entry| entry.change_date <= as_of)
        .fold(0_i64, |sum, entry| sum.saturating_add(entry.change));

    balance <= config.balance_ceiling
}

/// R73: recent deposits reach the salary share and arrive every quarter.
pub fn periodic_savings(
    client: &ClientRecord,
    history: &[TransactionEntry],
    as_of: NaiveDate,
    config: &EligibilityConfig,
) -> bool {
    let deposits = deposits_within(history, as_of, config.savings_window_months);

    meets_share(deposits, client.salary, config.min_deposits_to_salary_pct)
        && has_quarterly_deposits(history, as_of, config)
}

/// R74: recent deposits meet a bar that drops once the relationship is established.
pub fn seniority_savings(
    history: &[TransactionEntry],
    relationship_years: u32,
    amount: i64,
    as_of: NaiveDate,
    config: &EligibilityConfig,
) -> bool {
    let pct = if relationship_years > config.established_relationship_years {
        config.established_deposit_pct
    } else {
        config.new_relationship_deposit_pct
    };

    let deposits = deposits_within(history, as_of, config.savings_window_months);
    meets_share(deposits, amount, pct)
}

/// R75: no recent withdrawal takes more than the allowed share of the balance held right
/// before it. Vacuously true when the window has no withdrawals.
pub fn stable_withdrawals(
    history: &[TransactionEntry],
    as_of: NaiveDate,
    config: &EligibilityConfig,
) -> bool {
    let window_start = months_before(as_of, config.withdrawal_window_months);

    let mut ordered: Vec<&TransactionEntry> = history
        .iter()
        .filter(|entry| entry.change_date <= as_of)
        .collect();
    ordered.sort_by_key(|entry| (entry.change_date, entry.id));

    let mut balance: i64 = 0;
    for entry in ordered {
        if entry.is_withdrawal() && entry.change_date > window_start {
            let magnitude = entry.change.saturating_neg();
            if balance <= 0 || exceeds_share(magnitude, balance, config.max_withdrawal_pct) {
                return false;
            }
        }
        balance = balance.saturating_add(entry.change);
    }

    true
}

/// Each of the trailing quarterly buckets holds at least one deposit.
pub fn has_quarterly_deposits(
    history: &[TransactionEntry],
    as_of: NaiveDate,
    config: &EligibilityConfig,
) -> bool {
    (0..config.quarterly_buckets).all(|bucket| {
        let upper = months_before(as_of, bucket * MONTHS_PER_QUARTER);
        let lower = months_before(as_of, (bucket + 1) * MONTHS_PER_QUARTER);
        history.iter().any(|entry| {
            entry.is_deposit() && entry.change_date > lower && entry.change_date <= upper
        })
    })
}

fn deposits_within(history: &[TransactionEntry], as_of: NaiveDate, months: u32) -> i64 {
    let start = months_before(as_of, months);
    history
        .iter()
        .filter(|entry| {
            entry.is_deposit() && entry.change_date > start && entry.change_date <= as_of
        })
        .fold(0_i64, |sum, entry| sum.saturating_add(entry.change))
}

fn months_before(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(months)).unwrap_or(NaiveDate::MIN)
}
