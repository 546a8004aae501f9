use super::common::*;
use crate::lending::eligibility::history::{
    balance_within_ceiling, has_quarterly_deposits, history_verdict, periodic_savings,
    seniority_savings, stable_withdrawals, sufficient_savings,
};
use crate::lending::eligibility::HistoryVerdict;

#[test]
fn healthy_history_passes_every_check() {
    let verdict = history_verdict(&client(), &healthy_history(), 3, 100_000, as_of(), &config());

    assert!(verdict.holds(), "failed: {:?}", verdict.failed_checks());
    assert!(verdict.failed_checks().is_empty());
}

#[test]
fn savings_must_cover_fifteen_percent_of_amount() {
    let config = config();
    let history = vec![
        entry(1, 100, date(2020, 1, 5)),
        entry(2, 50, date(2024, 3, 5)),
        entry(3, -30, date(2024, 4, 5)),
    ];

    assert!(sufficient_savings(&history, 1_000, as_of(), &config));
    assert!(!sufficient_savings(
        &[entry(1, 20, date(2024, 3, 5))],
        1_000,
        as_of(),
        &config
    ));
    assert!(!sufficient_savings(&[], 1_000, as_of(), &config));
}

#[test]
fn savings_ignore_deposits_after_the_evaluation_date() {
    let config = config();
    let later = vec![entry(1, 150, date(2026, 1, 1))];

    assert!(!sufficient_savings(&later, 1_000, as_of(), &config));
    assert!(sufficient_savings(&later, 1_000, date(2026, 1, 1), &config));
}

#[test]
fn balance_ignores_entries_after_the_evaluation_date() {
    let config = config();
    let history = vec![
        entry(1, 200, date(2025, 3, 1)),
        entry(2, 5_000, date(2025, 7, 1)),
    ];

    assert!(balance_within_ceiling(&history, as_of(), &config));
    assert!(!balance_within_ceiling(&history, date(2025, 7, 1), &config));
}

#[test]
fn balance_ceiling_is_inclusive_and_vacuous_when_empty() {
    let config = config();

    assert!(balance_within_ceiling(&[], as_of(), &config));
    assert!(balance_within_ceiling(&[entry(1, 300, as_of())], as_of(), &config));
    assert!(!balance_within_ceiling(&[entry(1, 301, as_of())], as_of(), &config));
    assert!(balance_within_ceiling(
        &[entry(1, 1_000, date(2024, 1, 1)), entry(2, -800, date(2024, 2, 1))],
        as_of(),
        &config
    ));
}

#[test]
fn periodic_savings_requires_salary_share() {
    let config = config();
    let mut client = client();
    client.salary = 10_000;

    let thin = vec![entry(1, 100, date(2025, 5, 1))];
    assert!(!periodic_savings(&client, &thin, as_of(), &config));

    let quarterly = vec![
        entry(1, 125, date(2024, 8, 1)),
        entry(2, 125, date(2024, 11, 1)),
        entry(3, 125, date(2025, 2, 1)),
        entry(4, 125, date(2025, 5, 1)),
    ];
    assert!(periodic_savings(&client, &quarterly, as_of(), &config));
}

#[test]
fn periodic_savings_requires_a_deposit_every_quarter() {
    let config = config();
    let mut client = client();
    client.salary = 10_000;

    let gap = vec![
        entry(1, 1_000, date(2024, 8, 1)),
        entry(2, 1_000, date(2024, 11, 1)),
        entry(3, 1_000, date(2025, 5, 1)),
    ];

    assert!(!has_quarterly_deposits(&gap, as_of(), &config));
    assert!(!periodic_savings(&client, &gap, as_of(), &config));
}

#[test]
fn quarterly_buckets_are_open_at_the_start() {
    let config = config();
    let history = vec![
        entry(1, 10, date(2024, 6, 30)),
        entry(2, 10, date(2024, 12, 30)),
        entry(3, 10, date(2025, 3, 30)),
        entry(4, 10, date(2025, 6, 30)),
    ];

    // 2024-06-30 falls outside the oldest bucket, leaving (2024-06-30, 2024-09-30] empty.
    assert!(!has_quarterly_deposits(&history, as_of(), &config));

    let mut covered = history.clone();
    covered.push(entry(5, 10, date(2024, 9, 30)));
    assert!(has_quarterly_deposits(&covered, as_of(), &config));
}

#[test]
fn seniority_lowers_the_deposit_bar() {
    let config = config();
    let recent = |id: u64, change: i64| entry(id, change, date(2025, 1, 15));

    assert!(seniority_savings(&[recent(1, 200)], 3, 1_000, as_of(), &config));
    assert!(seniority_savings(&[recent(1, 250)], 1, 1_000, as_of(), &config));
    assert!(!seniority_savings(&[recent(1, 200)], 3, 5_000, as_of(), &config));
    assert!(!seniority_savings(&[recent(1, 199)], 2, 1_000, as_of(), &config));
}

#[test]
fn seniority_ignores_deposits_outside_the_window() {
    let config = config();
    let history = vec![
        entry(1, 5_000, date(2024, 6, 30)),
        entry(2, 5_000, date(2025, 7, 1)),
    ];

    assert!(!seniority_savings(&history, 5, 1_000, as_of(), &config));
}

#[test]
fn withdrawals_within_thirty_percent_are_stable() {
    let config = config();
    let history = vec![
        entry(1, 1_000, date(2025, 2, 1)),
        entry(2, -300, date(2025, 3, 1)),
        entry(3, -210, date(2025, 4, 1)),
    ];

    assert!(stable_withdrawals(&history, as_of(), &config));
}

#[test]
fn large_recent_withdrawal_is_unstable() {
    let config = config();
    let history = vec![
        entry(1, 1_000, date(2025, 2, 1)),
        entry(2, -301, date(2025, 3, 1)),
    ];

    assert!(!stable_withdrawals(&history, as_of(), &config));
}

#[test]
fn withdrawal_from_empty_balance_is_unstable() {
    let config = config();
    let history = vec![
        entry(1, -10, date(2025, 3, 1)),
        entry(2, 1_000, date(2025, 4, 1)),
    ];

    assert!(!stable_withdrawals(&history, as_of(), &config));
}

#[test]
fn stable_withdrawals_is_vacuous_without_withdrawals() {
    let config = config();

    assert!(stable_withdrawals(&[], as_of(), &config));
    assert!(stable_withdrawals(
        &[entry(1, 500, date(2025, 5, 1))],
        as_of(),
        &config
    ));
}

#[test]
fn old_withdrawals_are_ignored() {
    let config = config();
    let history = vec![
        entry(1, 1_000, date(2024, 1, 1)),
        entry(2, -900, date(2024, 12, 30)),
        entry(3, 1_000, date(2025, 2, 1)),
    ];

    assert!(stable_withdrawals(&history, as_of(), &config));
}

#[test]
fn same_day_entries_apply_in_id_order() {
    let config = config();
    let deposit_first = vec![
        entry(2, -200, date(2025, 3, 1)),
        entry(1, 1_000, date(2025, 3, 1)),
    ];
    let withdrawal_first = vec![
        entry(1, -200, date(2025, 3, 1)),
        entry(2, 1_000, date(2025, 3, 1)),
    ];

    assert!(stable_withdrawals(&deposit_first, as_of(), &config));
    assert!(!stable_withdrawals(&withdrawal_first, as_of(), &config));
}

#[test]
fn verdict_fails_when_any_single_check_fails() {
    let passing = HistoryVerdict {
        sufficient_savings: true,
        balance_within_ceiling: true,
        periodic_savings: true,
        seniority_savings: true,
        stable_withdrawals: true,
    };
    assert!(passing.holds());

    let flips: [(fn(&mut HistoryVerdict), &str); 5] = [
        (|v| v.sufficient_savings = false, "R71 minimum savings"),
        (|v| v.balance_within_ceiling = false, "R72 balance ceiling"),
        (|v| v.periodic_savings = false, "R73 periodic savings"),
        (|v| v.seniority_savings = false, "R74 savings for relationship age"),
        (|v| v.stable_withdrawals = false, "R75 recent withdrawals"),
    ];

    for (flip, label) in flips {
        let mut verdict = passing;
        flip(&mut verdict);
        assert!(!verdict.holds(), "{label} should break the verdict");
        assert_eq!(verdict.failed_checks(), vec![label]);
    }
}

#[test]
fn empty_history_fails_savings_checks() {
    let verdict = history_verdict(&client(), &[], 3, 100_000, as_of(), &config());

    assert!(!verdict.holds());
    assert!(!verdict.sufficient_savings);
    assert!(verdict.balance_within_ceiling);
    assert!(verdict.stable_withdrawals);
}
