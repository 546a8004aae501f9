use super::common::*;
use crate::lending::domain::PropertyType;
use crate::lending::eligibility::rules::{
    adverse_credit_history, below_age_limit, debt_to_income_within_limit,
    financing_within_limit, payment_exceeds_income, stable_employment,
};

#[test]
fn affordable_installment_does_not_trip_income_rule() {
    let outcome = payment_exceeds_income(&client(), &params(), &config()).expect("valid terms");
    assert!(!outcome);
}

#[test]
fn installment_rule_trips_as_salary_shrinks() {
    let config = config();
    let mut client = client();
    let mut previous = false;

    for salary in [500_000, 10_000, 2_000, 1_800, 1_000, 100] {
        client.salary = salary;
        let exceeds = payment_exceeds_income(&client, &params(), &config).expect("valid terms");
        assert!(exceeds || !previous, "lower salary cannot restore eligibility");
        previous = exceeds;
    }

    assert!(previous, "a 100 salary cannot carry a 633 installment");
}

#[test]
fn credit_flag_is_reported_as_is() {
    let mut client = client();
    assert!(!adverse_credit_history(&client));

    client.has_bad_credit_history = true;
    assert!(adverse_credit_history(&client));
}

#[test]
fn job_tenure_must_exceed_one_year() {
    let config = config();
    let mut client = client();

    client.job_tenure_years = 1;
    assert!(!stable_employment(&client, &config));

    client.job_tenure_years = 2;
    assert!(stable_employment(&client, &config));
}

#[test]
fn debt_to_income_accepts_ratio_below_half() {
    assert!(debt_to_income_within_limit(&client(), &params(), &config()));
}

#[test]
fn debt_to_income_rejects_ratio_at_half() {
    let mut request = params();
    request.existing_debt = 150_000;
    request.amount = 100_000;

    assert!(!debt_to_income_within_limit(
        &client(),
        &request,
        &config()
    ));
}

#[test]
fn financing_limit_is_inclusive_at_the_cap() {
    let config = config();
    let mut request = params();
    request.property_cost = 800_000;

    request.amount = 640_000;
    assert!(financing_within_limit(&request, &config));

    request.amount = 640_001;
    assert!(!financing_within_limit(&request, &config));

    request.property_type = PropertyType::Other;
    request.amount = 560_000;
    assert!(financing_within_limit(&request, &config));

    request.amount = 560_001;
    assert!(!financing_within_limit(&request, &config));
}

#[test]
fn age_limit_is_exclusive() {
    let config = config();
    let mut client = client();

    client.age = 69;
    assert!(below_age_limit(&client, &config));

    client.age = 70;
    assert!(!below_age_limit(&client, &config));
}

#[test]
fn thresholds_follow_configuration() {
    let mut config = config();
    config.age_limit = 65;
    config.min_job_tenure_years = 3;
    config.first_home_financing_pct = 50;

    let mut client = client();
    client.age = 66;
    let mut request = params();
    request.amount = 500_000;

    assert!(!below_age_limit(&client, &config));
    assert!(!stable_employment(&client, &config));
    assert!(!financing_within_limit(&request, &config));
}
