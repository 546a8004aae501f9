use crate::infra::{load_providers, print_json, PropertyArg};
use chrono::{Local, NaiveDate};
use clap::Args;
use loan_eligibility::config::AppConfig;
use loan_eligibility::error::AppError;
use loan_eligibility::lending::{
    cost_breakdown, monthly_payment, ClientId, EligibilityEngine, EvaluationReport, LoanCharges,
    LoanParameters,
};
use serde_json::json;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct LoanTermsArgs {
    /// Principal to borrow
    #[arg(long)]
    pub(crate) amount: i64,
    /// Repayment term in years
    #[arg(long)]
    pub(crate) term_years: i32,
    /// Annual interest rate as a fraction (0.045 for 4.5%)
    #[arg(long)]
    pub(crate) rate: f64,
}

#[derive(Args, Debug)]
pub(crate) struct SimulateArgs {
    #[command(flatten)]
    pub(crate) terms: LoanTermsArgs,
}

#[derive(Args, Debug)]
pub(crate) struct CostArgs {
    #[command(flatten)]
    pub(crate) terms: LoanTermsArgs,
    /// Life insurance charged per year as a fraction of the principal
    #[arg(long, default_value_t = 0.0003)]
    pub(crate) life_rate: f64,
    /// Flat fire insurance premium for the whole loan
    #[arg(long, default_value_t = 0.0)]
    pub(crate) fire_insurance: f64,
    /// One-off administration fee as a fraction of the principal
    #[arg(long, default_value_t = 0.01)]
    pub(crate) admin_rate: f64,
}

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Client export (id,rut,name,salary,age,job_tenure_years,bad_credit_history)
    #[arg(long)]
    pub(crate) clients_csv: PathBuf,
    /// Transaction history export (id,client_id,change,change_date)
    #[arg(long)]
    pub(crate) history_csv: PathBuf,
    #[arg(long)]
    pub(crate) client_id: u64,
    #[command(flatten)]
    pub(crate) terms: LoanTermsArgs,
    #[arg(long, value_enum, default_value = "first-home")]
    pub(crate) property_type: PropertyArg,
    /// Appraised cost of the property
    #[arg(long)]
    pub(crate) property_cost: i64,
    /// Debt the client already carries
    #[arg(long, default_value_t = 0)]
    pub(crate) existing_debt: i64,
    /// Years the client has banked with us
    #[arg(long, default_value_t = 0)]
    pub(crate) relationship_years: u32,
    /// Evaluation date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
}

pub(crate) fn run_simulate(args: SimulateArgs, json: bool) -> Result<(), AppError> {
    let LoanTermsArgs {
        amount,
        term_years,
        rate,
    } = args.terms;
    let payment = monthly_payment(amount, term_years, rate)?;

    if json {
        return print_json(&json!({
            "amount": amount,
            "term_years": term_years,
            "annual_interest_rate": rate,
            "monthly_payment": payment,
        }));
    }

    println!(
        "Monthly payment for {} over {} years at {:.2}%: {}",
        amount,
        term_years,
        rate * 100.0,
        payment
    );
    Ok(())
}

pub(crate) fn run_cost(args: CostArgs, json: bool) -> Result<(), AppError> {
    let charges = LoanCharges {
        life_insurance_rate: args.life_rate,
        fire_insurance_flat: args.fire_insurance,
        admin_fee_rate: args.admin_rate,
    };
    let breakdown = cost_breakdown(
        args.terms.amount,
        args.terms.term_years,
        args.terms.rate,
        &charges,
    )?;

    if json {
        return print_json(&breakdown);
    }

    println!("Loan cost breakdown");
    println!("- Monthly payment: {}", breakdown.monthly_payment);
    println!("- Installments: {}", breakdown.installments_total);
    println!("- Life insurance: {}", breakdown.life_insurance);
    println!("- Fire insurance: {}", breakdown.fire_insurance);
    println!("- Administration fee: {}", breakdown.admin_fee);
    println!("Total cost: {}", breakdown.total);
    Ok(())
}

pub(crate) fn run_evaluate(
    args: EvaluateArgs,
    config: &AppConfig,
    json: bool,
) -> Result<(), AppError> {
    let (clients, ledger) = load_providers(&args.clients_csv, &args.history_csv)?;
    let params = LoanParameters {
        amount: args.terms.amount,
        term_years: args.terms.term_years,
        annual_interest_rate: args.terms.rate,
        property_type: args.property_type.into(),
        property_cost: args.property_cost,
        existing_debt: args.existing_debt,
    };
    let as_of = args.as_of.unwrap_or_else(|| Local::now().date_naive());

    let engine = EligibilityEngine::new(config.eligibility.clone());
    let report = engine.report(
        &clients,
        &ledger,
        ClientId(args.client_id),
        &params,
        args.relationship_years,
        as_of,
    )?;

    if json {
        return print_json(&report);
    }
    render_report(&report);
    Ok(())
}

pub(crate) fn render_report(report: &EvaluationReport) {
    println!(
        "Client {} evaluated as of {} (monthly payment {})",
        report.client_id, report.as_of, report.monthly_payment
    );
    for (rule, value) in report.rules.iter() {
        let marker = if rule.passes(value) { "ok" } else { "FAIL" };
        println!(
            "  {} {:<5} {:<4} {}",
            rule.label(),
            value,
            marker,
            rule.description()
        );
    }
    let failed = report.history.failed_checks();
    if !failed.is_empty() {
        println!("  Savings history gaps: {}", failed.join(", "));
    }
    println!("  Decision: {}", report.decision.summary());
}
