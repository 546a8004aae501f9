use crate::infra::print_json;
use crate::quote::render_report;
use chrono::{Duration, Local, NaiveDate};
use clap::Args;
use loan_eligibility::config::AppConfig;
use loan_eligibility::error::AppError;
use loan_eligibility::lending::{
    ClientId, ClientRecord, InMemoryClientDirectory, InMemoryLedger, InMemoryLoanRequests,
    LoanApplication, LoanKind, LoanRequestService, RequestStage, ReviewTerms, TransactionEntry,
};
use serde_json::json;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Evaluation date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
}

struct DemoCase {
    application: LoanApplication,
    terms: ReviewTerms,
}

pub(crate) fn run_demo(args: DemoArgs, config: &AppConfig, json: bool) -> Result<(), AppError> {
    let as_of = args.as_of.unwrap_or_else(|| Local::now().date_naive());

    let clients = InMemoryClientDirectory::default();
    for client in demo_clients() {
        clients.register(client)?;
    }
    let ledger = InMemoryLedger::default();
    for (index, client_id) in [ClientId(1), ClientId(3)].into_iter().enumerate() {
        for entry in steady_saver_history(client_id, index as u64 * 100, as_of) {
            ledger.append(entry)?;
        }
    }
    ledger.append(TransactionEntry {
        id: 900,
        client_id: ClientId(2),
        change: 900,
        change_date: as_of - Duration::days(90),
    })?;

    let service = LoanRequestService::new(
        Arc::new(InMemoryLoanRequests::default()),
        Arc::new(clients),
        Arc::new(ledger),
        config.eligibility.clone(),
    );

    if !json {
        println!("Loan eligibility demo (as of {as_of})");
    }
    let mut outcomes = Vec::new();
    for case in demo_cases(as_of) {
        let request = service.submit(case.application)?;
        service.update_stage(request.id, RequestStage::UnderReview)?;
        let report = service.review(request.id, &case.terms)?;
        let stored = service.get(request.id)?;

        if json {
            outcomes.push(json!({ "request": stored, "report": report }));
            continue;
        }
        println!(
            "\n- Request {} ({:?}, {} over {} years) -> {}",
            stored.id,
            stored.kind,
            stored.amount,
            stored.term_years,
            stored.stage.label()
        );
        render_report(&report);
    }

    if json {
        return print_json(&outcomes);
    }
    Ok(())
}

fn demo_clients() -> Vec<ClientRecord> {
    vec![
        ClientRecord {
            id: ClientId(1),
            rut: Some("12345678-9".to_string()),
            name: Some("Ana Rojas".to_string()),
            salary: 500_000,
            age: 40,
            job_tenure_years: 3,
            has_bad_credit_history: false,
        },
        ClientRecord {
            id: ClientId(2),
            rut: Some("98765432-1".to_string()),
            name: Some("Luis Soto".to_string()),
            salary: 320_000,
            age: 71,
            job_tenure_years: 10,
            has_bad_credit_history: true,
        },
        ClientRecord {
            id: ClientId(3),
            rut: Some("11222333-4".to_string()),
            name: Some("Camila Perez".to_string()),
            salary: 1_500,
            age: 29,
            job_tenure_years: 2,
            has_bad_credit_history: false,
        },
    ]
}

/// Quarterly deposits, an older sweep out of savings, and one small recent withdrawal.
fn steady_saver_history(
    client_id: ClientId,
    id_base: u64,
    as_of: NaiveDate,
) -> Vec<TransactionEntry> {
    [
        (350, 12_500),
        (260, 12_500),
        (211, -25_000),
        (140, 100),
        (50, 100),
        (29, -60),
    ]
    .into_iter()
    .enumerate()
    .map(|(offset, (days_ago, change))| TransactionEntry {
        id: id_base + offset as u64 + 1,
        client_id,
        change,
        change_date: as_of - Duration::days(days_ago),
    })
    .collect()
}

fn demo_cases(as_of: NaiveDate) -> Vec<DemoCase> {
    let terms = |property_cost: i64, relationship_years: u32| ReviewTerms {
        annual_interest_rate: 0.045,
        property_cost,
        existing_debt: 50_000,
        relationship_years,
        as_of,
    };

    vec![
        DemoCase {
            application: LoanApplication {
                client_id: ClientId(1),
                kind: LoanKind::FirstHome,
                amount: 100_000,
                term_years: 20,
                document: b"salary slips".to_vec(),
            },
            terms: terms(800_000, 3),
        },
        DemoCase {
            application: LoanApplication {
                client_id: ClientId(2),
                kind: LoanKind::Remodeling,
                amount: 50_000,
                term_years: 10,
                document: Vec::new(),
            },
            terms: terms(400_000, 1),
        },
        DemoCase {
            application: LoanApplication {
                client_id: ClientId(3),
                kind: LoanKind::SecondHome,
                amount: 100_000,
                term_years: 20,
                document: Vec::new(),
            },
            terms: terms(600_000, 1),
        },
    ]
}
