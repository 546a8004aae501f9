use crate::demo::{run_demo, DemoArgs};
use crate::quote::{run_cost, run_evaluate, run_simulate, CostArgs, EvaluateArgs, SimulateArgs};
use clap::{Parser, Subcommand};
use loan_eligibility::config::AppConfig;
use loan_eligibility::error::AppError;
use loan_eligibility::telemetry;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "loan-eligibility",
    about = "Simulate mortgage loans and evaluate client eligibility from the command line",
    version
)]
struct Cli {
    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the fixed monthly installment for a loan
    Simulate(SimulateArgs),
    /// Itemize the total cost of a loan including insurance and fees
    Cost(CostArgs),
    /// Run the eligibility rules for a client loaded from CSV exports
    Evaluate(EvaluateArgs),
    /// Walk through submission and review with built-in sample clients (default command)
    Demo(DemoArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    info!(?config.environment, "loan eligibility cli starting");

    let command = cli
        .command
        .unwrap_or_else(|| Command::Demo(DemoArgs::default()));

    match command {
        Command::Simulate(args) => run_simulate(args, cli.json),
        Command::Cost(args) => run_cost(args, cli.json),
        Command::Evaluate(args) => run_evaluate(args, &config, cli.json),
        Command::Demo(args) => run_demo(args, &config, cli.json),
    }
}
