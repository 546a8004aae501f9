mod cli;
mod demo;
mod infra;
mod quote;

use loan_eligibility::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
