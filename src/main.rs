// src/main.rs
use std::process::ExitCode;

use chrono::{Duration, Local};

use stock_advisor::adapter::report::render;
use stock_advisor::adapter::AnalysisCoordinator;
use stock_advisor::application::usecase::AnalysisRequest;
use stock_advisor::config::Config;
use stock_advisor::domain::errors::{AppError, AppResult};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Analysis failed: {:?}", e);
            eprintln!("Error: {}", e);
            eprintln!("{}", failure_hint(&e));
            ExitCode::FAILURE
        }
    }
}

fn failure_hint(error: &AppError) -> &'static str {
    if error.is_user_input() {
        "Please check the stock symbol and try again."
    } else {
        "Please try again later."
    }
}

async fn run() -> AppResult<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    config.init_logging()?;

    log::info!("Starting stock_advisor v{}", env!("CARGO_PKG_VERSION"));

    let symbol = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config.analysis.default_symbol.clone());

    // Up to and including today
    let end = Local::now().date_naive() + Duration::days(1);
    let request = AnalysisRequest::trailing(&symbol, end, config.analysis.lookback_days)?;

    let coordinator = AnalysisCoordinator::from_config(&config);
    let dashboard = coordinator.run(&request).await?;

    print!("{}", render(&dashboard, &config));
    Ok(())
}
