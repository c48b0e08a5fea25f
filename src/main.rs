use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use showplan_analyzer::config::{CommandLineArgs, Config};
use showplan_analyzer::services::plan_analyzer::{ReportRenderer, analyze_file};

fn main() -> ExitCode {
    let args = CommandLineArgs::parse();

    // Load configuration first
    let config = match Config::load_from(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        },
    };

    // Initialize logging; stdout carries only the report
    let log_filter = tracing_subscriber::EnvFilter::new(&config.logging.level);
    tracing_subscriber::registry()
        .with(log_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    tracing::debug!("Configuration loaded: {:?}", config);

    match analyze_file(&args.file, &config.to_thresholds()) {
        Ok(result) => {
            print!("{}", ReportRenderer::new(&args.file, &result).render());
            ExitCode::SUCCESS
        },
        Err(e) => {
            tracing::error!(kind = e.kind(), "Analysis failed: {}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        },
    }
}
