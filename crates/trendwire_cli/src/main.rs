//! Trendwire CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments
//! - 3: LLM configuration error
//! - 4: Generation failure

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

use commands::{Cli, Commands};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const CONFIG_ERROR: u8 = 3;
    pub const GENERATION_ERROR: u8 = 4;
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging, level steered by the global flags
    let default_level = if cli.verbose {
        "trendwire=debug"
    } else if cli.quiet {
        "trendwire=error"
    } else {
        "trendwire=info"
    };
    let log_result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(
            EnvFilter::from_default_env()
                .add_directive(default_level.parse().unwrap())
                .add_directive("warn".parse().unwrap()),
        )
        .try_init();

    if log_result.is_err() {
        // Logging already initialized, continue
    }

    let result = match cli.command {
        Commands::Run(args) => commands::run::execute(args).await,
        Commands::Agents(args) => commands::agents::execute(args).await,
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            // Determine appropriate exit code based on error
            let exit_code = categorize_error(&e);
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    let msg = e.to_string().to_lowercase();

    if msg.contains("not configured") || msg.contains("api key") {
        ExitCodes::CONFIG_ERROR
    } else if msg.contains("generation") || msg.contains("llm") || msg.contains("network") {
        ExitCodes::GENERATION_ERROR
    } else if msg.contains("argument") || msg.contains("unknown provider") {
        ExitCodes::INVALID_ARGS
    } else {
        ExitCodes::GENERAL_ERROR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categorization() {
        let config = anyhow::anyhow!("LLM not configured. Set OPENAI_API_KEY or ANTHROPIC_API_KEY");
        assert_eq!(categorize_error(&config), ExitCodes::CONFIG_ERROR);

        let generation = anyhow::anyhow!("Participant generation failed: ContentWriter - timeout");
        assert_eq!(categorize_error(&generation), ExitCodes::GENERATION_ERROR);

        let args = anyhow::anyhow!("Unknown provider: mistral (expected openai or anthropic)");
        assert_eq!(categorize_error(&args), ExitCodes::INVALID_ARGS);

        let other = anyhow::anyhow!("disk full");
        assert_eq!(categorize_error(&other), ExitCodes::GENERAL_ERROR);
    }
}
