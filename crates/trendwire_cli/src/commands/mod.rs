//! CLI command definitions.
//!
//! This module defines the command structure for the Trendwire CLI.
//! Each subcommand maps to a specific workflow.

use clap::{Parser, Subcommand};

pub mod agents;
pub mod run;

/// Trendwire - multi-agent trend analysis reports
#[derive(Parser)]
#[command(name = "trendwire")]
#[command(version, about = "Trendwire - multi-agent trend analysis reports")]
#[command(long_about = r#"
Trendwire runs a four-agent editorial team that researches a topic,
writes an article, optimizes it for search, and fact-checks the result
into a credibility-scored markdown report.

WORKFLOWS:
  run     → Run a trend analysis and print the report
  agents  → List the team roles and their briefs

The run command needs an LLM API key in the environment:
  OPENAI_API_KEY or ANTHROPIC_API_KEY

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - LLM configuration error
  4 - Generation failure

For more information, visit: https://github.com/trendwire/trendwire
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a trend analysis on a topic
    Run(run::RunArgs),

    /// List the trend team roles
    Agents(agents::AgentsArgs),
}
