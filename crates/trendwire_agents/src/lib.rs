//! # trendwire_agents
//!
//! The trend analysis team: role profiles, prompt templates, the LLM-backed
//! text generator, and report rendering.
//!
//! ## Roles
//!
//! Four specialists hand work to each other in a fixed cycle:
//!
//! | Role | Title | Focus |
//! |------|-------|-------|
//! | TrendCollector | Trend Researcher | Gathers current industry trends |
//! | ContentWriter | Content Creator | Turns trends into an article |
//! | SEOOptimizer | SEO Specialist | Optimizes the article for search |
//! | FactChecker | Verification Expert | Verifies claims and scores credibility |
//!
//! The fact checker ends its assessment with `TERMINATE`, which stops the
//! run; a message cap bounds runs where the sentinel never appears.

pub mod error;
pub mod llm;
pub mod prompts;
pub mod report;
pub mod roles;
pub mod team;

pub use error::{AgentError, AgentResult};
pub use llm::{ChatClient, ChatMessage, ChatRole, Completion, LlmProvider};
pub use prompts::{build_task, date_context, DEFAULT_TOPIC};
pub use report::{CredibilityScores, TrendReport};
pub use roles::TrendRole;
pub use team::{
    build_trend_team, build_trend_team_with, default_termination, DEFAULT_MAX_MESSAGES, SENTINEL,
};
