//! Run command - Execute a trend analysis run.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tokio::sync::mpsc;
use tracing::info;

use trendwire_agents::{
    build_task, build_trend_team_with, ChatClient, LlmProvider, TrendReport, TrendRole,
    DEFAULT_MAX_MESSAGES, DEFAULT_TOPIC, SENTINEL,
};
use trendwire_team::{RunOutcome, Termination};

#[derive(Args)]
pub struct RunArgs {
    /// Topic to analyze
    #[arg(short, long)]
    topic: Option<String>,

    /// Stop after this many messages
    #[arg(long, default_value_t = DEFAULT_MAX_MESSAGES)]
    max_messages: usize,

    /// Model override (defaults to the provider's standard model)
    #[arg(short, long)]
    model: Option<String>,

    /// LLM provider: openai or anthropic (default: detect from API keys)
    #[arg(short, long)]
    provider: Option<String>,

    /// Write the markdown report to this file
    #[arg(long)]
    report: Option<PathBuf>,

    /// Write the full run outcome as JSON to this file
    #[arg(long)]
    transcript: Option<PathBuf>,
}

pub async fn execute(args: RunArgs) -> Result<()> {
    let client = build_client(&args)?;
    info!("Using {:?} model {}", client.provider(), client.model());

    let topic = match args.topic.as_deref() {
        Some(t) if !t.trim().is_empty() => t.trim().to_string(),
        _ => DEFAULT_TOPIC.to_string(),
    };
    let task = build_task(Some(&topic));
    let termination = Termination::max_messages(args.max_messages).with_sentinel(SENTINEL);
    let team = build_trend_team_with(Arc::new(client), termination);

    println!("📰 Analyzing: {}", topic);
    println!("   Message cap: {}", args.max_messages);
    println!();

    // Stream messages as the team produces them
    let (tx, mut rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(async move { team.run_stream(&task, tx).await });

    while let Some(message) = rx.recv().await {
        match TrendRole::from_name(&message.participant) {
            Some(role) => println!("{} {} ({})", role.icon(), message.participant, role.title()),
            None => println!("💬 {}", message.participant),
        }
        println!();
        println!("{}", message.text.trim());
        println!();
    }

    let outcome = handle.await.context("Run task panicked")??;
    println!("🏁 {}", outcome.stop_reason);
    println!();

    let report = TrendReport::from_outcome(&outcome);
    print_scorecard(&report);
    write_exports(
        args.report.as_deref(),
        args.transcript.as_deref(),
        &report,
        &outcome,
    )?;

    Ok(())
}

fn build_client(args: &RunArgs) -> Result<ChatClient> {
    let client = match args.provider.as_deref() {
        Some(name) => {
            let provider = LlmProvider::from_str(name).ok_or_else(|| {
                anyhow::anyhow!("Unknown provider: {} (expected openai or anthropic)", name)
            })?;
            ChatClient::for_provider(provider, args.model.clone())?
        }
        None => {
            let client = ChatClient::from_env()?;
            match args.model.clone() {
                Some(model) => client.with_model(model),
                None => client,
            }
        }
    };
    Ok(client)
}

fn print_scorecard(report: &TrendReport) {
    println!("📊 Credibility Assessment");
    println!("   Factual Accuracy:   {}%", report.scores.factual_accuracy);
    println!("   Source Credibility: {}%", report.scores.source_credibility);
    println!("   Content Quality:    {}%", report.scores.content_quality);
    println!("   Timeliness:         {}%", report.scores.timeliness);
    println!();
    println!("🎯 Overall Credibility Score: {}%", report.overall);
}

fn write_exports(
    report_path: Option<&Path>,
    transcript_path: Option<&Path>,
    report: &TrendReport,
    outcome: &RunOutcome,
) -> Result<()> {
    if let Some(path) = report_path {
        std::fs::write(path, &report.markdown)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        println!("💾 Report written to {}", path.display());
    }

    if let Some(path) = transcript_path {
        let json = serde_json::to_string_pretty(outcome)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write transcript to {}", path.display()))?;
        println!("💾 Transcript written to {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use trendwire_team::{TeamResult, TextGenerator, Transcript};

    struct Scripted;

    #[async_trait]
    impl TextGenerator for Scripted {
        async fn generate(
            &self,
            _instructions: &str,
            _task: &str,
            _transcript: &Transcript,
        ) -> TeamResult<String> {
            Ok("Trend summary ready. TERMINATE".to_string())
        }
    }

    #[tokio::test]
    async fn test_write_exports() {
        let team = build_trend_team_with(
            Arc::new(Scripted),
            Termination::max_messages(4).with_sentinel(SENTINEL),
        );
        let outcome = team.run("Report on ERP trends").await.unwrap();
        let report = TrendReport::from_outcome(&outcome);

        let dir = tempfile::tempdir().unwrap();
        let report_path = dir.path().join("report.md");
        let transcript_path = dir.path().join("run.json");

        write_exports(
            Some(&report_path),
            Some(&transcript_path),
            &report,
            &outcome,
        )
        .unwrap();

        let markdown = std::fs::read_to_string(&report_path).unwrap();
        assert!(markdown.contains("# Trend Analysis Report"));
        assert!(markdown.contains("TrendCollector"));

        let json = std::fs::read_to_string(&transcript_path).unwrap();
        assert!(json.contains("\"runId\""));
        assert!(json.contains("\"stopReason\""));
    }
}
