//! Credibility scoring and report rendering.
//!
//! The fact checker ends each run with a credibility assessment. This module
//! pulls the category scores back out of that free-form text and renders the
//! whole run as a markdown report.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use trendwire_team::RunOutcome;

use crate::roles::TrendRole;

/// Category scores from the fact checker's assessment, 0 to 100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredibilityScores {
    #[serde(rename = "factualAccuracy")]
    pub factual_accuracy: u8,
    #[serde(rename = "sourceCredibility")]
    pub source_credibility: u8,
    #[serde(rename = "contentQuality")]
    pub content_quality: u8,
    pub timeliness: u8,
}

impl Default for CredibilityScores {
    fn default() -> Self {
        Self {
            factual_accuracy: 85,
            source_credibility: 80,
            content_quality: 88,
            timeliness: 90,
        }
    }
}

impl CredibilityScores {
    /// Extract category scores from assessment text.
    ///
    /// Labels are matched case-insensitively and tolerate `:`, whitespace,
    /// or table pipes between the label and the number. Categories that do
    /// not appear keep their default value.
    pub fn extract(text: &str) -> Self {
        let defaults = Self::default();
        Self {
            factual_accuracy: capture_score(
                text,
                r"(?i)factual accuracy[:\s|]*(\d+)%?",
                defaults.factual_accuracy,
            ),
            source_credibility: capture_score(
                text,
                r"(?i)source credibility[:\s|]*(\d+)%?",
                defaults.source_credibility,
            ),
            content_quality: capture_score(
                text,
                r"(?i)content quality[:\s|]*(\d+)%?",
                defaults.content_quality,
            ),
            timeliness: capture_score(text, r"(?i)timeliness[:\s|]*(\d+)%?", defaults.timeliness),
        }
    }

    /// Weighted overall score, rounded to one decimal.
    ///
    /// Factual accuracy 40%, source credibility 25%, content quality 20%,
    /// timeliness 15%.
    pub fn overall(&self) -> f64 {
        let total = f64::from(self.factual_accuracy) * 0.40
            + f64::from(self.source_credibility) * 0.25
            + f64::from(self.content_quality) * 0.20
            + f64::from(self.timeliness) * 0.15;
        (total * 10.0).round() / 10.0
    }
}

fn capture_score(text: &str, pattern: &str, default: u8) -> u8 {
    Regex::new(pattern)
        .ok()
        .and_then(|re| re.captures(text))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u8>().ok())
        .unwrap_or(default)
}

/// Rendered result of a trend analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendReport {
    pub task: String,
    pub scores: CredibilityScores,
    pub overall: f64,
    #[serde(rename = "generatedAt")]
    pub generated_at: DateTime<Utc>,
    pub markdown: String,
}

impl TrendReport {
    /// Build a report from a completed run.
    ///
    /// Scores come from the fact checker's latest message; a run that ended
    /// before the fact checker spoke gets the default scores.
    pub fn from_outcome(outcome: &RunOutcome) -> Self {
        let scores = match outcome.transcript.last_from(TrendRole::FactChecker.name()) {
            Some(assessment) => CredibilityScores::extract(&assessment.text),
            None => {
                debug!("No fact checker message in transcript, using default scores");
                CredibilityScores::default()
            }
        };
        let overall = scores.overall();
        let markdown = render_markdown(outcome, &scores, overall);

        Self {
            task: outcome.task.clone(),
            scores,
            overall,
            generated_at: outcome.completed_at,
            markdown,
        }
    }
}

fn render_markdown(outcome: &RunOutcome, scores: &CredibilityScores, overall: f64) -> String {
    let mut md = String::new();

    md.push_str("# Trend Analysis Report\n\n");
    md.push_str(&format!("**Run:** {}\n\n", outcome.run_id));
    md.push_str(&format!(
        "**Generated:** {}\n\n",
        outcome.completed_at.format("%B %d, %Y %H:%M UTC")
    ));
    md.push_str(&format!("**Stop reason:** {}\n\n", outcome.stop_reason));

    md.push_str("## Task\n\n");
    md.push_str(outcome.task.trim());
    md.push_str("\n\n");

    md.push_str("## Conversation\n\n");
    for message in outcome.transcript.messages() {
        let heading = match TrendRole::from_name(&message.participant) {
            Some(role) => format!("{} {}", role.icon(), message.participant),
            None => message.participant.clone(),
        };
        md.push_str(&format!(
            "### {} (message {})\n\n",
            heading,
            message.index + 1
        ));
        md.push_str(message.text.trim());
        md.push_str("\n\n");
    }

    md.push_str("## Credibility Assessment\n\n");
    md.push_str("| Category | Score |\n");
    md.push_str("|----------|-------|\n");
    md.push_str(&format!(
        "| Factual Accuracy | {}% |\n",
        scores.factual_accuracy
    ));
    md.push_str(&format!(
        "| Source Credibility | {}% |\n",
        scores.source_credibility
    ));
    md.push_str(&format!("| Content Quality | {}% |\n", scores.content_quality));
    md.push_str(&format!("| Timeliness | {}% |\n\n", scores.timeliness));
    md.push_str(&format!(
        "🎯 **Overall Credibility Score: {}%**\n",
        overall
    ));

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use trendwire_team::{StopReason, Transcript};

    #[test]
    fn test_score_extraction_reads_assessment_text() {
        let text = "📊 **CREDIBILITY REPORT**\n\n\
                    | Factual Accuracy | 92% |\n\
                    Source Credibility: 88\n\
                    content quality | 75%\n\
                    Timeliness:  90%";

        let scores = CredibilityScores::extract(text);

        assert_eq!(scores.factual_accuracy, 92);
        assert_eq!(scores.source_credibility, 88);
        assert_eq!(scores.content_quality, 75);
        assert_eq!(scores.timeliness, 90);
    }

    #[test]
    fn test_missing_categories_keep_defaults() {
        let scores = CredibilityScores::extract("Factual Accuracy: 70%. Looks solid overall.");

        assert_eq!(scores.factual_accuracy, 70);
        assert_eq!(scores.source_credibility, 80);
        assert_eq!(scores.content_quality, 88);
        assert_eq!(scores.timeliness, 90);
    }

    #[test]
    fn test_default_overall_score() {
        assert_eq!(CredibilityScores::default().overall(), 85.1);
    }

    #[test]
    fn test_overall_weighting() {
        let scores = CredibilityScores {
            factual_accuracy: 90,
            source_credibility: 80,
            content_quality: 70,
            timeliness: 60,
        };

        assert_eq!(scores.overall(), 79.0);
    }

    #[test]
    fn test_report_renders_transcript_and_scorecard() {
        let mut transcript = Transcript::new();
        transcript.push("TrendCollector", "Top trend: AI copilots in ERP suites.");
        transcript.push(
            "FactChecker",
            "Factual Accuracy: 91%\nSource Credibility: 85\nAll claims verified. TERMINATE",
        );
        let outcome = RunOutcome {
            run_id: "run-test".to_string(),
            task: "Report on ERP trends".to_string(),
            transcript,
            stop_reason: StopReason::SentinelMatched {
                token: "TERMINATE".to_string(),
                message_index: 1,
            },
            started_at: Utc::now(),
            completed_at: Utc::now(),
        };

        let report = TrendReport::from_outcome(&outcome);

        assert_eq!(report.scores.factual_accuracy, 91);
        assert_eq!(report.scores.source_credibility, 85);
        assert!(report.markdown.contains("### 🔍 TrendCollector (message 1)"));
        assert!(report.markdown.contains("### ✅ FactChecker (message 2)"));
        assert!(report.markdown.contains("| Factual Accuracy | 91% |"));
        assert!(report.markdown.contains("Overall Credibility Score"));
        assert!(report.markdown.contains("sentinel 'TERMINATE' matched in message 1"));
    }

    #[test]
    fn test_report_without_fact_checker_uses_defaults() {
        let mut transcript = Transcript::new();
        transcript.push("TrendCollector", "Top trend: composable ERP.");
        let outcome = RunOutcome {
            run_id: "run-test".to_string(),
            task: "Report on ERP trends".to_string(),
            transcript,
            stop_reason: StopReason::MaxMessagesReached { limit: 1 },
            started_at: Utc::now(),
            completed_at: Utc::now(),
        };

        let report = TrendReport::from_outcome(&outcome);

        assert_eq!(report.scores, CredibilityScores::default());
        assert_eq!(report.overall, 85.1);
    }
}
