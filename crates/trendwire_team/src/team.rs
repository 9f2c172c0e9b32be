//! Round-robin turn sequencing.

use chrono::Utc;
use tokio::sync::mpsc;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::error::{TeamError, TeamResult};
use crate::participant::Roster;
use crate::termination::Termination;
use crate::types::{Message, RunOutcome, Transcript};

/// A team that hands turns to its participants in strict rotation.
///
/// Participant `i` is always followed by participant `(i + 1) mod N`,
/// regardless of message content. Each turn appends exactly one message to
/// the transcript; termination is evaluated after every append.
pub struct RoundRobinTeam {
    roster: Roster,
    termination: Termination,
}

impl RoundRobinTeam {
    /// Create a team from a roster and termination conditions.
    pub fn new(roster: Roster, termination: Termination) -> Self {
        Self {
            roster,
            termination,
        }
    }

    /// Get the roster.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Get the termination conditions.
    pub fn termination(&self) -> &Termination {
        &self.termination
    }

    /// Run the team to completion, collecting the transcript.
    pub async fn run(&self, task: &str) -> TeamResult<RunOutcome> {
        self.run_inner(task, None).await
    }

    /// Run the team, sending each message to `observer` as it is produced.
    ///
    /// Every message is sent before termination is evaluated. A dropped
    /// receiver does not abort the run; observers are read-only.
    pub async fn run_stream(
        &self,
        task: &str,
        observer: mpsc::UnboundedSender<Message>,
    ) -> TeamResult<RunOutcome> {
        self.run_inner(task, Some(observer)).await
    }

    async fn run_inner(
        &self,
        task: &str,
        observer: Option<mpsc::UnboundedSender<Message>>,
    ) -> TeamResult<RunOutcome> {
        if self.roster.is_empty() {
            return Err(TeamError::EmptyRoster);
        }

        let run_id = Uuid::new_v4().to_string();
        let started_at = Utc::now();
        let mut transcript = Transcript::new();

        info!(
            "Starting run {} with {} participants: {}",
            run_id,
            self.roster.len(),
            task
        );

        let stop_reason = loop {
            // Checked before the first turn too, so a zero cap ends the
            // run with an empty transcript
            if let Some(reason) = self.termination.check(&transcript) {
                break reason;
            }

            let turn = transcript.len();
            let participant = &self.roster.participants()[turn % self.roster.len()];

            debug!("Turn {}: {}", turn, participant.name());

            let text = match participant.take_turn(task, &transcript).await {
                Ok(text) => text,
                Err(e) => {
                    error!(
                        "Participant '{}' failed on turn {}: {}",
                        participant.name(),
                        turn,
                        e
                    );
                    return Err(TeamError::generation(participant.name(), e.to_string()));
                }
            };

            let message = transcript.push(participant.name(), text).clone();
            info!(
                "Participant '{}' produced message {}",
                message.participant, message.index
            );

            if let Some(tx) = &observer {
                // A closed channel means the observer went away, not that
                // the run should stop
                let _ = tx.send(message);
            }
        };

        let completed_at = Utc::now();
        info!("Run {} stopped: {}", run_id, stop_reason);

        Ok(RunOutcome {
            run_id,
            task: task.to_string(),
            transcript,
            stop_reason,
            started_at,
            completed_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::participant::{Participant, TextGenerator};
    use crate::types::StopReason;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct CountingGenerator;

    #[async_trait]
    impl TextGenerator for CountingGenerator {
        async fn generate(
            &self,
            _instructions: &str,
            _task: &str,
            transcript: &Transcript,
        ) -> TeamResult<String> {
            Ok(format!("message {}", transcript.len()))
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(
            &self,
            _instructions: &str,
            _task: &str,
            _transcript: &Transcript,
        ) -> TeamResult<String> {
            Err(TeamError::Upstream("connection refused".to_string()))
        }
    }

    fn roster_of(names: &[&str]) -> Roster {
        let generator: Arc<dyn TextGenerator> = Arc::new(CountingGenerator);
        let mut roster = Roster::new();
        for name in names {
            roster.register(Participant::new(*name, format!("You are {}", name), generator.clone()));
        }
        roster
    }

    #[tokio::test]
    async fn test_turn_order_is_strictly_periodic() {
        let roster = roster_of(&["collector", "writer", "seo", "checker"]);
        let team = RoundRobinTeam::new(roster, Termination::max_messages(10));

        let outcome = team.run("report on ERP trends").await.unwrap();

        assert_eq!(outcome.transcript.len(), 10);
        let producers: Vec<&str> = outcome
            .transcript
            .messages()
            .iter()
            .map(|m| m.participant.as_str())
            .collect();
        assert_eq!(
            producers,
            vec![
                "collector", "writer", "seo", "checker", "collector", "writer", "seo", "checker",
                "collector", "writer",
            ]
        );
        // Ten turns over four participants leaves the writer last
        assert_eq!(outcome.transcript.latest().unwrap().participant, "writer");
        assert_eq!(
            outcome.stop_reason,
            StopReason::MaxMessagesReached { limit: 10 }
        );
    }

    #[tokio::test]
    async fn test_empty_roster_is_rejected() {
        let team = RoundRobinTeam::new(Roster::new(), Termination::max_messages(5));

        let result = team.run("anything").await;
        assert!(matches!(result, Err(TeamError::EmptyRoster)));
    }

    #[tokio::test]
    async fn test_zero_cap_produces_empty_transcript() {
        let roster = roster_of(&["collector", "writer"]);
        let team = RoundRobinTeam::new(roster, Termination::max_messages(0));

        let outcome = team.run("never starts").await.unwrap();
        assert!(outcome.transcript.is_empty());
        assert_eq!(
            outcome.stop_reason,
            StopReason::MaxMessagesReached { limit: 0 }
        );
    }

    #[tokio::test]
    async fn test_generator_failure_names_the_participant() {
        let ok: Arc<dyn TextGenerator> = Arc::new(CountingGenerator);
        let failing: Arc<dyn TextGenerator> = Arc::new(FailingGenerator);

        let mut roster = Roster::new();
        roster.register(Participant::new("collector", "collect", ok.clone()));
        roster.register(Participant::new("writer", "write", failing));
        roster.register(Participant::new("seo", "optimize", ok));
        let team = RoundRobinTeam::new(roster, Termination::max_messages(10));

        let result = team.run("report").await;
        match result {
            Err(TeamError::Generation {
                participant,
                message,
            }) => {
                assert_eq!(participant, "writer");
                assert!(message.contains("connection refused"));
            }
            other => panic!("expected generation failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_dropped_observer_does_not_abort_the_run() {
        let roster = roster_of(&["collector", "writer"]);
        let team = RoundRobinTeam::new(roster, Termination::max_messages(4));

        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);

        let outcome = team.run_stream("report", tx).await.unwrap();
        assert_eq!(outcome.transcript.len(), 4);
    }
}
