//! Core types for team runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single transcript message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Name of the participant that produced this message
    pub participant: String,
    /// Message text as returned by the generator
    pub text: String,
    /// Zero-based position in the transcript
    pub index: usize,
    /// When the message was created
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Create a new message at the given transcript position.
    pub fn new(participant: impl Into<String>, text: impl Into<String>, index: usize) -> Self {
        Self {
            participant: participant.into(),
            text: text.into(),
            index,
            created_at: Utc::now(),
        }
    }
}

/// Append-only record of the messages produced during a run.
///
/// Messages are never reordered or mutated after append. During a run the
/// sequencer is the only writer; everyone else reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    /// Append the next message, assigning the next sequence index.
    pub fn push(&mut self, participant: impl Into<String>, text: impl Into<String>) -> &Message {
        let index = self.messages.len();
        self.messages.push(Message::new(participant, text, index));
        &self.messages[index]
    }

    /// All messages in append order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages appended so far.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Check if the transcript is empty.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The most recently appended message.
    pub fn latest(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// The last message produced by the named participant.
    pub fn last_from(&self, participant: &str) -> Option<&Message> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.participant == participant)
    }
}

/// Why a run stopped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The sentinel token appeared in the latest message
    SentinelMatched { token: String, message_index: usize },
    /// The transcript reached the configured message cap
    MaxMessagesReached { limit: usize },
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StopReason::SentinelMatched {
                token,
                message_index,
            } => write!(f, "sentinel '{}' matched in message {}", token, message_index),
            StopReason::MaxMessagesReached { limit } => {
                write!(f, "message limit of {} reached", limit)
            }
        }
    }
}

/// Outputs of a completed run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOutcome {
    /// Unique run ID (UUID)
    #[serde(rename = "runId")]
    pub run_id: String,
    /// Task the team was asked to work on
    pub task: String,
    /// Every message produced, in turn order
    pub transcript: Transcript,
    /// Why the run stopped
    #[serde(rename = "stopReason")]
    pub stop_reason: StopReason,
    /// When the run started
    #[serde(rename = "startedAt")]
    pub started_at: DateTime<Utc>,
    /// When the run completed
    #[serde(rename = "completedAt")]
    pub completed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_creation() {
        let msg = Message::new("TrendCollector", "Q3 numbers are in", 0);
        assert_eq!(msg.participant, "TrendCollector");
        assert_eq!(msg.text, "Q3 numbers are in");
        assert_eq!(msg.index, 0);
    }

    #[test]
    fn test_transcript_assigns_sequential_indexes() {
        let mut transcript = Transcript::new();
        assert!(transcript.is_empty());

        transcript.push("a", "first");
        transcript.push("b", "second");
        transcript.push("a", "third");

        assert_eq!(transcript.len(), 3);
        let indexes: Vec<usize> = transcript.messages().iter().map(|m| m.index).collect();
        assert_eq!(indexes, vec![0, 1, 2]);
    }

    #[test]
    fn test_transcript_latest_and_last_from() {
        let mut transcript = Transcript::new();
        transcript.push("a", "first");
        transcript.push("b", "second");
        transcript.push("a", "third");

        assert_eq!(transcript.latest().unwrap().text, "third");
        assert_eq!(transcript.last_from("a").unwrap().text, "third");
        assert_eq!(transcript.last_from("b").unwrap().text, "second");
        assert!(transcript.last_from("c").is_none());
    }

    #[test]
    fn test_stop_reason_display() {
        let sentinel = StopReason::SentinelMatched {
            token: "TERMINATE".to_string(),
            message_index: 5,
        };
        assert_eq!(sentinel.to_string(), "sentinel 'TERMINATE' matched in message 5");

        let cap = StopReason::MaxMessagesReached { limit: 10 };
        assert_eq!(cap.to_string(), "message limit of 10 reached");
    }
}
