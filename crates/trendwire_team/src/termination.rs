//! Run termination conditions.

use serde::{Deserialize, Serialize};

use crate::types::{StopReason, Transcript};

/// Conditions that end a run.
///
/// The message cap is mandatory; the sentinel is optional. Conditions are
/// OR-combined and evaluated after every appended message, sentinel first,
/// so when both fire on the same message the stop reason is the sentinel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Termination {
    max_messages: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    sentinel: Option<String>,
}

impl Termination {
    /// Create a termination condition with a message cap.
    pub fn max_messages(limit: usize) -> Self {
        Self {
            max_messages: limit,
            sentinel: None,
        }
    }

    /// Also stop when `token` appears in the latest message.
    ///
    /// The match is a case-sensitive substring check against the latest
    /// message only; a coincidental occurrence in prose ends the run.
    pub fn with_sentinel(mut self, token: impl Into<String>) -> Self {
        self.sentinel = Some(token.into());
        self
    }

    /// Get the message cap.
    pub fn limit(&self) -> usize {
        self.max_messages
    }

    /// Get the sentinel token, if configured.
    pub fn sentinel(&self) -> Option<&str> {
        self.sentinel.as_deref()
    }

    /// Evaluate the conditions against the transcript so far.
    pub fn check(&self, transcript: &Transcript) -> Option<StopReason> {
        if let (Some(token), Some(latest)) = (self.sentinel.as_deref(), transcript.latest()) {
            if latest.text.contains(token) {
                return Some(StopReason::SentinelMatched {
                    token: token.to_string(),
                    message_index: latest.index,
                });
            }
        }

        if transcript.len() >= self.max_messages {
            return Some(StopReason::MaxMessagesReached {
                limit: self.max_messages,
            });
        }

        None
    }
}
