//! Error types for the team engine.

use thiserror::Error;

/// Result type alias for team operations.
pub type TeamResult<T> = Result<T, TeamError>;

/// Errors that can occur while running a team.
#[derive(Error, Debug)]
pub enum TeamError {
    #[error("Team has no participants")]
    EmptyRoster,

    #[error("Generator error: {0}")]
    Upstream(String),

    #[error("Participant generation failed: {participant} - {message}")]
    Generation { participant: String, message: String },
}

impl TeamError {
    /// Create a generation failure for a participant's turn.
    pub fn generation(participant: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Generation {
            participant: participant.into(),
            message: message.into(),
        }
    }
}
