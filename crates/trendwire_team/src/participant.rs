//! Participants and the text-generation seam.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::TeamResult;
use crate::types::Transcript;

/// Trait for the upstream text-completion dependency.
///
/// One generator instance is shared across a team; the participant's
/// instructions and the transcript so far are the only inputs that vary
/// per turn.
///
/// # Thread Safety
///
/// Generators must be `Send + Sync`; participants hold them behind `Arc`.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Produce the next message text.
    ///
    /// `instructions` is the participant's static instruction payload,
    /// `task` is the run task, and `transcript` carries every message
    /// produced so far.
    async fn generate(
        &self,
        instructions: &str,
        task: &str,
        transcript: &Transcript,
    ) -> TeamResult<String>;
}

/// A named member of a team.
///
/// Participants are configuration records: a name, a static instruction
/// payload, and a handle to the shared generator. They keep no state
/// between turns; everything a turn needs arrives with the transcript.
#[derive(Clone)]
pub struct Participant {
    name: String,
    instructions: String,
    generator: Arc<dyn TextGenerator>,
}

impl Participant {
    /// Create a new participant.
    pub fn new(
        name: impl Into<String>,
        instructions: impl Into<String>,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        Self {
            name: name.into(),
            instructions: instructions.into(),
            generator,
        }
    }

    /// Get the participant name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the static instruction payload.
    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// Run one turn against the transcript so far.
    pub(crate) async fn take_turn(&self, task: &str, transcript: &Transcript) -> TeamResult<String> {
        self.generator
            .generate(&self.instructions, task, transcript)
            .await
    }
}

impl std::fmt::Debug for Participant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Participant")
            .field("name", &self.name)
            .finish()
    }
}

/// Ordered collection of participants.
///
/// Registration order defines turn order.
#[derive(Debug, Default)]
pub struct Roster {
    participants: Vec<Participant>,
}

impl Roster {
    /// Create an empty roster.
    pub fn new() -> Self {
        Self {
            participants: Vec::new(),
        }
    }

    /// Register a participant at the end of the turn order.
    pub fn register(&mut self, participant: Participant) {
        debug!("Registering participant: {}", participant.name());
        self.participants.push(participant);
    }

    /// All participants in turn order.
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Get a participant by position in the turn order.
    pub fn get(&self, position: usize) -> Option<&Participant> {
        self.participants.get(position)
    }

    /// Get a participant by name.
    pub fn get_by_name(&self, name: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.name() == name)
    }

    /// Position of a participant in the turn order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.participants.iter().position(|p| p.name() == name)
    }

    /// All participant names in turn order.
    pub fn names(&self) -> Vec<&str> {
        self.participants.iter().map(|p| p.name()).collect()
    }

    /// Number of registered participants.
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Check if the roster is empty.
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoGenerator;

    #[async_trait]
    impl TextGenerator for EchoGenerator {
        async fn generate(
            &self,
            instructions: &str,
            task: &str,
            _transcript: &Transcript,
        ) -> TeamResult<String> {
            Ok(format!("{} | {}", instructions, task))
        }
    }

    #[tokio::test]
    async fn test_take_turn_passes_instructions_and_task() {
        let participant = Participant::new(
            "ContentWriter",
            "You write articles.",
            Arc::new(EchoGenerator),
        );

        let transcript = Transcript::new();
        let text = participant.take_turn("Cover ERP trends", &transcript).await.unwrap();
        assert_eq!(text, "You write articles. | Cover ERP trends");
    }

    #[test]
    fn test_roster_preserves_registration_order() {
        let generator: Arc<dyn TextGenerator> = Arc::new(EchoGenerator);
        let mut roster = Roster::new();
        assert!(roster.is_empty());

        roster.register(Participant::new("first", "a", generator.clone()));
        roster.register(Participant::new("second", "b", generator.clone()));
        roster.register(Participant::new("third", "c", generator));

        assert_eq!(roster.len(), 3);
        assert_eq!(roster.names(), vec!["first", "second", "third"]);
        assert_eq!(roster.get(1).unwrap().name(), "second");
        assert_eq!(roster.position("third"), Some(2));
        assert!(roster.position("missing").is_none());
    }

    #[test]
    fn test_roster_lookup_by_name() {
        let generator: Arc<dyn TextGenerator> = Arc::new(EchoGenerator);
        let mut roster = Roster::new();
        roster.register(Participant::new("FactChecker", "verify", generator));

        let found = roster.get_by_name("FactChecker");
        assert!(found.is_some());
        assert_eq!(found.unwrap().instructions(), "verify");
        assert!(roster.get_by_name("nonexistent").is_none());
    }
}
