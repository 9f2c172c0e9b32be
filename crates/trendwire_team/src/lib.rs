//! # trendwire_team
//!
//! Round-robin group chat engine for Trendwire.
//!
//! This crate provides the turn sequencing, termination evaluation, and
//! transcript handling that power a multi-participant report run.
//!
//! # Architecture
//!
//! - **Participants**: Named configuration records sharing one generator
//! - **Roster**: Ordered registry; registration order is turn order
//! - **RoundRobinTeam**: Hands out turns in strict rotation
//! - **Termination**: Message cap plus optional sentinel token
//! - **Transcript**: Append-only message record handed to the caller
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use trendwire_team::{Participant, Roster, RoundRobinTeam, Termination};
//!
//! let mut roster = Roster::new();
//! roster.register(Participant::new("TrendCollector", instructions, generator.clone()));
//! roster.register(Participant::new("ContentWriter", instructions, generator));
//!
//! let team = RoundRobinTeam::new(
//!     roster,
//!     Termination::max_messages(10).with_sentinel("TERMINATE"),
//! );
//!
//! let outcome = team.run("Latest ERP Industry Trends and Developments").await?;
//! println!("{}", outcome.stop_reason);
//! ```

pub mod error;
pub mod participant;
pub mod team;
pub mod termination;
pub mod types;

// Re-export main types for convenience
pub use error::{TeamError, TeamResult};
pub use participant::{Participant, Roster, TextGenerator};
pub use team::RoundRobinTeam;
pub use termination::Termination;
pub use types::{Message, RunOutcome, StopReason, Transcript};
