//! Assembly of the trend analysis team.
//!
//! Wires the four [`TrendRole`]s into a [`RoundRobinTeam`] sharing a single
//! text generator, with the standard stop conditions applied.

use std::sync::Arc;

use tracing::info;

use trendwire_team::{Participant, RoundRobinTeam, Roster, Termination, TextGenerator};

use crate::roles::TrendRole;

/// Token the fact checker emits when the workflow is complete
pub const SENTINEL: &str = "TERMINATE";

/// Message cap for a trend analysis run
pub const DEFAULT_MAX_MESSAGES: usize = 10;

/// Standard stop conditions: sentinel match or message cap.
pub fn default_termination() -> Termination {
    Termination::max_messages(DEFAULT_MAX_MESSAGES).with_sentinel(SENTINEL)
}

/// Build the trend analysis team with the standard stop conditions.
pub fn build_trend_team(generator: Arc<dyn TextGenerator>) -> RoundRobinTeam {
    build_trend_team_with(generator, default_termination())
}

/// Build the trend analysis team with custom stop conditions.
///
/// Participants are registered in hand-off order, so the collector always
/// opens the run and the fact checker closes each cycle.
pub fn build_trend_team_with(
    generator: Arc<dyn TextGenerator>,
    termination: Termination,
) -> RoundRobinTeam {
    let mut roster = Roster::new();
    for role in TrendRole::all() {
        roster.register(Participant::new(
            role.name(),
            role.instructions(),
            Arc::clone(&generator),
        ));
    }

    info!(
        "Assembled trend team: {} participants, cap {}",
        roster.len(),
        termination.limit()
    );

    RoundRobinTeam::new(roster, termination)
}
