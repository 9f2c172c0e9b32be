//! Trend-team role definitions.

use serde::{Deserialize, Serialize};

use crate::prompts;

/// Roles in the trend-report pipeline, in hand-off order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendRole {
    Collector,
    Writer,
    SeoOptimizer,
    FactChecker,
}

impl TrendRole {
    /// Get the participant name for this role.
    pub fn name(&self) -> &'static str {
        match self {
            TrendRole::Collector => "TrendCollector",
            TrendRole::Writer => "ContentWriter",
            TrendRole::SeoOptimizer => "SEOOptimizer",
            TrendRole::FactChecker => "FactChecker",
        }
    }

    /// Get the display title for this role.
    pub fn title(&self) -> &'static str {
        match self {
            TrendRole::Collector => "Trend Researcher",
            TrendRole::Writer => "Content Creator",
            TrendRole::SeoOptimizer => "SEO Specialist",
            TrendRole::FactChecker => "Verification Expert",
        }
    }

    /// Get a brief description of what this role produces.
    pub fn description(&self) -> &'static str {
        match self {
            TrendRole::Collector => "Identifies current and upcoming ERP industry trends",
            TrendRole::Writer => "Creates fresh, forward-looking content",
            TrendRole::SeoOptimizer => "Optimizes content with temporal keywords",
            TrendRole::FactChecker => "Verifies accuracy and timeliness of the content",
        }
    }

    /// Get the icon shown next to this role's output.
    pub fn icon(&self) -> &'static str {
        match self {
            TrendRole::Collector => "🔍",
            TrendRole::Writer => "✍️",
            TrendRole::SeoOptimizer => "🚀",
            TrendRole::FactChecker => "✅",
        }
    }

    /// Get the accent color associated with this role.
    pub fn color(&self) -> &'static str {
        match self {
            TrendRole::Collector => "#FF6B6B",
            TrendRole::Writer => "#4ECDC4",
            TrendRole::SeoOptimizer => "#45B7D1",
            TrendRole::FactChecker => "#96CEB4",
        }
    }

    /// Render the instruction payload for this role.
    pub fn instructions(&self) -> String {
        prompts::instructions(*self)
    }

    /// All roles in hand-off order.
    pub fn all() -> Vec<Self> {
        vec![
            TrendRole::Collector,
            TrendRole::Writer,
            TrendRole::SeoOptimizer,
            TrendRole::FactChecker,
        ]
    }

    /// Look up a role by participant name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().into_iter().find(|role| role.name() == name)
    }
}

impl std::fmt::Display for TrendRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles_are_in_hand_off_order() {
        let names: Vec<&str> = TrendRole::all().iter().map(|r| r.name()).collect();
        assert_eq!(
            names,
            vec!["TrendCollector", "ContentWriter", "SEOOptimizer", "FactChecker"]
        );
    }

    #[test]
    fn test_every_role_has_a_complete_profile() {
        for role in TrendRole::all() {
            assert!(!role.title().is_empty());
            assert!(!role.description().is_empty());
            assert!(!role.icon().is_empty());
            assert!(role.color().starts_with('#'));
        }
    }

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(TrendRole::from_name("SEOOptimizer"), Some(TrendRole::SeoOptimizer));
        assert_eq!(TrendRole::from_name("FactChecker"), Some(TrendRole::FactChecker));
        assert!(TrendRole::from_name("Unknown").is_none());
    }
}
