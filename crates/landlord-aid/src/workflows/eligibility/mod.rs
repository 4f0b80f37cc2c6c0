//! Informational eligibility heuristic shown on the dashboard.
//!
//! Scoring is optional: deployments that only collect leads run with [`ScoringMode::Disabled`]
//! and the dashboard falls back to a static follow-up message.

mod policy;
mod rules;

pub use policy::{format_dollars, EligibilityStatus, FundingEstimate, StatusTone};
pub use rules::{EligibilityFactor, ScoreComponent};

use serde::Serialize;

use super::intake::domain::ApplicationData;

/// Result of scoring one application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assessment {
    pub score: u8,
    pub status: EligibilityStatus,
    pub funding: FundingEstimate,
    pub components: Vec<ScoreComponent>,
}

impl Assessment {
    pub fn status_label(&self) -> &'static str {
        self.status.label()
    }

    pub fn funding_label(&self) -> String {
        self.funding.label()
    }
}

/// Maps completed answers to an assessment. Implementations must be pure.
pub trait EligibilityScorer: Send + Sync {
    fn assess(&self, data: &ApplicationData) -> Assessment;
}

/// Additive point heuristic over location, occupancy, unit count and repair scope.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicScorer;

impl EligibilityScorer for HeuristicScorer {
    fn assess(&self, data: &ApplicationData) -> Assessment {
        let components = rules::score_components(data);
        let score = components
            .iter()
            .map(|component| component.points)
            .sum::<u8>()
            .min(100);
        let status = EligibilityStatus::from_score(score);
        let funding = policy::estimate_funding(status, data.estimated_cost);

        Assessment {
            score,
            status,
            funding,
            components,
        }
    }
}

/// Whether this deployment scores applications at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoringMode {
    #[default]
    Heuristic,
    Disabled,
}

impl ScoringMode {
    pub fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "none" | "disabled" | "off" | "false" => ScoringMode::Disabled,
            _ => ScoringMode::Heuristic,
        }
    }

    pub fn scorer(self) -> Option<&'static dyn EligibilityScorer> {
        match self {
            ScoringMode::Heuristic => Some(&HeuristicScorer),
            ScoringMode::Disabled => None,
        }
    }
}
