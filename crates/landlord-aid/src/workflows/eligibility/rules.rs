use serde::Serialize;

use super::super::intake::domain::ApplicationData;

pub(crate) const LOCATION_POINTS: u8 = 25;
pub(crate) const OCCUPANCY_POINTS: u8 = 20;
pub(crate) const MULTI_UNIT_POINTS: u8 = 15;
pub(crate) const REPAIR_SCOPE_POINTS: u8 = 15;

/// Signals the heuristic looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityFactor {
    Location,
    Occupancy,
    MultiUnit,
    RepairScope,
}

/// One factor's contribution, kept so the dashboard can explain the score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreComponent {
    pub factor: EligibilityFactor,
    pub points: u8,
    pub notes: String,
}

pub(crate) fn score_components(data: &ApplicationData) -> Vec<ScoreComponent> {
    let mut components = Vec::with_capacity(4);

    let address = &data.property_address;
    if address.to_lowercase().contains("philadelphia") || address.contains("PA") {
        components.push(ScoreComponent {
            factor: EligibilityFactor::Location,
            points: LOCATION_POINTS,
            notes: "property is inside the Philadelphia program area".to_string(),
        });
    }

    if let Some(status) = data.rented_out.filter(|status| status.is_income_producing()) {
        components.push(ScoreComponent {
            factor: EligibilityFactor::Occupancy,
            points: OCCUPANCY_POINTS,
            notes: status.label().to_lowercase(),
        });
    }

    if let Some(count) = data.unit_count().filter(|count| *count >= 2) {
        components.push(ScoreComponent {
            factor: EligibilityFactor::MultiUnit,
            points: MULTI_UNIT_POINTS,
            notes: format!("{count} rental units"),
        });
    }

    let repairs = data.repair_type.len();
    if repairs >= 3 {
        components.push(ScoreComponent {
            factor: EligibilityFactor::RepairScope,
            points: REPAIR_SCOPE_POINTS,
            notes: format!("{repairs} repair categories requested"),
        });
    }

    components
}
