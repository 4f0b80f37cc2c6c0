use serde::Serialize;

use super::super::eligibility::Assessment;
use super::super::intake::form::FormStep;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditLink {
    pub step: u8,
    pub label: &'static str,
    pub href: String,
}

impl EditLink {
    pub(crate) fn to_step(step: FormStep, label: &'static str) -> Self {
        Self {
            step: step.number(),
            label,
            href: format!("/qualify?step={}", step.number()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicantSection {
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub preferred_contact: Option<&'static str>,
    pub edit: EditLink,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertySection {
    pub address: String,
    pub number_of_units: String,
    pub rental_status: &'static str,
    pub total_monthly_rent: f64,
    pub total_monthly_rent_label: String,
    pub edit: EditLink,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitRow {
    pub unit_number: String,
    pub monthly_rent: String,
    pub occupancy: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitSection {
    pub units: Vec<UnitRow>,
    pub edit: EditLink,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepairSection {
    pub repair_types: Vec<String>,
    pub estimated_cost: &'static str,
}

/// What the applicant is told happens next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum FollowUp {
    Assessed {
        assessment: Assessment,
        status_label: &'static str,
        funding_label: String,
        next_steps: Vec<&'static str>,
    },
    Contact {
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub greeting: String,
    pub applicant: ApplicantSection,
    pub property: PropertySection,
    pub units: UnitSection,
    pub repairs: RepairSection,
    pub follow_up: FollowUp,
}

/// Shown instead of the dashboard when nothing has been submitted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingPrompt {
    pub title: &'static str,
    pub message: &'static str,
    pub action_label: &'static str,
    pub action_href: &'static str,
}

impl Default for MissingPrompt {
    fn default() -> Self {
        Self {
            title: "No Assessment Data Found",
            message: "Please complete the initial property assessment first.",
            action_label: "Start Assessment",
            action_href: "/qualify",
        }
    }
}
