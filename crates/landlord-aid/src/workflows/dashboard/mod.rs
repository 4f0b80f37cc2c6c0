//! Read-back dashboard for the most recently submitted application.

pub mod render;
pub mod views;

pub use render::render_text;
pub use views::{
    ApplicantSection, DashboardSummary, EditLink, FollowUp, MissingPrompt, PropertySection,
    RepairSection, UnitRow, UnitSection,
};

use serde::Serialize;

use super::eligibility::{format_dollars, ScoringMode};
use super::intake::domain::{ApplicationData, UnitInfo};
use super::intake::form::FormStep;
use super::submission::local_store::{LocalStore, LocalStoreError};

/// Follow-up window quoted when no eligibility score is shown.
pub const CONTACT_WINDOW_BUSINESS_DAYS: u8 = 2;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum Dashboard {
    Missing(MissingPrompt),
    Ready(DashboardSummary),
}

impl Dashboard {
    pub fn load(store: &dyn LocalStore, scoring: ScoringMode) -> Result<Self, LocalStoreError> {
        Ok(Self::build(store.load()?, scoring))
    }

    pub fn build(stored: Option<ApplicationData>, scoring: ScoringMode) -> Self {
        match stored {
            Some(data) => Dashboard::Ready(summarize(&data, scoring)),
            None => Dashboard::Missing(MissingPrompt::default()),
        }
    }

    pub fn summary(&self) -> Option<&DashboardSummary> {
        match self {
            Dashboard::Ready(summary) => Some(summary),
            Dashboard::Missing(_) => None,
        }
    }
}

/// Sum of every unit's rent; blank or unparsable values count as zero.
pub fn total_monthly_rent(units: &[UnitInfo]) -> f64 {
    units
        .iter()
        .map(|unit| unit.rent_amount().unwrap_or(0.0))
        .sum()
}

fn format_rent(amount: f64) -> String {
    if !(0.0..u32::MAX as f64).contains(&amount) {
        return format!("${amount:.2}");
    }
    let total_cents = (amount * 100.0).round() as u64;
    let dollars = format_dollars((total_cents / 100) as u32);
    match total_cents % 100 {
        0 => dollars,
        cents => format!("{dollars}.{cents:02}"),
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn occupancy(unit: &UnitInfo) -> &'static str {
    if unit.owner_occupied {
        "Owner occupied"
    } else if unit.vacant {
        "Vacant"
    } else {
        "Rented"
    }
}

fn summarize(data: &ApplicationData, scoring: ScoringMode) -> DashboardSummary {
    let total = total_monthly_rent(&data.units);
    let first_name = data.first_name.trim();
    let greeting = if first_name.is_empty() {
        "Welcome back!".to_string()
    } else {
        format!("Welcome back, {first_name}!")
    };

    let follow_up = match scoring.scorer() {
        Some(scorer) => {
            let assessment = scorer.assess(data);
            FollowUp::Assessed {
                status_label: assessment.status.label(),
                funding_label: assessment.funding.label(),
                next_steps: assessment.status.next_steps().to_vec(),
                assessment,
            }
        }
        None => FollowUp::Contact {
            message: format!(
                "Thank you! We will contact you within {CONTACT_WINDOW_BUSINESS_DAYS} business days."
            ),
        },
    };

    DashboardSummary {
        greeting,
        applicant: ApplicantSection {
            full_name: data.full_name(),
            email: non_empty(&data.email),
            phone: non_empty(&data.phone),
            preferred_contact: data.preferred_contact.map(|method| method.label()),
            edit: EditLink::to_step(FormStep::Personal, "Edit contact details"),
        },
        property: PropertySection {
            address: data.property_address.clone(),
            number_of_units: data.number_of_units.clone(),
            rental_status: data
                .rented_out
                .map(|status| status.label())
                .unwrap_or("Not provided"),
            total_monthly_rent: total,
            total_monthly_rent_label: format_rent(total),
            edit: EditLink::to_step(FormStep::Property, "Edit property details"),
        },
        units: UnitSection {
            units: data
                .units
                .iter()
                .map(|unit| UnitRow {
                    unit_number: unit.unit_number.clone(),
                    monthly_rent: unit.monthly_rent.clone(),
                    occupancy: occupancy(unit),
                })
                .collect(),
            edit: EditLink::to_step(FormStep::Rental, "Edit unit details"),
        },
        repairs: RepairSection {
            repair_types: data.repair_type.clone(),
            estimated_cost: data
                .estimated_cost
                .map(|cost| cost.label())
                .unwrap_or("Not provided"),
        },
        follow_up,
    }
}
