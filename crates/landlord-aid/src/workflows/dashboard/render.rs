use std::fmt::Write as _;

use super::views::{DashboardSummary, FollowUp, MissingPrompt};
use super::Dashboard;

/// Plain-text rendering used by the command line.
pub fn render_text(dashboard: &Dashboard) -> String {
    match dashboard {
        Dashboard::Missing(prompt) => render_missing(prompt),
        Dashboard::Ready(summary) => render_summary(summary),
    }
}

fn render_missing(prompt: &MissingPrompt) -> String {
    format!(
        "{}\n{}\n{}: {}\n",
        prompt.title, prompt.message, prompt.action_label, prompt.action_href
    )
}

fn render_summary(summary: &DashboardSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Government Aid Assessment Dashboard");
    let _ = writeln!(out, "{}", summary.greeting);

    match &summary.follow_up {
        FollowUp::Assessed {
            assessment,
            status_label,
            funding_label,
            next_steps,
        } => {
            let _ = writeln!(
                out,
                "\n{} (score {}/100) | potential aid {}",
                status_label, assessment.score, funding_label
            );
            for step in next_steps {
                let _ = writeln!(out, "- {step}");
            }
        }
        FollowUp::Contact { message } => {
            let _ = writeln!(out, "\n{message}");
        }
    }

    let applicant = &summary.applicant;
    let _ = writeln!(out, "\nApplicant [{}]", applicant.edit.href);
    let _ = writeln!(out, "- Name: {}", applicant.full_name);
    if let Some(email) = &applicant.email {
        let _ = writeln!(out, "- Email: {email}");
    }
    if let Some(phone) = &applicant.phone {
        let _ = writeln!(out, "- Phone: {phone}");
    }
    if let Some(preferred) = applicant.preferred_contact {
        let _ = writeln!(out, "- Preferred contact: {preferred}");
    }

    let property = &summary.property;
    let _ = writeln!(out, "\nProperty Information [{}]", property.edit.href);
    let _ = writeln!(out, "- Address: {}", property.address);
    let _ = writeln!(out, "- Number of units: {}", property.number_of_units);
    let _ = writeln!(out, "- Rental status: {}", property.rental_status);
    let _ = writeln!(out, "- Total monthly rent: {}", property.total_monthly_rent_label);

    let _ = writeln!(out, "\nUnit Details [{}]", summary.units.edit.href);
    if summary.units.units.is_empty() {
        let _ = writeln!(out, "- none listed");
    }
    for unit in &summary.units.units {
        let _ = writeln!(
            out,
            "- {}: ${}/month ({})",
            unit.unit_number, unit.monthly_rent, unit.occupancy
        );
    }

    let _ = writeln!(out, "\nRepair Details");
    if summary.repairs.repair_types.is_empty() {
        let _ = writeln!(out, "- Repair types: none selected");
    } else {
        let _ = writeln!(
            out,
            "- Repair types: {}",
            summary.repairs.repair_types.join(", ")
        );
    }
    let _ = writeln!(out, "- Estimated cost: {}", summary.repairs.estimated_cost);

    out
}
