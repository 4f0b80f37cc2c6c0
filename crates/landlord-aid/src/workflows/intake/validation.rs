use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use super::domain::ApplicationData;
use super::form::FormStep;

/// Field a validation error is attached to; editing the field clears its error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case", tag = "field", content = "unit")]
pub enum FieldKey {
    Contact,
    Email,
    Phone,
    Address,
    NumberOfUnits,
    UnitRent(usize),
    EstimatedCost,
}

/// Inline validation failures shown beside the offending field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize)]
#[serde(rename_all = "snake_case", tag = "code")]
pub enum ValidationError {
    #[error("please provide an email address or a phone number")]
    ContactMissing,
    #[error("please enter a valid email address")]
    InvalidEmail,
    #[error("please enter a valid 10-digit phone number")]
    InvalidPhone,
    #[error("property address is required")]
    AddressRequired,
    #[error("please select the number of units")]
    UnitsRequired,
    #[error("monthly rent is required for unit {}", .unit + 1)]
    RentRequired { unit: usize },
    #[error("please select an estimated repair cost")]
    CostRequired,
}

/// Errors for one step, keyed by field.
pub type StepErrors = BTreeMap<FieldKey, ValidationError>;

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"))
}

pub fn is_valid_email(value: &str) -> bool {
    email_pattern().is_match(value)
}

pub fn is_valid_phone(value: &str) -> bool {
    value.chars().filter(char::is_ascii_digit).count() == 10
}

/// Run the validator for `step`. Pure: the same data always yields the same errors.
pub fn validate_step(step: FormStep, data: &ApplicationData) -> StepErrors {
    match step {
        FormStep::Personal => validate_contact(data),
        FormStep::Property => validate_property(data),
        FormStep::Rental => validate_units(data),
        FormStep::Repairs => validate_repairs(data),
    }
}

/// Every step's errors merged, used when a whole payload arrives at once.
pub fn validate_all(data: &ApplicationData) -> StepErrors {
    FormStep::ALL
        .into_iter()
        .flat_map(|step| validate_step(step, data))
        .collect()
}

fn validate_contact(data: &ApplicationData) -> StepErrors {
    let mut errors = StepErrors::new();
    let email = data.email.trim();
    let phone = data.phone.trim();

    if email.is_empty() && phone.is_empty() {
        errors.insert(FieldKey::Contact, ValidationError::ContactMissing);
        return errors;
    }
    if !email.is_empty() && !is_valid_email(email) {
        errors.insert(FieldKey::Email, ValidationError::InvalidEmail);
    }
    if !phone.is_empty() && !is_valid_phone(phone) {
        errors.insert(FieldKey::Phone, ValidationError::InvalidPhone);
    }
    errors
}

fn validate_property(data: &ApplicationData) -> StepErrors {
    let mut errors = StepErrors::new();
    if data.property_address.trim().is_empty() {
        errors.insert(FieldKey::Address, ValidationError::AddressRequired);
    }
    if data.unit_count().is_none() {
        errors.insert(FieldKey::NumberOfUnits, ValidationError::UnitsRequired);
    }
    errors
}

fn validate_units(data: &ApplicationData) -> StepErrors {
    data.units
        .iter()
        .enumerate()
        .filter(|(_, unit)| unit.rent_editable())
        .filter(|(_, unit)| !unit.rent_amount().is_some_and(|rent| rent > 0.0))
        .map(|(index, _)| {
            (
                FieldKey::UnitRent(index),
                ValidationError::RentRequired { unit: index },
            )
        })
        .collect()
}

fn validate_repairs(data: &ApplicationData) -> StepErrors {
    let mut errors = StepErrors::new();
    if data.estimated_cost.is_none() {
        errors.insert(FieldKey::EstimatedCost, ValidationError::CostRequired);
    }
    errors
}
