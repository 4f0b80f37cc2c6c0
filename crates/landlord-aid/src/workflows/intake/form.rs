use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::debug;

use super::addresses::{AddressAutocomplete, AddressBook};
use super::domain::{is_catalog_repair, ApplicationData, ContactMethod, CostRange, RentalStatus};
use super::validation::{validate_step, FieldKey, StepErrors, ValidationError};

/// The four ordered pages of the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormStep {
    Personal,
    Property,
    Rental,
    Repairs,
}

impl FormStep {
    pub const ALL: [FormStep; 4] = [
        FormStep::Personal,
        FormStep::Property,
        FormStep::Rental,
        FormStep::Repairs,
    ];

    pub const fn number(self) -> u8 {
        match self {
            FormStep::Personal => 1,
            FormStep::Property => 2,
            FormStep::Rental => 3,
            FormStep::Repairs => 4,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|step| step.number() == number)
    }

    /// Parse an external `step` parameter; anything unrecognized starts at step 1.
    pub fn from_param(raw: Option<&str>) -> Self {
        raw.and_then(|value| value.trim().parse::<u8>().ok())
            .and_then(Self::from_number)
            .unwrap_or(FormStep::Personal)
    }

    pub const fn title(self) -> &'static str {
        match self {
            FormStep::Personal => "Personal Information",
            FormStep::Property => "Property Details",
            FormStep::Rental => "Rental Information",
            FormStep::Repairs => "Repair Details",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            FormStep::Personal => "Tell us about yourself",
            FormStep::Property => "Your rental property information",
            FormStep::Rental => "Unit details and rental status",
            FormStep::Repairs => "What repairs do you need?",
        }
    }

    pub fn following(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn preceding(self) -> Option<Self> {
        self.number()
            .checked_sub(1)
            .and_then(Self::from_number)
    }
}

/// Failures raised by form operations other than ordinary field validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("the application can only be submitted from the final step")]
    NotAtFinalStep,
    #[error("step {} has {} validation error(s)", .step.number(), .errors.len())]
    Invalid { step: FormStep, errors: StepErrors },
    #[error("unit {0} does not exist")]
    UnknownUnit(usize),
    #[error("'{0}' is not an offered repair type")]
    UnknownRepairType(String),
    #[error("{} cannot be preferred without a value", .0.label())]
    ContactUnavailable(ContactMethod),
}

/// Owns the applicant's answers and the current step for one form session.
#[derive(Debug, Clone)]
pub struct IntakeForm {
    step: FormStep,
    data: ApplicationData,
    errors: StepErrors,
    autocomplete: AddressAutocomplete,
}

impl IntakeForm {
    pub fn new(addresses: Arc<AddressBook>) -> Self {
        Self::resume(addresses, None, None)
    }

    /// Open the form, restoring saved answers when present and jumping to a requested step.
    pub fn resume(
        addresses: Arc<AddressBook>,
        restored: Option<ApplicationData>,
        step_param: Option<&str>,
    ) -> Self {
        let step = FormStep::from_param(step_param);
        let data = restored.unwrap_or_default();
        debug!(step = step.number(), restored = !data.first_name.is_empty(), "intake form opened");
        Self {
            step,
            data,
            errors: StepErrors::new(),
            autocomplete: AddressAutocomplete::new(addresses),
        }
    }

    pub fn step(&self) -> FormStep {
        self.step
    }

    pub fn data(&self) -> &ApplicationData {
        &self.data
    }

    pub fn errors(&self) -> &StepErrors {
        &self.errors
    }

    pub fn error_for(&self, field: FieldKey) -> Option<&ValidationError> {
        self.errors.get(&field)
    }

    pub fn autocomplete(&self) -> &AddressAutocomplete {
        &self.autocomplete
    }

    /// Advance one step if the current step validates.
    pub fn next(&mut self) -> Result<FormStep, FormError> {
        self.check_current()?;
        if let Some(following) = self.step.following() {
            debug!(from = self.step.number(), to = following.number(), "form advanced");
            self.step = following;
        }
        Ok(self.step)
    }

    pub fn previous(&mut self) -> FormStep {
        if let Some(preceding) = self.step.preceding() {
            self.step = preceding;
        }
        self.step
    }

    /// Jump straight to `step` without validating anything in between.
    pub fn edit(&mut self, step: FormStep) {
        debug!(to = step.number(), "form jumped for edit");
        self.errors.clear();
        self.step = step;
    }

    /// Finalize the answers for submission; only allowed on the last step.
    pub fn submit(&mut self) -> Result<ApplicationData, FormError> {
        if self.step != FormStep::Repairs {
            return Err(FormError::NotAtFinalStep);
        }
        self.check_current()?;
        Ok(self.data.clone())
    }

    fn check_current(&mut self) -> Result<(), FormError> {
        let errors = validate_step(self.step, &self.data);
        if errors.is_empty() {
            self.errors.clear();
            Ok(())
        } else {
            self.errors = errors.clone();
            Err(FormError::Invalid {
                step: self.step,
                errors,
            })
        }
    }

    fn clear_errors(&mut self, fields: &[FieldKey]) {
        for field in fields {
            self.errors.remove(field);
        }
    }

    pub fn set_first_name(&mut self, value: impl Into<String>) {
        self.data.first_name = value.into();
    }

    pub fn set_last_name(&mut self, value: impl Into<String>) {
        self.data.last_name = value.into();
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.data.set_email(value);
        self.clear_errors(&[FieldKey::Email, FieldKey::Contact]);
    }

    pub fn set_phone(&mut self, value: impl Into<String>) {
        self.data.set_phone(value);
        self.clear_errors(&[FieldKey::Phone, FieldKey::Contact]);
    }

    pub fn set_preferred_contact(&mut self, method: Option<ContactMethod>) -> Result<(), FormError> {
        if let Some(method) = method {
            if !self.data.contact_available(method) {
                return Err(FormError::ContactUnavailable(method));
            }
        }
        self.data.preferred_contact = method;
        Ok(())
    }

    /// Typing in the address field; refreshes the suggestion list.
    pub fn set_property_address(&mut self, value: impl Into<String>) {
        self.data.property_address = value.into();
        self.autocomplete.update(&self.data.property_address);
        self.clear_errors(&[FieldKey::Address]);
    }

    pub fn focus_address(&mut self) {
        self.autocomplete.focus(&self.data.property_address);
    }

    pub fn blur_address(&mut self, now: Instant) {
        self.autocomplete.blur(now);
    }

    /// Take the suggestion at `index` verbatim as the address.
    pub fn select_address_suggestion(&mut self, index: usize, now: Instant) -> Option<&str> {
        let chosen = self.autocomplete.select(index, now)?;
        self.data.property_address = chosen;
        self.clear_errors(&[FieldKey::Address]);
        Some(self.data.property_address.as_str())
    }

    pub fn set_number_of_units(&mut self, value: impl Into<String>) {
        self.data.set_number_of_units(value);
        self.errors
            .retain(|field, _| !matches!(field, FieldKey::NumberOfUnits | FieldKey::UnitRent(_)));
    }

    pub fn set_unit_number(&mut self, index: usize, value: impl Into<String>) -> Result<(), FormError> {
        let unit = self
            .data
            .units
            .get_mut(index)
            .ok_or(FormError::UnknownUnit(index))?;
        unit.unit_number = value.into();
        Ok(())
    }

    /// Rent edits are ignored while the unit is vacant or owner-occupied.
    pub fn set_unit_rent(&mut self, index: usize, value: impl Into<String>) -> Result<(), FormError> {
        let unit = self
            .data
            .units
            .get_mut(index)
            .ok_or(FormError::UnknownUnit(index))?;
        if unit.rent_editable() {
            unit.monthly_rent = value.into();
        }
        self.clear_errors(&[FieldKey::UnitRent(index)]);
        Ok(())
    }

    pub fn set_unit_vacant(&mut self, index: usize, vacant: bool) -> Result<(), FormError> {
        let unit = self
            .data
            .units
            .get_mut(index)
            .ok_or(FormError::UnknownUnit(index))?;
        unit.set_vacant(vacant);
        self.clear_errors(&[FieldKey::UnitRent(index)]);
        Ok(())
    }

    pub fn set_unit_owner_occupied(
        &mut self,
        index: usize,
        owner_occupied: bool,
    ) -> Result<(), FormError> {
        let unit = self
            .data
            .units
            .get_mut(index)
            .ok_or(FormError::UnknownUnit(index))?;
        unit.set_owner_occupied(owner_occupied);
        self.clear_errors(&[FieldKey::UnitRent(index)]);
        Ok(())
    }

    pub fn set_rented_out(&mut self, status: RentalStatus) {
        self.data.rented_out = Some(status);
    }

    pub fn toggle_repair(&mut self, repair: &str, checked: bool) -> Result<(), FormError> {
        if !is_catalog_repair(repair) {
            return Err(FormError::UnknownRepairType(repair.to_string()));
        }
        let selected = self.data.repair_type.iter().any(|existing| existing == repair);
        match (checked, selected) {
            (true, false) => self.data.repair_type.push(repair.to_string()),
            (false, true) => self.data.repair_type.retain(|existing| existing != repair),
            _ => {}
        }
        Ok(())
    }

    pub fn set_estimated_cost(&mut self, cost: Option<CostRange>) {
        self.data.estimated_cost = cost;
        self.clear_errors(&[FieldKey::EstimatedCost]);
    }
}
