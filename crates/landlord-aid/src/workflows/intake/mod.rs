//! Multi-step intake form: answers, per-step validation, and address suggestions.

pub mod addresses;
pub mod domain;
pub mod form;
pub mod router;
pub mod validation;

#[cfg(test)]
mod tests;

pub use addresses::{AddressAutocomplete, AddressBook, AddressBookError};
pub use domain::{
    ApplicationData, ContactMethod, CostRange, RentalStatus, UnitInfo, REPAIR_CATALOG,
};
pub use form::{FormError, FormStep, IntakeForm};
pub use router::{addresses_router, ADDRESSES_PATH};
pub use validation::{validate_all, validate_step, FieldKey, StepErrors, ValidationError};
