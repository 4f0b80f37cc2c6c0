use std::sync::Arc;

use crate::workflows::intake::addresses::AddressBook;
use crate::workflows::intake::domain::{ApplicationData, CostRange, RentalStatus};
use crate::workflows::intake::form::{FormStep, IntakeForm};

pub(super) fn address_book() -> Arc<AddressBook> {
    Arc::new(AddressBook::new([
        "123 Main St, Philadelphia, PA 19102",
        "1234 Market St, Philadelphia, PA, 19107",
        "125 Spruce St, Philadelphia, PA, 19106",
    ]))
}

pub(super) fn blank_form() -> IntakeForm {
    IntakeForm::new(address_book())
}

/// Answers that pass every step.
pub(super) fn complete_application() -> ApplicationData {
    let mut data = ApplicationData {
        first_name: "Renee".to_string(),
        last_name: "Okafor".to_string(),
        email: "renee@example.com".to_string(),
        phone: "(215) 555-0123".to_string(),
        property_address: "123 Main St, Philadelphia, PA 19102".to_string(),
        rented_out: Some(RentalStatus::Yes),
        repair_type: vec![
            "Plumbing".to_string(),
            "Electrical".to_string(),
            "Roofing".to_string(),
        ],
        estimated_cost: Some(CostRange::From51kTo75k),
        ..ApplicationData::default()
    };
    data.set_number_of_units("2");
    data.units[0].monthly_rent = "1200".to_string();
    data.units[1].set_vacant(true);
    data
}

pub(super) fn form_at(step: FormStep, data: ApplicationData) -> IntakeForm {
    let param = step.number().to_string();
    IntakeForm::resume(address_book(), Some(data), Some(param.as_str()))
}
