use super::common::*;
use crate::workflows::intake::domain::ApplicationData;
use crate::workflows::intake::form::FormStep;
use crate::workflows::intake::validation::{
    is_valid_email, is_valid_phone, validate_all, validate_step, FieldKey, ValidationError,
};

#[test]
fn complete_application_passes_every_step() {
    let data = complete_application();
    for step in FormStep::ALL {
        assert!(validate_step(step, &data).is_empty(), "{step:?} should pass");
    }
    assert!(validate_all(&data).is_empty());
}

#[test]
fn contact_rules_cover_email_and_phone_shapes() {
    assert!(is_valid_email("owner@rowhome.org"));
    assert!(!is_valid_email("owner@rowhome"));
    assert!(!is_valid_email("owner rowhome@x.org"));
    assert!(is_valid_phone("(215) 555-0123"));
    assert!(!is_valid_phone("555-0123"));
    assert!(!is_valid_phone("1-215-555-0123"));

    let mut data = ApplicationData {
        email: "not-an-email".to_string(),
        phone: "12345".to_string(),
        ..ApplicationData::default()
    };
    let errors = validate_step(FormStep::Personal, &data);
    assert_eq!(errors.get(&FieldKey::Email), Some(&ValidationError::InvalidEmail));
    assert_eq!(errors.get(&FieldKey::Phone), Some(&ValidationError::InvalidPhone));
    assert!(errors.get(&FieldKey::Contact).is_none());

    data.email.clear();
    data.phone = "215.555.0123".to_string();
    assert!(validate_step(FormStep::Personal, &data).is_empty());
}

#[test]
fn property_step_requires_address_and_units() {
    let mut data = ApplicationData {
        property_address: "   ".to_string(),
        number_of_units: "0".to_string(),
        ..ApplicationData::default()
    };
    let errors = validate_step(FormStep::Property, &data);
    assert_eq!(errors.get(&FieldKey::Address), Some(&ValidationError::AddressRequired));
    assert_eq!(
        errors.get(&FieldKey::NumberOfUnits),
        Some(&ValidationError::UnitsRequired)
    );

    data.property_address = "301 Chestnut St".to_string();
    data.set_number_of_units("1");
    assert!(validate_step(FormStep::Property, &data).is_empty());
}

#[test]
fn rent_errors_are_reported_per_unit() {
    let mut data = complete_application();
    data.set_number_of_units("4");
    data.units[1].set_vacant(false);
    data.units[1].monthly_rent = "-50".to_string();
    data.units[2].monthly_rent = "0".to_string();
    data.units[3].set_owner_occupied(true);

    let errors = validate_step(FormStep::Rental, &data);

    assert_eq!(errors.len(), 2);
    assert_eq!(
        errors.get(&FieldKey::UnitRent(1)),
        Some(&ValidationError::RentRequired { unit: 1 })
    );
    assert_eq!(
        errors.get(&FieldKey::UnitRent(2)),
        Some(&ValidationError::RentRequired { unit: 2 })
    );
    assert_eq!(
        ValidationError::RentRequired { unit: 2 }.to_string(),
        "monthly rent is required for unit 3"
    );
}

#[test]
fn validators_are_idempotent() {
    let data = ApplicationData {
        email: "bad".to_string(),
        ..ApplicationData::default()
    };
    for step in FormStep::ALL {
        assert_eq!(validate_step(step, &data), validate_step(step, &data));
    }
}
