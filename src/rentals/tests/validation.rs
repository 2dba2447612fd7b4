use super::common::*;
use crate::rentals::is_valid_contact;

#[test]
fn complete_lease_passes() {
    assert!(let_details().validate().is_ok());
    assert!(vacant_details().validate().is_ok());
}

#[test]
fn contacts_accept_phones_and_email_addresses() {
    assert!(is_valid_contact("+54 (351) 555-0101"));
    assert!(is_valid_contact(" 3515550101 "));
    assert!(is_valid_contact("marta.quiroga@example.com.ar"));
    assert!(!is_valid_contact("call after 6pm"));
    assert!(!is_valid_contact("marta@localhost"));
}

#[test]
fn tenant_requires_lease_terms() {
    let mut details = let_details();
    details.tenant_contact = "  ".to_string();
    details.lease_start = None;
    details.lease_months = 0;
    details.adjustment_interval_months = 0;

    let errors = details.validate().expect_err("lease terms missing");
    assert_eq!(
        errors.get("tenant_contact"),
        Some("is required when a tenant is recorded")
    );
    assert!(errors.get("lease_start").is_some());
    assert!(errors.get("lease_months").is_some());
    assert!(errors.get("adjustment_interval_months").is_some());
}

#[test]
fn vacant_units_still_check_a_supplied_tenant_contact() {
    let mut details = vacant_details();
    details.tenant_contact = "not a contact".to_string();

    let errors = details.validate().expect_err("bad contact");
    assert_eq!(
        errors.get("tenant_contact"),
        Some("must be a phone number or e-mail address")
    );
    assert!(errors.get("lease_start").is_none());
}

#[test]
fn owner_rent_and_address_are_mandatory() {
    let mut details = vacant_details();
    details.owner = String::new();
    details.owner_contact = String::new();
    details.rent_amount = 0.0;
    details.address = " ".to_string();

    let errors = details.validate().expect_err("mandatory fields missing");
    let fields: Vec<_> = errors.fields.keys().copied().collect();
    assert_eq!(fields, vec!["address", "owner", "owner_contact", "rent_amount"]);
}
