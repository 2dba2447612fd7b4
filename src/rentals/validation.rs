use std::sync::OnceLock;

use regex::Regex;

use super::domain::RentalDetails;
use crate::validation::FieldErrors;

fn phone_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9\s\-+()]+$").expect("phone pattern compiles"))
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("email pattern compiles")
    })
}

/// A contact is usable when it looks like a phone number or an e-mail address.
pub fn is_valid_contact(contact: &str) -> bool {
    let trimmed = contact.trim();
    phone_pattern().is_match(trimmed) || email_pattern().is_match(trimmed)
}

impl RentalDetails {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new("rental property");

        if self.owner.trim().is_empty() {
            errors.insert("owner", "is required");
        }

        if self.owner_contact.trim().is_empty() {
            errors.insert("owner_contact", "is required");
        } else if !is_valid_contact(&self.owner_contact) {
            errors.insert("owner_contact", "must be a phone number or e-mail address");
        }

        let tenant_contact = self.tenant_contact.trim();
        if self.has_tenant() && tenant_contact.is_empty() {
            errors.insert("tenant_contact", "is required when a tenant is recorded");
        } else if !tenant_contact.is_empty() && !is_valid_contact(tenant_contact) {
            errors.insert("tenant_contact", "must be a phone number or e-mail address");
        }

        if self.has_tenant() {
            if self.lease_start.is_none() {
                errors.insert("lease_start", "is required when a tenant is recorded");
            }
            if self.lease_months == 0 {
                errors.insert("lease_months", "must be greater than 0 when a tenant is recorded");
            }
            if self.adjustment_interval_months == 0 {
                errors.insert(
                    "adjustment_interval_months",
                    "must be greater than 0 when a tenant is recorded",
                );
            }
        }

        if !(self.rent_amount.is_finite() && self.rent_amount > 0.0) {
            errors.insert("rent_amount", "must be greater than 0");
        }

        if self.address.trim().is_empty() {
            errors.insert("address", "is required");
        }

        errors.into_result(())
    }
}
