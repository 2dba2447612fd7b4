use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::repository::sequence_number;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RentalId(pub String);

impl RentalId {
    pub fn sequence(&self) -> Option<u64> {
        sequence_number(&self.0)
    }
}

impl fmt::Display for RentalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RentalStatus {
    #[default]
    Active,
    Inactive,
}

/// Editable part of a rental property, as submitted by a user.
///
/// An empty `tenant` means the unit is not currently let; the lease fields
/// only matter once a tenant is recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalDetails {
    pub owner: String,
    pub owner_contact: String,
    #[serde(default)]
    pub tenant: String,
    #[serde(default)]
    pub tenant_contact: String,
    #[serde(default)]
    pub lease_start: Option<NaiveDate>,
    /// Lease length in months.
    #[serde(default)]
    pub lease_months: u32,
    pub rent_amount: f64,
    /// Months between rent adjustments.
    #[serde(default)]
    pub adjustment_interval_months: u32,
    pub address: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: RentalStatus,
}

impl RentalDetails {
    pub fn has_tenant(&self) -> bool {
        !self.tenant.trim().is_empty()
    }
}

/// Stored rental property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalProperty {
    pub id: RentalId,
    pub details: RentalDetails,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
