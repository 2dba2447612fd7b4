//! Index-linked rent updates for a registered lease.

use serde::{Deserialize, Serialize};

use super::domain::{RentalDetails, RentalId};
use crate::rent_index::{RentIndex, RentIndexRequest};
use crate::validation::FieldErrors;

/// Body of an adjustment request. Both fields are optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AdjustmentRequest {
    #[serde(default)]
    pub index: RentIndex,
    /// Store the new amount on the property instead of only reporting it.
    #[serde(default)]
    pub apply: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RentAdjustment {
    pub rental_id: RentalId,
    pub previous_amount: f64,
    pub new_amount: f64,
    pub index: RentIndex,
    pub applied: bool,
}

impl RentalDetails {
    /// Lease terms for the index calculator; a lease start and length are required.
    pub fn index_request(&self, index: RentIndex) -> Result<RentIndexRequest, FieldErrors> {
        let mut errors = FieldErrors::new("rent adjustment");
        if self.lease_start.is_none() {
            errors.insert("lease_start", "is required to adjust the rent");
        }
        if self.lease_months == 0 {
            errors.insert("lease_months", "must be greater than 0 to adjust the rent");
        }

        match self.lease_start {
            Some(lease_start) if errors.is_empty() => Ok(RentIndexRequest {
                amount: self.rent_amount,
                lease_start,
                lease_months: self.lease_months,
                index,
            }),
            _ => Err(errors),
        }
    }
}
