use chrono::{Months, NaiveDate};
use serde::Serialize;

use super::domain::RentalDetails;

/// Lease calendar derived from the start date, length and adjustment interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaseSchedule {
    pub lease_start: NaiveDate,
    pub lease_end: NaiveDate,
    /// Dates on which the rent is due for adjustment, strictly before the end.
    pub adjustment_dates: Vec<NaiveDate>,
}

impl LeaseSchedule {
    /// `None` when the property has no lease start or a zero-length lease.
    pub fn for_details(details: &RentalDetails) -> Option<Self> {
        let lease_start = details.lease_start?;
        if details.lease_months == 0 {
            return None;
        }
        let lease_end = lease_start.checked_add_months(Months::new(details.lease_months))?;

        let interval = details.adjustment_interval_months;
        let adjustment_dates = if interval == 0 {
            Vec::new()
        } else {
            (1..)
                .map_while(|step: u32| step.checked_mul(interval))
                .map_while(|offset| lease_start.checked_add_months(Months::new(offset)))
                .take_while(|date| *date < lease_end)
                .collect()
        };

        Some(Self {
            lease_start,
            lease_end,
            adjustment_dates,
        })
    }

    /// First adjustment falling on or after `today`.
    pub fn next_adjustment(&self, today: NaiveDate) -> Option<NaiveDate> {
        self.adjustment_dates
            .iter()
            .copied()
            .find(|date| *date >= today)
    }

    pub fn is_active_on(&self, today: NaiveDate) -> bool {
        self.lease_start <= today && today < self.lease_end
    }
}
