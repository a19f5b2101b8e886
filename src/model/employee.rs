//! Minimal employee identity as seen by the calculation core.
//!
//! The core does not own personnel data; this struct carries only the
//! fields the rhythm resolver and calculators need (spec §1 non-goals
//! exclude HR/master-data management).

use crate::model::ids::{DepartmentId, EmployeeId, TenantId};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub tenant: TenantId,
    /// Scopes department-specific holiday lookups (spec §4.4 step 1).
    pub department: Option<DepartmentId>,
    pub hire_date: NaiveDate,
    pub termination_date: Option<NaiveDate>,
    /// Outranks both `DayPlan::regular_hours` and `regular_hours_2` in the
    /// target-resolution precedence chain (spec §4.2(g)).
    pub target_override: Option<u16>,
    /// Scales vacation accrual and similar decimal quantities; defaults to
    /// full-time (`1.0`).
    pub part_time_factor: Decimal,
}

impl Employee {
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        if date < self.hire_date {
            return false;
        }
        match self.termination_date {
            Some(term) => date <= term,
            None => true,
        }
    }
}
