//! Holiday entity (spec §3.1, `Holiday`).

use crate::model::ids::{DepartmentId, HolidayId, TenantId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A calendar date marked as a holiday, possibly scoped to a department.
/// `category` selects which `DayPlan::holiday_credit` slot applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holiday {
    pub id: HolidayId,
    pub tenant: TenantId,
    pub date: NaiveDate,
    pub department: Option<DepartmentId>,
    /// 1..3, indexes into `DayPlan::holiday_credit`.
    pub category: u8,
}
