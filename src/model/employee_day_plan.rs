//! Materialized per-day effective plan assignment (spec §3.1, `EmployeeDayPlan`).

use crate::model::ids::{DayPlanId, EmployeeId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Where an `EmployeeDayPlan` row came from. `Manual` and `Holiday` rows are
/// preserved across rhythm re-syncs; `Tariff` rows are regenerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmployeeDayPlanSource {
    Tariff,
    Manual,
    Holiday,
}

/// Unique on `(employee, date)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeDayPlan {
    pub employee: EmployeeId,
    pub date: NaiveDate,
    /// `None` means an explicit off day.
    pub day_plan: Option<DayPlanId>,
    pub source: EmployeeDayPlanSource,
}
