//! Per-month closure result (spec §3.1, `MonthlyValue`).

use crate::model::ids::{EmployeeId, UserId};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MonthlyStatus {
    Open,
    Closed,
    Reopened,
}

/// Unique on `(employee, year, month)`. Holds the flextime carryover chain
/// element for the month: `opening_balance` comes from the prior month's
/// `closing_balance`, and once `status == Closed` neither is recomputed by
/// a daily recalculation (spec §4.5 cascade boundary).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyValue {
    pub employee: EmployeeId,
    pub year: i32,
    pub month: u32,
    pub status: MonthlyStatus,

    pub opening_balance: i32,
    pub sum_overtime: i32,
    pub sum_undertime: i32,
    pub credited_flextime: i32,
    pub closing_balance: i32,

    pub gross_time: u32,
    pub net_time: u32,
    pub target_time: u32,
    pub break_time: u32,
    pub work_days: u32,
    pub days_with_errors: u32,

    pub vacation_taken: Decimal,
    pub sick_days: Decimal,
    pub other_absence_days: Decimal,

    pub closed_at: Option<NaiveDateTime>,
    pub closed_by: Option<UserId>,
    pub reopened_at: Option<NaiveDateTime>,
    pub reopened_by: Option<UserId>,
    pub calculation_version: u32,
}

impl MonthlyValue {
    pub fn is_closed(&self) -> bool {
        self.status == MonthlyStatus::Closed
    }
}
