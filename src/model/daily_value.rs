//! Per-day calculation result (spec §3.1, `DailyValue`).

use crate::model::ids::EmployeeId;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DailyStatus {
    Pending,
    Calculated,
    Error,
    Approved,
}

/// Calculation-condition error codes embedded in a `DailyValue` (spec §4.2(j), §7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    MissingCome,
    MissingGo,
    MissingBreakEnd,
    BreakUnbalanced,
    OutBeforeIn,
    OverlappingPairs,
    TimeOutOfWindow,
    NoBookings,
    MinWorkTimeNotMet,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::MissingCome => "MISSING_COME",
            ErrorCode::MissingGo => "MISSING_GO",
            ErrorCode::MissingBreakEnd => "MISSING_BREAK_END",
            ErrorCode::BreakUnbalanced => "BREAK_UNBALANCED",
            ErrorCode::OutBeforeIn => "OUT_BEFORE_IN",
            ErrorCode::OverlappingPairs => "OVERLAPPING_PAIRS",
            ErrorCode::TimeOutOfWindow => "TIME_OUT_OF_WINDOW",
            ErrorCode::NoBookings => "NO_BOOKINGS",
            ErrorCode::MinWorkTimeNotMet => "MIN_WORK_TIME_NOT_MET",
        };
        write!(f, "{}", s)
    }
}

/// Non-fatal advisories (spec §7, `WarningCodes`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningCode {
    MonthlyCapReached,
    FlextimeCapped,
    BelowThreshold,
    NoCarryover,
    OffDay,
    MinBreakApplied,
    AutoCompleteDayChange,
    StatusDowngraded,
}

impl fmt::Display for WarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WarningCode::MonthlyCapReached => "MONTHLY_CAP_REACHED",
            WarningCode::FlextimeCapped => "FLEXTIME_CAPPED",
            WarningCode::BelowThreshold => "BELOW_THRESHOLD",
            WarningCode::NoCarryover => "NO_CARRYOVER",
            WarningCode::OffDay => "OFF_DAY",
            WarningCode::MinBreakApplied => "MIN_BREAK_APPLIED",
            WarningCode::AutoCompleteDayChange => "AUTO_COMPLETE_DAY_CHANGE",
            WarningCode::StatusDowngraded => "STATUS_DOWNGRADED",
        };
        write!(f, "{}", s)
    }
}

/// Breakdown of where capped minutes came from (spec §4.2(f)).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CappingBreakdown {
    pub early_arrival: u16,
    pub late_leave: u16,
    pub max_net_time: u16,
}

impl CappingBreakdown {
    pub fn total(&self) -> u16 {
        self.early_arrival + self.late_leave + self.max_net_time
    }
}

/// The per-day result, unique on `(employee, date)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyValue {
    pub employee: EmployeeId,
    pub date: NaiveDate,
    pub status: DailyStatus,

    pub gross_time: u16,
    pub net_time: u16,
    pub target_time: u16,
    pub overtime: u16,
    pub undertime: u16,
    pub break_time: u16,
    pub capping: CappingBreakdown,

    pub first_come: Option<u16>,
    pub last_go: Option<u16>,
    pub booking_count: u32,

    pub has_error: bool,
    pub error_codes: Vec<ErrorCode>,
    pub warnings: Vec<WarningCode>,

    pub calculated_at: NaiveDateTime,
    pub calculation_version: u32,
}

impl DailyValue {
    /// `overtime − undertime`, the day's contribution to the flextime balance.
    pub fn balance(&self) -> i32 {
        self.overtime as i32 - self.undertime as i32
    }
}
