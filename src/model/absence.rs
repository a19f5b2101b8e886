//! Absence entities (spec §3.1, `AbsenceDay`).

use crate::model::ids::{AbsenceDayId, AbsenceTypeId, EmployeeId};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbsenceCategory {
    Vacation,
    Illness,
    Special,
    Unpaid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbsenceStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbsenceType {
    pub id: AbsenceTypeId,
    pub category: AbsenceCategory,
    pub deducts_vacation: bool,
}

/// One row per day of an absence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbsenceDay {
    pub id: AbsenceDayId,
    pub employee: EmployeeId,
    pub date: NaiveDate,
    pub absence_type: AbsenceType,
    /// 0.25 / 0.5 / 1.0 of a day.
    pub duration: Decimal,
    pub status: AbsenceStatus,
}

impl AbsenceDay {
    pub fn is_approved(&self) -> bool {
        self.status == AbsenceStatus::Approved
    }
}

/// Aggregated absence figures for a month (spec §4.3 step 8).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AbsenceSummary {
    pub vacation_taken: Decimal,
    pub sick_days: Decimal,
    pub other_absence_days: Decimal,
}

impl AbsenceSummary {
    pub fn from_days(days: &[AbsenceDay]) -> Self {
        let mut summary = AbsenceSummary::default();
        for day in days.iter().filter(|d| d.is_approved()) {
            match day.absence_type.category {
                AbsenceCategory::Vacation => summary.vacation_taken += day.duration,
                AbsenceCategory::Illness => summary.sick_days += crate::model::decimal::ceil_to_whole(day.duration),
                AbsenceCategory::Special | AbsenceCategory::Unpaid => summary.other_absence_days += day.duration,
            }
        }
        summary
    }
}
