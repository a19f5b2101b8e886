//! Daily posting to a named time account (spec §3.1, `DailyAccountValue`).

use crate::model::ids::{AccountId, EmployeeId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Where an account posting originated. `Overflow` postings are written by
/// the daily calculator when a `DayPlan` bonus or cap redirects minutes into
/// a named account instead of the flextime balance (spec §4.2(i)). `Manual`,
/// `Correction`, and `Import` rows are never touched by recalculation (spec
/// §3.1's `source ∈ {calculated, manual, correction, import}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountValueSource {
    Bonus,
    Overflow,
    Manual,
    Correction,
    Import,
}

/// One posting; an `(employee, account, date)` triple may carry several rows
/// from different sources on the same day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAccountValue {
    pub employee: EmployeeId,
    pub account: AccountId,
    pub date: NaiveDate,
    pub minutes: i32,
    pub source: AccountValueSource,
}
