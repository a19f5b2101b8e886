//! Tariff: links an employee's rhythm to day plans (spec §3.1, `Tariff`).

use crate::model::ids::{DayPlanId, TariffId};
use crate::model::week_plan::WeekPlan;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RhythmType {
    Weekly,
    RollingWeekly,
    XDays,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreditType {
    NoEvaluation,
    CompleteCarryover,
    AfterThreshold,
    NoCarryover,
}

/// Monthly flextime-evaluation knobs consumed by the pure monthly calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyEvaluationConfig {
    pub credit_type: CreditType,
    pub flextime_threshold: i32,
    pub max_flextime_per_month: Option<i32>,
    /// Stored as a positive magnitude; applied as a floor at `-cap_negative`.
    pub flextime_cap_positive: Option<i32>,
    pub flextime_cap_negative: Option<i32>,
    pub upper_limit_annual: Option<i32>,
    pub lower_limit_annual: Option<i32>,
}

/// The rhythm-specific day-plan source for a tariff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RhythmPlans {
    Weekly(WeekPlan),
    RollingWeekly(Vec<WeekPlan>),
    XDays {
        /// Positional day plans; `None` at a position means an off day.
        plans: Vec<Option<DayPlanId>>,
        cycle_days: u16,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tariff {
    pub id: TariffId,
    pub rhythm_type: RhythmType,
    pub rhythm_start_date: Option<NaiveDate>,
    pub valid_from: Option<NaiveDate>,
    pub valid_to: Option<NaiveDate>,
    pub evaluation: MonthlyEvaluationConfig,
    pub plans: RhythmPlans,
    pub vacation_deduction: Decimal,
}

impl Tariff {
    pub fn is_active_for(&self, date: NaiveDate) -> bool {
        let after_start = match self.valid_from {
            Some(from) => from <= date,
            None => true,
        };
        let before_end = match self.valid_to {
            Some(to) => to >= date,
            None => true,
        };
        after_start && before_end
    }
}
