//! Weekly mapping from weekday to an optional day plan (spec §3.1, `WeekPlan`).

use crate::model::ids::DayPlanId;
use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// A 7-element mapping from weekday to optional day-plan id. `None` at a
/// given weekday means "off day" for that weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekPlan {
    days: [Option<DayPlanId>; 7],
}

impl WeekPlan {
    pub fn new(days: [Option<DayPlanId>; 7]) -> Self {
        Self { days }
    }

    fn index_of(weekday: Weekday) -> usize {
        weekday.num_days_from_monday() as usize
    }

    pub fn for_weekday(&self, weekday: Weekday) -> Option<DayPlanId> {
        self.days[Self::index_of(weekday)]
    }

    pub fn set(&mut self, weekday: Weekday, plan: Option<DayPlanId>) {
        self.days[Self::index_of(weekday)] = plan;
    }
}
