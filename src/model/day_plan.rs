//! Day plan configuration: windows, tolerances, rounding, breaks, bonuses.
//!
//! This is the richest entity in the data model (spec §3.1, `DayPlan`,
//! `DayPlanBreak`, `DayPlanBonus`). Every optional field reflects a rule
//! that only applies when configured — the pure daily calculator (`calc::daily`)
//! treats an absent field as "rule does not apply", never as zero.

use crate::model::ids::{AccountId, DayPlanId, OrderId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanType {
    Fixed,
    Flextime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundingKind {
    None,
    Up,
    Down,
    Nearest,
    Add,
    Subtract,
}

/// A single rounding rule: the kind plus its parameters. `interval` drives
/// `Up`/`Down`/`Nearest`; `add_value` drives `Add`/`Subtract`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundingRule {
    pub kind: RoundingKind,
    pub interval: u16,
    pub add_value: u16,
}

impl RoundingRule {
    pub const NONE: RoundingRule = RoundingRule {
        kind: RoundingKind::None,
        interval: 0,
        add_value: 0,
    };

    /// Applies the rule to a clock time, clamping to `[0, 1440)` for the
    /// additive variants as spec §4.2(b) requires.
    pub fn apply(&self, time: i32) -> i32 {
        let result = match self.kind {
            RoundingKind::None => time,
            RoundingKind::Up => round_to_interval_up(time, self.interval as i32),
            RoundingKind::Down => round_to_interval_down(time, self.interval as i32),
            RoundingKind::Nearest => round_to_interval_nearest(time, self.interval as i32),
            RoundingKind::Add => time + self.add_value as i32,
            RoundingKind::Subtract => time - self.add_value as i32,
        };
        result.clamp(0, 1439)
    }
}

fn round_to_interval_up(time: i32, interval: i32) -> i32 {
    if interval <= 0 {
        return time;
    }
    let rem = time.rem_euclid(interval);
    if rem == 0 {
        time
    } else {
        time + (interval - rem)
    }
}

fn round_to_interval_down(time: i32, interval: i32) -> i32 {
    if interval <= 0 {
        return time;
    }
    time - time.rem_euclid(interval)
}

fn round_to_interval_nearest(time: i32, interval: i32) -> i32 {
    if interval <= 0 {
        return time;
    }
    let rem = time.rem_euclid(interval);
    // "nearest rounds half up" per spec §4.2(b).
    if rem * 2 >= interval {
        round_to_interval_up(time, interval)
    } else {
        round_to_interval_down(time, interval)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoBookingBehavior {
    Error,
    AdoptTarget,
    DeductTarget,
    VocationalSchool,
    TargetWithOrder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayChangeBehavior {
    /// An unclosed `in` at midnight stays unpaired (flagged as an error).
    None,
    /// Consult next day's bookings to close the pair across midnight.
    CrossMidnight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreakKind {
    /// Deducted once at a fixed time window regardless of recorded breaks.
    Fixed,
    /// Flexible timing, fixed duration; deducted when `auto_deduct` and the
    /// recorded break is shorter than `duration`.
    Variable,
    /// Mandatory once `after_work_minutes` of gross work has accumulated.
    Minimum,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlanBreak {
    pub kind: BreakKind,
    pub duration: u16,
    pub start_time: Option<u16>,
    pub end_time: Option<u16>,
    pub after_work_minutes: Option<u16>,
    pub auto_deduct: bool,
    pub is_paid: bool,
    pub minutes_difference: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BonusCalculationType {
    Fixed,
    PerMinute,
    Percentage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlanBonus {
    pub account: AccountId,
    pub time_from: u16,
    pub time_to: u16,
    pub calculation_type: BonusCalculationType,
    /// Minutes (`PerMinute`), fixed minutes (`Fixed`), or percent-as-permille
    /// (`Percentage`, stored as integer basis points for determinism).
    pub value: i32,
    pub min_work_minutes: u16,
    pub applies_on_holiday: bool,
}

/// A daily work-schedule template (spec §3.1, `DayPlan`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    pub id: DayPlanId,
    pub plan_type: PlanType,

    pub come_from: Option<u16>,
    pub come_to: Option<u16>,
    pub go_from: Option<u16>,
    pub go_to: Option<u16>,

    pub core_start: Option<u16>,
    pub core_end: Option<u16>,

    pub regular_hours: Option<u16>,
    /// Secondary target used on absence days, if configured (spec §4.2(g)).
    pub regular_hours_2: Option<u16>,

    pub tolerance_come_plus: u16,
    pub tolerance_come_minus: u16,
    pub tolerance_go_plus: u16,
    pub tolerance_go_minus: u16,

    pub rounding_come: RoundingRule,
    pub rounding_go: RoundingRule,
    pub round_all_bookings: bool,

    pub min_work_time: Option<u16>,
    pub max_net_work_time: Option<u16>,

    pub no_booking_behavior: NoBookingBehavior,
    /// Target account for `no_booking_behavior ∈ {vocational_school,
    /// target_with_order}`; ignored by every other variant (spec §9 open
    /// question on the `order_booking_creator` collaborator).
    pub default_order: Option<OrderId>,
    pub day_change_behavior: DayChangeBehavior,
    /// Cut-off clock time (minutes from midnight) used to auto-complete an
    /// unmatched `in` when no cross-midnight partner is found (spec §4.2(c)).
    pub day_change_cutoff: u16,

    /// Windows (start-of-day in/out range) that trigger a shift swap, paired
    /// with the alternative plan id to substitute (spec §4.2(a)). At most six
    /// alternatives per spec §3.1.
    pub shift_alt_plans: Vec<(u16, u16, DayPlanId)>,

    pub holiday_credit: [u16; 3],

    pub vacation_deduction: Decimal,
    pub variable_work_time: bool,

    pub net_account: Option<AccountId>,
    pub cap_account: Option<AccountId>,

    pub breaks: Vec<DayPlanBreak>,
    pub bonuses: Vec<DayPlanBonus>,
}

impl DayPlan {
    /// The target duration for a normal (non-absence) day, before any
    /// employee-level override (spec §4.2(g) precedence chain continues in
    /// `calc::daily::resolve_target`).
    pub fn base_target(&self, is_absence_day: bool) -> u16 {
        if is_absence_day {
            self.regular_hours_2.or(self.regular_hours).unwrap_or(0)
        } else {
            self.regular_hours.unwrap_or(0)
        }
    }
}
