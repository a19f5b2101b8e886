//! The calculation core's data model (spec §3).
//!
//! Every entity here is a plain, serializable value type. None of them own
//! persistence or business logic beyond small accessor/predicate methods —
//! the algorithms live in [`crate::rhythm`], [`crate::calc`], and
//! [`crate::service`].

pub mod account_value;
pub mod absence;
pub mod booking;
pub mod daily_value;
pub mod day_plan;
pub mod decimal;
pub mod employee;
pub mod employee_day_plan;
pub mod holiday;
pub mod ids;
pub mod monthly_value;
pub mod tariff;
pub mod week_plan;

pub use account_value::{AccountValueSource, DailyAccountValue};
pub use absence::{AbsenceCategory, AbsenceDay, AbsenceStatus, AbsenceSummary, AbsenceType};
pub use booking::{Booking, BookingSource, BookingType, Category, Direction};
pub use daily_value::{CappingBreakdown, DailyStatus, DailyValue, ErrorCode, WarningCode};
pub use day_plan::{
    BonusCalculationType, BreakKind, DayChangeBehavior, DayPlan, DayPlanBonus, DayPlanBreak, NoBookingBehavior, PlanType, RoundingKind,
    RoundingRule,
};
pub use employee::Employee;
pub use employee_day_plan::{EmployeeDayPlan, EmployeeDayPlanSource};
pub use holiday::Holiday;
pub use ids::{
    AbsenceDayId, AbsenceTypeId, AccountId, BookingId, BookingTypeId, DayPlanId, DepartmentId, EmployeeId, HolidayId, OrderId, TariffId,
    TenantId, UserId,
};
pub use monthly_value::{MonthlyStatus, MonthlyValue};
pub use tariff::{CreditType, MonthlyEvaluationConfig, RhythmPlans, RhythmType, Tariff};
pub use week_plan::WeekPlan;
