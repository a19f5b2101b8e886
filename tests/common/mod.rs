//! Shared fixtures for the integration suite: a minimal weekly 9-to-5
//! tariff/day-plan pair and an employee wired to it, backed by an
//! in-memory `SqliteDb` (spec §4.6).

use chrono::{NaiveDate, Weekday};
use kasl_time_core::model::*;
use kasl_time_core::repository::sqlite::SqliteDb;
use kasl_time_core::service::daily::DailyCalculationService;
use kasl_time_core::service::recalc::RecalcOrchestrator;
use rust_decimal_macros::dec;
use std::sync::Arc;

pub struct Fixture {
    pub db: Arc<SqliteDb>,
    pub daily: Arc<DailyCalculationService>,
    pub recalc: Arc<RecalcOrchestrator>,
    pub tenant: TenantId,
    pub employee: EmployeeId,
    pub day_plan: DayPlanId,
    pub tariff: TariffId,
}

/// A fixed-hours 09:00-17:30 plan with a one-hour fixed lunch deduction and
/// a `08:45-09:15` come tolerance, 480-minute target.
pub fn standard_day_plan(id: DayPlanId) -> DayPlan {
    DayPlan {
        id,
        plan_type: PlanType::Fixed,
        come_from: Some(8 * 60),
        come_to: Some(10 * 60),
        go_from: Some(16 * 60),
        go_to: Some(18 * 60),
        core_start: None,
        core_end: None,
        regular_hours: Some(480),
        regular_hours_2: Some(0),
        tolerance_come_plus: 15,
        tolerance_come_minus: 15,
        tolerance_go_plus: 15,
        tolerance_go_minus: 15,
        rounding_come: RoundingRule::NONE,
        rounding_go: RoundingRule::NONE,
        round_all_bookings: false,
        min_work_time: None,
        max_net_work_time: None,
        no_booking_behavior: NoBookingBehavior::Error,
        default_order: None,
        day_change_behavior: DayChangeBehavior::None,
        day_change_cutoff: 0,
        shift_alt_plans: Vec::new(),
        holiday_credit: [480, 480, 480],
        vacation_deduction: dec!(1.0),
        variable_work_time: false,
        net_account: None,
        cap_account: None,
        breaks: vec![DayPlanBreak {
            kind: BreakKind::Fixed,
            duration: 60,
            start_time: Some(12 * 60),
            end_time: Some(13 * 60),
            after_work_minutes: None,
            auto_deduct: true,
            is_paid: false,
            minutes_difference: false,
        }],
        bonuses: Vec::new(),
    }
}

pub fn weekly_tariff(id: TariffId, day_plan: DayPlanId) -> Tariff {
    let mut week = WeekPlan::new([None; 7]);
    for day in [Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri] {
        week.set(day, Some(day_plan));
    }
    Tariff {
        id,
        rhythm_type: RhythmType::Weekly,
        rhythm_start_date: Some(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()),
        valid_from: None,
        valid_to: None,
        evaluation: MonthlyEvaluationConfig {
            credit_type: CreditType::AfterThreshold,
            flextime_threshold: 30,
            max_flextime_per_month: Some(600),
            flextime_cap_positive: Some(2400),
            flextime_cap_negative: Some(1200),
            upper_limit_annual: None,
            lower_limit_annual: None,
        },
        plans: RhythmPlans::Weekly(week),
        vacation_deduction: dec!(1.0),
    }
}

impl Fixture {
    pub fn new() -> Self {
        let db = Arc::new(SqliteDb::open_in_memory().expect("in-memory db"));

        let tenant = TenantId::new();
        let employee_id = EmployeeId::new();
        let day_plan_id = DayPlanId::new();
        let tariff_id = TariffId::new();

        db.put_day_plan(&standard_day_plan(day_plan_id)).unwrap();
        db.put_tariff(&weekly_tariff(tariff_id, day_plan_id)).unwrap();
        db.assign_tariff(employee_id, tariff_id).unwrap();
        db.put_employee(&Employee {
            id: employee_id,
            tenant,
            department: None,
            hire_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            termination_date: None,
            target_override: None,
            part_time_factor: dec!(1.0),
        })
        .unwrap();

        let daily = Arc::new(DailyCalculationService::new(
            db.clone(),
            db.clone(),
            db.clone(),
            db.clone(),
            db.clone(),
            db.clone(),
            db.clone(),
            db.clone(),
            db.clone(),
            None,
            None,
        ));
        let recalc = Arc::new(RecalcOrchestrator::new(daily.clone(), db.clone(), db.clone(), db.clone(), db.clone(), None));

        Self { db, daily, recalc, tenant, employee: employee_id, day_plan: day_plan_id, tariff: tariff_id }
    }

    pub fn book(&self, date: NaiveDate, booking_type: BookingType, time: u16) -> BookingId {
        let booking = Booking::new(self.employee, date, booking_type, time, BookingSource::Terminal);
        let id = booking.id;
        self.db.put_booking(&booking).unwrap();
        id
    }
}
