//! Exercises the rhythm resolver through the repository layer: manual
//! overrides substituting a different day plan, a holiday marker only
//! surfacing on an otherwise off day, and `delete_range_by_source` leaving
//! manual overrides untouched (spec §4.1, §4.4).

mod common;

use chrono::NaiveDate;
use common::Fixture;
use kasl_time_core::model::{DayPlanId, EmployeeDayPlan, EmployeeDayPlanSource, Holiday, HolidayId};
use kasl_time_core::repository::EmployeeDayPlanRepository;

#[test]
fn manual_override_to_off_day_beats_the_rhythm_plan() {
    let fx = Fixture::new();
    let monday = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();

    fx.db
        .bulk_create(&[EmployeeDayPlan { employee: fx.employee, date: monday, day_plan: None, source: EmployeeDayPlanSource::Manual }])
        .unwrap();

    let value = fx.daily.calculate_day(fx.tenant, fx.employee, monday).unwrap();
    assert_eq!(value.target_time, 0);
}

#[test]
fn manual_override_can_substitute_a_different_day_plan() {
    let fx = Fixture::new();
    let monday = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();

    let short_plan_id = DayPlanId::new();
    let mut short_plan = common::standard_day_plan(short_plan_id);
    short_plan.regular_hours = Some(240);
    short_plan.breaks.clear();
    fx.db.put_day_plan(&short_plan).unwrap();

    fx.db
        .bulk_create(&[EmployeeDayPlan {
            employee: fx.employee,
            date: monday,
            day_plan: Some(short_plan_id),
            source: EmployeeDayPlanSource::Manual,
        }])
        .unwrap();

    let value = fx.daily.calculate_day(fx.tenant, fx.employee, monday).unwrap();
    assert_eq!(value.target_time, 240);
}

/// A holiday on a day the rhythm would otherwise resolve to a working day
/// plan, with no bookings recorded, credits `DayPlan::holiday_credit`
/// instead of raising `NO_BOOKINGS` (spec §4.4 step 4,
/// `assemble_holiday_credit_day`).
#[test]
fn holiday_on_a_rhythm_work_day_with_no_bookings_credits_instead_of_erroring() {
    let fx = Fixture::new();
    let monday = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
    fx.db
        .put_holiday(&Holiday { id: HolidayId::new(), tenant: fx.tenant, date: monday, department: None, category: 1 })
        .unwrap();

    let value = fx.daily.calculate_day(fx.tenant, fx.employee, monday).unwrap();
    assert!(!value.has_error);
    assert_eq!(value.net_time, 480);
    assert_eq!(value.booking_count, 0);
}

#[test]
fn delete_range_by_source_only_removes_rows_with_that_source() {
    let fx = Fixture::new();
    let monday = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
    let tuesday = NaiveDate::from_ymd_opt(2026, 1, 6).unwrap();

    fx.db
        .bulk_create(&[
            EmployeeDayPlan { employee: fx.employee, date: monday, day_plan: None, source: EmployeeDayPlanSource::Manual },
            EmployeeDayPlan { employee: fx.employee, date: tuesday, day_plan: Some(fx.day_plan), source: EmployeeDayPlanSource::Tariff },
        ])
        .unwrap();

    fx.db.delete_range_by_source(fx.employee, monday, tuesday, EmployeeDayPlanSource::Tariff).unwrap();

    assert!(fx.db.get_for_employee_date(fx.employee, monday).unwrap().is_some());
    assert!(fx.db.get_for_employee_date(fx.employee, tuesday).unwrap().is_none());
}
