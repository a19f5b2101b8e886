//! `RecalcOrchestrator::calculate_month` exercised against accumulated
//! `DailyValue` rows in an in-memory database (spec §4.3, §4.5).

mod common;

use chrono::NaiveDate;
use common::Fixture;
use kasl_time_core::model::{BookingType, MonthlyStatus};
use kasl_time_core::repository::MonthlyValueRepository;

/// Books 08:30-18:00 each weekday: a 9.5h gross span minus the plan's
/// fixed 60-minute lunch deduction nets 510 minutes, 30 over the 480-minute
/// target.
fn a_work_week(fx: &Fixture, start: NaiveDate) {
    for offset in 0..5 {
        let date = start + chrono::Duration::days(offset);
        fx.book(date, BookingType::come(), 8 * 60 + 30);
        fx.book(date, BookingType::go(), 18 * 60);
        fx.daily.calculate_day(fx.tenant, fx.employee, date).unwrap();
    }
}

#[test]
fn calculate_month_aggregates_daily_overtime_into_closing_balance() {
    let fx = Fixture::new();
    // January 2026: Mondays the 5th, 12th, 19th, 26th start full weeks.
    a_work_week(&fx, NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());

    let monthly = fx.recalc.calculate_month(fx.tenant, fx.employee, 2026, 1).unwrap();

    assert_eq!(monthly.status, MonthlyStatus::Open);
    assert_eq!(monthly.opening_balance, 0);
    // Five days at 30 minutes of overtime each (8:30 worked minus 8:00 target).
    assert_eq!(monthly.sum_overtime, 150);
    assert!(monthly.closing_balance >= 0);
}

#[test]
fn calculate_month_reads_previous_months_closing_balance_as_opening_balance() {
    let fx = Fixture::new();
    a_work_week(&fx, NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
    let january = fx.recalc.calculate_month(fx.tenant, fx.employee, 2026, 1).unwrap();

    a_work_week(&fx, NaiveDate::from_ymd_opt(2026, 2, 2).unwrap());
    let february = fx.recalc.calculate_month(fx.tenant, fx.employee, 2026, 2).unwrap();

    assert_eq!(february.opening_balance, january.closing_balance);
}

#[test]
fn closed_month_rejects_further_daily_mutation_via_recalc_day() {
    let fx = Fixture::new();
    let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
    fx.book(date, BookingType::come(), 9 * 60);
    fx.book(date, BookingType::go(), 17 * 60 + 30);
    fx.recalc.calculate_month(fx.tenant, fx.employee, 2026, 1).unwrap();

    let closer = kasl_time_core::model::UserId::new();
    fx.recalc.close_month(fx.employee, 2026, 1, closer).unwrap();

    let result = fx.recalc.recalc_day(fx.tenant, fx.employee, date);
    assert_eq!(result.processed, 0);
    assert_eq!(result.failed, 1);
}

#[test]
fn close_then_reopen_round_trip_preserves_original_closed_by() {
    let fx = Fixture::new();
    fx.recalc.calculate_month(fx.tenant, fx.employee, 2026, 1).unwrap();

    let closer = kasl_time_core::model::UserId::new();
    let reopener = kasl_time_core::model::UserId::new();
    fx.recalc.close_month(fx.employee, 2026, 1, closer).unwrap();
    fx.recalc.reopen_month(fx.employee, 2026, 1, reopener).unwrap();

    let value = fx.recalc.monthly_values.get_by_employee_month(fx.employee, 2026, 1).unwrap().unwrap();
    assert_eq!(value.status, MonthlyStatus::Reopened);
    assert_eq!(value.closed_by, Some(closer));
    assert_eq!(value.reopened_by, Some(reopener));
}
