//! End-to-end coverage of the recalculation cascade: `recalc_day` pulling
//! in the owning month, `recalc_range` touching only the earliest month,
//! and `recalc_from_month` skipping closed months (spec §4.5, §5).

mod common;

use chrono::NaiveDate;
use common::Fixture;
use kasl_time_core::model::BookingType;
use kasl_time_core::repository::MonthlyValueRepository;

#[test]
fn recalc_day_cascades_into_the_owning_months_monthly_value() {
    let fx = Fixture::new();
    let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
    fx.book(date, BookingType::come(), 9 * 60);
    fx.book(date, BookingType::go(), 17 * 60 + 30);

    let result = fx.recalc.recalc_day(fx.tenant, fx.employee, date);

    // `recalc_day` also cascades `recalc_from_month` forward to the
    // current wall-clock month, so `processed` covers more than this one
    // day; only the day-plus-at-least-one-month lower bound is stable.
    assert_eq!(result.failed, 0);
    assert!(result.processed >= 2);
    let monthly = fx.recalc.monthly_values.get_by_employee_month(fx.employee, 2026, 1).unwrap();
    assert!(monthly.is_some());
}

#[test]
fn recalc_range_spanning_two_months_cascades_from_the_earliest_one() {
    let fx = Fixture::new();
    let jan_31 = NaiveDate::from_ymd_opt(2026, 1, 30).unwrap(); // Friday
    let feb_2 = NaiveDate::from_ymd_opt(2026, 2, 2).unwrap(); // Monday

    fx.book(jan_31, BookingType::come(), 9 * 60);
    fx.book(jan_31, BookingType::go(), 17 * 60 + 30);
    fx.book(feb_2, BookingType::come(), 9 * 60);
    fx.book(feb_2, BookingType::go(), 17 * 60 + 30);

    let result = fx.recalc.recalc_range(fx.tenant, fx.employee, jan_31, feb_2);

    // The two booked days plus the cascade from January (the earliest
    // touched month) forward to the current wall-clock month.
    assert_eq!(result.failed, 0);
    assert!(result.processed >= 2 + 1);
    assert!(fx.recalc.monthly_values.get_by_employee_month(fx.employee, 2026, 1).unwrap().is_some());
}

#[test]
fn recalc_from_month_skips_a_closed_month_and_reports_it() {
    let fx = Fixture::new();
    fx.recalc.calculate_month(fx.tenant, fx.employee, 2026, 1).unwrap();
    let closer = kasl_time_core::model::UserId::new();
    fx.recalc.close_month(fx.employee, 2026, 1, closer).unwrap();

    let result = fx.recalc.recalc_from_month(fx.tenant, fx.employee, 2026, 1);

    // Only January is closed; every later month up to the current
    // wall-clock month still gets processed.
    assert_eq!(result.skipped_closed, 1);
    assert_eq!(result.failed, 0);
}

#[test]
fn recalc_batch_runs_every_employee_independently() {
    let fx_a = Fixture::new();
    let fx_b = Fixture::new();
    let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
    fx_a.book(date, BookingType::come(), 9 * 60);
    fx_a.book(date, BookingType::go(), 17 * 60 + 30);

    // Each fixture owns an independent in-memory database, so this exercises
    // `recalc_batch`'s per-employee loop against the same orchestrator
    // instance rather than genuine cross-database batching.
    let result = fx_a.recalc.recalc_batch(fx_a.tenant, &[fx_a.employee], date, date);
    assert_eq!(result.failed, 0);
    assert!(result.processed >= 1);
    let _ = fx_b;
}
