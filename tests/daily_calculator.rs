//! End-to-end coverage of `DailyCalculationService::calculate_day` against
//! an in-memory database: rhythm resolution, pairing, persistence, and the
//! no-bookings/off-day branches (spec §4.4).

mod common;

use chrono::NaiveDate;
use common::Fixture;
use kasl_time_core::model::{BookingType, DailyStatus, ErrorCode, WarningCode};
use kasl_time_core::repository::DailyValueRepository;

#[test]
fn simple_day_persists_a_calculated_value() {
    let fx = Fixture::new();
    let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(); // Monday

    fx.book(date, BookingType::come(), 9 * 60);
    fx.book(date, BookingType::go(), 17 * 60 + 30);

    let value = fx.daily.calculate_day(fx.tenant, fx.employee, date).unwrap();

    assert_eq!(value.status, DailyStatus::Calculated);
    assert!(!value.has_error);
    assert_eq!(value.target_time, 480);
    // 08:30 span minus the fixed 60-minute lunch deduction.
    assert_eq!(value.net_time, 8 * 60 + 30 - 60);
    assert_eq!(value.booking_count, 2);

    let reloaded = fx.daily.daily_values.get_by_employee_date(fx.employee, date).unwrap().unwrap();
    assert_eq!(reloaded.net_time, value.net_time);
}

#[test]
fn weekend_day_with_no_rhythm_plan_is_an_off_day() {
    let fx = Fixture::new();
    let saturday = NaiveDate::from_ymd_opt(2026, 1, 3).unwrap();

    let value = fx.daily.calculate_day(fx.tenant, fx.employee, saturday).unwrap();

    assert!(!value.has_error);
    assert_eq!(value.target_time, 0);
    assert!(value.warnings.contains(&WarningCode::OffDay));
}

#[test]
fn missing_go_on_a_work_day_is_an_error() {
    let fx = Fixture::new();
    let date = NaiveDate::from_ymd_opt(2026, 1, 6).unwrap(); // Tuesday

    fx.book(date, BookingType::come(), 9 * 60);

    let value = fx.daily.calculate_day(fx.tenant, fx.employee, date).unwrap();

    assert!(value.has_error);
    assert_eq!(value.status, DailyStatus::Error);
    assert!(value.error_codes.contains(&ErrorCode::MissingGo));
}

#[test]
fn no_bookings_on_a_work_day_defaults_to_error_behavior() {
    let fx = Fixture::new();
    let date = NaiveDate::from_ymd_opt(2026, 1, 7).unwrap(); // Wednesday

    let value = fx.daily.calculate_day(fx.tenant, fx.employee, date).unwrap();

    assert!(value.has_error);
    assert!(value.error_codes.contains(&ErrorCode::NoBookings));
    assert_eq!(value.target_time, 480);
}

#[test]
fn recalculating_a_clean_day_twice_is_idempotent() {
    let fx = Fixture::new();
    let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
    fx.book(date, BookingType::come(), 9 * 60);
    fx.book(date, BookingType::go(), 17 * 60 + 30);

    let first = fx.daily.calculate_day(fx.tenant, fx.employee, date).unwrap();
    let second = fx.daily.calculate_day(fx.tenant, fx.employee, date).unwrap();

    assert_eq!(first.net_time, second.net_time);
    assert_eq!(second.status, DailyStatus::Calculated);
}
