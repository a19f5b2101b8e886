//! External collaborator contracts (spec §4.6).
//!
//! The core depends on these traits only; it never talks to a storage
//! backend directly. Implementations are synchronous (matching the
//! teacher's direct `rusqlite` style) — the CLI dispatches blocking calls
//! via `tokio::task::spawn_blocking` rather than making every trait
//! method `async fn`.

pub mod sqlite;

use crate::error::RepositoryError;
use crate::model::*;
use chrono::NaiveDate;
use std::collections::HashMap;

pub type RepoResult<T> = Result<T, RepositoryError>;

pub trait BookingRepository {
    fn get_by_employee_date(&self, employee: EmployeeId, date: NaiveDate) -> RepoResult<Vec<Booking>>;
    fn get_by_employee_date_range(&self, employee: EmployeeId, from: NaiveDate, to: NaiveDate) -> RepoResult<Vec<Booking>>;
    fn update_calculated_times(&self, updates: &HashMap<BookingId, (u16, Option<BookingId>)>) -> RepoResult<()>;
    fn create_auto(&self, employee: EmployeeId, date: NaiveDate, booking_type: BookingType, time: u16) -> RepoResult<BookingId>;
    fn delete_auto_by_date(&self, employee: EmployeeId, date: NaiveDate) -> RepoResult<()>;
}

pub trait DailyValueRepository {
    fn upsert_by_employee_date(&self, value: &DailyValue) -> RepoResult<()>;
    fn get_by_employee_date(&self, employee: EmployeeId, date: NaiveDate) -> RepoResult<Option<DailyValue>>;
}

pub trait MonthlyValueRepository {
    fn get_by_employee_month(&self, employee: EmployeeId, year: i32, month: u32) -> RepoResult<Option<MonthlyValue>>;
    fn get_previous_month(&self, employee: EmployeeId, year: i32, month: u32) -> RepoResult<Option<MonthlyValue>>;
    /// Must exclude closure fields (`status`, `closed_at`, `closed_by`) from
    /// the conflict-update clause (spec §4.6).
    fn upsert(&self, value: &MonthlyValue) -> RepoResult<()>;
    fn is_month_closed(&self, employee: EmployeeId, year: i32, month: u32) -> RepoResult<bool>;
    fn close_month(&self, employee: EmployeeId, year: i32, month: u32, by: UserId) -> RepoResult<()>;
    fn reopen_month(&self, employee: EmployeeId, year: i32, month: u32, by: UserId) -> RepoResult<()>;
}

pub trait EmployeeDayPlanRepository {
    fn get_for_employee_date(&self, employee: EmployeeId, date: NaiveDate) -> RepoResult<Option<EmployeeDayPlan>>;
    fn get_for_employee_date_range(&self, employee: EmployeeId, from: NaiveDate, to: NaiveDate) -> RepoResult<Vec<EmployeeDayPlan>>;
    fn bulk_create(&self, rows: &[EmployeeDayPlan]) -> RepoResult<()>;
    fn delete_range_by_source(&self, employee: EmployeeId, from: NaiveDate, to: NaiveDate, source: EmployeeDayPlanSource) -> RepoResult<()>;
}

/// A `DayPlan` preloaded with its breaks and bonuses (spec §4.6
/// `get_with_details`).
pub trait DayPlanRepository {
    fn get_with_details(&self, id: DayPlanId) -> RepoResult<Option<DayPlan>>;
}

/// A `Tariff` preloaded with its rhythm children (week plans / day-plan
/// positions).
pub trait TariffRepository {
    fn get_with_details(&self, id: TariffId) -> RepoResult<Option<Tariff>>;
    fn get_active_for_employee(&self, employee: EmployeeId, date: NaiveDate) -> RepoResult<Option<Tariff>>;
}

pub trait AbsenceDayRepository {
    fn get_by_employee_date_range(&self, employee: EmployeeId, from: NaiveDate, to: NaiveDate) -> RepoResult<Vec<AbsenceDay>>;
}

pub trait HolidayRepository {
    fn get_for_date(&self, tenant: TenantId, date: NaiveDate, department: Option<DepartmentId>) -> RepoResult<Option<Holiday>>;
}

pub trait EmployeeRepository {
    fn get_by_id(&self, id: EmployeeId) -> RepoResult<Option<Employee>>;
}

pub trait DailyAccountValueRepository {
    /// Atomically replaces all `source = Overflow`/`Bonus` ("calculated")
    /// rows for `(employee, date)` with `postings` (spec §4.6).
    fn upsert_replacing_calculated_source(&self, employee: EmployeeId, date: NaiveDate, postings: &[DailyAccountValue]) -> RepoResult<()>;
}

/// Pluggable notification sink (spec §4.6). Fired when `has_error`
/// transitions from `false` to `true` for an `(employee, date)`.
pub trait Notifier: Send + Sync {
    fn notify_calculation_error(&self, employee: EmployeeId, date: NaiveDate, error_codes: &[ErrorCode]);
}

/// Minimal contract for `no_booking_behavior ∈ {vocational_school,
/// target_with_order}` (spec §9 open question). The caller deletes prior
/// auto order-bookings for the date via `delete_auto_by_date` before
/// calling `create_auto`, so recalculation stays idempotent.
pub trait OrderBookingCreator: Send + Sync {
    fn create_auto(&self, employee: EmployeeId, date: NaiveDate, order: OrderId, minutes: u16) -> RepoResult<BookingId>;
    fn delete_auto_by_date(&self, employee: EmployeeId, date: NaiveDate) -> RepoResult<()>;
}

/// Pluggable tenant-/employee-level settings lookup (spec §4.6).
pub trait SettingsLookup: Send + Sync {
    fn annual_carryover_floor(&self, tenant: TenantId) -> RepoResult<Option<i32>>;
}
