//! `MonthlyValueRepository` (spec §4.6): the one repository whose upsert
//! must *not* touch closure fields, and whose `close_month`/`reopen_month`
//! are the only writers of those fields (spec §3.1 "Closure fields are
//! never touched by recalculation upserts").

use crate::error::RepositoryError;
use crate::model::{EmployeeId, MonthlyStatus, MonthlyValue, UserId};
use crate::repository::sqlite::SqliteDb;
use crate::repository::{MonthlyValueRepository, RepoResult};
use rust_decimal::Decimal;
use rusqlite::{params, OptionalExtension, Row};
use std::str::FromStr;

fn status_to_str(status: MonthlyStatus) -> &'static str {
    match status {
        MonthlyStatus::Open => "open",
        MonthlyStatus::Closed => "closed",
        MonthlyStatus::Reopened => "reopened",
    }
}

fn status_from_str(s: &str) -> MonthlyStatus {
    match s {
        "closed" => MonthlyStatus::Closed,
        "reopened" => MonthlyStatus::Reopened,
        _ => MonthlyStatus::Open,
    }
}

fn row_to_monthly_value(row: &Row, employee: EmployeeId) -> Result<MonthlyValue, RepositoryError> {
    let status: String = row.get("status")?;
    let vacation_taken: String = row.get("vacation_taken")?;
    let sick_days: String = row.get("sick_days")?;
    let other_absence_days: String = row.get("other_absence_days")?;
    let closed_by: Option<String> = row.get("closed_by")?;
    let reopened_by: Option<String> = row.get("reopened_by")?;
    Ok(MonthlyValue {
        employee,
        year: row.get("year")?,
        month: row.get("month")?,
        status: status_from_str(&status),
        opening_balance: row.get("opening_balance")?,
        sum_overtime: row.get("sum_overtime")?,
        sum_undertime: row.get("sum_undertime")?,
        credited_flextime: row.get("credited_flextime")?,
        closing_balance: row.get("closing_balance")?,
        gross_time: row.get("gross_time")?,
        net_time: row.get("net_time")?,
        target_time: row.get("target_time")?,
        break_time: row.get("break_time")?,
        work_days: row.get("work_days")?,
        days_with_errors: row.get("days_with_errors")?,
        vacation_taken: Decimal::from_str(&vacation_taken).map_err(|e| RepositoryError::Backend(e.to_string()))?,
        sick_days: Decimal::from_str(&sick_days).map_err(|e| RepositoryError::Backend(e.to_string()))?,
        other_absence_days: Decimal::from_str(&other_absence_days).map_err(|e| RepositoryError::Backend(e.to_string()))?,
        closed_at: row.get("closed_at")?,
        closed_by: closed_by.and_then(|s| UserId::from_str(&s).ok()),
        reopened_at: row.get("reopened_at")?,
        reopened_by: reopened_by.and_then(|s| UserId::from_str(&s).ok()),
        calculation_version: row.get("calculation_version")?,
    })
}

const SELECT_COLUMNS: &str = "year, month, status, opening_balance, sum_overtime, sum_undertime, credited_flextime,
     closing_balance, gross_time, net_time, target_time, break_time, work_days, days_with_errors,
     vacation_taken, sick_days, other_absence_days, closed_at, closed_by,
     reopened_at, reopened_by, calculation_version";

impl MonthlyValueRepository for SqliteDb {
    fn get_by_employee_month(&self, employee: EmployeeId, year: i32, month: u32) -> RepoResult<Option<MonthlyValue>> {
        let conn = self.conn.lock().unwrap();
        let sql = format!("SELECT {SELECT_COLUMNS} FROM monthly_values WHERE employee_id = ?1 AND year = ?2 AND month = ?3");
        let result = conn.query_row(&sql, params![employee.to_string(), year, month], |row| Ok(row_to_monthly_value(row, employee))).optional()?;
        result.transpose()
    }

    fn get_previous_month(&self, employee: EmployeeId, year: i32, month: u32) -> RepoResult<Option<MonthlyValue>> {
        let (prev_year, prev_month) = if month == 1 { (year - 1, 12) } else { (year, month - 1) };
        self.get_by_employee_month(employee, prev_year, prev_month)
    }

    /// The conflict-update clause deliberately omits `status`, `closed_at`,
    /// `closed_by` — a recalculation upsert can never reopen or close a
    /// month (spec §4.6).
    fn upsert(&self, value: &MonthlyValue) -> RepoResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO monthly_values (
                employee_id, year, month, status, opening_balance, sum_overtime, sum_undertime,
                credited_flextime, closing_balance, gross_time, net_time, target_time, break_time,
                work_days, days_with_errors, vacation_taken, sick_days, other_absence_days,
                closed_at, closed_by, calculation_version
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, NULL, NULL, ?19)
            ON CONFLICT(employee_id, year, month) DO UPDATE SET
                opening_balance = excluded.opening_balance,
                sum_overtime = excluded.sum_overtime,
                sum_undertime = excluded.sum_undertime,
                credited_flextime = excluded.credited_flextime,
                closing_balance = excluded.closing_balance,
                gross_time = excluded.gross_time,
                net_time = excluded.net_time,
                target_time = excluded.target_time,
                break_time = excluded.break_time,
                work_days = excluded.work_days,
                days_with_errors = excluded.days_with_errors,
                vacation_taken = excluded.vacation_taken,
                sick_days = excluded.sick_days,
                other_absence_days = excluded.other_absence_days,
                calculation_version = excluded.calculation_version",
            params![
                value.employee.to_string(),
                value.year,
                value.month,
                status_to_str(MonthlyStatus::Open),
                value.opening_balance,
                value.sum_overtime,
                value.sum_undertime,
                value.credited_flextime,
                value.closing_balance,
                value.gross_time,
                value.net_time,
                value.target_time,
                value.break_time,
                value.work_days,
                value.days_with_errors,
                value.vacation_taken.to_string(),
                value.sick_days.to_string(),
                value.other_absence_days.to_string(),
                value.calculation_version,
            ],
        )?;
        Ok(())
    }

    fn is_month_closed(&self, employee: EmployeeId, year: i32, month: u32) -> RepoResult<bool> {
        let conn = self.conn.lock().unwrap();
        let status: Option<String> = conn
            .query_row(
                "SELECT status FROM monthly_values WHERE employee_id = ?1 AND year = ?2 AND month = ?3",
                params![employee.to_string(), year, month],
                |row| row.get(0),
            )
            .optional()?;
        Ok(status.as_deref() == Some("closed"))
    }

    fn close_month(&self, employee: EmployeeId, year: i32, month: u32, by: UserId) -> RepoResult<()> {
        let conn = self.conn.lock().unwrap();
        let updated = conn.execute(
            "UPDATE monthly_values SET status = 'closed', closed_at = CURRENT_TIMESTAMP, closed_by = ?4,
                reopened_at = NULL, reopened_by = NULL
             WHERE employee_id = ?1 AND year = ?2 AND month = ?3",
            params![employee.to_string(), year, month, by.to_string()],
        )?;
        if updated == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// `closed_at`/`closed_by` record the original closure and are left
    /// intact; only `reopened_at`/`reopened_by` capture this event (spec
    /// §3.1 closure state carries both independently).
    fn reopen_month(&self, employee: EmployeeId, year: i32, month: u32, by: UserId) -> RepoResult<()> {
        let conn = self.conn.lock().unwrap();
        let updated = conn.execute(
            "UPDATE monthly_values SET status = 'reopened', reopened_at = CURRENT_TIMESTAMP, reopened_by = ?4
             WHERE employee_id = ?1 AND year = ?2 AND month = ?3",
            params![employee.to_string(), year, month, by.to_string()],
        )?;
        if updated == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
