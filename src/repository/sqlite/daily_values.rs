use crate::error::RepositoryError;
use crate::model::{CappingBreakdown, DailyStatus, DailyValue, EmployeeId, ErrorCode, WarningCode};
use crate::repository::{DailyValueRepository, RepoResult};
use crate::repository::sqlite::SqliteDb;
use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension, Row};

fn status_to_str(status: DailyStatus) -> &'static str {
    match status {
        DailyStatus::Pending => "pending",
        DailyStatus::Calculated => "calculated",
        DailyStatus::Error => "error",
        DailyStatus::Approved => "approved",
    }
}

fn status_from_str(s: &str) -> DailyStatus {
    match s {
        "calculated" => DailyStatus::Calculated,
        "error" => DailyStatus::Error,
        "approved" => DailyStatus::Approved,
        _ => DailyStatus::Pending,
    }
}

fn row_to_daily_value(row: &Row, employee: EmployeeId) -> Result<DailyValue, RepositoryError> {
    let status: String = row.get("status")?;
    let capping_json: String = row.get("capping_json")?;
    let error_codes_json: String = row.get("error_codes_json")?;
    let warnings_json: String = row.get("warnings_json")?;
    Ok(DailyValue {
        employee,
        date: row.get("value_date")?,
        status: status_from_str(&status),
        gross_time: row.get("gross_time")?,
        net_time: row.get("net_time")?,
        target_time: row.get("target_time")?,
        overtime: row.get("overtime")?,
        undertime: row.get("undertime")?,
        break_time: row.get("break_time")?,
        capping: serde_json::from_str::<CappingBreakdown>(&capping_json).map_err(|e| RepositoryError::Backend(e.to_string()))?,
        first_come: row.get("first_come")?,
        last_go: row.get("last_go")?,
        booking_count: row.get("booking_count")?,
        has_error: row.get("has_error")?,
        error_codes: serde_json::from_str::<Vec<ErrorCode>>(&error_codes_json).map_err(|e| RepositoryError::Backend(e.to_string()))?,
        warnings: serde_json::from_str::<Vec<WarningCode>>(&warnings_json).map_err(|e| RepositoryError::Backend(e.to_string()))?,
        calculated_at: row.get("calculated_at")?,
        calculation_version: row.get("calculation_version")?,
    })
}

impl DailyValueRepository for SqliteDb {
    fn upsert_by_employee_date(&self, value: &DailyValue) -> RepoResult<()> {
        let conn = self.conn.lock().unwrap();
        let capping_json = serde_json::to_string(&value.capping).map_err(|e| RepositoryError::Backend(e.to_string()))?;
        let error_codes_json = serde_json::to_string(&value.error_codes).map_err(|e| RepositoryError::Backend(e.to_string()))?;
        let warnings_json = serde_json::to_string(&value.warnings).map_err(|e| RepositoryError::Backend(e.to_string()))?;
        conn.execute(
            "INSERT INTO daily_values (
                employee_id, value_date, status, gross_time, net_time, target_time, overtime, undertime,
                break_time, capping_json, first_come, last_go, booking_count, has_error, error_codes_json,
                warnings_json, calculated_at, calculation_version
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)
            ON CONFLICT(employee_id, value_date) DO UPDATE SET
                status = excluded.status, gross_time = excluded.gross_time, net_time = excluded.net_time,
                target_time = excluded.target_time, overtime = excluded.overtime, undertime = excluded.undertime,
                break_time = excluded.break_time, capping_json = excluded.capping_json, first_come = excluded.first_come,
                last_go = excluded.last_go, booking_count = excluded.booking_count, has_error = excluded.has_error,
                error_codes_json = excluded.error_codes_json, warnings_json = excluded.warnings_json,
                calculated_at = excluded.calculated_at, calculation_version = excluded.calculation_version",
            params![
                value.employee.to_string(),
                value.date,
                status_to_str(value.status),
                value.gross_time,
                value.net_time,
                value.target_time,
                value.overtime,
                value.undertime,
                value.break_time,
                capping_json,
                value.first_come,
                value.last_go,
                value.booking_count,
                value.has_error,
                error_codes_json,
                warnings_json,
                value.calculated_at,
                value.calculation_version,
            ],
        )?;
        Ok(())
    }

    fn get_by_employee_date(&self, employee: EmployeeId, date: NaiveDate) -> RepoResult<Option<DailyValue>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT value_date, status, gross_time, net_time, target_time, overtime, undertime, break_time,
                    capping_json, first_come, last_go, booking_count, has_error, error_codes_json, warnings_json,
                    calculated_at, calculation_version
             FROM daily_values WHERE employee_id = ?1 AND value_date = ?2",
        )?;
        let result = stmt.query_row(params![employee.to_string(), date], |row| Ok(row_to_daily_value(row, employee))).optional()?;
        result.transpose()
    }
}
