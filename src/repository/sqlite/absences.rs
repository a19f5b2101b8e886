use crate::error::RepositoryError;
use crate::model::{AbsenceDay, AbsenceDayId, AbsenceStatus, AbsenceType, EmployeeId};
use crate::repository::{AbsenceDayRepository, RepoResult};
use crate::repository::sqlite::SqliteDb;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rusqlite::params;
use std::str::FromStr;

fn status_to_str(status: AbsenceStatus) -> &'static str {
    match status {
        AbsenceStatus::Pending => "pending",
        AbsenceStatus::Approved => "approved",
        AbsenceStatus::Rejected => "rejected",
        AbsenceStatus::Cancelled => "cancelled",
    }
}

fn status_from_str(s: &str) -> AbsenceStatus {
    match s {
        "approved" => AbsenceStatus::Approved,
        "rejected" => AbsenceStatus::Rejected,
        "cancelled" => AbsenceStatus::Cancelled,
        _ => AbsenceStatus::Pending,
    }
}

impl SqliteDb {
    pub fn put_absence_day(&self, absence: &AbsenceDay) -> RepoResult<()> {
        let conn = self.conn.lock().unwrap();
        let absence_type_json = serde_json::to_string(&absence.absence_type).map_err(|e| RepositoryError::Backend(e.to_string()))?;
        conn.execute(
            "INSERT INTO absence_days (id, employee_id, absence_date, absence_type_json, duration, status)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(id) DO UPDATE SET duration = excluded.duration, status = excluded.status",
            params![
                absence.id.to_string(),
                absence.employee.to_string(),
                absence.date,
                absence_type_json,
                absence.duration.to_string(),
                status_to_str(absence.status),
            ],
        )?;
        Ok(())
    }
}

impl AbsenceDayRepository for SqliteDb {
    fn get_by_employee_date_range(&self, employee: EmployeeId, from: NaiveDate, to: NaiveDate) -> RepoResult<Vec<AbsenceDay>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, absence_date, absence_type_json, duration, status FROM absence_days
             WHERE employee_id = ?1 AND absence_date BETWEEN ?2 AND ?3 ORDER BY absence_date",
        )?;
        let rows = stmt.query_map(params![employee.to_string(), from, to], |row| {
            let id: String = row.get(0)?;
            let date: NaiveDate = row.get(1)?;
            let absence_type_json: String = row.get(2)?;
            let duration: String = row.get(3)?;
            let status: String = row.get(4)?;
            Ok((id, date, absence_type_json, duration, status))
        })?;

        let mut result = Vec::new();
        for row in rows {
            let (id, date, absence_type_json, duration, status) = row?;
            let absence_type: AbsenceType = serde_json::from_str(&absence_type_json).map_err(|e| RepositoryError::Backend(e.to_string()))?;
            result.push(AbsenceDay {
                id: AbsenceDayId::from_str(&id).unwrap_or_default(),
                employee,
                date,
                absence_type,
                duration: Decimal::from_str(&duration).map_err(|e| RepositoryError::Backend(e.to_string()))?,
                status: status_from_str(&status),
            });
        }
        Ok(result)
    }
}
