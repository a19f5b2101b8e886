use crate::model::{DepartmentId, Holiday, HolidayId, TenantId};
use crate::repository::{HolidayRepository, RepoResult};
use crate::repository::sqlite::SqliteDb;
use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension};
use std::str::FromStr;

impl SqliteDb {
    pub fn put_holiday(&self, holiday: &Holiday) -> RepoResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO holidays (id, tenant_id, holiday_date, department_id, category) VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id) DO UPDATE SET category = excluded.category",
            params![
                holiday.id.to_string(),
                holiday.tenant.to_string(),
                holiday.date,
                holiday.department.map(|d| d.to_string()),
                holiday.category,
            ],
        )?;
        Ok(())
    }
}

impl HolidayRepository for SqliteDb {
    /// Matches a tenant-wide holiday (`department_id IS NULL`) as well as a
    /// department-scoped one for the same date (spec §4.4 step 1).
    fn get_for_date(&self, tenant: TenantId, date: NaiveDate, department: Option<DepartmentId>) -> RepoResult<Option<Holiday>> {
        let conn = self.conn.lock().unwrap();
        let row: Option<(String, Option<String>, u8)> = conn
            .query_row(
                "SELECT id, department_id, category FROM holidays
                 WHERE tenant_id = ?1 AND holiday_date = ?2 AND (department_id IS NULL OR department_id = ?3)
                 ORDER BY department_id IS NULL LIMIT 1",
                params![tenant.to_string(), date, department.map(|d| d.to_string())],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()?;
        Ok(row.map(|(id, department_id, category)| Holiday {
            id: HolidayId::from_str(&id).unwrap_or_default(),
            tenant,
            date,
            department: department_id.and_then(|s| DepartmentId::from_str(&s).ok()),
            category,
        }))
    }
}
