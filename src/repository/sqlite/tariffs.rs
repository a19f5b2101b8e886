use crate::error::RepositoryError;
use crate::model::{EmployeeId, Tariff, TariffId};
use crate::repository::{RepoResult, TariffRepository};
use crate::repository::sqlite::SqliteDb;
use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension};

impl SqliteDb {
    pub fn put_tariff(&self, tariff: &Tariff) -> RepoResult<()> {
        let conn = self.conn.lock().unwrap();
        let config_json = serde_json::to_string(tariff).map_err(|e| RepositoryError::Backend(e.to_string()))?;
        conn.execute(
            "INSERT INTO tariffs (id, config_json) VALUES (?1, ?2)
             ON CONFLICT(id) DO UPDATE SET config_json = excluded.config_json",
            params![tariff.id.to_string(), config_json],
        )?;
        Ok(())
    }

    pub fn assign_tariff(&self, employee: EmployeeId, tariff: TariffId) -> RepoResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR IGNORE INTO employee_tariffs (employee_id, tariff_id) VALUES (?1, ?2)",
            params![employee.to_string(), tariff.to_string()],
        )?;
        Ok(())
    }
}

impl TariffRepository for SqliteDb {
    fn get_with_details(&self, id: TariffId) -> RepoResult<Option<Tariff>> {
        let conn = self.conn.lock().unwrap();
        let config_json: Option<String> = conn
            .query_row("SELECT config_json FROM tariffs WHERE id = ?1", params![id.to_string()], |row| row.get(0))
            .optional()?;
        match config_json {
            Some(json) => Ok(Some(serde_json::from_str(&json).map_err(|e| RepositoryError::Backend(e.to_string()))?)),
            None => Ok(None),
        }
    }

    fn get_active_for_employee(&self, employee: EmployeeId, date: NaiveDate) -> RepoResult<Option<Tariff>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT t.config_json FROM tariffs t
             JOIN employee_tariffs et ON et.tariff_id = t.id
             WHERE et.employee_id = ?1",
        )?;
        let candidates = stmt.query_map(params![employee.to_string()], |row| row.get::<_, String>(0))?;
        for json in candidates {
            let json = json?;
            let tariff: Tariff = serde_json::from_str(&json).map_err(|e| RepositoryError::Backend(e.to_string()))?;
            if tariff.is_active_for(date) {
                return Ok(Some(tariff));
            }
        }
        Ok(None)
    }
}
