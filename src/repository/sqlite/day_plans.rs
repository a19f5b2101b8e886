use crate::error::RepositoryError;
use crate::model::{DayPlan, DayPlanId};
use crate::repository::{DayPlanRepository, RepoResult};
use crate::repository::sqlite::SqliteDb;
use rusqlite::{params, OptionalExtension};

impl SqliteDb {
    pub fn put_day_plan(&self, plan: &DayPlan) -> RepoResult<()> {
        let conn = self.conn.lock().unwrap();
        let config_json = serde_json::to_string(plan).map_err(|e| RepositoryError::Backend(e.to_string()))?;
        conn.execute(
            "INSERT INTO day_plans (id, config_json) VALUES (?1, ?2)
             ON CONFLICT(id) DO UPDATE SET config_json = excluded.config_json",
            params![plan.id.to_string(), config_json],
        )?;
        Ok(())
    }
}

impl DayPlanRepository for SqliteDb {
    fn get_with_details(&self, id: DayPlanId) -> RepoResult<Option<DayPlan>> {
        let conn = self.conn.lock().unwrap();
        let config_json: Option<String> = conn
            .query_row("SELECT config_json FROM day_plans WHERE id = ?1", params![id.to_string()], |row| row.get(0))
            .optional()?;
        match config_json {
            Some(json) => Ok(Some(serde_json::from_str(&json).map_err(|e| RepositoryError::Backend(e.to_string()))?)),
            None => Ok(None),
        }
    }
}
