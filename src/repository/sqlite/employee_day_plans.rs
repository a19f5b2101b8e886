use crate::model::{DayPlanId, EmployeeDayPlan, EmployeeDayPlanSource, EmployeeId};
use crate::repository::{EmployeeDayPlanRepository, RepoResult};
use crate::repository::sqlite::SqliteDb;
use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension};
use std::str::FromStr;

fn source_to_str(source: EmployeeDayPlanSource) -> &'static str {
    match source {
        EmployeeDayPlanSource::Tariff => "tariff",
        EmployeeDayPlanSource::Manual => "manual",
        EmployeeDayPlanSource::Holiday => "holiday",
    }
}

fn source_from_str(s: &str) -> EmployeeDayPlanSource {
    match s {
        "manual" => EmployeeDayPlanSource::Manual,
        "holiday" => EmployeeDayPlanSource::Holiday,
        _ => EmployeeDayPlanSource::Tariff,
    }
}

impl EmployeeDayPlanRepository for SqliteDb {
    fn get_for_employee_date(&self, employee: EmployeeId, date: NaiveDate) -> RepoResult<Option<EmployeeDayPlan>> {
        let conn = self.conn.lock().unwrap();
        let row: Option<(Option<String>, String)> = conn
            .query_row(
                "SELECT day_plan_id, source FROM employee_day_plans WHERE employee_id = ?1 AND plan_date = ?2",
                params![employee.to_string(), date],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;
        Ok(row.map(|(day_plan_id, source)| EmployeeDayPlan {
            employee,
            date,
            day_plan: day_plan_id.and_then(|s| DayPlanId::from_str(&s).ok()),
            source: source_from_str(&source),
        }))
    }

    fn get_for_employee_date_range(&self, employee: EmployeeId, from: NaiveDate, to: NaiveDate) -> RepoResult<Vec<EmployeeDayPlan>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT plan_date, day_plan_id, source FROM employee_day_plans
             WHERE employee_id = ?1 AND plan_date BETWEEN ?2 AND ?3 ORDER BY plan_date",
        )?;
        let rows = stmt.query_map(params![employee.to_string(), from, to], |row| {
            let date: NaiveDate = row.get(0)?;
            let day_plan_id: Option<String> = row.get(1)?;
            let source: String = row.get(2)?;
            Ok(EmployeeDayPlan {
                employee,
                date,
                day_plan: day_plan_id.and_then(|s| DayPlanId::from_str(&s).ok()),
                source: source_from_str(&source),
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn bulk_create(&self, rows: &[EmployeeDayPlan]) -> RepoResult<()> {
        let conn = self.conn.lock().unwrap();
        for row in rows {
            conn.execute(
                "INSERT INTO employee_day_plans (employee_id, plan_date, day_plan_id, source) VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(employee_id, plan_date) DO UPDATE SET day_plan_id = excluded.day_plan_id, source = excluded.source",
                params![row.employee.to_string(), row.date, row.day_plan.map(|id| id.to_string()), source_to_str(row.source)],
            )?;
        }
        Ok(())
    }

    fn delete_range_by_source(&self, employee: EmployeeId, from: NaiveDate, to: NaiveDate, source: EmployeeDayPlanSource) -> RepoResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "DELETE FROM employee_day_plans WHERE employee_id = ?1 AND plan_date BETWEEN ?2 AND ?3 AND source = ?4",
            params![employee.to_string(), from, to, source_to_str(source)],
        )?;
        Ok(())
    }
}
