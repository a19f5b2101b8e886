//! `EmployeeRepository` (spec §4.6): the minimal employee identity the
//! core reads (hire/termination dates for the rhythm materialization
//! window, department for holiday scoping, target override for §4.2(g)).

use crate::error::RepositoryError;
use crate::model::{DepartmentId, Employee, EmployeeId, TenantId};
use crate::repository::sqlite::SqliteDb;
use crate::repository::{EmployeeRepository, RepoResult};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rusqlite::{params, OptionalExtension};
use std::str::FromStr;

impl SqliteDb {
    pub fn put_employee(&self, employee: &Employee) -> RepoResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO employees (id, tenant_id, department_id, hire_date, termination_date, target_override, part_time_factor)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT(id) DO UPDATE SET
                tenant_id = excluded.tenant_id, department_id = excluded.department_id,
                hire_date = excluded.hire_date, termination_date = excluded.termination_date,
                target_override = excluded.target_override, part_time_factor = excluded.part_time_factor",
            params![
                employee.id.to_string(),
                employee.tenant.to_string(),
                employee.department.map(|d| d.to_string()),
                employee.hire_date,
                employee.termination_date,
                employee.target_override,
                employee.part_time_factor.to_string(),
            ],
        )?;
        Ok(())
    }
}

impl EmployeeRepository for SqliteDb {
    fn get_by_id(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        let conn = self.conn.lock().unwrap();
        let row: Option<(String, Option<String>, NaiveDate, Option<NaiveDate>, Option<u16>, String)> = conn
            .query_row(
                "SELECT tenant_id, department_id, hire_date, termination_date, target_override, part_time_factor
                 FROM employees WHERE id = ?1",
                params![id.to_string()],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?, row.get(5)?)),
            )
            .optional()?;
        row.map(|(tenant_id, department_id, hire_date, termination_date, target_override, part_time_factor)| {
            Ok(Employee {
                id,
                tenant: TenantId::from_str(&tenant_id).unwrap_or_default(),
                department: department_id.and_then(|s| DepartmentId::from_str(&s).ok()),
                hire_date,
                termination_date,
                target_override,
                part_time_factor: Decimal::from_str(&part_time_factor).map_err(|e| RepositoryError::Backend(e.to_string()))?,
            })
        })
        .transpose()
    }
}
