//! Versioned schema migrations, grounded on the teacher's
//! `db::migrations::MigrationManager` (registry of `fn(&Transaction)`
//! steps, tracked in a `migrations` table, applied inside one transaction
//! per run).

use anyhow::Result;
use rusqlite::{params, Connection, Transaction};
use tracing::{debug, info};

const MIGRATIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

struct Migration {
    version: u32,
    name: &'static str,
    up: fn(&Transaction) -> Result<()>,
}

pub struct MigrationManager {
    migrations: Vec<Migration>,
}

impl MigrationManager {
    pub fn new() -> Self {
        let mut manager = Self { migrations: Vec::new() };
        manager.register_migrations();
        manager
    }

    fn add_migration(&mut self, version: u32, name: &'static str, up: fn(&Transaction) -> Result<()>) {
        self.migrations.push(Migration { version, name, up });
    }

    fn register_migrations(&mut self) {
        self.add_migration(1, "create_core_schema", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS employees (
                    id TEXT NOT NULL PRIMARY KEY,
                    tenant_id TEXT NOT NULL,
                    department_id TEXT,
                    hire_date DATE NOT NULL,
                    termination_date DATE,
                    target_override INTEGER,
                    part_time_factor TEXT NOT NULL DEFAULT '1.0'
                )",
                [],
            )?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_employees_tenant ON employees(tenant_id)", [])?;

            tx.execute(
                "CREATE TABLE IF NOT EXISTS day_plans (
                    id TEXT NOT NULL PRIMARY KEY,
                    config_json TEXT NOT NULL
                )",
                [],
            )?;

            tx.execute(
                "CREATE TABLE IF NOT EXISTS tariffs (
                    id TEXT NOT NULL PRIMARY KEY,
                    config_json TEXT NOT NULL
                )",
                [],
            )?;

            tx.execute(
                "CREATE TABLE IF NOT EXISTS employee_tariffs (
                    employee_id TEXT NOT NULL,
                    tariff_id TEXT NOT NULL,
                    PRIMARY KEY (employee_id, tariff_id)
                )",
                [],
            )?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_employee_tariffs_employee ON employee_tariffs(employee_id)", [])?;

            tx.execute(
                "CREATE TABLE IF NOT EXISTS employee_day_plans (
                    employee_id TEXT NOT NULL,
                    plan_date DATE NOT NULL,
                    day_plan_id TEXT,
                    source TEXT NOT NULL,
                    PRIMARY KEY (employee_id, plan_date)
                )",
                [],
            )?;

            tx.execute(
                "CREATE TABLE IF NOT EXISTS bookings (
                    id TEXT NOT NULL PRIMARY KEY,
                    employee_id TEXT NOT NULL,
                    booking_date DATE NOT NULL,
                    booking_type_json TEXT NOT NULL,
                    original_time INTEGER NOT NULL,
                    edited_time INTEGER NOT NULL,
                    calculated_time INTEGER,
                    pair_id TEXT,
                    source TEXT NOT NULL,
                    terminal_id TEXT,
                    booking_reason TEXT
                )",
                [],
            )?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_bookings_employee_date ON bookings(employee_id, booking_date)", [])?;

            tx.execute(
                "CREATE TABLE IF NOT EXISTS absence_days (
                    id TEXT NOT NULL PRIMARY KEY,
                    employee_id TEXT NOT NULL,
                    absence_date DATE NOT NULL,
                    absence_type_json TEXT NOT NULL,
                    duration TEXT NOT NULL,
                    status TEXT NOT NULL
                )",
                [],
            )?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_absence_days_employee_date ON absence_days(employee_id, absence_date)", [])?;

            tx.execute(
                "CREATE TABLE IF NOT EXISTS holidays (
                    id TEXT NOT NULL PRIMARY KEY,
                    tenant_id TEXT NOT NULL,
                    holiday_date DATE NOT NULL,
                    department_id TEXT,
                    category INTEGER NOT NULL
                )",
                [],
            )?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_holidays_tenant_date ON holidays(tenant_id, holiday_date)", [])?;

            tx.execute(
                "CREATE TABLE IF NOT EXISTS daily_values (
                    employee_id TEXT NOT NULL,
                    value_date DATE NOT NULL,
                    status TEXT NOT NULL,
                    gross_time INTEGER NOT NULL,
                    net_time INTEGER NOT NULL,
                    target_time INTEGER NOT NULL,
                    overtime INTEGER NOT NULL,
                    undertime INTEGER NOT NULL,
                    break_time INTEGER NOT NULL,
                    capping_json TEXT NOT NULL,
                    first_come INTEGER,
                    last_go INTEGER,
                    booking_count INTEGER NOT NULL,
                    has_error BOOLEAN NOT NULL,
                    error_codes_json TEXT NOT NULL,
                    warnings_json TEXT NOT NULL,
                    calculated_at TIMESTAMP NOT NULL,
                    calculation_version INTEGER NOT NULL,
                    PRIMARY KEY (employee_id, value_date)
                )",
                [],
            )?;

            tx.execute(
                "CREATE TABLE IF NOT EXISTS monthly_values (
                    employee_id TEXT NOT NULL,
                    year INTEGER NOT NULL,
                    month INTEGER NOT NULL,
                    status TEXT NOT NULL,
                    opening_balance INTEGER NOT NULL,
                    sum_overtime INTEGER NOT NULL,
                    sum_undertime INTEGER NOT NULL,
                    credited_flextime INTEGER NOT NULL,
                    closing_balance INTEGER NOT NULL,
                    gross_time INTEGER NOT NULL,
                    net_time INTEGER NOT NULL,
                    target_time INTEGER NOT NULL,
                    break_time INTEGER NOT NULL,
                    work_days INTEGER NOT NULL,
                    days_with_errors INTEGER NOT NULL,
                    vacation_taken TEXT NOT NULL,
                    sick_days TEXT NOT NULL,
                    other_absence_days TEXT NOT NULL,
                    closed_at TIMESTAMP,
                    closed_by TEXT,
                    reopened_at TIMESTAMP,
                    reopened_by TEXT,
                    calculation_version INTEGER NOT NULL,
                    PRIMARY KEY (employee_id, year, month)
                )",
                [],
            )?;

            tx.execute(
                "CREATE TABLE IF NOT EXISTS daily_account_values (
                    employee_id TEXT NOT NULL,
                    account_id TEXT NOT NULL,
                    value_date DATE NOT NULL,
                    minutes INTEGER NOT NULL,
                    source TEXT NOT NULL
                )",
                [],
            )?;
            tx.execute(
                "CREATE INDEX IF NOT EXISTS idx_account_values_employee_date ON daily_account_values(employee_id, value_date, account_id)",
                [],
            )?;

            Ok(())
        });
    }

    pub fn run_migrations(&self, conn: &mut Connection) -> Result<()> {
        conn.execute(MIGRATIONS_TABLE, [])?;
        let current_version = self.get_current_version(conn)?;
        let pending: Vec<&Migration> = self.migrations.iter().filter(|m| m.version > current_version).collect();

        if pending.is_empty() {
            debug!("database schema up to date at version {}", current_version);
            return Ok(());
        }

        let tx = conn.transaction()?;
        for migration in &pending {
            info!(version = migration.version, name = migration.name, "applying migration");
            (migration.up)(&tx)?;
            tx.execute("INSERT INTO migrations (version, name) VALUES (?1, ?2)", params![migration.version, migration.name])?;
        }
        tx.commit()?;
        info!(applied = pending.len(), "migrations complete");
        Ok(())
    }

    fn get_current_version(&self, conn: &Connection) -> Result<u32> {
        let version: Option<u32> = conn.query_row("SELECT MAX(version) FROM migrations", [], |row| row.get(0)).unwrap_or(Some(0));
        Ok(version.unwrap_or(0))
    }
}

pub fn init_with_migrations(conn: &mut Connection) -> Result<()> {
    MigrationManager::new().run_migrations(conn)
}
