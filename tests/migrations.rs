//! On-disk schema fixture (spec §4.6 persistence contract): migrations
//! must apply automatically on first open, stay idempotent across repeat
//! opens of the same file, and leave data intact across a reopen.

#[cfg(test)]
mod tests {
    use kasl_time_core::model::{Booking, BookingSource, BookingType, EmployeeId};
    use kasl_time_core::repository::sqlite::SqliteDb;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct MigrationTestContext {
        _temp_dir: TempDir,
        db_path: std::path::PathBuf,
    }

    impl TestContext for MigrationTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db_path = temp_dir.path().join("core.sqlite3");
            MigrationTestContext { _temp_dir: temp_dir, db_path }
        }
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn migrations_run_automatically_on_first_open(ctx: &mut MigrationTestContext) {
        let db = SqliteDb::open_path(&ctx.db_path).unwrap();
        drop(db);
        assert!(ctx.db_path.exists());
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn reopening_the_same_file_is_idempotent(ctx: &mut MigrationTestContext) {
        SqliteDb::open_path(&ctx.db_path).unwrap();
        // A second open re-runs `run_migrations` against a schema that
        // already has every table; `CREATE TABLE IF NOT EXISTS` plus the
        // applied-versions check must make this a no-op, not an error.
        SqliteDb::open_path(&ctx.db_path).unwrap();
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn data_survives_a_reopen(ctx: &mut MigrationTestContext) {
        let employee = EmployeeId::new();
        let date = chrono::NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();

        {
            let db = SqliteDb::open_path(&ctx.db_path).unwrap();
            let booking = Booking::new(employee, date, BookingType::come(), 480, BookingSource::Terminal);
            db.put_booking(&booking).unwrap();
        }

        let db = SqliteDb::open_path(&ctx.db_path).unwrap();
        let bookings = kasl_time_core::repository::BookingRepository::get_by_employee_date(&db, employee, date).unwrap();
        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].edited_time, 480);
    }
}
