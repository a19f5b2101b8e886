use crate::error::RepositoryError;
use crate::model::{Booking, BookingId, BookingSource, BookingType, EmployeeId};
use crate::repository::{BookingRepository, RepoResult};
use crate::repository::sqlite::SqliteDb;
use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension, Row};
use std::collections::HashMap;
use std::str::FromStr;

fn source_to_str(source: BookingSource) -> &'static str {
    match source {
        BookingSource::Web => "web",
        BookingSource::Terminal => "terminal",
        BookingSource::Api => "api",
        BookingSource::Import => "import",
        BookingSource::Correction => "correction",
    }
}

fn source_from_str(s: &str) -> BookingSource {
    match s {
        "web" => BookingSource::Web,
        "terminal" => BookingSource::Terminal,
        "api" => BookingSource::Api,
        "correction" => BookingSource::Correction,
        _ => BookingSource::Import,
    }
}

fn row_to_booking(row: &Row) -> rusqlite::Result<Booking> {
    let id: String = row.get("id")?;
    let employee: String = row.get("employee_id")?;
    let pair_id: Option<String> = row.get("pair_id")?;
    let booking_type_json: String = row.get("booking_type_json")?;
    let source: String = row.get("source")?;
    Ok(Booking {
        id: BookingId::from_str(&id).unwrap_or_default(),
        employee: EmployeeId::from_str(&employee).unwrap_or_default(),
        date: row.get("booking_date")?,
        booking_type: serde_json::from_str::<BookingType>(&booking_type_json).unwrap_or_else(|_| BookingType::come()),
        original_time: row.get("original_time")?,
        edited_time: row.get("edited_time")?,
        calculated_time: row.get("calculated_time")?,
        pair_id: pair_id.and_then(|s| BookingId::from_str(&s).ok()),
        source: source_from_str(&source),
        terminal_id: row.get("terminal_id")?,
        booking_reason: row.get("booking_reason")?,
    })
}

impl SqliteDb {
    /// Inserts a booking as captured (ingest path), preserving its source
    /// and original/edited times. Used by ingest collaborators and test
    /// fixtures; the calculator never creates rows this way (it only
    /// writes `calculated_time`/`pair_id` via `update_calculated_times`).
    pub fn put_booking(&self, booking: &Booking) -> RepoResult<()> {
        let conn = self.conn.lock().unwrap();
        let booking_type_json = serde_json::to_string(&booking.booking_type).map_err(|e| RepositoryError::Backend(e.to_string()))?;
        conn.execute(
            "INSERT INTO bookings (id, employee_id, booking_date, booking_type_json, original_time, edited_time,
                    calculated_time, pair_id, source, terminal_id, booking_reason)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
             ON CONFLICT(id) DO UPDATE SET
                booking_type_json = excluded.booking_type_json, original_time = excluded.original_time,
                edited_time = excluded.edited_time, calculated_time = excluded.calculated_time,
                pair_id = excluded.pair_id, source = excluded.source, terminal_id = excluded.terminal_id,
                booking_reason = excluded.booking_reason",
            params![
                booking.id.to_string(),
                booking.employee.to_string(),
                booking.date,
                booking_type_json,
                booking.original_time,
                booking.edited_time,
                booking.calculated_time,
                booking.pair_id.map(|p| p.to_string()),
                source_to_str(booking.source),
                booking.terminal_id,
                booking.booking_reason,
            ],
        )?;
        Ok(())
    }
}

impl BookingRepository for SqliteDb {
    fn get_by_employee_date(&self, employee: EmployeeId, date: NaiveDate) -> RepoResult<Vec<Booking>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, employee_id, booking_date, booking_type_json, original_time, edited_time,
                    calculated_time, pair_id, source, terminal_id, booking_reason
             FROM bookings WHERE employee_id = ?1 AND booking_date = ?2 ORDER BY edited_time",
        )?;
        let rows = stmt.query_map(params![employee.to_string(), date], row_to_booking)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn get_by_employee_date_range(&self, employee: EmployeeId, from: NaiveDate, to: NaiveDate) -> RepoResult<Vec<Booking>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, employee_id, booking_date, booking_type_json, original_time, edited_time,
                    calculated_time, pair_id, source, terminal_id, booking_reason
             FROM bookings WHERE employee_id = ?1 AND booking_date BETWEEN ?2 AND ?3 ORDER BY booking_date, edited_time",
        )?;
        let rows = stmt.query_map(params![employee.to_string(), from, to], row_to_booking)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn update_calculated_times(&self, updates: &HashMap<BookingId, (u16, Option<BookingId>)>) -> RepoResult<()> {
        let conn = self.conn.lock().unwrap();
        for (id, (calculated_time, pair_id)) in updates {
            conn.execute(
                "UPDATE bookings SET calculated_time = ?1, pair_id = ?2 WHERE id = ?3",
                params![calculated_time, pair_id.map(|p| p.to_string()), id.to_string()],
            )?;
        }
        Ok(())
    }

    fn create_auto(&self, employee: EmployeeId, date: NaiveDate, booking_type: BookingType, time: u16) -> RepoResult<BookingId> {
        let conn = self.conn.lock().unwrap();
        let id = BookingId::new();
        let booking_type_json = serde_json::to_string(&booking_type).map_err(|e| RepositoryError::Backend(e.to_string()))?;
        conn.execute(
            "INSERT INTO bookings (id, employee_id, booking_date, booking_type_json, original_time, edited_time, source)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5, 'import')",
            params![id.to_string(), employee.to_string(), date, booking_type_json, time],
        )?;
        Ok(id)
    }

    fn delete_auto_by_date(&self, employee: EmployeeId, date: NaiveDate) -> RepoResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "DELETE FROM bookings WHERE employee_id = ?1 AND booking_date = ?2 AND source = 'import'",
            params![employee.to_string(), date],
        )?;
        Ok(())
    }
}

#[allow(dead_code)]
fn booking_exists(conn: &rusqlite::Connection, id: BookingId) -> RepoResult<bool> {
    let exists: Option<i64> = conn
        .query_row("SELECT 1 FROM bookings WHERE id = ?1", params![id.to_string()], |row| row.get(0))
        .optional()?;
    Ok(exists.is_some())
}
