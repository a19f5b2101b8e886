//! `DailyAccountValueRepository` (spec §4.6): atomic replace-by-source
//! semantics for the daily service's account postings (spec §4.4 step 7).

use crate::model::{AccountId, AccountValueSource, DailyAccountValue, EmployeeId};
use crate::repository::sqlite::SqliteDb;
use crate::repository::{DailyAccountValueRepository, RepoResult};
use chrono::NaiveDate;
use rusqlite::params;
use std::str::FromStr;

fn source_to_str(source: AccountValueSource) -> &'static str {
    match source {
        AccountValueSource::Bonus => "bonus",
        AccountValueSource::Overflow => "overflow",
        AccountValueSource::Manual => "manual",
        AccountValueSource::Correction => "correction",
        AccountValueSource::Import => "import",
    }
}

fn source_from_str(s: &str) -> AccountValueSource {
    match s {
        "overflow" => AccountValueSource::Overflow,
        "manual" => AccountValueSource::Manual,
        "correction" => AccountValueSource::Correction,
        "import" => AccountValueSource::Import,
        _ => AccountValueSource::Bonus,
    }
}

/// `calculated` in spec §4.6 means "written by the daily calculator", i.e.
/// either of the two calculator-originated sources. Only these are wiped
/// and replaced on each recomputation; `Manual`/`Correction`/`Import`
/// postings survive (spec §4.4 step 7: "only `source = calculated` rows
/// replaced").
fn is_calculated_source(source: AccountValueSource) -> bool {
    matches!(source, AccountValueSource::Bonus | AccountValueSource::Overflow)
}

impl DailyAccountValueRepository for SqliteDb {
    fn upsert_replacing_calculated_source(&self, employee: EmployeeId, date: NaiveDate, postings: &[DailyAccountValue]) -> RepoResult<()> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        tx.execute(
            "DELETE FROM daily_account_values WHERE employee_id = ?1 AND value_date = ?2 AND source IN ('bonus', 'overflow')",
            params![employee.to_string(), date],
        )?;
        for posting in postings.iter().filter(|p| is_calculated_source(p.source)) {
            tx.execute(
                "INSERT INTO daily_account_values (employee_id, account_id, value_date, minutes, source)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![employee.to_string(), posting.account.to_string(), date, posting.minutes, source_to_str(posting.source)],
            )?;
        }
        tx.commit()?;
        Ok(())
    }
}

impl SqliteDb {
    /// Manual account postings are never touched by recalculation; this is
    /// the only write path for `source = manual` rows.
    pub fn put_manual_account_value(&self, value: &DailyAccountValue) -> RepoResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO daily_account_values (employee_id, account_id, value_date, minutes, source) VALUES (?1, ?2, ?3, ?4, 'manual')",
            params![value.employee.to_string(), value.account.to_string(), value.date, value.minutes],
        )?;
        Ok(())
    }

    pub fn get_account_values_for_date(&self, employee: EmployeeId, date: NaiveDate) -> RepoResult<Vec<DailyAccountValue>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT account_id, minutes, source FROM daily_account_values WHERE employee_id = ?1 AND value_date = ?2")?;
        let rows = stmt.query_map(params![employee.to_string(), date], |row| {
            let account_id: String = row.get(0)?;
            let minutes: i32 = row.get(1)?;
            let source: String = row.get(2)?;
            Ok((account_id, minutes, source))
        })?;
        let mut result = Vec::new();
        for row in rows {
            let (account_id, minutes, source) = row?;
            result.push(DailyAccountValue {
                employee,
                account: AccountId::from_str(&account_id).unwrap_or_default(),
                date,
                minutes,
                source: source_from_str(&source),
            });
        }
        Ok(result)
    }
}
