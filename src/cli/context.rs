//! Wires a single [`SqliteDb`] connection into every repository trait it
//! implements and assembles the two services the CLI drives, grounded on
//! the teacher's pattern of opening one `Db` per invocation in each
//! command's `cmd()` function.

use crate::config::EngineSettings;
use crate::repository::sqlite::SqliteDb;
use crate::service::daily::DailyCalculationService;
use crate::service::recalc::RecalcOrchestrator;
use anyhow::Result;
use std::sync::Arc;

/// Bundles the daily service and the recalc orchestrator behind the one
/// `SqliteDb` connection both are built from. `SqliteDb` implements every
/// repository trait the core depends on (spec §4.6), so a single `Arc`
/// satisfies all of the services' constructor parameters.
pub struct EngineContext {
    pub daily: Arc<DailyCalculationService>,
    pub recalc: Arc<RecalcOrchestrator>,
}

impl EngineContext {
    pub fn open() -> Result<Self> {
        let settings = EngineSettings::read()?;
        let db = Arc::new(SqliteDb::open(&settings)?);
        Self::from_db(db)
    }

    pub fn from_db(db: Arc<SqliteDb>) -> Result<Self> {
        let daily = Arc::new(DailyCalculationService::new(
            db.clone(),
            db.clone(),
            db.clone(),
            db.clone(),
            db.clone(),
            db.clone(),
            db.clone(),
            db.clone(),
            db.clone(),
            None,
            None,
        ));

        let recalc = Arc::new(RecalcOrchestrator::new(daily.clone(), db.clone(), db.clone(), db.clone(), db, None));

        Ok(Self { daily, recalc })
    }
}
