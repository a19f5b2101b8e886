//! Engine configuration, grounded on the teacher's `libs::config::Config`
//! read/save-over-`DataStorage` pattern, trimmed to the knobs the
//! calculation core itself consumes (spec §6.3, §9 open questions) rather
//! than the teacher's API-integration settings.

use crate::libs::data_storage::DataStorage;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const CONFIG_FILE_NAME: &str = "kasl-time-core.json";
const DEFAULT_DB_FILE_NAME: &str = "kasl-time-core.db";

/// The calculation version the core currently implements. Persisted on
/// every `DailyValue`/`MonthlyValue`; bumping it is how an algorithm change
/// forces a recompute on next `calculate_day`/`calculate_month` (spec §6.2).
pub const CALCULATION_VERSION: u32 = 1;

/// Process-wide engine settings (spec §9 "Ambient stack").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Where the sqlite-backed repositories open their connection.
    pub database_path: PathBuf,

    /// Default cut-off clock time (minutes from midnight) used to
    /// auto-complete an unclosed cross-midnight pair when a `DayPlan`
    /// doesn't set `day_change_cutoff` explicitly (spec §4.2(c)).
    pub default_day_change_cutoff: u16,

    /// Default annual flextime floor applied at year boundaries when no
    /// tenant-specific value is available from `SettingsLookup` (spec
    /// §4.3 "Annual carryover").
    pub default_annual_floor: i32,

    pub calculation_version: u32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            database_path: DataStorage::new().get_path(DEFAULT_DB_FILE_NAME).unwrap_or_else(|_| PathBuf::from(DEFAULT_DB_FILE_NAME)),
            default_day_change_cutoff: 360, // 06:00
            default_annual_floor: 0,
            calculation_version: CALCULATION_VERSION,
        }
    }
}

impl EngineSettings {
    /// Loads settings from the platform config file, writing and returning
    /// the default configuration if none exists yet (teacher's
    /// `Config::read` pattern).
    pub fn read() -> Result<Self> {
        let path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if !path.exists() {
            let settings = Self::default();
            settings.save()?;
            return Ok(settings);
        }
        let contents = std::fs::read_to_string(&path).with_context(|| format!("reading engine config at {}", path.display()))?;
        serde_json::from_str(&contents).with_context(|| format!("parsing engine config at {}", path.display()))
    }

    pub fn save(&self) -> Result<()> {
        let path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, contents).with_context(|| format!("writing engine config at {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_carry_the_current_calculation_version() {
        assert_eq!(EngineSettings::default().calculation_version, CALCULATION_VERSION);
    }
}
