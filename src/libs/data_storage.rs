//! Cross-platform data storage path management, ported from the teacher's
//! `libs::data_storage::DataStorage` (platform app-data directory + filename
//! join). The calculation core uses it to resolve the engine config file and
//! the default sqlite database path.
//!
//! - **Windows**: `%LOCALAPPDATA%\lacodda\kasl-time-core\`
//! - **macOS**: `~/Library/Application Support/lacodda/kasl-time-core/`
//! - **Linux/Unix**: `~/.local/share/lacodda/kasl-time-core/` (XDG-style)

use anyhow::Result;
use std::env::consts::OS;
use std::env::var;
use std::fs;
use std::path::{Path, PathBuf};

const APP_OWNER: &str = "lacodda";
const APP_NAME: &str = "kasl-time-core";

/// Resolves filenames to paths inside the platform-specific application
/// data directory, creating the directory tree on first access.
#[derive(Debug, Clone)]
pub struct DataStorage {
    base_path: PathBuf,
}

impl DataStorage {
    pub fn new() -> Self {
        let base_path = match OS {
            "windows" => var("LOCALAPPDATA").unwrap_or_else(|_| ".".into()),
            "macos" => var("HOME").unwrap_or_else(|_| ".".into()) + "/Library/Application Support",
            _ => var("HOME").unwrap_or_else(|_| ".".into()) + "/.local/share",
        };
        let base_path = Path::new(&base_path).join(APP_OWNER).join(APP_NAME);
        Self { base_path }
    }

    /// Resolves `file_name` to a full path inside the application data
    /// directory, creating missing parent directories as needed.
    pub fn get_path(&self, file_name: &str) -> Result<PathBuf> {
        if !self.base_path.exists() {
            fs::create_dir_all(&self.base_path)?;
        }
        Ok(self.base_path.join(file_name))
    }
}

impl Default for DataStorage {
    fn default() -> Self {
        Self::new()
    }
}
