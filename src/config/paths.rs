// ==========================================
// Fuel Ledger - Default file locations
// ==========================================

use std::path::{Path, PathBuf};

const APP_DIR: &str = "fuel-ledger";

/// Default config file path
///
/// # Returns
/// - `FUEL_LEDGER_CONFIG` when set and non-empty
/// - otherwise `<user config dir>/fuel-ledger/config.json`
/// - `./fuel_ledger_config.json` when no config dir is known
pub fn default_config_path() -> PathBuf {
    if let Some(path) = env_path("FUEL_LEDGER_CONFIG") {
        return path;
    }

    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join("config.json"))
        .unwrap_or_else(|| PathBuf::from("./fuel_ledger_config.json"))
}

/// Default ledger database path
///
/// # Returns
/// - `FUEL_LEDGER_DB` when set and non-empty
/// - otherwise `<user data dir>/fuel-ledger/fuel_ledger.db` (directory created on demand)
/// - `./fuel_ledger.db` when no data dir is known
pub fn default_ledger_path() -> PathBuf {
    if let Some(path) = env_path("FUEL_LEDGER_DB") {
        return path;
    }

    let mut path = PathBuf::from("./fuel_ledger.db");
    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join(APP_DIR);
        // best-effort: a missing directory surfaces later as "ledger not found"
        std::fs::create_dir_all(&dir).ok();
        path = dir.join("fuel_ledger.db");
    }
    path
}

fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// `<dir>/<stem>.<ext>`, suffixed `_1`, `_2`, ... when the name is already taken
pub fn unique_file_path(dir: &Path, stem: &str, ext: &str) -> PathBuf {
    let mut candidate = dir.join(format!("{}.{}", stem, ext));
    let mut n = 1;
    while candidate.exists() {
        candidate = dir.join(format!("{}_{}.{}", stem, n, ext));
        n += 1;
    }
    candidate
}
