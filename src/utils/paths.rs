use dirs::home_dir;
use std::{env, path::PathBuf};

const DEFAULT_DIR_NAME: &str = ".bucket_budget";
const HOME_ENV: &str = "BUCKET_BUDGET_HOME";
const DATA_DIR: &str = "user_data";
const DATA_FILE: &str = "data.json";
const CONFIG_FILE: &str = "config.json";

/// Returns the application data directory, defaulting to `~/.bucket_budget`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Default location of the budget record inside a base directory.
pub fn data_file_in(base: &std::path::Path) -> PathBuf {
    base.join(DATA_DIR).join(DATA_FILE)
}

pub fn config_file_in(base: &std::path::Path) -> PathBuf {
    base.join(CONFIG_FILE)
}
