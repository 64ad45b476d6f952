use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    errors::ConfigError,
    utils::{ensure_dir, paths},
};

const TMP_SUFFIX: &str = "json.tmp";
const DEFAULT_DECIMAL_PLACES: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Overrides `<home>/user_data/data.json`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ledger_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
    /// Precision used when printing amounts.
    pub decimal_places: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ledger_file: None,
            log_filter: None,
            decimal_places: DEFAULT_DECIMAL_PLACES,
        }
    }
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_base_dir(paths::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: paths::config_file_in(&base),
            base,
        })
    }

    /// Reads `config.json`; on first run writes the defaults so they can be edited.
    pub fn load(&self) -> Result<Config, ConfigError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            return Ok(serde_json::from_str(&data)?);
        }
        let config = Config::default();
        self.save(&config)?;
        tracing::debug!(path = %self.path.display(), "wrote default configuration");
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp = self.path.with_extension(TMP_SUFFIX);
        let mut file = File::create(&tmp)?;
        file.write_all(json.as_bytes())?;
        file.flush()?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Resolves the budget record location; relative overrides are anchored at the home dir.
    pub fn ledger_file(&self, config: &Config) -> PathBuf {
        match &config.ledger_file {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => self.base.join(path),
            None => paths::data_file_in(&self.base),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_config_yields_defaults_and_is_written() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config, Config::default());
        assert!(manager.path().exists());
        assert!(!manager.path().with_extension(TMP_SUFFIX).exists());
        assert_eq!(manager.load().unwrap(), config);
        assert_eq!(
            manager.ledger_file(&config),
            temp.path().join("user_data").join("data.json")
        );
    }

    #[test]
    fn config_round_trips_and_resolves_relative_ledger() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let config = Config {
            ledger_file: Some(PathBuf::from("books/budget.json")),
            log_filter: Some("bucket_budget=debug".into()),
            decimal_places: 3,
        };
        manager.save(&config).unwrap();

        let loaded = manager.load().unwrap();
        assert_eq!(loaded, config);
        assert_eq!(
            manager.ledger_file(&loaded),
            temp.path().join("books/budget.json")
        );
    }

    #[test]
    fn partial_config_fills_defaults() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        fs::write(manager.path(), r#"{ "log_filter": "info" }"#).unwrap();

        let config = manager.load().unwrap();
        assert_eq!(config.decimal_places, 2);
        assert_eq!(config.log_filter.as_deref(), Some("info"));
    }

    #[test]
    fn malformed_config_is_an_error() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        fs::write(manager.path(), "decimal_places = 2").unwrap();

        assert!(matches!(manager.load(), Err(ConfigError::Serde(_))));
    }
}
