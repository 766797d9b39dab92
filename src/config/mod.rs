use serde::{Deserialize, Serialize};
use std::{
    fmt, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    str::FromStr,
};

use crate::{
    currency::DEFAULT_SYMBOL,
    errors::{LedgerError, Result},
    ledger::{validate_date_format, DEFAULT_DATE_FORMAT},
    storage::LEDGER_KEY,
    utils,
};

/// What to do when the stored ledger blob exists but cannot be decoded.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LoadPolicy {
    /// Refuse to start; the caller sees the read error.
    #[default]
    Fail,
    /// Set the unreadable blob aside and start with an empty ledger.
    StartEmpty,
}

impl fmt::Display for LoadPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadPolicy::Fail => f.write_str("fail"),
            LoadPolicy::StartEmpty => f.write_str("start_empty"),
        }
    }
}

impl FromStr for LoadPolicy {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "fail" => Ok(LoadPolicy::Fail),
            "start_empty" | "empty" => Ok(LoadPolicy::StartEmpty),
            other => Err(LedgerError::Config(format!(
                "unknown load policy `{other}` (expected fail or start_empty)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub currency_symbol: String,
    pub date_format: String,
    pub store_key: String,
    pub on_corrupt_store: LoadPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: DEFAULT_SYMBOL.into(),
            date_format: DEFAULT_DATE_FORMAT.into(),
            store_key: LEDGER_KEY.into(),
            on_corrupt_store: LoadPolicy::default(),
        }
    }
}

impl Config {
    pub const FIELDS: [&'static str; 4] = [
        "currency_symbol",
        "date_format",
        "store_key",
        "on_corrupt_store",
    ];

    /// Updates a single field by name from its textual form.
    pub fn set_field(&mut self, field: &str, value: &str) -> Result<()> {
        let value = value.trim();
        if value.is_empty() {
            return Err(LedgerError::Config(format!("{field} cannot be empty")));
        }
        match field {
            "currency_symbol" => self.currency_symbol = value.to_string(),
            "date_format" => {
                validate_date_format(value)?;
                self.date_format = value.to_string();
            }
            "store_key" => self.store_key = value.to_string(),
            "on_corrupt_store" => self.on_corrupt_store = value.parse()?,
            other => {
                return Err(LedgerError::Config(format!(
                    "unknown setting `{other}` (expected one of: {})",
                    Self::FIELDS.join(", ")
                )))
            }
        }
        Ok(())
    }

    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("currency_symbol", self.currency_symbol.clone()),
            ("date_format", self.date_format.clone()),
            ("store_key", self.store_key.clone()),
            ("on_corrupt_store", self.on_corrupt_store.to_string()),
        ]
    }
}

/// Loads and saves [`Config`] as a JSON file.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(utils::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base)?;
        Ok(Self {
            path: utils::config_file_in(&base),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Config> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Config::default()),
            Err(err) => return Err(err.into()),
        };
        let config: Config = serde_json::from_str(&data)
            .map_err(|err| LedgerError::Config(format!("{}: {err}", self.path.display())))?;
        validate_date_format(&config.date_format).map_err(|err| match err {
            LedgerError::Config(reason) => {
                LedgerError::Config(format!("{}: {reason}", self.path.display()))
            }
            other => other,
        })?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| LedgerError::Config(err.to_string()))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        assert_eq!(manager.load().unwrap(), Config::default());
    }

    #[test]
    fn save_and_reload() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let mut config = Config::default();
        config.set_field("currency_symbol", "€").unwrap();
        config.set_field("on_corrupt_store", "start-empty").unwrap();
        manager.save(&config).unwrap();
        let loaded = manager.load().unwrap();
        assert_eq!(loaded.currency_symbol, "€");
        assert_eq!(loaded.on_corrupt_store, LoadPolicy::StartEmpty);
    }

    #[test]
    fn partial_files_fill_in_defaults() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        fs::write(manager.path(), r#"{"currency_symbol":"£"}"#).unwrap();
        let loaded = manager.load().unwrap();
        assert_eq!(loaded.currency_symbol, "£");
        assert_eq!(loaded.store_key, LEDGER_KEY);
    }

    #[test]
    fn rejects_unknown_fields() {
        let mut config = Config::default();
        assert!(config.set_field("theme", "dark").is_err());
        assert!(config.set_field("on_corrupt_store", "retry").is_err());
    }

    #[test]
    fn rejects_unrenderable_date_formats() {
        let mut config = Config::default();
        let err = config.set_field("date_format", "%Q").unwrap_err();
        assert!(matches!(err, LedgerError::Config(_)));
        assert_eq!(config.date_format, DEFAULT_DATE_FORMAT);
        config.set_field("date_format", "%Y-%m-%d").unwrap();
        assert_eq!(config.date_format, "%Y-%m-%d");
    }

    #[test]
    fn hand_edited_bad_date_format_fails_to_load() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        fs::write(manager.path(), r#"{"date_format":"%Q"}"#).unwrap();
        assert!(matches!(manager.load(), Err(LedgerError::Config(_))));
    }
}
