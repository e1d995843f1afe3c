//! Configuration management for libbank
//!
//! Every section is optional; a missing file means defaults throughout.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::amount::{Amount, CoercionPolicy};
use crate::error::{ConfigError, Result};
use crate::reducer::{AccountRules, DEFAULT_OPENING_BALANCE};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "BANK_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub account: AccountConfig,
    pub input: InputConfig,
    pub ui: UiSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountConfig {
    pub opening_balance: Amount,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub coercion: CoercionPolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    pub tick_rate_ms: u64,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            opening_balance: Amount::new(DEFAULT_OPENING_BALANCE, 0),
        }
    }
}

impl Default for UiSettings {
    fn default() -> Self {
        Self { tick_rate_ms: 100 }
    }
}

impl Config {
    /// Load configuration from `$BANK_CONFIG` or the default location
    ///
    /// An explicitly named file must exist. The default file is optional.
    pub fn load() -> Result<Self> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(shellexpand::tilde(&path).to_string());
            return Self::load_from_path(&path);
        }

        let path = resolve_config_path()?;
        if path.exists() {
            Self::load_from_path(&path)
        } else {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::ParseError)?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Reducer rules derived from the `[account]` section
    pub fn rules(&self) -> AccountRules {
        AccountRules {
            opening_balance: self.account.opening_balance,
        }
    }
}

/// Resolve the default configuration file path following the XDG Base Directory layout
pub fn resolve_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("bank").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BankError;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.account.opening_balance, Amount::new(500, 0));
        assert_eq!(config.input.coercion, CoercionPolicy::Lenient);
        assert_eq!(config.ui.tick_rate_ms, 100);
        assert_eq!(config.rules(), AccountRules::default());
    }

    #[test]
    fn test_load_full_file() {
        let file = write_config(
            r#"
[account]
opening_balance = "250.50"

[input]
coercion = "strict"

[ui]
tick_rate_ms = 40
"#,
        );

        let config = Config::load_from_path(file.path()).unwrap();
        assert_eq!(config.account.opening_balance, Amount::new(25050, 2));
        assert_eq!(config.input.coercion, CoercionPolicy::Strict);
        assert_eq!(config.ui.tick_rate_ms, 40);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let file = write_config("[input]\ncoercion = \"strict\"\n");

        let config = Config::load_from_path(file.path()).unwrap();
        assert_eq!(config.input.coercion, CoercionPolicy::Strict);
        assert_eq!(config.account.opening_balance, Amount::new(500, 0));
    }

    #[test]
    fn test_parse_error() {
        let file = write_config("[input]\ncoercion = \"sloppy\"\n");

        let err = Config::load_from_path(file.path()).unwrap_err();
        assert!(matches!(err, BankError::Config(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = Config::load_from_path(Path::new("/nonexistent/bank/config.toml")).unwrap_err();
        assert!(matches!(err, BankError::Config(ConfigError::ReadError(_))));
    }

    #[test]
    #[serial]
    fn test_load_from_env() {
        let file = write_config("[account]\nopening_balance = \"900\"\n");
        std::env::set_var(CONFIG_ENV, file.path());
        let config = Config::load();
        std::env::remove_var(CONFIG_ENV);

        assert_eq!(config.unwrap().account.opening_balance, Amount::new(900, 0));
    }

    #[test]
    #[serial]
    fn test_load_from_env_missing_file() {
        std::env::set_var(CONFIG_ENV, "/nonexistent/bank.toml");
        let config = Config::load();
        std::env::remove_var(CONFIG_ENV);

        assert!(config.is_err());
    }
}
