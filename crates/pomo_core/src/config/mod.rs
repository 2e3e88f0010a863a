use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.json";
const CONFIG_ENV_VAR: &str = "POMOAPP_CONFIG_PATH";

pub const DEFAULT_WORK_MINUTES: u64 = 25;
pub const DEFAULT_MAX_BREAK_MINUTES: u64 = 60;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub default_work_minutes: Option<u64>,
    #[serde(default)]
    pub max_break_minutes: Option<u64>,
}

impl Config {
    /// Work interval length used when the command line does not give one.
    /// Zero and absent both fall back to the stock 25 minutes.
    pub fn work_minutes(&self) -> u64 {
        match self.default_work_minutes {
            Some(minutes) if minutes > 0 => minutes,
            _ => DEFAULT_WORK_MINUTES,
        }
    }

    pub fn break_cap_minutes(&self) -> u64 {
        match self.max_break_minutes {
            Some(minutes) if minutes > 0 => minutes,
            _ => DEFAULT_MAX_BREAK_MINUTES,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub error: Option<AppError>,
}

pub fn config_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| AppError::persistence("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata)
            .join("pomoapp")
            .join(CONFIG_FILE_NAME))
    } else {
        let home = std::env::var("HOME").map_err(|_| AppError::persistence("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("pomoapp")
            .join(CONFIG_FILE_NAME))
    }
}

/// Loads the config, degrading to defaults when the file is absent, broken,
/// or its path cannot be resolved. The error travels alongside so the CLI
/// can mention it without failing the command.
pub fn load_config_with_fallback() -> ConfigLoad {
    match config_path() {
        Ok(path) => load_config_with_fallback_from_path(&path),
        Err(err) => ConfigLoad {
            config: Config::default(),
            error: Some(err),
        },
    }
}

fn load_config_with_fallback_from_path(path: &Path) -> ConfigLoad {
    if !path.exists() {
        return ConfigLoad {
            config: Config::default(),
            error: None,
        };
    }

    match load_config_from_path(path) {
        Ok(config) => ConfigLoad {
            config,
            error: None,
        },
        Err(err) => ConfigLoad {
            config: Config::default(),
            error: Some(err),
        },
    }
}

fn load_config_from_path(path: &Path) -> Result<Config, AppError> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| AppError::persistence(format!("{}: {}", path.display(), err)))?;
    serde_json::from_str(&content).map_err(|err| {
        AppError::persistence(format!("invalid JSON in {}: {}", path.display(), err))
    })
}

#[cfg(test)]
mod tests {
    use super::{Config, load_config_from_path, load_config_with_fallback_from_path};
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(file_name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("pomoapp-{nanos}-{file_name}"))
    }

    #[test]
    fn load_config_missing_returns_defaults_without_error() {
        let path = temp_path("missing-config.json");
        let result = load_config_with_fallback_from_path(&path);

        assert_eq!(result.config, Config::default());
        assert!(result.error.is_none());
    }

    #[test]
    fn load_config_invalid_returns_defaults_and_error() {
        let path = temp_path("invalid-config.json");
        fs::write(&path, "{ invalid json ").unwrap();

        let result = load_config_with_fallback_from_path(&path);
        fs::remove_file(&path).ok();

        assert_eq!(result.config, Config::default());
        assert!(result.error.is_some());
    }

    #[test]
    fn load_config_reads_valid_file() {
        let path = temp_path("valid-config.json");
        let content = serde_json::json!({
            "default_work_minutes": 50,
            "max_break_minutes": 15
        });
        fs::write(&path, serde_json::to_string(&content).unwrap()).unwrap();

        let loaded = load_config_from_path(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(loaded.work_minutes(), 50);
        assert_eq!(loaded.break_cap_minutes(), 15);
    }

    #[test]
    fn zero_values_fall_back_to_defaults() {
        let config = Config {
            default_work_minutes: Some(0),
            max_break_minutes: Some(0),
        };

        assert_eq!(config.work_minutes(), 25);
        assert_eq!(config.break_cap_minutes(), 60);
    }

    #[test]
    fn absent_values_fall_back_to_defaults() {
        let config = Config::default();

        assert_eq!(config.work_minutes(), 25);
        assert_eq!(config.break_cap_minutes(), 60);
    }
}
