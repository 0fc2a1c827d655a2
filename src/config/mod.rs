use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub mod migrate; // use submodule at src/config/migrate.rs

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_manager_username")]
    pub manager_username: String,
    #[serde(default = "default_manager_password")]
    pub manager_password: String,
    #[serde(default = "default_pay_day")]
    pub default_pay_day: i32,
    #[serde(default = "default_base_salary")]
    pub default_base_salary: f64,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
}

fn default_storage_key() -> String {
    crate::db::repository::DEFAULT_STORAGE_KEY.to_string()
}
fn default_currency() -> String {
    "SAR".to_string()
}
fn default_manager_username() -> String {
    "2298305398".to_string()
}
fn default_manager_password() -> String {
    "Aa112233".to_string()
}
fn default_pay_day() -> i32 {
    28
}
fn default_base_salary() -> f64 {
    3000.0
}
fn default_separator_char() -> String {
    "-".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file())
    }
}

impl Config {
    fn with_database(db_path: PathBuf) -> Self {
        Self {
            database: db_path.to_string_lossy().to_string(),
            storage_key: default_storage_key(),
            currency: default_currency(),
            manager_username: default_manager_username(),
            manager_password: default_manager_password(),
            default_pay_day: default_pay_day(),
            default_base_salary: default_base_salary(),
            separator_char: default_separator_char(),
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("samipro")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".samipro")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("samipro.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("samipro.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        let yaml = serde_yaml::to_string(self)?;
        let mut file = fs::File::create(path).map_err(|_| AppError::ConfigSave)?;
        file.write_all(yaml.as_bytes())
            .map_err(|_| AppError::ConfigSave)?;
        Ok(())
    }

    /// Initialize configuration and return the database path to create.
    ///
    /// In test mode the configuration file is left alone.
    pub fn init_all(custom_db: Option<&str>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();

        let db_path = match custom_db {
            Some(name) => {
                let p = Path::new(name);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    dir.join(p)
                }
            }
            None => Self::database_file(),
        };

        if !is_test {
            fs::create_dir_all(&dir)?;
            Self::with_database(db_path.clone()).save_to(&Self::config_file())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        Ok(db_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let cfg: Config = serde_yaml::from_str("database: /tmp/x.sqlite\n").unwrap();
        assert_eq!(cfg.database, "/tmp/x.sqlite");
        assert_eq!(cfg.storage_key, "SamiProERP_Final");
        assert_eq!(cfg.currency, "SAR");
        assert_eq!(cfg.default_pay_day, 28);
        assert_eq!(cfg.default_base_salary, 3000.0);
    }

    #[test]
    fn save_and_load_file() {
        let path = env::temp_dir().join("samipro_config_unit_test.conf");
        let mut cfg = Config::with_database(PathBuf::from("/tmp/unit.sqlite"));
        cfg.currency = "USD".into();
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, cfg);
        let _ = fs::remove_file(&path);
    }
}
