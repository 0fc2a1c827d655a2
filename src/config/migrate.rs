//! Configuration file upgrades.
//!
//! Older configuration files miss keys added in later releases. They still
//! load (serde fills defaults) but `config --check` reports them and
//! `config --migrate` writes the defaults back into the file, leaving the
//! values already present untouched.

use super::Config;
use crate::errors::{AppError, AppResult};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Every key a current configuration file is expected to carry.
pub const CONFIG_KEYS: [&str; 8] = [
    "database",
    "storage_key",
    "currency",
    "manager_username",
    "manager_password",
    "default_pay_day",
    "default_base_salary",
    "separator_char",
];

fn read_mapping(path: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    match serde_yaml::from_str::<Value>(&content)? {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(Mapping::new()),
        _ => Err(AppError::Config(format!(
            "{} is not a key/value document",
            path.display()
        ))),
    }
}

/// Keys missing from the configuration file at `path`.
pub fn missing_keys(path: &Path) -> AppResult<Vec<&'static str>> {
    let map = read_mapping(path)?;
    Ok(CONFIG_KEYS
        .into_iter()
        .filter(|k| !map.contains_key(Value::String(k.to_string())))
        .collect())
}

/// Add the missing keys with their default values. Returns the keys added.
pub fn fill_missing_keys(path: &Path) -> AppResult<Vec<&'static str>> {
    let mut map = read_mapping(path)?;
    let defaults = match serde_yaml::to_value(Config::default())? {
        Value::Mapping(m) => m,
        _ => return Err(AppError::Other("default configuration is not a map".into())),
    };

    let mut added = Vec::new();
    for key in CONFIG_KEYS {
        let k = Value::String(key.to_string());
        if map.contains_key(&k) {
            continue;
        }
        if let Some(v) = defaults.get(&k) {
            map.insert(k, v.clone());
            added.push(key);
        }
    }

    if !added.is_empty() {
        let serialized = serde_yaml::to_string(&Value::Mapping(map))?;
        fs::write(path, serialized).map_err(|_| AppError::ConfigSave)?;
    }

    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn fills_only_missing_keys() {
        let path = env::temp_dir().join("samipro_config_migrate_test.conf");
        fs::write(&path, "database: /tmp/old.sqlite\ncurrency: USD\n").unwrap();

        let missing = missing_keys(&path).unwrap();
        assert_eq!(missing.len(), CONFIG_KEYS.len() - 2);
        assert!(!missing.contains(&"currency"));

        let added = fill_missing_keys(&path).unwrap();
        assert_eq!(added, missing);
        assert!(missing_keys(&path).unwrap().is_empty());

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.currency, "USD");
        assert_eq!(cfg.database, "/tmp/old.sqlite");
        assert_eq!(cfg.manager_username, "2298305398");

        assert!(fill_missing_keys(&path).unwrap().is_empty());
        let _ = fs::remove_file(&path);
    }
}
