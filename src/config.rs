// ⚙️ Configuration - environment with defaults

use std::env;
use std::path::PathBuf;

pub const DEFAULT_DB_PATH: &str = "expenses.db";
pub const DEFAULT_STORAGE_KEY: &str = "expenses";
pub const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:3000";

pub const ENV_DB_PATH: &str = "EXPENSE_CHARTS_DB";
pub const ENV_STORAGE_KEY: &str = "EXPENSE_CHARTS_KEY";
pub const ENV_SERVER_ADDR: &str = "EXPENSE_CHARTS_ADDR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// SQLite file holding the persisted collection
    pub db_path: PathBuf,
    /// Key the expense list is stored under
    pub storage_key: String,
    /// Bind address for the API server
    pub server_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            server_addr: DEFAULT_SERVER_ADDR.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable source; blank values keep the default
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let defaults = Config::default();

        Config {
            db_path: get(ENV_DB_PATH).map(PathBuf::from).unwrap_or(defaults.db_path),
            storage_key: get(ENV_STORAGE_KEY).unwrap_or(defaults.storage_key),
            server_addr: get(ENV_SERVER_ADDR).unwrap_or(defaults.server_addr),
        }
    }
}
