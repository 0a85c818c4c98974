use crate::engine::PipTable;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub snapshot_path: PathBuf,
    pub trading_api_url: String,
    pub credentials: AccountCredentials,
    pub from_date: NaiveDate,
    pub refresh_on_start: bool,
    pub pip_table: PipTable,
}

/// Trading account login. The password never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct AccountCredentials {
    pub login: u64,
    pub server: String,
    pub password: String,
}

impl std::fmt::Debug for AccountCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountCredentials")
            .field("login", &self.login)
            .field("server", &self.server)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

fn required(env_map: &HashMap<String, String>, key: &str) -> Result<String, ConfigError> {
    env_map
        .get(key)
        .cloned()
        .ok_or_else(|| ConfigError::MissingEnv(key.to_string()))
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("8080")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let snapshot_path = PathBuf::from(
            env_map
                .get("SNAPSHOT_PATH")
                .map(|s| s.as_str())
                .unwrap_or("fx_history.csv"),
        );

        let trading_api_url = required(&env_map, "TRADING_API_URL")?;

        let login = required(&env_map, "ACCOUNT_LOGIN")?
            .trim()
            .parse::<u64>()
            .map_err(|_| {
                ConfigError::InvalidValue(
                    "ACCOUNT_LOGIN".to_string(),
                    "must be a numeric account login".to_string(),
                )
            })?;
        let credentials = AccountCredentials {
            login,
            server: required(&env_map, "ACCOUNT_SERVER")?,
            password: required(&env_map, "ACCOUNT_PASSWORD")?,
        };

        let from_date = NaiveDate::parse_from_str(
            required(&env_map, "FROM_DATE")?.trim(),
            "%Y-%m-%d",
        )
        .map_err(|_| {
            ConfigError::InvalidValue("FROM_DATE".to_string(), "must be YYYY-MM-DD".to_string())
        })?;

        let refresh_on_start = match env_map
            .get("REFRESH_ON_START")
            .map(|s| s.as_str())
            .unwrap_or("true")
        {
            "true" | "1" => true,
            "false" | "0" => false,
            other => {
                return Err(ConfigError::InvalidValue(
                    "REFRESH_ON_START".to_string(),
                    format!("must be true or false, got {}", other),
                ))
            }
        };

        let pip_table = match env_map.get("PIP_VALUES") {
            Some(values) => parse_pip_values(values, PipTable::default())?,
            None => PipTable::default(),
        };

        Ok(Config {
            port,
            snapshot_path,
            trading_api_url,
            credentials,
            from_date,
            refresh_on_start,
            pip_table,
        })
    }
}

/// Parse `SYM:value,SYM:value` on top of `base`.
fn parse_pip_values(values: &str, base: PipTable) -> Result<PipTable, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidValue("PIP_VALUES".to_string(), reason);

    values.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .try_fold(base, |table, entry| {
            let (symbol, value) = entry
                .split_once(':')
                .ok_or_else(|| invalid(format!("expected SYMBOL:value, got {}", entry)))?;
            let value = value
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite() && *v > 0.0)
                .ok_or_else(|| invalid(format!("pip value for {} must be positive", symbol)))?;
            Ok(table.with_value(symbol.trim(), value))
        })
}
