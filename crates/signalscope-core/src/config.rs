use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_COHORTS_PATH: &str = "./config/cohorts.yaml";

/// Read configuration from the process environment after loading `.env`.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` if a variable is set to an
/// unparseable or out-of-range value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Same as [`load_app_config`] without touching `.env`.
///
/// # Errors
///
/// See [`load_app_config`].
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Typed reads over an env-style lookup; unset variables take the default.
struct Vars<F> {
    lookup: F,
}

impl<F> Vars<F>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    fn text(&self, var: &str, default: &str) -> String {
        (self.lookup)(var).unwrap_or_else(|_| default.to_string())
    }

    fn parsed<T>(&self, var: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: Display,
    {
        match (self.lookup)(var) {
            Ok(raw) => raw.trim().parse::<T>().map_err(|e| invalid(var, e)),
            Err(_) => Ok(default),
        }
    }

    fn at_least_one(&self, var: &str, default: i64) -> Result<i64, ConfigError> {
        let value = self.parsed(var, default)?;
        if value < 1 {
            return Err(invalid(var, format!("must be at least 1, got {value}")));
        }
        Ok(value)
    }
}

fn invalid(var: &str, reason: impl Display) -> ConfigError {
    ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason: reason.to_string(),
    }
}

/// Assemble [`AppConfig`] from `lookup`, which stands in for `std::env::var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let vars = Vars { lookup };

    Ok(AppConfig {
        database_url: (vars.lookup)("DATABASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty()),
        env: parse_environment(&vars.text("SIGNALSCOPE_ENV", "development")),
        log_level: vars.text("SIGNALSCOPE_LOG_LEVEL", "info"),
        cohorts_path: PathBuf::from(vars.text("SIGNALSCOPE_COHORTS_PATH", DEFAULT_COHORTS_PATH)),
        db_max_connections: vars.parsed("SIGNALSCOPE_DB_MAX_CONNECTIONS", 10)?,
        db_min_connections: vars.parsed("SIGNALSCOPE_DB_MIN_CONNECTIONS", 1)?,
        db_acquire_timeout_secs: vars.parsed("SIGNALSCOPE_DB_ACQUIRE_TIMEOUT_SECS", 10)?,
        snapshot_history_limit: vars.at_least_one("SIGNALSCOPE_SNAPSHOT_HISTORY_LIMIT", 20)?,
    })
}

/// Anything other than `production` or `test` runs as development.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
