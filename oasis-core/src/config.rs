use std::{env, path::PathBuf, str::FromStr};

use log::warn;
use thiserror::Error;

/// The configuration of an oasis instance
#[derive(Debug, Clone)]
pub struct Config {
    /// The port the HTTP server listens on
    pub port: u16,
    /// Where the durable key-value files are stored
    pub data_dir: PathBuf,
    /// Credentials of the administrator account, created on startup if missing
    pub admin: Option<AdminAccount>,
    /// API key for the workout generator, generation is disabled without it
    pub generator_api_key: Option<String>,
    /// The generative model asked for workouts
    pub generator_model: String,
    /// How long a single generation request may take
    pub generator_timeout_in_seconds: u64,
    /// How long a login session stays valid
    pub session_duration_in_days: i64,
}

#[derive(Debug, Clone)]
pub struct AdminAccount {
    pub name: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{variable} must be a number, got {value:?}")]
    NotANumber {
        variable: &'static str,
        value: String,
    },
    #[error("{0} is set, but OASIS_ADMIN_PASSWORD is missing")]
    MissingAdminPassword(String),
}

impl Config {
    pub const DEFAULT_PORT: u16 = 9050;

    /// Reads the configuration from `OASIS_*` environment variables, using defaults for unset ones.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let admin = match (var("OASIS_ADMIN_USERNAME"), var("OASIS_ADMIN_PASSWORD")) {
            (Some(username), Some(password)) => Some(AdminAccount {
                name: var("OASIS_ADMIN_NAME").unwrap_or_else(|| "Oasis CT".to_string()),
                username,
                password,
            }),
            (Some(username), None) => return Err(ConfigError::MissingAdminPassword(username)),
            _ => None,
        };

        Ok(Self {
            port: number("OASIS_SERVER_PORT")?.unwrap_or(defaults.port),
            data_dir: var("OASIS_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            admin,
            generator_api_key: var("GEMINI_API_KEY").or_else(legacy_api_key),
            generator_model: var("OASIS_GEMINI_MODEL").unwrap_or(defaults.generator_model),
            generator_timeout_in_seconds: number("OASIS_GENERATOR_TIMEOUT_SECS")?
                .unwrap_or(defaults.generator_timeout_in_seconds),
            session_duration_in_days: number("OASIS_SESSION_DAYS")?
                .unwrap_or(defaults.session_duration_in_days),
        })
    }

    /// Whether `OASIS_DEBUG` asks for debug logging.
    /// Read on its own, logging starts before the rest of the configuration.
    pub fn verbose_from_env() -> bool {
        var("OASIS_DEBUG").is_some_and(|v| !matches!(v.trim(), "0" | "false"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: Self::DEFAULT_PORT,
            data_dir: PathBuf::from("./data"),
            admin: None,
            generator_api_key: None,
            generator_model: "gemini-2.5-flash".to_string(),
            // Generation usually takes a few seconds
            generator_timeout_in_seconds: 30,
            session_duration_in_days: 7,
        }
    }
}

fn legacy_api_key() -> Option<String> {
    let key = var("API_KEY")?;
    warn!("API_KEY is deprecated, set GEMINI_API_KEY instead");

    Some(key)
}

/// Returns a non-empty environment variable
fn var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn number<T: FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    var(name)
        .map(|value| {
            value
                .trim()
                .parse::<T>()
                .map_err(|_| ConfigError::NotANumber {
                    variable: name,
                    value,
                })
        })
        .transpose()
}
