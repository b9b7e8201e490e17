use crate::retry::RetryPolicy;
use state_store::backend::StateBackend;
use std::{collections::HashMap, fmt, path::PathBuf, str::FromStr, time::Duration};
use thiserror::Error;

const DEFAULT_STATE_DB_PATH: &str = "techint_state";
const DEFAULT_FRESHNESS_WINDOW_DAYS: u64 = 7;
const DEFAULT_MAX_RECORDS_DEV: u64 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Prod,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Dev => "dev",
            Environment::Prod => "prod",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dev" => Ok(Environment::Dev),
            "prod" => Ok(Environment::Prod),
            other => Err(ConfigError::InvalidEnvironment(other.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("ENVIRONMENT must be 'dev' or 'prod', got '{0}'")]
    InvalidEnvironment(String),

    #[error("STATE_PG_URL is required when ENVIRONMENT=prod")]
    MissingStateUrl,

    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },
}

/// Ambient pipeline configuration, built once at process start and passed
/// explicitly into the drivers so they stay testable without environment
/// mutation.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    pub environment: Environment,
    pub state_backend: StateBackend,
    pub retry: RetryPolicy,
    /// A resource whose last successful run is younger than this is skipped.
    pub freshness_window: Duration,
    /// Bypass the freshness check and re-extract regardless.
    pub force_refresh: bool,
    /// Dev-only cap on records fetched per resource per run.
    pub max_records_per_resource: Option<u64>,
}

impl ExtractorConfig {
    /// Builds the config from an owned snapshot of environment variables
    /// (`std::env::vars().collect()` in the binary, a literal map in tests).
    pub fn from_env_map(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let environment: Environment = vars
            .get("ENVIRONMENT")
            .map(String::as_str)
            .unwrap_or("dev")
            .parse()?;

        let state_backend = match environment {
            Environment::Prod => {
                let url = vars
                    .get("STATE_PG_URL")
                    .ok_or(ConfigError::MissingStateUrl)?;
                StateBackend::Postgres { url: url.clone() }
            }
            Environment::Dev => StateBackend::Sled {
                path: vars
                    .get("STATE_DB_PATH")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DB_PATH)),
            },
        };

        let freshness_days = parse_or(vars, "FRESHNESS_WINDOW_DAYS", DEFAULT_FRESHNESS_WINDOW_DAYS)?;
        let max_records_per_resource = match environment {
            Environment::Dev => Some(parse_or(vars, "MAX_RECORDS_DEV", DEFAULT_MAX_RECORDS_DEV)?),
            Environment::Prod => None,
        };

        let force_refresh = vars
            .get("FORCE_REFRESH")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(ExtractorConfig {
            environment,
            state_backend,
            retry: RetryPolicy::for_api(),
            freshness_window: Duration::from_secs(freshness_days.saturating_mul(24 * 3600)),
            force_refresh,
            max_records_per_resource,
        })
    }

    /// In-memory config for tests: no freshness skips, no record cap,
    /// zero-delay retries.
    pub fn ephemeral() -> Self {
        ExtractorConfig {
            environment: Environment::Dev,
            state_backend: StateBackend::Memory,
            retry: RetryPolicy::immediate(3),
            freshness_window: Duration::ZERO,
            force_refresh: true,
            max_records_per_resource: None,
        }
    }
}

fn parse_or(vars: &HashMap<String, String>, key: &str, default: u64) -> Result<u64, ConfigError> {
    match vars.get(key) {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.clone(),
        }),
    }
}
