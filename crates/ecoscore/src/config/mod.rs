use std::env;
use std::fmt;
use std::time::Duration;

const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Distinguishes runtime behavior for different stages of the deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the scoring core and its CLI.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub scoring: ScoringConfig,
    pub resolver: ResolverConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("ECOSCORE_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let clamp_scores = match env::var("ECOSCORE_CLAMP_SCORES") {
            Ok(raw) => parse_bool("ECOSCORE_CLAMP_SCORES", &raw)?,
            Err(_) => false,
        };

        let cache_ttl = match env::var("ECOSCORE_CACHE_TTL_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::InvalidTtl { value: raw })?,
            Err(_) => Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
        };

        let log_level = env::var("ECOSCORE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            scoring: ScoringConfig { clamp_scores },
            resolver: ResolverConfig { cache_ttl },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key,
            value: raw.to_string(),
        }),
    }
}

/// Controls applied to every computed score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoringConfig {
    /// Clamp final scores into `[0, 100]`. Off by default so raw formula
    /// output (including negative scores) reaches the caller.
    pub clamp_scores: bool,
}

/// Settings for the supplier data resolver and its result cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverConfig {
    pub cache_ttl: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidBool { key: &'static str, value: String },
    InvalidTtl { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidBool { key, value } => {
                write!(f, "{key} must be a boolean flag, got '{value}'")
            }
            ConfigError::InvalidTtl { value } => {
                write!(
                    f,
                    "ECOSCORE_CACHE_TTL_SECS must be a whole number of seconds, got '{value}'"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}
