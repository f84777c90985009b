use crate::performance::consistency::DEFAULT_PENALTY_PER_STDDEV;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// Distinguishes runtime behavior for different stages of the service.
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

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub analytics: AnalyticsConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            analytics: AnalyticsConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Tuning knobs for report assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsConfig {
    /// Points subtracted from the consistency score per point of score
    /// standard deviation.
    pub consistency_penalty: f64,
    /// List months without a submission in the monthly breakdown.
    pub fill_missing_months: bool,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            consistency_penalty: DEFAULT_PENALTY_PER_STDDEV,
            fill_missing_months: false,
        }
    }
}

impl AnalyticsConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let consistency_penalty = match env::var("PULSE_CONSISTENCY_PENALTY") {
            Ok(raw) => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite() && *value >= 0.0)
                .ok_or(ConfigError::InvalidConsistencyPenalty)?,
            Err(_) => defaults.consistency_penalty,
        };

        let fill_missing_months = match env::var("PULSE_FILL_MISSING_MONTHS") {
            Ok(raw) => parse_flag(&raw).ok_or(ConfigError::InvalidFlag {
                name: "PULSE_FILL_MISSING_MONTHS",
            })?,
            Err(_) => defaults.fill_missing_months,
        };

        Ok(Self {
            consistency_penalty,
            fill_missing_months,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidConsistencyPenalty,
    InvalidFlag { name: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidConsistencyPenalty => write!(
                f,
                "PULSE_CONSISTENCY_PENALTY must be a non-negative number"
            ),
            ConfigError::InvalidFlag { name } => {
                write!(f, "{} must be true/false, yes/no, on/off or 1/0", name)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidConsistencyPenalty
            | ConfigError::InvalidFlag { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("PULSE_CONSISTENCY_PENALTY");
        env::remove_var("PULSE_FILL_MISSING_MONTHS");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.analytics, AnalyticsConfig::default());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
    }

    #[test]
    fn analytics_settings_come_from_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("PULSE_CONSISTENCY_PENALTY", "1.5");
        env::set_var("PULSE_FILL_MISSING_MONTHS", "yes");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.analytics.consistency_penalty, 1.5);
        assert!(config.analytics.fill_missing_months);
    }

    #[test]
    fn rejects_negative_consistency_penalty() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("PULSE_CONSISTENCY_PENALTY", "-2");
        let error = AppConfig::load().expect_err("negative penalty");
        assert!(matches!(error, ConfigError::InvalidConsistencyPenalty));
        reset_env();
    }

    #[test]
    fn rejects_unknown_flag_values() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("PULSE_FILL_MISSING_MONTHS", "sometimes");
        let error = AppConfig::load().expect_err("bad flag");
        assert!(matches!(
            error,
            ConfigError::InvalidFlag {
                name: "PULSE_FILL_MISSING_MONTHS"
            }
        ));
        reset_env();
    }
}
