use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

pub const DEFAULT_EXCHANGE_RATE_URL: &str = "https://dolarapi.com/v1/dolares/blue";
pub const DEFAULT_RENT_INDEX_URL: &str = "https://arquilerapi1.p.rapidapi.com/calculate";

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
    pub exchange: ExchangeRateConfig,
    pub rent_index: RentIndexConfig,
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

        let url = env::var("APP_EXCHANGE_RATE_URL")
            .unwrap_or_else(|_| DEFAULT_EXCHANGE_RATE_URL.to_string());
        let timeout_secs = timeout_from_env("APP_EXCHANGE_RATE_TIMEOUT_SECS")?;

        let rent_index = RentIndexConfig {
            url: env::var("APP_RENT_INDEX_URL")
                .unwrap_or_else(|_| DEFAULT_RENT_INDEX_URL.to_string()),
            api_key: env::var("APP_RENT_INDEX_API_KEY")
                .ok()
                .map(|key| key.trim().to_string())
                .filter(|key| !key.is_empty()),
            timeout_secs: timeout_from_env("APP_RENT_INDEX_TIMEOUT_SECS")?,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            exchange: ExchangeRateConfig { url, timeout_secs },
            rent_index,
        })
    }
}

fn timeout_from_env(variable: &'static str) -> Result<u64, ConfigError> {
    env::var(variable)
        .unwrap_or_else(|_| "10".to_string())
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .ok_or(ConfigError::InvalidTimeout { variable })
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

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where and how long to wait for the foreign-currency quote.
#[derive(Debug, Clone)]
pub struct ExchangeRateConfig {
    pub url: String,
    pub timeout_secs: u64,
}

/// Rent index calculator used to update lease amounts. Requests go out
/// without credentials when no API key is configured.
#[derive(Debug, Clone)]
pub struct RentIndexConfig {
    pub url: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidTimeout { variable: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidTimeout { variable } => {
                write!(f, "{variable} must be a positive number of seconds")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidTimeout { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
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
        env::remove_var("APP_EXCHANGE_RATE_URL");
        env::remove_var("APP_EXCHANGE_RATE_TIMEOUT_SECS");
        env::remove_var("APP_RENT_INDEX_URL");
        env::remove_var("APP_RENT_INDEX_API_KEY");
        env::remove_var("APP_RENT_INDEX_TIMEOUT_SECS");
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
        assert_eq!(config.exchange.url, DEFAULT_EXCHANGE_RATE_URL);
        assert_eq!(config.exchange.timeout_secs, 10);
        assert_eq!(config.rent_index.url, DEFAULT_RENT_INDEX_URL);
        assert!(config.rent_index.api_key.is_none());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn rejects_zero_rate_timeout() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_EXCHANGE_RATE_TIMEOUT_SECS", "0");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidTimeout {
                variable: "APP_EXCHANGE_RATE_TIMEOUT_SECS"
            })
        ));
        reset_env();
    }

    #[test]
    fn rent_index_settings_come_from_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_RENT_INDEX_URL", "http://127.0.0.1:8081/calculate");
        env::set_var("APP_RENT_INDEX_API_KEY", "  local-key ");
        env::set_var("APP_RENT_INDEX_TIMEOUT_SECS", "3");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.rent_index.url, "http://127.0.0.1:8081/calculate");
        assert_eq!(config.rent_index.api_key.as_deref(), Some("local-key"));
        assert_eq!(config.rent_index.timeout_secs, 3);

        env::set_var("APP_RENT_INDEX_API_KEY", "   ");
        env::set_var("APP_RENT_INDEX_TIMEOUT_SECS", "soon");
        match AppConfig::load() {
            Err(err @ ConfigError::InvalidTimeout { .. }) => assert_eq!(
                err.to_string(),
                "APP_RENT_INDEX_TIMEOUT_SECS must be a positive number of seconds"
            ),
            other => panic!("expected timeout error, got {other:?}"),
        }
        reset_env();
    }

    #[test]
    fn production_aliases_are_recognised() {
        assert_eq!(AppEnvironment::from_str(" PROD "), AppEnvironment::Production);
        assert_eq!(AppEnvironment::from_str("ci"), AppEnvironment::Test);
        assert_eq!(AppEnvironment::from_str("staging"), AppEnvironment::Development);
    }
}
