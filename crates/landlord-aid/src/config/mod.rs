use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::workflows::eligibility::ScoringMode;
use crate::workflows::records::PayloadPolicy;

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
    pub storage: StorageConfig,
    pub intake: IntakeConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .or_else(|_| env::var("PORT"))
            .unwrap_or_else(|_| "3000".to_string())
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let record_store = env::var("APP_RECORD_STORE")
            .unwrap_or_else(|_| "applications.jsonl".to_string());
        let static_dir = env::var("APP_STATIC_DIR").unwrap_or_else(|_| "dist".to_string());
        let local_state = env::var("APP_LOCAL_STATE")
            .unwrap_or_else(|_| "landlordApplication.json".to_string());
        let address_csv = env::var("APP_ADDRESS_CSV")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        for (name, value) in [
            ("APP_RECORD_STORE", &record_store),
            ("APP_LOCAL_STATE", &local_state),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyPath { name });
            }
        }

        let scoring = env::var("APP_SCORING")
            .map(|value| ScoringMode::from_str(&value))
            .unwrap_or_default();
        let payload_policy = if env::var("APP_VALIDATE_PAYLOADS")
            .map(|value| parse_flag(&value))
            .unwrap_or(false)
        {
            PayloadPolicy::Validated
        } else {
            PayloadPolicy::Permissive
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            storage: StorageConfig {
                record_store: PathBuf::from(record_store),
                static_dir: PathBuf::from(static_dir),
                local_state: PathBuf::from(local_state),
                address_csv,
            },
            intake: IntakeConfig {
                scoring,
                payload_policy,
            },
        })
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes"
    )
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

/// Where submissions, the built frontend, and the applicant's saved answers live.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub record_store: PathBuf,
    pub static_dir: PathBuf,
    pub local_state: PathBuf,
    /// OSM-style `addr:*` export replacing the bundled address list when set.
    pub address_csv: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy)]
pub struct IntakeConfig {
    pub scoring: ScoringMode,
    pub payload_policy: PayloadPolicy,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    EmptyPath { name: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT (or PORT) must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::EmptyPath { name } => write!(f, "{name} must not be empty"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::EmptyPath { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
