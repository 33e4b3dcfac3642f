use std::path::PathBuf;
use std::time::Duration;

use config::{Config, Environment};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Missing database setting {0}; set DATABASE_URL or all of DB_HOST, DB_PORT, DB_USER, DB_PASSWORD, DB_NAME")]
    MissingDatabaseSetting(&'static str),

    #[error("Invalid database URL: {0}")]
    InvalidDatabaseUrl(String),
}

/// Runtime settings, read from the process environment (and `.env`).
///
/// Keys are the upper-case variable names: `DB_HOST` fills `db_host` and so
/// on. `DATABASE_URL`, when set, wins over the individual `DB_*` parts.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// URL scheme of the relational backend (`mysql`, `postgres`, ...)
    #[serde(default = "default_db_driver")]
    pub db_driver: String,
    pub db_host: Option<String>,
    pub db_port: Option<u16>,
    pub db_user: Option<String>,
    pub db_password: Option<String>,
    pub db_name: Option<String>,
    pub database_url: Option<String>,

    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Append-only file receiving every log line
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,

    /// Reserved account created at bootstrap
    #[serde(default = "default_admin_username")]
    pub admin_username: String,
    #[serde(default = "default_admin_email")]
    pub admin_email: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_db_timeout_secs")]
    pub db_timeout_secs: u64,
}

fn default_db_driver() -> String {
    "mysql".to_string()
}

fn default_bind_address() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("app.log")
}

fn default_admin_username() -> String {
    "admin".to_string()
}

fn default_admin_email() -> String {
    "admin@example.com".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_db_timeout_secs() -> u64 {
    10
}

impl AppConfig {
    /// Loads `.env` (if present) and reads the configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_source(None)
    }

    /// Reads the configuration from `vars` instead of the process environment
    /// when given.
    pub fn from_source(vars: Option<config::Map<String, String>>) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(Environment::default().source(vars))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// The connection URL, either `DATABASE_URL` verbatim or assembled from
    /// the `DB_*` parts with user and password percent-encoded.
    pub fn database_url(&self) -> Result<String, ConfigError> {
        if let Some(url) = &self.database_url {
            return Ok(url.clone());
        }

        let host = self
            .db_host
            .as_deref()
            .ok_or(ConfigError::MissingDatabaseSetting("DB_HOST"))?;
        let port = self
            .db_port
            .ok_or(ConfigError::MissingDatabaseSetting("DB_PORT"))?;
        let user = self
            .db_user
            .as_deref()
            .ok_or(ConfigError::MissingDatabaseSetting("DB_USER"))?;
        let password = self
            .db_password
            .as_deref()
            .ok_or(ConfigError::MissingDatabaseSetting("DB_PASSWORD"))?;
        let name = self
            .db_name
            .as_deref()
            .ok_or(ConfigError::MissingDatabaseSetting("DB_NAME"))?;

        let mut url = Url::parse(&format!("{}://{}:{}/{}", self.db_driver, host, port, name))
            .map_err(|e| ConfigError::InvalidDatabaseUrl(e.to_string()))?;
        url.set_username(user)
            .map_err(|_| ConfigError::InvalidDatabaseUrl("cannot set user".to_string()))?;
        url.set_password(Some(password))
            .map_err(|_| ConfigError::InvalidDatabaseUrl("cannot set password".to_string()))?;

        Ok(url.to_string())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Opens the connection pool with connect/acquire timeouts applied.
    pub async fn connect(&self) -> anyhow::Result<DatabaseConnection> {
        let url = self.database_url()?;
        info!("Connecting to {} database", self.db_driver);

        let timeout = Duration::from_secs(self.db_timeout_secs);
        let mut options = ConnectOptions::new(url);
        options
            .connect_timeout(timeout)
            .acquire_timeout(timeout)
            .sqlx_logging(false);
        debug!("Database timeouts set to {:?}", timeout);

        Ok(Database::connect(options).await?)
    }
}
