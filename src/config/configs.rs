use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::{defaults, envconfig::EnvConfig, validate};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub logging: LoggingConfig,
    /// Absent means the grocery list lives in memory for the process lifetime.
    pub database: Option<DatabaseConfig>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        <Self as EnvConfig>::from_env()
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.general.host, self.general.port)
    }
}

impl EnvConfig for AppConfig {
    fn validate(&self) -> Result<()> {
        validate::validate(self)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneralConfig {
    pub host: String,
    pub port: u16,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            host: defaults::DEFAULT_HOST.to_string(),
            port: defaults::DEFAULT_PORT as u16,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub rust_log: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            rust_log: defaults::DEFAULT_RUST_LOG.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_db_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_db_min_idle")]
    pub min_idle: u32,
}

fn default_db_max_connections() -> u32 {
    defaults::DEFAULT_DB_MAX_CONNECTIONS as u32
}

fn default_db_min_idle() -> u32 {
    defaults::DEFAULT_DB_MIN_IDLE as u32
}
