//! HTTP server settings shared by the services

use anyhow::Result;
use config::{Config, Environment};
use serde::Deserialize;

/// Where a service listens and which browser origin it accepts
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origin; any origin when unset
    #[serde(default)]
    pub cors_origin: Option<String>,
}

impl ServerConfig {
    /// Load server settings, overridable through `APP_HOST`, `APP_PORT`
    /// and `APP_CORS_ORIGIN`
    pub fn load(default_port: u16) -> Result<Self> {
        let settings = Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", i64::from(default_port))?
            .add_source(Environment::with_prefix("APP").try_parsing(true))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
