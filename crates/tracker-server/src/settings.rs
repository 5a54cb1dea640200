//! Server configuration
//!
//! Sources, lowest precedence first: built-in defaults, an optional
//! `tracker.toml` in the working directory, then environment variables
//! (`PORT`, `HOST`, `DATABASE_URL`, `STATIC_DIR`, `LOG_JSON`).

use anyhow::{Context, Result};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use serde::Deserialize;
use std::net::SocketAddr;

pub const CONFIG_FILE: &str = "tracker";

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub static_dir: String,
    pub log_json: bool,
}

impl ServerConfig {
    pub fn load() -> Result<Self> {
        let config = Self::defaults()?
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Environment::default())
            .build()
            .context("Failed to read configuration sources")?;

        Self::from_config(config)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 3000)?
            .set_default("database_url", "sqlite://tracker.db")?
            .set_default("static_dir", "public")?
            .set_default("log_json", false)?)
    }

    fn from_config(config: Config) -> Result<Self> {
        config
            .try_deserialize()
            .context("Invalid server configuration")
    }

    pub fn bind_address(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Failed to parse bind address {}:{}", self.host, self.port))
    }
}
