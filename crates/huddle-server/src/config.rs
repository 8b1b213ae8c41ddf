use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use huddle_store::json_log::DEFAULT_DATA_FILE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogBackend {
    Json,
    Sqlite,
}

impl LogBackend {
    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "sqlite" => Ok(Self::Sqlite),
            other => bail!("HUDDLE_LOG_BACKEND must be 'json' or 'sqlite', got '{}'", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_file: PathBuf,
    pub backend: LogBackend,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let host = get("HUDDLE_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = get("HUDDLE_PORT")
            .unwrap_or_else(|| "8080".into())
            .parse()
            .context("HUDDLE_PORT is not a valid port")?;
        let data_file = get("HUDDLE_DATA_FILE")
            .unwrap_or_else(|| DEFAULT_DATA_FILE.into())
            .into();
        let backend = match get("HUDDLE_LOG_BACKEND") {
            Some(value) => LogBackend::parse(&value)?,
            None => LogBackend::Json,
        };

        Ok(Self {
            host,
            port,
            data_file,
            backend,
        })
    }

    pub fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}
