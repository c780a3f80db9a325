//! Server configuration.
//!
//! Loaded from an optional YAML file named by `WICKET_CONFIG`, with the bind
//! address overridable through `LISTEN` (`host:port`). Every field has a
//! default, so an empty document is valid.

use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound on the request line plus headers
    pub max_header_bytes: usize,
    /// Upper bound on the request body
    pub max_body_bytes: usize,
    /// No timeout when unset
    pub read_timeout_secs: Option<u64>,
    pub write_timeout_secs: Option<u64>,
    /// How long `stop()` waits for open connections before aborting them
    pub shutdown_grace_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// One of `trace`, `debug`, `info`, `warn`, `error`
    pub level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            max_header_bytes: 64 * 1024,
            max_body_bytes: 1024 * 1024,
            read_timeout_secs: None,
            write_timeout_secs: None,
            shutdown_grace_secs: 30,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var("WICKET_CONFIG") {
            Ok(path) => {
                let content = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read config file {}", path))?;
                Self::from_yaml(&content)?
            }
            Err(_) => Self::default(),
        };

        if let Ok(listen) = std::env::var("LISTEN") {
            cfg.server.set_listen_addr(&listen)?;
        }

        Ok(cfg)
    }

    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        // serde_yaml rejects an empty document
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).context("invalid YAML configuration")
    }
}

impl ServerConfig {
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Sets host and port from a `host:port` string.
    pub fn set_listen_addr(&mut self, addr: &str) -> anyhow::Result<()> {
        let (host, port) = addr
            .rsplit_once(':')
            .with_context(|| format!("listen address {:?} is not host:port", addr))?;

        self.port = port
            .parse()
            .with_context(|| format!("invalid port in listen address {:?}", addr))?;
        self.host = host.to_string();
        Ok(())
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout_secs.map(Duration::from_secs)
    }

    pub fn write_timeout(&self) -> Option<Duration> {
        self.write_timeout_secs.map(Duration::from_secs)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }
}

impl LogConfig {
    /// Parsed level, falling back to `INFO` on unknown names.
    pub fn level(&self) -> tracing::Level {
        self.level.parse().unwrap_or(tracing::Level::INFO)
    }
}
