use std::net::SocketAddr;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const EXTERNAL_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
const DEFAULT_WORKER_THREADS: usize = 4;

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Listen on all interfaces instead of `host`.
    pub external: bool,
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
            external: false,
            worker_threads: Some(DEFAULT_WORKER_THREADS),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Emit JSON lines instead of the compact human format.
    pub json: bool,
    /// Fallback filter when `RUST_LOG` is unset.
    pub filter: Option<String>,
}

/// Values given on the command line; they win over file and env settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub external: bool,
    pub port: Option<u16>,
}

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    AppConfig::from_toml_str(&content).with_context(|| format!("parsing {path}"))
}

impl AppConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Build from `SERVER_HOST`/`SERVER_PORT`, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_env_values(std::env::var("SERVER_HOST").ok(), std::env::var("SERVER_PORT").ok())
    }

    fn from_env_values(host: Option<String>, port: Option<String>) -> Self {
        let mut cfg = Self::default();
        if let Some(host) = host {
            cfg.server.host = host;
        }
        if let Some(port) = port.and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        cfg
    }

    /// Resolve the effective configuration.
    ///
    /// An explicit `path` must exist. Without one, `CONFIG_PATH` or
    /// `config.toml` is used when present and the environment otherwise.
    /// CLI overrides are applied last, then the result is validated.
    pub fn resolve(path: Option<&str>, cli: CliOverrides) -> Result<Self> {
        let mut cfg = match path {
            Some(p) => load_from_file(p)?,
            None => {
                let default_path =
                    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
                if Path::new(&default_path).exists() {
                    load_default()?
                } else {
                    Self::from_env()
                }
            }
        };
        cfg.server.apply_overrides(cli);
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()
    }
}

impl ServerConfig {
    pub fn apply_overrides(&mut self, cli: CliOverrides) {
        if cli.external {
            self.external = true;
        }
        if let Some(port) = cli.port {
            self.port = port;
        }
    }

    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = DEFAULT_HOST.to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(DEFAULT_WORKER_THREADS),
            Some(_) => {}
        }
        Ok(())
    }

    pub fn bind_host(&self) -> &str {
        if self.external {
            EXTERNAL_HOST
        } else {
            &self.host
        }
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let raw = format!("{}:{}", self.bind_host(), self.port);
        raw.parse().with_context(|| format!("invalid bind address {raw}"))
    }
}
