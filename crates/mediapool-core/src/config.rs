use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Pool configuration: hardening knobs plus the bootstrap server list.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PoolConfig {
    /// Per-request ceiling in seconds. Unset means a hung server is waited
    /// on indefinitely, matching the historical behavior.
    pub request_timeout_secs: Option<u64>,
    /// Id of the designated default server, if any.
    pub active_server: Option<String>,
    /// Servers registered at startup.
    pub servers: Vec<ServerEntry>,
}

/// One `[[servers]]` entry of the config file.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerEntry {
    pub id: String,
    pub name: String,
    pub address: String,
    pub access_token: String,
    pub user_id: String,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: None,
            active_server: None,
            servers: Vec::new(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config io: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse: {0}")]
    Parse(#[from] toml::de::Error),
}

impl PoolConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// The configured ceiling as a [`Duration`], when set.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
