use crate::error::{GossipError, Result};
use crate::snapshot::DocumentFormat;
use crate::types::ValidationConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level gossipcheck configuration stored as TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckConfig {
    #[serde(default)]
    pub node: NodeSettings,
    #[serde(default)]
    pub gossip: GossipSettings,
    #[serde(default)]
    pub streams: StreamSettings,
}

/// Where and how to reach the node being checked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// "http" or "https".
    #[serde(default = "default_scheme")]
    pub scheme: String,
    /// Format requested from the gossip endpoint.
    #[serde(default)]
    pub format: DocumentFormat,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Basic auth for stream reads.
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl Default for NodeSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            scheme: default_scheme(),
            format: DocumentFormat::default(),
            timeout_secs: default_timeout_secs(),
            username: None,
            password: None,
        }
    }
}

impl NodeSettings {
    /// `scheme://host:port` without a trailing slash.
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host, self.port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GossipSettings {
    #[serde(default = "default_expected_nodes")]
    pub expected_nodes: usize,
    /// Maximum epoch lag behind the master; -1 disables the check.
    #[serde(default = "default_epoch_lag_threshold")]
    pub epoch_lag_threshold: i64,
}

impl Default for GossipSettings {
    fn default() -> Self {
        Self {
            expected_nodes: default_expected_nodes(),
            epoch_lag_threshold: default_epoch_lag_threshold(),
        }
    }
}

impl GossipSettings {
    pub fn validation(&self) -> Result<ValidationConfig> {
        ValidationConfig::new(self.expected_nodes, self.epoch_lag_threshold)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamSettings {
    #[serde(default)]
    pub names: Vec<String>,
    #[serde(default = "default_metric_prefix")]
    pub metric_prefix: String,
    /// Streams fetched at once.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for StreamSettings {
    fn default() -> Self {
        Self {
            names: vec![],
            metric_prefix: default_metric_prefix(),
            concurrency: default_concurrency(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    2113
}

fn default_scheme() -> String {
    "http".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_expected_nodes() -> usize {
    3
}

fn default_epoch_lag_threshold() -> i64 {
    -1
}

fn default_metric_prefix() -> String {
    "eventstore.streams".to_string()
}

fn default_concurrency() -> usize {
    4
}

impl CheckConfig {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(GossipError::ConfigNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|e| GossipError::TomlDe(e.to_string()))?;
        config.check()?;
        Ok(config)
    }

    /// Load config if the file exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Err(GossipError::ConfigNotFound(p)) => {
                tracing::debug!("No config at {p}, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Save config to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| GossipError::TomlSer(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject values no check can run with.
    pub fn check(&self) -> Result<()> {
        self.gossip.validation()?;
        if self.streams.concurrency == 0 {
            return Err(GossipError::Config(
                "streams.concurrency must be at least 1".to_string(),
            ));
        }
        if self.node.scheme != "http" && self.node.scheme != "https" {
            return Err(GossipError::Config(format!(
                "node.scheme must be http or https, got {}",
                self.node.scheme
            )));
        }
        Ok(())
    }

    /// Resolve the config file path: `<base_dir>/gossipcheck.toml`
    pub fn default_path(base_dir: &Path) -> PathBuf {
        base_dir.join("gossipcheck.toml")
    }

    /// Resolve the default home directory: `~/.gossipcheck`
    pub fn default_base_dir() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|h| h.join(".gossipcheck"))
            .ok_or_else(|| GossipError::Config("Cannot determine home directory".to_string()))
    }
}
