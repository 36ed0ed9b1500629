// ABOUTME: Configuration types and parsing for limani.yml.
// ABOUTME: Handles YAML parsing, discovery, and env var interpolation.

mod env_value;
mod init;

pub use env_value::EnvValue;
pub use init::init_config;

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "limani.yml";
pub const CONFIG_FILENAME_ALT: &str = "limani.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".limani/config.yml";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Base address of the registry, scheme included, e.g.
    /// `http://localhost:5000`.
    pub registry_address: String,

    /// Container engine command used for build/push/tag/rmi.
    #[serde(default = "default_engine")]
    pub engine: String,

    #[serde(default)]
    pub git: Option<GitConfig>,

    /// How many tag digests to probe at once during reference
    /// resolution. 1 keeps the registry load strictly serial.
    #[serde(default = "default_probe_concurrency")]
    pub probe_concurrency: usize,

    #[serde(default)]
    pub cleanup: CleanupConfig,

    /// Base directory for per-run scratch dirs. System temp when unset.
    #[serde(default)]
    pub scratch_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitConfig {
    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub access_token: Option<EnvValue>,
}

/// Retry policy for scratch directory removal. The engine can hold the
/// build context open briefly after the build process exits.
#[derive(Debug, Clone, Deserialize)]
pub struct CleanupConfig {
    #[serde(default = "default_cleanup_retries")]
    pub max_retries: u32,

    #[serde(default = "default_cleanup_delay", with = "humantime_serde")]
    pub delay: Duration,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            max_retries: default_cleanup_retries(),
            delay: default_cleanup_delay(),
        }
    }
}

fn default_engine() -> String {
    "docker".to_string()
}

fn default_probe_concurrency() -> usize {
    1
}

fn default_cleanup_retries() -> u32 {
    20
}

fn default_cleanup_delay() -> Duration {
    Duration::from_millis(100)
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    /// Resolved git credentials, when both a username and a token are
    /// configured. The token may come from the environment.
    pub fn git_credentials(&self) -> Result<Option<(String, String)>> {
        let Some(git) = &self.git else {
            return Ok(None);
        };
        match (&git.username, &git.access_token) {
            (Some(user), Some(token)) => Ok(Some((user.clone(), token.resolve()?))),
            _ => Ok(None),
        }
    }

    pub fn template() -> Self {
        Config {
            registry_address: "http://localhost:5000".to_string(),
            engine: default_engine(),
            git: None,
            probe_concurrency: default_probe_concurrency(),
            cleanup: CleanupConfig::default(),
            scratch_dir: None,
        }
    }
}
