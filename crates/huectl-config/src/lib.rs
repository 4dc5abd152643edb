//! Configuration for the huectl CLI.
//!
//! A single YAML file holds the persisted bridge state (`hue_*` keys) next to
//! transport settings. [`FileStore`] exposes the bridge state through
//! `huectl_core::ConfigStore`; [`load_settings`] layers environment
//! variables over the file for the transport settings.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Yaml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use huectl_core::config::{
    KEY_APPLICATION_KEY, KEY_BRIDGE_ID, KEY_BRIDGE_IP, KEY_CLIENT_KEY, KEY_LEGACY_USERNAME,
};
use huectl_core::{ConfigStore, CoreError};

/// Prefix for environment overrides of transport settings.
pub const ENV_PREFIX: &str = "HUECTL_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to serialize config: {0}")]
    Serialization(#[from] serde_yaml::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── YAML config struct ──────────────────────────────────────────────

/// Contents of `config.yaml`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hue_bridge_ip: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hue_bridge_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hue_application_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hue_client_key: Option<String>,

    /// Written by older releases; read only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hue_username: Option<String>,

    /// Skip TLS verification for CLIP requests.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub insecure: bool,

    /// PEM root certificate used to verify the bridge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,

    /// Per-request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

impl Config {
    fn slot(&self, key: &str) -> Option<&Option<String>> {
        match key {
            KEY_BRIDGE_IP => Some(&self.hue_bridge_ip),
            KEY_BRIDGE_ID => Some(&self.hue_bridge_id),
            KEY_APPLICATION_KEY => Some(&self.hue_application_key),
            KEY_CLIENT_KEY => Some(&self.hue_client_key),
            KEY_LEGACY_USERNAME => Some(&self.hue_username),
            _ => None,
        }
    }

    fn slot_mut(&mut self, key: &str) -> Option<&mut Option<String>> {
        match key {
            KEY_BRIDGE_IP => Some(&mut self.hue_bridge_ip),
            KEY_BRIDGE_ID => Some(&mut self.hue_bridge_id),
            KEY_APPLICATION_KEY => Some(&mut self.hue_application_key),
            KEY_CLIENT_KEY => Some(&mut self.hue_client_key),
            _ => None,
        }
    }

    /// Value of a bridge-state key.
    pub fn value(&self, key: &str) -> Option<String> {
        self.slot(key).and_then(Clone::clone)
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "huectl", "huectl").map_or_else(
        || dirs_fallback().join("config.yaml"),
        |dirs| dirs.config_dir().join("config.yaml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("huectl");
    p
}

// ── Loading / saving ────────────────────────────────────────────────

/// Load only what is written in the file. A missing file is an empty config.
pub fn load_file(path: &Path) -> Result<Config, ConfigError> {
    let config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Yaml::file(path))
        .extract()?;
    Ok(config)
}

/// Load the file with `HUECTL_INSECURE`, `HUECTL_CA_CERT` and
/// `HUECTL_TIMEOUT` layered on top.
pub fn load_settings(path: &Path) -> Result<Config, ConfigError> {
    let config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Yaml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).only(&["insecure", "ca_cert", "timeout"]))
        .extract()?;
    Ok(config)
}

/// Serialize config to YAML, creating parent directories as needed.
pub fn save_config(path: &Path, cfg: &Config) -> Result<(), ConfigError> {
    let io_err = |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let yaml = serde_yaml::to_string(cfg)?;
    std::fs::write(path, yaml).map_err(io_err)?;
    debug!(path = %path.display(), "config saved");
    Ok(())
}

// ── File-backed ConfigStore ─────────────────────────────────────────

/// `ConfigStore` backed by a YAML file.
///
/// Overrides (from CLI flags or env) shadow file values for this run only
/// and are never written back.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    file: Config,
    overrides: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`; the file need not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let file = load_file(&path)?;
        debug!(path = %path.display(), "config loaded");
        Ok(Self {
            path,
            file,
            overrides: BTreeMap::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The persisted contents, without overrides.
    pub fn file(&self) -> &Config {
        &self.file
    }

    /// Shadow `key` for this run without persisting it.
    pub fn set_override(&mut self, key: &str, value: impl Into<String>) {
        self.overrides.insert(key.to_owned(), value.into());
    }
}

impl ConfigStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.overrides
            .get(key)
            .cloned()
            .or_else(|| self.file.value(key))
    }

    fn set(&mut self, key: &str, value: &str) {
        self.overrides.remove(key);
        match self.file.slot_mut(key) {
            Some(slot) => *slot = Some(value.to_owned()),
            None => warn!(key, "ignoring unknown config key"),
        }
    }

    fn remove(&mut self, key: &str) {
        self.overrides.remove(key);
        if let Some(slot) = self.file.slot_mut(key) {
            *slot = None;
        }
    }

    fn save(&self) -> Result<(), CoreError> {
        save_config(&self.path, &self.file).map_err(|e| CoreError::Persist {
            message: e.to_string(),
        })
    }
}
