//! CLI configuration: thin wrapper around `huectl_config`.
//!
//! Resolves the config path, opens the file store with per-run overrides
//! from `GlobalOpts`, and translates file settings plus flags into a
//! `ControllerConfig`.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use huectl_config::FileStore;
use huectl_core::config::{KEY_APPLICATION_KEY, KEY_BRIDGE_IP};
use huectl_core::{ControllerConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// `--config` / `HUECTL_CONFIG`, else the platform config directory.
pub fn resolve_config_path(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(huectl_config::config_path)
}

/// Open the config store, applying `--bridge` and `--application-key` as
/// unsaved overrides.
pub fn open_store(global: &GlobalOpts) -> Result<FileStore, CliError> {
    let mut store = FileStore::open(resolve_config_path(global))?;
    if let Some(ref bridge) = global.bridge {
        store.set_override(KEY_BRIDGE_IP, bridge.as_str());
    }
    if let Some(ref key) = global.application_key {
        store.set_override(KEY_APPLICATION_KEY, key.as_str());
    }
    Ok(store)
}

/// Translate file settings + global flags into a `ControllerConfig`.
///
/// CLI flags take priority over environment and file values.
pub fn controller_config(global: &GlobalOpts) -> Result<ControllerConfig, CliError> {
    let settings = huectl_config::load_settings(&resolve_config_path(global))?;

    // 1. TLS verification
    let tls = if global.insecure || settings.insecure {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ca_path) = settings.ca_cert {
        TlsVerification::CustomCa(ca_path)
    } else {
        TlsVerification::SystemDefaults
    };

    // 2. Timeout (flag > env > file > default)
    let timeout_secs = global
        .timeout
        .or(settings.timeout)
        .unwrap_or(DEFAULT_TIMEOUT_SECS)
        .max(1);

    // 3. Base URL override
    let bridge_url = global
        .bridge_url
        .as_deref()
        .map(|raw| {
            Url::parse(raw).map_err(|e| CliError::Validation {
                field: "bridge-url".into(),
                reason: format!("invalid URL `{raw}`: {e}"),
            })
        })
        .transpose()?;

    Ok(ControllerConfig {
        tls,
        timeout: Duration::from_secs(timeout_secs),
        bridge_url,
    })
}
