// ── Configuration contract ──
//
// The controller reads and writes persisted bridge state through the
// `ConfigStore` trait; it never touches disk itself. `huectl-config` provides
// the YAML-backed store, `MemoryStore` serves tests and embedders.
// `ControllerConfig` carries per-run connection tuning that is not persisted.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use url::Url;

use crate::error::CoreError;

// ── Store keys ───────────────────────────────────────────────────────

pub const KEY_BRIDGE_IP: &str = "hue_bridge_ip";
pub const KEY_BRIDGE_ID: &str = "hue_bridge_id";
pub const KEY_APPLICATION_KEY: &str = "hue_application_key";
pub const KEY_CLIENT_KEY: &str = "hue_client_key";
/// Read as a fallback for [`KEY_APPLICATION_KEY`]; never written.
pub const KEY_LEGACY_USERNAME: &str = "hue_username";

/// Key/value persistence for bridge state.
pub trait ConfigStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str);

    /// Clear a key so it is absent after the next save.
    fn remove(&mut self, key: &str);

    /// Flush pending changes to durable storage.
    fn save(&self) -> Result<(), CoreError>;

    /// Like [`get`](Self::get), but treats blank values as absent.
    fn get_non_empty(&self, key: &str) -> Option<String> {
        self.get(key)
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
    }
}

/// In-memory store. `save()` only counts calls.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
    saves: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_owned(), value.to_owned());
        self
    }

    /// Number of times `save()` has been called.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::Relaxed)
    }
}

impl ConfigStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_owned(), value.to_owned());
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }

    fn save(&self) -> Result<(), CoreError> {
        self.saves.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

// ── Runtime connection settings ──────────────────────────────────────

/// TLS verification strategy for CLIP requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file, e.g. the Hue bridge root CA.
    CustomCa(PathBuf),
    /// Skip verification. Only used when the operator opts in.
    DangerAcceptInvalid,
}

/// Per-run connection settings, built by the CLI.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Replaces both `http://{ip}` and `https://{ip}` as the base of every
    /// bridge request. Used for simulators and tests.
    pub bridge_url: Option<Url>,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(10),
            bridge_url: None,
        }
    }
}
