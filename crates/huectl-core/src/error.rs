// ── Core error types ──
//
// User-facing errors from huectl-core. The `From<huectl_api::Error>` impl
// folds transport-layer failures into these kinds; the raw bridge body is
// kept wherever one was received so the CLI can echo it.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Configuration ────────────────────────────────────────────────
    /// A required key is absent from the configuration store.
    #[error("Missing configuration: {key}")]
    ConfigurationMissing { key: String },

    /// A configuration value is present but unusable.
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidConfiguration { key: String, message: String },

    /// The configuration store could not be written.
    #[error("Failed to save configuration: {message}")]
    Persist { message: String },

    // ── Connection ───────────────────────────────────────────────────
    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Request to bridge timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("TLS error: {message}")]
    Tls { message: String },

    // ── Bridge responses ─────────────────────────────────────────────
    #[error("Bridge returned HTTP {status}")]
    HttpStatus { status: u16, body: String },

    #[error("Bridge rejected the application key (HTTP {status})")]
    Unauthorized { status: u16 },

    #[error("Failed to parse bridge response: {message}")]
    Parse { message: String, body: String },

    #[error("Registration rejected by bridge (type {code}): {description}")]
    Rejected {
        code: u32,
        description: String,
        body: String,
    },

    /// The link button has not been pressed yet.
    #[error("Link button not pressed")]
    PendingAuthorization,

    // ── Lookup ───────────────────────────────────────────────────────
    #[error("{entity} not found: {identifier}")]
    NotFound { entity: String, identifier: String },

    // ── Discovery ────────────────────────────────────────────────────
    #[error("Discovery failed: {message}")]
    Discovery { message: String },
}

impl CoreError {
    pub(crate) fn missing(key: &str) -> Self {
        Self::ConfigurationMissing {
            key: key.to_owned(),
        }
    }

    /// Raw response body, when the bridge sent one.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::HttpStatus { body, .. }
            | Self::Parse { body, .. }
            | Self::Rejected { body, .. } => Some(body),
            _ => None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<huectl_api::Error> for CoreError {
    fn from(err: huectl_api::Error) -> Self {
        match err {
            huectl_api::Error::Transport(ref e) if e.is_timeout() => CoreError::Timeout {
                timeout_secs: 0,
            },
            huectl_api::Error::Transport(e) => CoreError::Network {
                message: e.to_string(),
            },
            huectl_api::Error::InvalidUrl(e) => CoreError::InvalidConfiguration {
                key: "hue_bridge_ip".into(),
                message: e.to_string(),
            },
            huectl_api::Error::Tls(message) => CoreError::Tls { message },
            huectl_api::Error::Status { status, body } => CoreError::HttpStatus { status, body },
            huectl_api::Error::Unauthorized { status } => CoreError::Unauthorized { status },
            huectl_api::Error::PairingRejected {
                code,
                description,
                body,
            } => CoreError::Rejected {
                code,
                description,
                body,
            },
            huectl_api::Error::Deserialization { message, body } => {
                CoreError::Parse { message, body }
            }
            huectl_api::Error::InvalidApplicationKey(message) => CoreError::InvalidConfiguration {
                key: "hue_application_key".into(),
                message,
            },
            huectl_api::Error::Discovery(message) => CoreError::Discovery { message },
        }
    }
}
