//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with actionable
//! help text. Every variant exits non-zero.

use miette::Diagnostic;
use thiserror::Error;

use huectl_config::ConfigError;
use huectl_core::CoreError;
use huectl_core::config::{KEY_APPLICATION_KEY, KEY_BRIDGE_IP};

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    pub const INTERRUPTED: i32 = 130;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Setup ────────────────────────────────────────────────────────
    #[error("No bridge address configured")]
    #[diagnostic(
        code(huectl::no_bridge),
        help(
            "Run: huectl discover\n\
             Or pass the address with --bridge <IP>."
        )
    )]
    NoBridgeConfigured,

    #[error("Not registered with the bridge")]
    #[diagnostic(
        code(huectl::not_registered),
        help("Press the link button on the bridge, then run: huectl register")
    )]
    NotRegistered,

    #[error("Missing configuration value `{key}`")]
    #[diagnostic(code(huectl::missing_config))]
    MissingConfiguration { key: String },

    // ── Discovery ────────────────────────────────────────────────────
    #[error("No Hue bridge found on the local network")]
    #[diagnostic(
        code(huectl::bridge_not_found),
        help(
            "Make sure the bridge is powered and on the same network segment.\n\
             Wait longer with --wait <SECONDS> (0 waits until Ctrl-C)."
        )
    )]
    BridgeNotFound,

    #[error("mDNS discovery failed: {message}")]
    #[diagnostic(code(huectl::discovery))]
    Discovery { message: String },

    #[error("{operation} cancelled")]
    #[diagnostic(code(huectl::cancelled))]
    Cancelled { operation: String },

    // ── Registration ─────────────────────────────────────────────────
    #[error("Link button not pressed")]
    #[diagnostic(
        code(huectl::link_button),
        help("Press the link button on the bridge, then run `huectl register` again within 30 seconds.")
    )]
    LinkButtonNotPressed,

    #[error("Bridge refused registration (type {code}): {description}")]
    #[diagnostic(code(huectl::registration_rejected))]
    RegistrationRejected { code: u32, description: String },

    // ── Bridge requests ──────────────────────────────────────────────
    #[error("Bridge rejected the application key (HTTP {status})")]
    #[diagnostic(
        code(huectl::unauthorized),
        help("The key may have been revoked in the Hue app. Run: huectl register")
    )]
    Unauthorized { status: u16 },

    #[error("Light '{name}' not found")]
    #[diagnostic(
        code(huectl::light_not_found),
        help("Names are case-sensitive. Run: huectl list")
    )]
    LightNotFound { name: String },

    #[error("{entity} '{identifier}' not found")]
    #[diagnostic(code(huectl::not_found))]
    NotFound { entity: String, identifier: String },

    #[error("Bridge returned HTTP {status}")]
    #[diagnostic(code(huectl::http_status))]
    BridgeStatus { status: u16 },

    #[error("Unexpected response from bridge: {message}")]
    #[diagnostic(code(huectl::invalid_response))]
    InvalidResponse { message: String },

    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the bridge: {message}")]
    #[diagnostic(
        code(huectl::connection_failed),
        help("Check the bridge address (huectl config show) or re-run: huectl discover")
    )]
    ConnectionFailed { message: String },

    #[error("TLS error: {message}")]
    #[diagnostic(
        code(huectl::tls_error),
        help(
            "The bridge uses a certificate signed by the Signify private CA.\n\
             Set ca_cert in the config file, or use --insecure (-k) to skip verification."
        )
    )]
    Tls { message: String },

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(huectl::timeout),
        help("Increase timeout with --timeout or check the bridge is reachable.")
    )]
    Timeout { seconds: u64 },

    // ── Validation / configuration ───────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(huectl::validation))]
    Validation { field: String, reason: String },

    #[error(transparent)]
    #[diagnostic(code(huectl::config))]
    Config(#[from] ConfigError),

    #[error("Failed to save configuration: {message}")]
    #[diagnostic(code(huectl::persist))]
    Persist { message: String },
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotRegistered
            | Self::LinkButtonNotPressed
            | Self::Unauthorized { .. } => exit_code::AUTH,
            Self::NoBridgeConfigured
            | Self::BridgeNotFound
            | Self::LightNotFound { .. }
            | Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::ConnectionFailed { .. } | Self::Tls { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Validation { .. } => exit_code::USAGE,
            Self::Cancelled { .. } => exit_code::INTERRUPTED,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConfigurationMissing { key } if key == KEY_BRIDGE_IP => {
                CliError::NoBridgeConfigured
            }
            CoreError::ConfigurationMissing { key } if key == KEY_APPLICATION_KEY => {
                CliError::NotRegistered
            }
            CoreError::ConfigurationMissing { key } => CliError::MissingConfiguration { key },
            CoreError::InvalidConfiguration { key, message } => CliError::Validation {
                field: key,
                reason: message,
            },
            CoreError::Persist { message } => CliError::Persist { message },
            CoreError::Network { message } => CliError::ConnectionFailed { message },
            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },
            CoreError::Tls { message } => CliError::Tls { message },
            CoreError::HttpStatus { status, .. } => CliError::BridgeStatus { status },
            CoreError::Unauthorized { status } => CliError::Unauthorized { status },
            CoreError::Parse { message, .. } => CliError::InvalidResponse { message },
            CoreError::Rejected {
                code, description, ..
            } => CliError::RegistrationRejected { code, description },
            CoreError::PendingAuthorization => CliError::LinkButtonNotPressed,
            CoreError::NotFound { entity, identifier } if entity == "Light" => {
                CliError::LightNotFound { name: identifier }
            }
            CoreError::NotFound { entity, identifier } => CliError::NotFound { entity, identifier },
            CoreError::Discovery { message } => CliError::Discovery { message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_bridge_and_key_map_to_distinct_errors() {
        let no_ip = CliError::from(CoreError::ConfigurationMissing {
            key: KEY_BRIDGE_IP.into(),
        });
        let no_key = CliError::from(CoreError::ConfigurationMissing {
            key: KEY_APPLICATION_KEY.into(),
        });
        assert!(matches!(no_ip, CliError::NoBridgeConfigured));
        assert!(matches!(no_key, CliError::NotRegistered));
        assert_eq!(no_ip.exit_code(), exit_code::NOT_FOUND);
        assert_eq!(no_key.exit_code(), exit_code::AUTH);
    }

    #[test]
    fn every_error_exits_non_zero() {
        let errors = [
            CliError::from(CoreError::HttpStatus {
                status: 503,
                body: String::new(),
            }),
            CliError::from(CoreError::PendingAuthorization),
            CliError::from(CoreError::Parse {
                message: "eof".into(),
                body: String::new(),
            }),
            CliError::BridgeNotFound,
        ];
        for err in &errors {
            assert_ne!(err.exit_code(), exit_code::SUCCESS, "{err}");
        }
    }

    #[test]
    fn light_lookup_failure_is_not_found() {
        let err = CliError::from(CoreError::NotFound {
            entity: "Light".into(),
            identifier: "Garage".into(),
        });
        assert!(matches!(err, CliError::LightNotFound { ref name } if name == "Garage"));
        assert_eq!(err.exit_code(), exit_code::NOT_FOUND);
    }
}
