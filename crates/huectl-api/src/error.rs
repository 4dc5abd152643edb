use thiserror::Error;

/// Top-level error type for the `huectl-api` crate.
///
/// Covers every failure mode across the bridge surfaces: transport,
/// HTTP status, response decoding, pairing and mDNS discovery.
/// `huectl-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Bridge responses ────────────────────────────────────────────
    /// The bridge answered with a non-success status code.
    #[error("Bridge returned HTTP {status}")]
    Status { status: u16, body: String },

    /// The application key was rejected (HTTP 401/403).
    #[error("Bridge rejected the application key (HTTP {status})")]
    Unauthorized { status: u16 },

    /// The bridge refused a pairing request for a reason other than
    /// the link button.
    #[error("Pairing rejected by bridge (type {code}): {description}")]
    PairingRejected {
        code: u32,
        description: String,
        body: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// Header value could not be built from the application key.
    #[error("Invalid application key: {0}")]
    InvalidApplicationKey(String),

    // ── Discovery ───────────────────────────────────────────────────
    /// The mDNS daemon could not be started or the browse call failed.
    #[error("mDNS discovery failed: {0}")]
    Discovery(String),
}

impl Error {
    /// Returns `true` if the request timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }

    /// Returns `true` if the bridge could not be reached at all.
    pub fn is_connect(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_connect())
    }

    /// HTTP status code carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } | Self::Unauthorized { status } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Raw response body, when the error was produced after reading one.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Status { body, .. }
            | Self::PairingRejected { body, .. }
            | Self::Deserialization { body, .. } => Some(body),
            _ => None,
        }
    }
}

impl From<mdns_sd::Error> for Error {
    fn from(err: mdns_sd::Error) -> Self {
        Self::Discovery(err.to_string())
    }
}
