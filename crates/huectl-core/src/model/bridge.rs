// ── Bridge domain types ──

use std::net::IpAddr;

use serde::Serialize;

use huectl_api::Credentials;

/// A bridge found on the local network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bridge {
    /// mDNS instance name, e.g. `Hue Bridge - 1A2B3C`.
    pub id: String,
    pub internal_ip: IpAddr,
    /// Full id from the `bridgeid` TXT record. Display only, not persisted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bridge_id: Option<String>,
    /// Advertised service port. Display only, not persisted.
    pub port: u16,
}

/// Result of a registration attempt that reached the bridge.
#[derive(Debug, Clone)]
pub struct Registration {
    /// Raw body the bridge answered with.
    pub response_body: String,
    pub outcome: RegistrationOutcome,
}

#[derive(Debug, Clone)]
pub enum RegistrationOutcome {
    /// Credentials were issued and persisted.
    Paired(Credentials),
    /// The link button has not been pressed; nothing was persisted.
    Pending,
}

impl Registration {
    pub fn is_pending(&self) -> bool {
        matches!(self.outcome, RegistrationOutcome::Pending)
    }
}
