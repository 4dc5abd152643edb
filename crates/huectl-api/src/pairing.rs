// Link-button pairing against the bridge's `/api` endpoint.
//
// This is the only endpoint of the legacy API huectl still uses: CLIP v2 has
// no way to mint an application key. The bridge answers on plain HTTP with a
// one-element array holding either `success` or `error`.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::auth::Credentials;
use crate::error::Error;
use crate::transport::TransportConfig;

/// Error type reported while nobody has pressed the link button.
pub const LINK_BUTTON_NOT_PRESSED: u32 = 101;

const MAX_APP_NAME: usize = 20;
const MAX_DEVICE_NAME: usize = 19;

/// Build a `devicetype` value of the form `<app>#<device>`, truncated to the
/// lengths the bridge accepts.
pub fn device_type(app: &str, device: &str) -> String {
    let app: String = app.chars().take(MAX_APP_NAME).collect();
    let device: String = device.chars().take(MAX_DEVICE_NAME).collect();
    format!("{app}#{device}")
}

// ── Wire types ───────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct PairingRequest<'a> {
    devicetype: &'a str,
    generateclientkey: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum PairingEntry {
    Success(PairingSuccess),
    Error(PairingError),
}

#[derive(Debug, Deserialize)]
struct PairingSuccess {
    username: String,
    #[serde(default)]
    clientkey: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PairingError {
    #[serde(rename = "type")]
    kind: u32,
    #[serde(default)]
    description: String,
}

// ── Results ──────────────────────────────────────────────────────────

/// What the bridge decided about a pairing request.
#[derive(Debug, Clone)]
pub enum PairingOutcome {
    /// Credentials were issued.
    Paired(Credentials),
    /// The link button has not been pressed; retry after pressing it.
    LinkButtonNotPressed,
}

/// A decoded pairing response together with the raw body the bridge sent.
#[derive(Debug, Clone)]
pub struct PairingResponse {
    pub body: String,
    pub outcome: PairingOutcome,
}

// ── Client ───────────────────────────────────────────────────────────

/// Client for the unauthenticated pairing endpoint.
pub struct PairingClient {
    http: reqwest::Client,
    base_url: Url,
}

impl PairingClient {
    /// `base_url` is the bridge root, normally `http://{bridge_ip}`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    fn api_url(&self) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("api");
        }
        url
    }

    /// Ask the bridge for a new application key and client key.
    ///
    /// `POST /api` with `{"devicetype": ..., "generateclientkey": true}`
    pub async fn pair(&self, device_type: &str) -> Result<PairingResponse, Error> {
        let url = self.api_url();
        debug!(device_type, "POST {}", url);

        let request = PairingRequest {
            devicetype: device_type,
            generateclientkey: true,
        };
        let resp = self
            .http
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;

        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        let outcome = decode_outcome(&body)?;
        Ok(PairingResponse { body, outcome })
    }
}

fn decode_outcome(body: &str) -> Result<PairingOutcome, Error> {
    let entries: Vec<PairingEntry> =
        serde_json::from_str(body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: body.to_owned(),
        })?;

    let Some(first) = entries.into_iter().next() else {
        return Err(Error::Deserialization {
            message: "empty pairing response".into(),
            body: body.to_owned(),
        });
    };

    match first {
        PairingEntry::Success(success) => Ok(PairingOutcome::Paired(Credentials {
            application_key: SecretString::from(success.username),
            client_key: success.clientkey.map(SecretString::from),
        })),
        PairingEntry::Error(err) if err.kind == LINK_BUTTON_NOT_PRESSED => {
            Ok(PairingOutcome::LinkButtonNotPressed)
        }
        PairingEntry::Error(err) => Err(Error::PairingRejected {
            code: err.kind,
            description: err.description,
            body: body.to_owned(),
        }),
    }
}
