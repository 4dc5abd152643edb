// CLIP v2 HTTP client
//
// Wraps `reqwest::Client` with resource URL construction, status mapping and
// envelope unwrapping. Resource endpoints (lights, ...) are implemented as
// inherent methods in separate files to keep this module focused on
// transport mechanics.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace, warn};
use url::Url;

use crate::auth::Credentials;
use crate::clip::models::ClipResponse;
use crate::error::Error;
use crate::transport::TransportConfig;

const CLIP_RESOURCE_PATH: [&str; 3] = ["clip", "v2", "resource"];

/// Raw HTTP client for the bridge's CLIP v2 API.
///
/// Every request carries the `hue-application-key` header. Reads return the
/// unwrapped `data` array; envelope `errors` are logged, not raised.
pub struct ClipClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ClipClient {
    /// Create a client authenticated with `credentials`.
    ///
    /// `base_url` is the bridge root, normally `https://{bridge_ip}`.
    pub fn new(
        base_url: Url,
        credentials: &Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client_with_headers(credentials.header_map()?)?;
        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The bridge base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}/clip/v2/resource/{segments...}`.
    ///
    /// Segments are percent-encoded, so ids can never escape the path.
    pub(crate) fn resource_url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .extend(CLIP_RESOURCE_PATH)
                .extend(segments);
        }
        url
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and unwrap the CLIP envelope.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>, Error> {
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;

        Self::parse_envelope(resp).await
    }

    /// Send a PUT request with a JSON body.
    ///
    /// The bridge acknowledges updates with `200 OK`; any other status is an
    /// error carrying the code, even other 2xx codes.
    pub(crate) async fn put(&self, url: Url, body: &(impl Serialize + Sync)) -> Result<(), Error> {
        debug!("PUT {}", url);

        let resp = self
            .http
            .put(url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        check_auth(status)?;

        let body = resp.text().await.map_err(Error::Transport)?;
        if status != reqwest::StatusCode::OK {
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        trace!(%body, "update acknowledged");
        if let Ok(envelope) = serde_json::from_str::<ClipResponse<serde_json::Value>>(&body) {
            for err in &envelope.errors {
                warn!(description = %err.description(), "bridge reported an error for update");
            }
        }
        Ok(())
    }

    /// Parse the `{ errors, data }` envelope, returning `data`.
    ///
    /// Only a non-2xx status or an unparseable body is fatal.
    async fn parse_envelope<T: DeserializeOwned>(resp: reqwest::Response) -> Result<Vec<T>, Error> {
        let status = resp.status();
        check_auth(status)?;

        let body = resp.text().await.map_err(Error::Transport)?;

        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: ClipResponse<T> = serde_json::from_str(&body).map_err(|e| {
            let preview = body_preview(&body);
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })?;

        for err in &envelope.errors {
            warn!(description = %err.description(), "bridge reported an error");
        }

        Ok(envelope.data)
    }
}

/// First 200 characters of a body, cut on a char boundary.
fn body_preview(body: &str) -> &str {
    body.char_indices().nth(200).map_or(body, |(i, _)| &body[..i])
}

fn check_auth(status: reqwest::StatusCode) -> Result<(), Error> {
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(Error::Unauthorized {
            status: status.as_u16(),
        });
    }
    Ok(())
}
