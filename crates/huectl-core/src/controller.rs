// ── Controller ──
//
// Every bridge operation huectl performs: discovery, link-button
// registration, listing and power control. The controller owns the config
// store; discovery and registration write their results back to it, the
// authenticated operations only read from it.

use std::net::Ipv6Addr;
use std::time::Duration;

use secrecy::ExposeSecret;
use tracing::{debug, info, warn};
use url::Url;

use huectl_api::pairing;
use huectl_api::transport::{TlsMode, TransportConfig};
use huectl_api::{
    ClipClient, Credentials, MdnsBrowser, PairingClient, PairingOutcome, ServiceBrowser,
};

use crate::config::{
    ConfigStore, ControllerConfig, KEY_APPLICATION_KEY, KEY_BRIDGE_ID, KEY_BRIDGE_IP,
    KEY_CLIENT_KEY, KEY_LEGACY_USERNAME, TlsVerification,
};
use crate::error::CoreError;
use crate::model::{Bridge, Device, Registration, RegistrationOutcome};

/// Application half of the pairing `devicetype`.
pub const APP_NAME: &str = "huectl";
/// Device half used when the operator does not name one.
pub const DEFAULT_DEVICE_NAME: &str = "cli";

/// Build the `devicetype` sent during registration.
pub fn device_type(device_name: Option<&str>) -> String {
    pairing::device_type(APP_NAME, device_name.unwrap_or(DEFAULT_DEVICE_NAME))
}

/// Entry point for every bridge operation.
pub struct Controller<S> {
    config: ControllerConfig,
    store: S,
}

impl<S: ConfigStore> Controller<S> {
    pub fn new(config: ControllerConfig, store: S) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    // ── Discovery ────────────────────────────────────────────────────

    /// Browse the local network for a bridge.
    ///
    /// The first advertisement with a usable address wins and is persisted.
    /// Returns `Ok(None)` when nothing shows up within `timeout`; `None`
    /// waits until the future is dropped.
    pub async fn discover(&mut self, timeout: Option<Duration>) -> Result<Option<Bridge>, CoreError> {
        let mut browser = MdnsBrowser::start()?;
        self.discover_with(&mut browser, timeout).await
    }

    /// [`discover`](Self::discover) against an arbitrary advertisement source.
    pub async fn discover_with<B>(
        &mut self,
        browser: &mut B,
        timeout: Option<Duration>,
    ) -> Result<Option<Bridge>, CoreError>
    where
        B: ServiceBrowser + Send,
    {
        let search = first_usable_bridge(browser);
        let found = match timeout {
            Some(limit) => {
                if let Ok(result) = tokio::time::timeout(limit, search).await {
                    result?
                } else {
                    debug!(timeout_secs = limit.as_secs(), "discovery timed out");
                    None
                }
            }
            None => search.await?,
        };

        let Some(bridge) = found else {
            return Ok(None);
        };

        self.store.set(KEY_BRIDGE_ID, &bridge.id);
        self.store.set(KEY_BRIDGE_IP, &bridge.internal_ip.to_string());
        self.store.save()?;
        info!(id = %bridge.id, ip = %bridge.internal_ip, "bridge discovered");

        Ok(Some(bridge))
    }

    // ── Registration ─────────────────────────────────────────────────

    /// Ask the bridge for an application key.
    ///
    /// Succeeds with [`RegistrationOutcome::Pending`] while the link button
    /// has not been pressed. Issued keys are persisted.
    pub async fn register(&mut self, device_type: &str) -> Result<Registration, CoreError> {
        let host = self.bridge_host()?;
        let base_url = self.base_url("http", &host)?;
        let client = PairingClient::new(base_url, &self.transport())?;

        let response = client
            .pair(device_type)
            .await
            .map_err(|e| self.api_error(e))?;

        let outcome = match response.outcome {
            PairingOutcome::Paired(credentials) => {
                self.persist_credentials(&credentials)?;
                info!(device_type, "registered with bridge");
                RegistrationOutcome::Paired(credentials)
            }
            PairingOutcome::LinkButtonNotPressed => {
                debug!("link button not pressed");
                RegistrationOutcome::Pending
            }
        };

        Ok(Registration {
            response_body: response.body,
            outcome,
        })
    }

    fn persist_credentials(&mut self, credentials: &Credentials) -> Result<(), CoreError> {
        self.store
            .set(KEY_APPLICATION_KEY, credentials.application_key.expose_secret());
        match &credentials.client_key {
            Some(client_key) => self.store.set(KEY_CLIENT_KEY, client_key.expose_secret()),
            // A stale client key must not outlive the key it was issued with.
            None => self.store.remove(KEY_CLIENT_KEY),
        }
        self.store.save()
    }

    // ── Lights ───────────────────────────────────────────────────────

    /// Fetch every light, in bridge order.
    pub async fn list_devices(&self) -> Result<Vec<Device>, CoreError> {
        let client = self.clip_client()?;
        let lights = client.list_lights().await.map_err(|e| self.api_error(e))?;
        Ok(lights.into_iter().map(Device::from).collect())
    }

    /// Find the id of the first light whose name matches exactly.
    pub async fn resolve_light_id(&self, name: &str) -> Result<String, CoreError> {
        let devices = self.list_devices().await?;
        devices
            .into_iter()
            .find(|d| d.name == name)
            .map(|d| d.id)
            .ok_or_else(|| CoreError::NotFound {
                entity: "Light".into(),
                identifier: name.to_owned(),
            })
    }

    /// Switch a light on or off.
    pub async fn set_light_state(&self, light_id: &str, on: bool) -> Result<(), CoreError> {
        let client = self.clip_client()?;
        client
            .set_light_on(light_id, on)
            .await
            .map_err(|e| self.api_error(e))?;
        info!(light_id, on, "light state updated");
        Ok(())
    }

    // ── Helpers ──────────────────────────────────────────────────────

    fn bridge_host(&self) -> Result<String, CoreError> {
        self.store
            .get_non_empty(KEY_BRIDGE_IP)
            .ok_or_else(|| CoreError::missing(KEY_BRIDGE_IP))
    }

    fn application_key(&self) -> Result<String, CoreError> {
        self.store
            .get_non_empty(KEY_APPLICATION_KEY)
            .or_else(|| {
                let legacy = self.store.get_non_empty(KEY_LEGACY_USERNAME);
                if legacy.is_some() {
                    warn!("using legacy hue_username as the application key");
                }
                legacy
            })
            .ok_or_else(|| CoreError::missing(KEY_APPLICATION_KEY))
    }

    fn base_url(&self, scheme: &str, host: &str) -> Result<Url, CoreError> {
        match &self.config.bridge_url {
            Some(url) => Ok(url.clone()),
            None => bridge_url(scheme, host),
        }
    }

    fn clip_client(&self) -> Result<ClipClient, CoreError> {
        let host = self.bridge_host()?;
        let credentials = Credentials::new(self.application_key()?);
        let base_url = self.base_url("https", &host)?;
        Ok(ClipClient::new(base_url, &credentials, &self.transport())?)
    }

    fn transport(&self) -> TransportConfig {
        let tls = match &self.config.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.config.timeout,
        }
    }

    fn api_error(&self, err: huectl_api::Error) -> CoreError {
        match CoreError::from(err) {
            CoreError::Timeout { .. } => CoreError::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            },
            other => other,
        }
    }
}

/// Pull advertisements until one carries an address.
async fn first_usable_bridge<B>(browser: &mut B) -> Result<Option<Bridge>, CoreError>
where
    B: ServiceBrowser + Send,
{
    while let Some(ad) = browser.next_advertisement().await? {
        let Some(internal_ip) = ad.preferred_address() else {
            debug!(instance = %ad.instance, "skipping advertisement without address");
            continue;
        };
        return Ok(Some(Bridge {
            id: ad.instance,
            internal_ip,
            bridge_id: ad.bridge_id,
            port: ad.port,
        }));
    }
    Ok(None)
}

/// `{scheme}://{host}/`, bracketing bare IPv6 literals.
fn bridge_url(scheme: &str, host: &str) -> Result<Url, CoreError> {
    let authority = match host.parse::<Ipv6Addr>() {
        Ok(v6) => format!("[{v6}]"),
        Err(_) => host.to_owned(),
    };
    let invalid = |message: String| CoreError::InvalidConfiguration {
        key: KEY_BRIDGE_IP.into(),
        message,
    };

    let url = Url::parse(&format!("{scheme}://{authority}/")).map_err(|e| invalid(e.to_string()))?;
    if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
        return Err(invalid(format!("`{host}` is not a host address")));
    }
    Ok(url)
}
