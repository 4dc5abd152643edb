use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;

/// Header carrying the application key on every CLIP v2 request.
pub const APPLICATION_KEY_HEADER: &str = "hue-application-key";

/// Credentials issued by the bridge during link-button pairing.
///
/// The bridge calls the application key `username` on the pairing endpoint;
/// CLIP v2 sends it in the [`APPLICATION_KEY_HEADER`]. The client key is only
/// handed out when `generateclientkey` was requested and is used for the
/// entertainment streaming API, which huectl does not speak.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub application_key: SecretString,
    pub client_key: Option<SecretString>,
}

impl Credentials {
    pub fn new(application_key: impl Into<String>) -> Self {
        Self {
            application_key: SecretString::from(application_key.into()),
            client_key: None,
        }
    }

    /// Build the default header map for CLIP requests.
    ///
    /// The key is marked sensitive so it never shows up in debug output.
    pub fn header_map(&self) -> Result<HeaderMap, Error> {
        let mut value = HeaderValue::from_str(self.application_key.expose_secret())
            .map_err(|e| Error::InvalidApplicationKey(e.to_string()))?;
        value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(APPLICATION_KEY_HEADER, value);
        Ok(headers)
    }
}
