// CLIP v2 light endpoints
//
// Listing via `GET /resource/light` and power control via
// `PUT /resource/light/{id}`.

use tracing::debug;

use crate::clip::client::ClipClient;
use crate::clip::models::{Light, LightUpdate};
use crate::error::Error;

impl ClipClient {
    /// List every light known to the bridge, in bridge order.
    ///
    /// `GET /clip/v2/resource/light`
    pub async fn list_lights(&self) -> Result<Vec<Light>, Error> {
        let url = self.resource_url(&["light"]);
        debug!("listing lights");
        self.get(url).await
    }

    /// Apply an update to a single light.
    ///
    /// `PUT /clip/v2/resource/light/{id}`
    pub async fn update_light(&self, id: &str, update: &LightUpdate) -> Result<(), Error> {
        let url = self.resource_url(&["light", id]);
        debug!(id, "updating light");
        self.put(url, update).await
    }

    /// Turn a light on or off.
    pub async fn set_light_on(&self, id: &str, on: bool) -> Result<(), Error> {
        self.update_light(id, &LightUpdate::power(on)).await
    }
}
