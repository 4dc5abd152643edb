// mDNS / DNS-SD browsing for Hue bridges.
//
// Bridges advertise `_hue._tcp.local.` with their address records and a TXT
// record carrying `bridgeid` and `modelid`. The daemon resolves SRV/A/AAAA
// on a background thread and hands us complete `ServiceInfo` values.

use std::future::Future;
use std::net::IpAddr;

use flume::Receiver;
use mdns_sd::{ServiceDaemon, ServiceEvent, ServiceInfo};
use tracing::{debug, trace};

use crate::error::Error;

/// DNS-SD service type the bridge advertises.
pub const HUE_SERVICE_TYPE: &str = "_hue._tcp.local.";

/// A resolved bridge advertisement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advertisement {
    /// Service instance name, e.g. `Hue Bridge - 1A2B3C`.
    pub instance: String,
    /// Advertised addresses, sorted so IPv4 comes first.
    pub addresses: Vec<IpAddr>,
    pub port: u16,
    /// Full bridge id from the `bridgeid` TXT record, when present.
    pub bridge_id: Option<String>,
}

impl Advertisement {
    /// The address to talk to: the first IPv4 address, else the first IPv6.
    pub fn preferred_address(&self) -> Option<IpAddr> {
        self.addresses
            .iter()
            .find(|addr| addr.is_ipv4())
            .or_else(|| self.addresses.iter().find(|addr| addr.is_ipv6()))
            .copied()
    }

    fn from_service_info(info: &ServiceInfo, service_type: &str) -> Self {
        let fullname = info.get_fullname();
        let instance = fullname
            .strip_suffix(service_type)
            .map_or(fullname, |name| name.trim_end_matches('.'))
            .to_owned();

        let mut addresses: Vec<IpAddr> = info.get_addresses().iter().copied().collect();
        // IpAddr orders V4 before V6; the daemon hands out a set, so sort for
        // a stable choice between several addresses of the same family.
        addresses.sort_unstable();

        Self {
            instance,
            addresses,
            port: info.get_port(),
            bridge_id: info.get_property_val_str("bridgeid").map(str::to_owned),
        }
    }
}

/// A source of bridge advertisements.
///
/// Implemented by [`MdnsBrowser`] for the real network; tests provide canned
/// advertisements.
pub trait ServiceBrowser {
    /// Wait for the next resolved advertisement.
    ///
    /// Returns `Ok(None)` once the browse has ended and nothing more will
    /// arrive. There is no built-in deadline; wrap the call in a timeout.
    fn next_advertisement(
        &mut self,
    ) -> impl Future<Output = Result<Option<Advertisement>, Error>> + Send;
}

/// Browses the local network with an `mdns-sd` daemon.
///
/// The daemon stops browsing and shuts down when the browser is dropped.
pub struct MdnsBrowser {
    daemon: ServiceDaemon,
    receiver: Receiver<ServiceEvent>,
    service_type: String,
}

impl MdnsBrowser {
    /// Start browsing for Hue bridges.
    pub fn start() -> Result<Self, Error> {
        Self::browse(HUE_SERVICE_TYPE)
    }

    /// Start browsing for an arbitrary service type.
    pub fn browse(service_type: &str) -> Result<Self, Error> {
        let daemon = ServiceDaemon::new()?;
        let receiver = daemon.browse(service_type)?;
        debug!(service_type, "mDNS browse started");
        Ok(Self {
            daemon,
            receiver,
            service_type: service_type.to_owned(),
        })
    }
}

impl ServiceBrowser for MdnsBrowser {
    async fn next_advertisement(&mut self) -> Result<Option<Advertisement>, Error> {
        loop {
            match self.receiver.recv_async().await {
                Ok(ServiceEvent::ServiceResolved(info)) => {
                    return Ok(Some(Advertisement::from_service_info(
                        &info,
                        &self.service_type,
                    )));
                }
                Ok(ServiceEvent::SearchStopped(_)) | Err(flume::RecvError::Disconnected) => {
                    return Ok(None);
                }
                Ok(event) => trace!(?event, "ignoring mDNS event"),
            }
        }
    }
}

impl Drop for MdnsBrowser {
    fn drop(&mut self) {
        if let Err(e) = self.daemon.stop_browse(&self.service_type) {
            trace!(error = %e, "stop_browse failed");
        }
        if let Err(e) = self.daemon.shutdown() {
            trace!(error = %e, "mDNS daemon shutdown failed");
        }
    }
}
