// huectl-api: Async Rust client for the Hue bridge local API (CLIP v2 + pairing + mDNS)

pub mod auth;
pub mod clip;
pub mod discovery;
pub mod error;
pub mod pairing;
pub mod transport;

pub use auth::{APPLICATION_KEY_HEADER, Credentials};
pub use clip::ClipClient;
pub use discovery::{Advertisement, HUE_SERVICE_TYPE, MdnsBrowser, ServiceBrowser};
pub use error::Error;
pub use pairing::{PairingClient, PairingOutcome, PairingResponse};
pub use transport::{TlsMode, TransportConfig};
