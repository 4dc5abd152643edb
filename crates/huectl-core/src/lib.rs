//! Bridge operations for huectl, sitting between `huectl-api` and the CLI.
//!
//! - **[`Controller`]** runs every operation: [`discover`](Controller::discover)
//!   finds a bridge over mDNS, [`register`](Controller::register) performs
//!   the link-button handshake, and
//!   [`list_devices`](Controller::list_devices) /
//!   [`set_light_state`](Controller::set_light_state) talk CLIP v2.
//!
//! - **[`ConfigStore`]** is the persistence contract. Discovery and
//!   registration write their results through it; authenticated operations
//!   fail with [`CoreError::ConfigurationMissing`] before touching the
//!   network when the bridge address or application key is absent.
//!
//! - **Domain model** ([`model`]) holds [`Bridge`], [`Device`] and the
//!   registration result types.

pub mod config;
pub mod controller;
pub mod error;
pub mod model;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ConfigStore, ControllerConfig, MemoryStore, TlsVerification};
pub use controller::{Controller, device_type};
pub use error::CoreError;
pub use model::{Bridge, ColorXy, Device, Gamut, Registration, RegistrationOutcome};

// The advertisement source trait is part of `discover_with`'s signature.
pub use huectl_api::{Advertisement, Credentials, ServiceBrowser};
