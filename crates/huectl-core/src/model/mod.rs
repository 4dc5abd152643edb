// ── Domain model ──

pub mod bridge;
pub mod device;

pub use bridge::{Bridge, Registration, RegistrationOutcome};
pub use device::{ColorXy, Device, Gamut};
