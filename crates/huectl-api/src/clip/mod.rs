// CLIP v2 API client modules
//
// Hand-written client for the bridge's `/clip/v2/resource/*` endpoints,
// wrapped in the `{ errors: [...], data: [...] }` envelope.

pub mod client;
pub mod lights;
pub mod models;

pub use client::ClipClient;
