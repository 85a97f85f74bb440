//! Transport layer
//!
//! | Transport | Description |
//! |-----------|-------------|
//! | [`http`] | Rocket HTTP API and web UI |

pub mod http;

pub use http::{ApiState, HttpTransport, HttpTransportConfig};
