//! Logging initialization
//!
//! Global tracing subscriber for the service. `RUST_LOG` overrides the
//! default filter when set.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global tracing subscriber.
///
/// Defaults to info-level service logs plus request traces from the HTTP
/// layer. Calling this more than once is a no-op beyond the first.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("geobook=info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .compact(),
        )
        .try_init()
        .ok();
}
