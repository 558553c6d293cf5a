//! Logging setup for the service binary.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "popravci=info,directory=info,tower_http=info,warn";

/// Installs a formatting subscriber filtered by `RUST_LOG`.
///
/// `log` records from the directory crate are forwarded as well. Calling
/// this more than once keeps the first subscriber.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
