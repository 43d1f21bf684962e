//! Logging and tracing initialization.
//!
//! The log level is controlled via the `RUST_LOG` environment variable:
//!
//! ```bash
//! # Show all logs including SQL statements
//! RUST_LOG=debug warden db seed
//!
//! # Show only warnings and errors
//! RUST_LOG=warn warden db seed
//! ```

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging with sensible defaults.
///
/// Call this once at startup, before connecting to the database.
/// The level defaults to `info` when `RUST_LOG` is not set.
///
/// # Panics
///
/// Panics if called more than once.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
