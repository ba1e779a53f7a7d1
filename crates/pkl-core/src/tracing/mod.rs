//! Tracing initialization and configuration.
//!
//! A process has a single global subscriber. Whichever initializer runs
//! first installs it; a later call to either one leaves it in place and
//! returns `false`.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static TEXT_INIT: Once = Once::new();
static JSON_INIT: Once = Once::new();

/// Initialize the PKL tracing/logging system.
///
/// Reads the `PKL_LOG` environment variable for per-module log levels.
/// Format: `PKL_LOG=pkl_fusion=debug,pkl_analysis=info`
///
/// Falls back to `info` for the PKL crates if `PKL_LOG` is not set or is invalid.
///
/// Safe to call repeatedly. Returns `true` only for the call that installed
/// the subscriber.
pub fn init_tracing() -> bool {
    let mut installed = false;
    TEXT_INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("PKL_LOG")
            .unwrap_or_else(|_| EnvFilter::new("pkl_core=info,pkl_analysis=info,pkl_fusion=info"));

        installed = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init()
            .is_ok();
    });
    installed
}

/// Initialize tracing with structured JSON output and a custom filter.
///
/// Intended for embedding in a host process that collects JSON logs. Has
/// no effect once [`init_tracing`] or another subscriber is installed.
pub fn init_tracing_with_filter(filter: &str) -> bool {
    let mut installed = false;
    JSON_INIT.call_once(|| {
        installed = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(filter))
            .with_target(true)
            .json()
            .try_init()
            .is_ok();
    });
    installed
}
