// SPDX-License-Identifier: MPL-2.0
//! Console logging setup.
//!
//! The filter comes from `RUST_LOG` when set, otherwise `info` for this crate
//! and `warn` for everything else.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_FILTER: &str = "warn,album_lens=info";

/// Installs the global subscriber. Call once, before the window opens.
pub fn init() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .try_init();

    if installed.is_err() {
        tracing::debug!("logging already initialized");
    }
}
