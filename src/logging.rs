//! Tracing bootstrap.
//!
//! The engine only emits `tracing` events. Applications that want to see them call
//! [`init`] once at startup, or install their own subscriber instead.

use std::sync::Once;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, prelude::*, util::SubscriberInitExt};

/// Environment variable holding the filter directives, e.g. `SPROUT_LOG=sprout_core=trace`.
pub const ENV_VAR: &str = "SPROUT_LOG";

const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::INFO;

static TRACING_INSTALLED: Once = Once::new();

/// Installs a formatted subscriber filtered by [`ENV_VAR`], defaulting to `info`.
///
/// Only the first call in a process has an effect.
pub fn init() {
    install(|| {
        EnvFilter::builder()
            .with_default_directive(DEFAULT_LOG_LEVEL.into())
            .with_env_var(ENV_VAR)
            .from_env_lossy()
    });
}

/// Like [`init`], but with explicit filter directives instead of [`ENV_VAR`].
///
/// Invalid directives are reported on stderr and fall back to `info`.
pub fn init_with_filter(directives: &str) {
    install(|| {
        EnvFilter::try_new(directives).unwrap_or_else(|error| {
            eprintln!("sprout: invalid log filter `{directives}`: {error}");
            EnvFilter::new(DEFAULT_LOG_LEVEL.to_string())
        })
    });
}

fn install(filter: impl FnOnce() -> EnvFilter) {
    TRACING_INSTALLED.call_once(|| {
        let layer = fmt::layer().with_target(true).with_filter(filter());
        if tracing_subscriber::registry().with(layer).try_init().is_err() {
            eprintln!("sprout: a global tracing subscriber is already installed");
        }
    });
}
