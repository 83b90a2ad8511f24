//! Tracing subscriber setup shared by the binaries.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt::{self, format::FmtSpan}};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_DIRECTIVE: &str = "info";

pub fn init() {
    init_with_default(DEFAULT_DIRECTIVE);
}

/// Installs the global subscriber. `RUST_LOG` takes precedence over `directive`.
///
/// With debug logging enabled, span close events are printed so each pipeline
/// stage reports how long it took. Calling this twice is a no-op.
pub fn init_with_default(directive: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directive));

    let filter_text = env_filter.to_string();
    let is_debug = filter_text.contains("debug") || filter_text.contains("trace");

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_timer(fmt::time::uptime())
        .with_span_events(if is_debug {
            FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        });

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();
}
