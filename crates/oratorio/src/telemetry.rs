//! Tracing initialization for the CLI binary.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize console tracing.
///
/// `RUST_LOG` takes precedence when set; otherwise `verbose` selects debug
/// logging for the oratorio crates on top of an info baseline.
pub fn init_telemetry(verbose: bool) {
    let default_filter = if verbose {
        "info,oratorio=debug,oratorio_pipeline=debug,oratorio_speech=debug,oratorio_models=debug"
    } else {
        "info"
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
