// src/logger.rs

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Installs the global fmt subscriber once.
///
/// `directives` is an `EnvFilter` string such as `info` or `intcode::vm=trace`.
/// Without it (or when it does not parse) `RUST_LOG` is used, then `warn`.
pub fn setup_logger(directives: Option<&str>) {
    INIT.call_once(|| {
        let env_filter = directives
            .and_then(|directives| EnvFilter::try_new(directives).ok())
            .or_else(|| EnvFilter::try_from_default_env().ok())
            .unwrap_or_else(|| EnvFilter::new("warn"));

        tracing_subscriber::fmt()
            .compact()
            .with_target(false)
            .with_writer(std::io::stderr)
            .with_env_filter(env_filter)
            .init();
    });
}
