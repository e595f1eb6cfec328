use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the tracing subscriber for console output.
///
/// The filter comes from `RUST_LOG`, defaulting to `info` for the
/// application and warnings elsewhere.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,campushub_backend=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
