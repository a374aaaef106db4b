use tracing_subscriber::EnvFilter;

/// Initialize structured JSON logging at the default level
///
/// The codec crates emit `tracing` events (for example when a decoded
/// AVP is absent from the dictionary); call this once at process start
/// before any encode/decode work.
pub fn init() {
    init_with_level("info")
}

/// Initialize logging with a specific default level, overridable via
/// the `RUST_LOG` environment variable
pub fn init_with_level(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .json()
        .init();
}

/// Initialize logging for tests (plain format, per-test capture)
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
