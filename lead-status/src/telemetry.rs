use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// Log lines go to stdout, where the platform picks them up and timestamps
/// them, so ANSI colours and our own timestamps are left out. The filter is
/// read from `RUST_LOG`, falling back to `default_filter`.
pub fn init_subscriber(default_filter: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .try_init()
}
