use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

// First call wins; later calls from other tests are no-ops.
pub fn init_logging() {
    // Set default log level to "info" if RUST_LOG is not set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}
