use std::sync::Once;

use tracing_subscriber::EnvFilter;

static LOGGING: Once = Once::new();

/// Installs a global subscriber that writes through the test harness, filtered by `RUST_LOG`
/// (default `ordered_tree=trace`)
pub fn init_test_logging() {
    LOGGING.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("ordered_tree=trace"));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .unwrap_or_else(|e| eprintln!("Error: Failed to set up logging: {}", e));
    });
}
