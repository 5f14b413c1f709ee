use tracing_subscriber::EnvFilter;

/// Filter directives are read from this variable, e.g. `FIELDPRINT_LOG=debug`.
pub const LOG_ENV: &str = "FIELDPRINT_LOG";

/// Install the stderr subscriber. Stdout is reserved for the result.
pub fn setup_logger() {
    static INIT: std::sync::Once = std::sync::Once::new();

    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
