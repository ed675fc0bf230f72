use tracing_subscriber::EnvFilter;

/// Variable holding the log filter, e.g. `SIDX_LOG=sidx=debug`.
pub const LOG_ENV: &str = "SIDX_LOG";

/// Install the stderr subscriber. Later calls are no-ops, so both binaries
/// and tests may call it.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
