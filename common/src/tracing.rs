use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber.
///
/// Filter comes from `RUST_LOG` (default `info`). Output is human-readable
/// unless `LOG_FORMAT=json` is set.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let json = std::env::var("LOG_FORMAT").is_ok_and(|format| format == "json");

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }
}
