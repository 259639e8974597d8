use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Controlled by `RUST_LOG`, defaulting to
/// `info`; output goes to stderr so session prompts on stdout stay clean.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
