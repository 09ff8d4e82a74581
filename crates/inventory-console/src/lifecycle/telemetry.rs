use tracing_subscriber::EnvFilter;

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG` (default `info`).
///
/// Log lines go to stderr so they never interleave with tables printed on stdout.
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // `resource` fields identify the page
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
