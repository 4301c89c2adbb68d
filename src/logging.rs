use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Targets that get the default level: the library and the `ww-bin` binary
const LOG_TARGETS: [&str; 2] = ["ww", "ww_bin"];

/// Initialize logging to stderr.
///
/// Stdout carries command output, so log events never go there. `RUST_LOG`
/// directives are layered on top of the default `warn` (or `debug` with
/// `verbose`) for the `ww` targets.
pub fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };

    let mut filter = EnvFilter::from_default_env();
    for target in LOG_TARGETS {
        if let Ok(directive) = format!("{}={}", target, level).parse() {
            filter = filter.add_directive(directive);
        }
    }

    // A second init (e.g. from tests sharing a process) is harmless.
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(filter)
        .try_init();
}
