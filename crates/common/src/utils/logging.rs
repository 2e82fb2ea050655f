use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Output shape of log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// Default filter when `RUST_LOG` is unset: `debug` for local development
/// runs, `info` for externally reachable ones.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "debug,hyper=info,tower_http=debug"
    } else {
        "info,tower_http=info,axum=info"
    }
}

/// Initialize tracing subscriber with sensible defaults and stdout writer.
/// - Respects `RUST_LOG` if set
/// - Falls back to `info,tower_http=info,axum=info`
pub fn init_logging_default() {
    init_logging(default_filter(false), LogFormat::Compact);
}

/// Initialize tracing subscriber with the given fallback filter and format.
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(fallback_filter: &str, format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(fallback_filter));
    let builder = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stdout);
    let _ = match format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
