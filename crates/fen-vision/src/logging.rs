//! Logger setup for the `fen-vision` binary.
//!
//! The requested level applies to the `fen_vision*` crates only; everything
//! else (image decoders, clap) stays at `warn`. `RUST_LOG`, when set, takes
//! precedence over both.

use log::LevelFilter;

/// Prefix shared by the targets of all workspace crates.
const CRATE_PREFIX: &str = "fen_vision";

/// Filter directives in `RUST_LOG` syntax for `level`.
pub fn filter_directives(level: LevelFilter) -> String {
    format!(
        "warn,{CRATE_PREFIX}={}",
        level.as_str().to_ascii_lowercase()
    )
}

/// Install `env_logger` on stderr with [`filter_directives`] as the default.
#[cfg(feature = "cli")]
pub fn init_logging(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    env_logger::Builder::new()
        .parse_filters(&filter_directives(level))
        .parse_env(env_logger::Env::default())
        .target(env_logger::Target::Stderr)
        .format_timestamp_millis()
        .try_init()
}

/// Install a `tracing` subscriber on stderr; `level` seeds the filter the
/// same way as [`init_logging`].
///
/// Span close events carry per-stage timings of the board pipeline.
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool, level: LevelFilter) {
    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(level)));
    let builder = fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);
    let _ = if json {
        builder.json().flatten_event(true).finish().try_init()
    } else {
        builder
            .with_timer(fmt::time::Uptime::default())
            .finish()
            .try_init()
    };
}
