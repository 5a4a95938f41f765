//! Tracing initialization
//!
//! The dashboard owns the terminal while it runs, so logs go to whatever
//! writer the caller hands in (a log file for the TUI, stderr for one-shot
//! commands).

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Map a `-v` count to a level (default warn)
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize tracing for the given crate
///
/// Sets up logging to `writer` with:
/// - Formatted output without ANSI colors (for clean logs)
/// - Environment-based filtering via RUST_LOG
/// - A default level for the crate derived from `verbosity`
///
/// Set `LOG_FORMAT=json` for structured JSON output (useful for log aggregation).
/// Default is human-readable text output.
///
/// # Example
///
/// ```rust,ignore
/// netsentry_common::init_tracing("netsentry", 1, std::io::stderr)?;
/// ```
pub fn init_tracing<W>(crate_name: &str, verbosity: u8, writer: W) -> anyhow::Result<()>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let level = level_for_verbosity(verbosity);
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("{}={}", crate_name, level).parse()?)
        .add_directive(format!("netsentry_common={}", level).parse()?);

    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);

    if use_json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(writer))
            .try_init()?;
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    Ok(())
}
