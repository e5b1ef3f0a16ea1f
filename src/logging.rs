// ==========================================
// Fuel Ledger - Logging
// ==========================================
// Subscriber: tracing-subscriber fmt, written to stderr
// RUST_LOG             filter directives, default "info"
// FUEL_LEDGER_LOG      "json" for one JSON object per event, else plain text
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

const FORMAT_ENV: &str = "FUEL_LEDGER_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

/// Install the process-wide subscriber. Call once, first thing in `main`.
///
/// Run summaries go to stdout, so logs stay on stderr in both formats.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let format = LogFormat::parse(std::env::var(FORMAT_ENV).ok().as_deref());

    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    match format {
        LogFormat::Json => builder.json().with_current_span(true).init(),
        LogFormat::Text => builder.with_line_number(true).init(),
    }
}

/// Debug-level subscriber routed through the test harness; safe to call from every test
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
