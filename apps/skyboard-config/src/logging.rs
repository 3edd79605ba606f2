//! Log file setup.
//!
//! The terminal belongs to the form, so logs go to
//! `<data dir>/logs/skyboard.log` with daily rotation. Filter with `RUST_LOG`
//! (default `info`), e.g. `RUST_LOG=skyboard_core=debug`.

use crate::config::Settings;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Install the global subscriber. Returns false if no log directory is usable.
pub fn init() -> bool {
    let Some(logs_dir) = Settings::log_dir() else {
        return false;
    };
    if let Err(e) = std::fs::create_dir_all(&logs_dir) {
        eprintln!("Warning: Could not initialize file logging: {}", e);
        return false;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_appender = tracing_appender::rolling::daily(logs_dir, "skyboard.log");
    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .with_filter(filter);

    tracing_subscriber::registry().with(file_layer).init();
    true
}
