#![cfg(feature = "cli")]

use std::env;
use std::io::Write;

use log::{self, LevelFilter, Metadata, Record};

/// Environment variable holding the log level (`error` .. `trace`, or `off`).
pub const LOG_ENV: &str = "BATTLESHIP_LOG";

struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            // stdout belongs to the boards; diagnostics go to stderr.
            let _ = writeln!(
                std::io::stderr().lock(),
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: StderrLogger = StderrLogger;

/// Parse a level name, falling back to `Warn` for anything unrecognised.
pub fn level_from_env(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|lvl| lvl.trim().parse().ok())
        .unwrap_or(LevelFilter::Warn)
}

/// Initialize logging with a level taken from the `BATTLESHIP_LOG` environment variable.
/// Defaults to `warn` so an interactive game stays quiet. Calling it twice is harmless.
pub fn init_logging() {
    let level = level_from_env(env::var(LOG_ENV).ok().as_deref());
    let _ = log::set_logger(&LOGGER).map(|()| log::set_max_level(level));
}
