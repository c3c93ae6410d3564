//! Console logger: errors and warnings to stderr, the rest to stdout

use std::io::Write;

use log::{Level, LevelFilter, Metadata, Record};

/// Environment variable holding the maximum level, e.g. `debug`
pub const LOG_ENV: &str = "FBCOLORTEST_LOG";

pub struct ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, meta: &Metadata) -> bool {
        meta.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        // a closed stream is not worth dying over
        let _ = match record.level() {
            Level::Error | Level::Warn => writeln!(
                std::io::stderr().lock(),
                "{:5} {}",
                record.level(),
                record.args()
            ),
            _ => writeln!(
                std::io::stdout().lock(),
                "{:5} {}",
                record.level(),
                record.args()
            ),
        };
    }

    fn flush(&self) {
        let _ = std::io::stdout().flush();
    }
}

static CONSOLE_LOGGER: ConsoleLogger = ConsoleLogger;

/// Parse a level name; `None` when unset, `Err` with the raw value when unparsable
fn parse_level(value: Option<String>) -> Result<LevelFilter, String> {
    match value {
        None => Ok(LevelFilter::Info),
        Some(raw) => raw.trim().parse().map_err(|_| raw),
    }
}

pub fn init() {
    let level = parse_level(std::env::var(LOG_ENV).ok());

    // an already-installed logger is fine
    let _ = log::set_logger(&CONSOLE_LOGGER);
    log::set_max_level(*level.as_ref().unwrap_or(&LevelFilter::Info));

    if let Err(raw) = level {
        log::warn!("Ignoring {}='{}', using info", LOG_ENV, raw);
    }
}
