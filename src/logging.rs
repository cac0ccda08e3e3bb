//! Logger setup for the command-line tool.
//!
//! Records go to stderr so that documents printed on stdout stay clean.

use flexi_logger::{DeferredNow, FlexiLoggerError, Logger, LoggerHandle};

/// Level names accepted by `--log-level`, quietest first.
const LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

/// Shift a base level by `-v`/`-q` counts.
pub fn effective_level(base: &str, verbosity: i8) -> &'static str {
    let index = LEVELS
        .iter()
        .position(|l| l.eq_ignore_ascii_case(base))
        .unwrap_or(3) as i8;
    let shifted = index.saturating_add(verbosity).clamp(0, LEVELS.len() as i8 - 1);
    LEVELS[shifted as usize]
}

/// Start the logger. The handle must be kept alive for the process lifetime.
pub fn init_logging(level: &str) -> Result<LoggerHandle, FlexiLoggerError> {
    Logger::try_with_str(level)?
        .format(simple_format)
        .log_to_stderr()
        .start()
}

// Format: "YYYY-MM-DD HH:mm:ss.fff INF message"
fn simple_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    let level_abbr = match record.level() {
        log::Level::Error => "ERR",
        log::Level::Warn => "WRN",
        log::Level::Info => "INF",
        log::Level::Debug => "DBG",
        log::Level::Trace => "TRC",
    };

    write!(
        w,
        "{} {} {}",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        level_abbr,
        record.args()
    )
}
