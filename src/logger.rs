// A tiny logger for the `log` crate. It writes every record to stderr,
// prefixed with a timestamp, the level and the source location. Filtering
// happens entirely through `log::set_max_level`.

use std::{
    path::{Path, PathBuf},
    sync::{LazyLock, Mutex},
};

use {jiff::tz::TimeZone, log::Log};

use crate::style::Theme;

/// The simplest possible logger that logs to stderr.
#[derive(Debug)]
pub struct Logger {
    tz: Mutex<Option<TimeZone>>,
}

impl Logger {
    /// Create a new logger that logs to stderr and initialize it as the
    /// global logger. If there was a problem setting the logger, then an
    /// error is returned.
    ///
    /// Until `Logger::set_time_zone` is called, timestamps are in UTC.
    pub fn init() -> Result<&'static Logger, log::SetLoggerError> {
        let logger = Box::leak(Box::new(Logger { tz: Mutex::new(None) }));
        log::set_logger(logger)?;
        Ok(logger)
    }

    pub fn set_time_zone(&self, tz: TimeZone) {
        if let Ok(mut logger_tz) = self.tz.lock() {
            *logger_tz = Some(tz);
        }
    }

    fn now(&self) -> String {
        // `Zoned::now()` may read the system time zone from disk, which can
        // itself log. So stick to `Timestamp::now()` and the time zone we
        // were given.
        let ts = jiff::Timestamp::now();
        let tz = self.tz.lock().ok().and_then(|tz| tz.clone());
        match tz {
            Some(tz) => {
                ts.to_zoned(tz).strftime("%Y-%m-%dT%H:%M:%S%:z").to_string()
            }
            None => ts.to_string(),
        }
    }
}

impl Log for Logger {
    fn enabled(&self, _: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        let now = Theme::stderr().highlight(self.now());
        match (record.file(), record.line()) {
            (Some(file), Some(line)) => {
                eprintln!(
                    "{now}|{}|{}:{}: {}",
                    record.level(),
                    relative(file),
                    line,
                    record.args()
                );
            }
            (Some(file), None) => {
                eprintln!(
                    "{now}|{}|{}: {}",
                    record.level(),
                    relative(file),
                    record.args()
                );
            }
            _ => {
                eprintln!("{now}|{}: {}", record.level(), record.args());
            }
        }
    }

    fn flush(&self) {
        // `eprintln!` is unbuffered.
    }
}

fn relative<'p>(path: &'p str) -> &'p str {
    let Some(cwd) = cwd() else { return path };
    let Ok(relative) = Path::new(path).strip_prefix(cwd) else { return path };
    let Some(relative) = relative.to_str() else { return path };
    relative
}

fn cwd() -> Option<&'static Path> {
    static CWD: LazyLock<Option<PathBuf>> =
        LazyLock::new(|| std::env::current_dir().ok());
    CWD.as_deref()
}
