use std::{env, io::Write, process::ExitCode, sync::LazyLock};

use {anyhow::Context, jiff::tz::TimeZone};

use crate::locale::Locale;

mod args;
mod cmd;
mod locale;
mod logger;
mod parse;
mod recurrence;
mod schedule;
mod style;

static LOCALE: LazyLock<Locale> = LazyLock::new(|| {
    match read_env_escala_locale() {
        Ok(Some(locale)) => {
            log::trace!(
                "setting locale to `{locale}` from `ESCALA_LOCALE` \
                 environment variable",
            );
            locale
        }
        Ok(None) => {
            let locale = Locale::default();
            log::trace!(
                "`ESCALA_LOCALE` environment variable not set, using \
                 `{locale}` locale",
            );
            locale
        }
        Err(err) => {
            let locale = Locale::default();
            log::warn!(
                "reading `ESCALA_LOCALE` failed, using `{locale}` \
                 locale: {err:#}",
            );
            locale
        }
    }
});

/// Same time, same place, next week.
fn main() -> ExitCode {
    let err = match run() {
        Ok(code) => return code,
        Err(err) => err,
    };
    if let Some(help) = err.root_cause().downcast_ref::<args::Help>() {
        // If stdout is gone, there's nobody to show help to anyway.
        let _ = writeln!(&mut std::io::stdout(), "{help}");
        return ExitCode::SUCCESS;
    }
    if let Some(version) = err.root_cause().downcast_ref::<args::Version>() {
        let _ = writeln!(&mut std::io::stdout(), "{version}");
        return ExitCode::SUCCESS;
    }
    // Like traditional Unix tools, exit quietly and successfully when the
    // reader on the other end of a pipe goes away (e.g., `| head -n1`).
    for cause in err.chain() {
        if let Some(err) = cause.downcast_ref::<std::io::Error>() {
            if err.kind() == std::io::ErrorKind::BrokenPipe {
                return ExitCode::from(0);
            }
        }
        // `serde_json` wraps the `std::io::Error` it hits while writing, so
        // check its kind explicitly.
        if let Some(err) = cause.downcast_ref::<serde_json::Error>() {
            if let Some(kind) = err.io_error_kind() {
                if kind == std::io::ErrorKind::BrokenPipe {
                    return ExitCode::from(0);
                }
            }
        }
    }
    if std::env::var("RUST_BACKTRACE").map_or(false, |v| v == "1")
        && std::env::var("RUST_LIB_BACKTRACE").map_or(true, |v| v == "1")
    {
        let _ = writeln!(&mut std::io::stderr(), "{:?}", err);
    } else {
        let _ = writeln!(&mut std::io::stderr(), "{:#}", err);
    }
    ExitCode::from(1)
}

fn run() -> anyhow::Result<ExitCode> {
    let level = match &*env::var("ESCALA_LOG").unwrap_or_default() {
        "" | "off" => log::LevelFilter::Off,
        "error" => log::LevelFilter::Error,
        "warn" => log::LevelFilter::Warn,
        "info" => log::LevelFilter::Info,
        "debug" => log::LevelFilter::Debug,
        "trace" => log::LevelFilter::Trace,
        unk => anyhow::bail!("unrecognized log level '{}'", unk),
    };
    log::set_max_level(level);
    // The system time zone is looked up after the logger is installed so
    // that the lookup itself can be logged. Messages emitted before then
    // carry UTC timestamps.
    let logger = logger::Logger::init()?;
    logger.set_time_zone(TimeZone::system());
    cmd::run(&mut lexopt::Parser::from_env())?;
    Ok(ExitCode::SUCCESS)
}

fn read_env_escala_locale() -> anyhow::Result<Option<Locale>> {
    let Some(val) = std::env::var_os("ESCALA_LOCALE") else { return Ok(None) };
    let Some(val) = val.to_str() else {
        anyhow::bail!(
            "`ESCALA_LOCALE` environment variable is not valid UTF-8: {val:?}"
        )
    };
    let locale = val.parse().with_context(|| {
        format!("failed to parse `ESCALA_LOCALE` environment variable")
    })?;
    Ok(Some(locale))
}
