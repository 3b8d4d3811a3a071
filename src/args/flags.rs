use std::{
    ffi::OsString,
    io,
    path::{Path, PathBuf},
};

use {
    anyhow::Context,
    jiff::civil::{self, Date},
};

use crate::{
    args::{self, Configurable, Usage},
    locale::Locale,
    parse::OsStrExt,
    recurrence::{Frequency, Recurrence, RecurrenceRule},
};

/// Provides parsing for a day of the week as used by recurrence rules.
///
/// Names (English or Portuguese) are converted to their offset from Sunday.
/// Integers are passed through as-is, without a range check, so that an
/// out-of-range day is reported by the recurrence rule itself.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DayOfWeek(i8);

impl DayOfWeek {
    pub const USAGE: Usage = Usage::flag(
        "-d/--day-of-week <weekday>",
        "The day of the week on which the schedule falls.",
        r#"
The day of the week on which the schedule falls.

This may be given as an integer, where `0` is Sunday and `6` is Saturday, or
as a name (without regard for case):

Sunday, Sun, SU, Domingo, Dom

Monday, Mon, MO, Segunda, Segunda-feira, Seg

Tuesday, Tues, Tue, TU, Terça, Terca, Terça-feira, Terca-feira, Ter

Wednesday, Wed, WE, Quarta, Quarta-feira, Qua

Thursday, Thurs, Thu, TH, Quinta, Quinta-feira, Qui

Friday, Fri, FR, Sexta, Sexta-feira, Sex

Saturday, Sat, SA, Sábado, Sabado, Sáb, Sab

This flag is required.
"#,
    );

    /// Return the parsed day as an offset from Sunday.
    pub fn get(&self) -> i8 {
        self.0
    }
}

impl std::str::FromStr for DayOfWeek {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<DayOfWeek> {
        if let Some(n) = parse_integer(s) {
            let n = n.with_context(|| {
                format!("failed to parse `{s}` as an integer day of the week")
            })?;
            return Ok(DayOfWeek(n));
        }
        let offset = match &*s.to_lowercase() {
            "sunday" | "sun" | "su" | "domingo" | "dom" => 0,
            "monday" | "mon" | "mo" | "segunda" | "segunda-feira" | "seg" => 1,
            "tuesday" | "tues" | "tue" | "tu" | "terça" | "terca"
            | "terça-feira" | "terca-feira" | "ter" => 2,
            "wednesday" | "wed" | "we" | "quarta" | "quarta-feira" | "qua" => {
                3
            }
            "thursday" | "thurs" | "thu" | "th" | "quinta" | "quinta-feira"
            | "qui" => 4,
            "friday" | "fri" | "fr" | "sexta" | "sexta-feira" | "sex" => 5,
            "saturday" | "sat" | "sa" | "sábado" | "sabado" | "sáb" | "sab" => {
                6
            }
            _ => anyhow::bail!("unrecognized weekday: `{s}`"),
        };
        Ok(DayOfWeek(offset))
    }
}

/// Provides parsing for the week of the month on which a monthly schedule
/// falls.
///
/// Like `DayOfWeek`, integers are passed through without a range check.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WeekOfMonth(i8);

impl WeekOfMonth {
    pub const USAGE: Usage = Usage::flag(
        "-n/--week-of-month <week>",
        "Which occurrence of the weekday in a month to use.",
        r#"
Which occurrence of the weekday in a month to use.

Legal values are the integers 1 through 4 and -1, where -1 refers to the last
occurrence of the weekday in a month. The following names are also accepted
(without regard for case):

first, primeira, primeiro

second, segunda, segundo

third, terceira, terceiro

fourth, quarta, quarto

last, última, ultima, último, ultimo

This flag is required for a monthly frequency and is ignored for a weekly
frequency.
"#,
    );

    pub fn get(&self) -> i8 {
        self.0
    }
}

impl std::str::FromStr for WeekOfMonth {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<WeekOfMonth> {
        if let Some(n) = parse_integer(s) {
            let n = n.with_context(|| {
                format!("failed to parse `{s}` as an integer week of the month")
            })?;
            return Ok(WeekOfMonth(n));
        }
        let nth = match &*s.to_lowercase() {
            "first" | "primeira" | "primeiro" => 1,
            "second" | "segunda" | "segundo" => 2,
            "third" | "terceira" | "terceiro" => 3,
            "fourth" | "quarta" | "quarto" => 4,
            "last" | "última" | "ultima" | "último" | "ultimo" => -1,
            _ => anyhow::bail!("unrecognized week of the month: `{s}`"),
        };
        Ok(WeekOfMonth(nth))
    }
}

/// Parses `s` as an `i8` if it looks like an integer at all.
///
/// This returns `None` when `s` should instead be interpreted as a name.
fn parse_integer(s: &str) -> Option<anyhow::Result<i8>> {
    let digits = s.strip_prefix(&['-', '+'][..]).unwrap_or(s);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(s.parse::<i8>().map_err(anyhow::Error::from))
}

/// Provides parsing for a civil date at day granularity.
///
/// A datetime is also accepted, in which case its time of day is discarded.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DateArg(Date);

impl DateArg {
    pub const START: Usage = Usage::arg(
        "<start>",
        "The first date of the range (inclusive), e.g., `2025-03-01`.",
        r#"
The first date of the range (inclusive), e.g., `2025-03-01`.

Dates are written in ISO 8601 format. A datetime like `2025-03-01T19:30` is
also accepted, but its time of day is ignored.
"#,
    );

    pub const END: Usage = Usage::arg(
        "<end>",
        "The last date of the range (inclusive), e.g., `2025-06-30`.",
        r#"
The last date of the range (inclusive), e.g., `2025-06-30`.

Dates are written in ISO 8601 format. A datetime like `2025-06-30T23:59` is
also accepted, but its time of day is ignored.
"#,
    );

    pub const DATE: Usage = Usage::arg(
        "<date>",
        "The date of the schedule, e.g., `2025-03-01`.",
        r#"
The date of the schedule, e.g., `2025-03-01`.

Dates are written in ISO 8601 format.
"#,
    );

    pub fn get(&self) -> Date {
        self.0
    }
}

impl std::str::FromStr for DateArg {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<DateArg> {
        let dt: civil::DateTime = s.parse().with_context(|| {
            format!("failed to parse `{s}` as a date (expected YYYY-MM-DD)")
        })?;
        if dt.time() != civil::Time::midnight() {
            log::debug!("ignoring time of day in `{s}`, using {}", dt.date());
        }
        Ok(DateArg(dt.date()))
    }
}

/// The CLI configuration for the repeating part of a recurrence rule.
///
/// This consumes the `<frequency>` positional argument along with the
/// `-d/--day-of-week` and `-n/--week-of-month` flags.
#[derive(Clone, Debug, Default)]
pub struct RecurrenceArgs {
    freq: Option<Frequency>,
    day_of_week: Option<DayOfWeek>,
    week_of_month: Option<WeekOfMonth>,
}

impl RecurrenceArgs {
    /// Builds the recurrence described by the parsed arguments.
    ///
    /// Only the frequency is checked here. Whether the remaining fields are
    /// present and valid for that frequency is up to the recurrence itself.
    pub fn recurrence(&self) -> anyhow::Result<Recurrence> {
        let frequency = self.freq.context("missing required <frequency>")?;
        Ok(Recurrence {
            frequency,
            day_of_week: self.day_of_week.map(|d| d.get()),
            week_of_month: self.week_of_month.map(|w| w.get()),
        })
    }
}

impl Configurable for RecurrenceArgs {
    fn configure(
        &mut self,
        p: &mut lexopt::Parser,
        arg: &mut lexopt::Arg,
    ) -> anyhow::Result<bool> {
        use lexopt::Arg::*;

        match *arg {
            Value(ref v) => {
                if self.freq.is_some() {
                    return Ok(false);
                }
                self.freq = Some(v.to_str()?.parse()?);
            }
            Short('d') | Long("day-of-week") => {
                self.day_of_week = Some(args::parse(p, "-d/--day-of-week")?);
            }
            Short('n') | Long("week-of-month") => {
                self.week_of_month =
                    Some(args::parse(p, "-n/--week-of-month")?);
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        &[Frequency::USAGE, DayOfWeek::USAGE, WeekOfMonth::USAGE]
    }
}

/// The CLI configuration for an inclusive range of dates, given as two
/// positional arguments.
#[derive(Clone, Debug, Default)]
pub struct DateRange {
    start: Option<DateArg>,
    end: Option<DateArg>,
}

impl DateRange {
    /// Combines the given recurrence with this range.
    pub fn rule(&self, recurrence: Recurrence) -> anyhow::Result<RecurrenceRule> {
        let start = self.start.context("missing required <start>")?;
        let end = self.end.context("missing required <end>")?;
        Ok(RecurrenceRule::new(recurrence, start.get(), end.get()))
    }
}

impl Configurable for DateRange {
    fn configure(
        &mut self,
        _: &mut lexopt::Parser,
        arg: &mut lexopt::Arg,
    ) -> anyhow::Result<bool> {
        let lexopt::Arg::Value(ref v) = *arg else { return Ok(false) };
        if self.start.is_none() {
            self.start = Some(v.to_str()?.parse().context("<start>")?);
        } else if self.end.is_none() {
            self.end = Some(v.to_str()?.parse().context("<end>")?);
        } else {
            return Ok(false);
        }
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        &[DateArg::START, DateArg::END]
    }
}

/// The CLI configuration for the `--locale` flag.
///
/// When the flag is absent, the locale from the environment is used.
#[derive(Clone, Debug, Default)]
pub struct LocaleFlag {
    locale: Option<Locale>,
}

impl LocaleFlag {
    pub fn get(&self) -> Locale {
        self.locale.unwrap_or(*crate::LOCALE)
    }
}

impl Configurable for LocaleFlag {
    fn configure(
        &mut self,
        p: &mut lexopt::Parser,
        arg: &mut lexopt::Arg,
    ) -> anyhow::Result<bool> {
        match *arg {
            lexopt::Arg::Long("locale") => {
                self.locale = Some(args::parse(p, "--locale")?);
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        &[Locale::USAGE]
    }
}

/// A simple abstraction over "one file path or stdin."
#[derive(Clone, Debug)]
pub struct FileOrStdin {
    path: Option<PathBuf>,
}

impl FileOrStdin {
    /// Return a `std::fmt::Display` impl for the underlying file or stdin.
    ///
    /// When a file, this is its file path. When stdin, it's the literal
    /// string `<stdin>`.
    pub fn display(&self) -> impl std::fmt::Display + '_ {
        self.path.as_deref().unwrap_or_else(|| Path::new("<stdin>")).display()
    }

    /// Return a buffered reader for the underlying file or stdin.
    pub fn reader(&self) -> anyhow::Result<Box<dyn io::BufRead>> {
        Ok(if let Some(ref path) = self.path {
            let file = std::fs::File::open(path)
                .with_context(|| format!("{}", path.display()))?;
            Box::new(io::BufReader::new(file))
        } else {
            Box::new(io::stdin().lock())
        })
    }
}

impl From<OsString> for FileOrStdin {
    fn from(os_str: OsString) -> FileOrStdin {
        let path = PathBuf::from(os_str);
        if path == Path::new("-") {
            FileOrStdin { path: None }
        } else {
            FileOrStdin { path: Some(path) }
        }
    }
}
