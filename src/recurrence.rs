/*!
Expansion of recurring schedule rules into concrete calendar dates.

A recurrence is either weekly ("every Wednesday") or monthly ("every 2nd
Wednesday" or "every last Friday of the month"). Combined with an inclusive
date range, it expands into the ordered set of dates it covers within that
range.

Everything here operates on civil dates at day granularity. Nothing consults
the current time, so the same rule always expands to the same dates.
*/

use jiff::{
    ToSpan,
    civil::{Date, Weekday},
};

use crate::{args::Usage, locale::Locale};

/// How often a recurrence repeats.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Frequency {
    Weekly,
    Monthly,
}

impl Frequency {
    pub const USAGE: Usage = Usage::arg(
        "<frequency>",
        "The frequency at which a schedule repeats.",
        r#"
The frequency at which a schedule repeats.

Valid values are:

weekly, week, wk, semanal

monthly, month, mo, mensal

A weekly frequency requires `-d/--day-of-week`. A monthly frequency requires
both `-d/--day-of-week` and `-n/--week-of-month`.
"#,
    );

    fn as_str(&self) -> &'static str {
        match *self {
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
        }
    }
}

impl std::str::FromStr for Frequency {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Frequency> {
        let freq = match &*s.to_lowercase() {
            "weekly" | "week" | "wk" | "semanal" => Frequency::Weekly,
            "monthly" | "month" | "mo" | "mensal" => Frequency::Monthly,
            _ => anyhow::bail!("unrecognized frequency: `{s}`"),
        };
        Ok(freq)
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The repeating part of a schedule, independent of any date range.
///
/// The fields mirror what a caller collects from a form: the day of the
/// week and the week of the month are optional because which of them are
/// required depends on the frequency. A recurrence with missing or
/// out-of-range fields can still be constructed; it is rejected with an
/// [`InvalidRuleError`] when it is described or expanded.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Recurrence {
    pub frequency: Frequency,
    /// The day of the week in the range `0..=6`, where `0` is Sunday.
    ///
    /// Required for every frequency.
    pub day_of_week: Option<i8>,
    /// One of `1`, `2`, `3`, `4` or `-1`, where `-1` means the last such
    /// weekday of the month.
    ///
    /// Required for monthly recurrences and ignored for weekly ones.
    pub week_of_month: Option<i8>,
}

impl Recurrence {
    /// Returns a human readable description of this recurrence, e.g.,
    /// `Toda segunda Quarta-feira do mês`.
    pub fn describe(&self, locale: Locale) -> Result<String, InvalidRuleError> {
        let description = match self.cadence()? {
            Cadence::Weekly { weekday } => locale.every(weekday),
            Cadence::Monthly { weekday, nth } => {
                locale.every_nth_of_month(nth, weekday)
            }
        };
        Ok(description)
    }

    /// Checks the fields of this recurrence against its frequency.
    fn cadence(&self) -> Result<Cadence, InvalidRuleError> {
        let Some(day_of_week) = self.day_of_week else {
            return Err(InvalidRuleError::MissingDayOfWeek {
                frequency: self.frequency,
            });
        };
        let weekday = Weekday::from_sunday_zero_offset(day_of_week)
            .map_err(|_| InvalidRuleError::DayOfWeekOutOfRange {
                given: day_of_week,
            })?;
        match self.frequency {
            Frequency::Weekly => {
                if let Some(week) = self.week_of_month {
                    log::trace!(
                        "ignoring week of the month `{week}` \
                         for weekly recurrence",
                    );
                }
                Ok(Cadence::Weekly { weekday })
            }
            Frequency::Monthly => {
                let Some(nth) = self.week_of_month else {
                    return Err(InvalidRuleError::MissingWeekOfMonth);
                };
                if !matches!(nth, 1..=4 | -1) {
                    return Err(InvalidRuleError::WeekOfMonthOutOfRange {
                        given: nth,
                    });
                }
                Ok(Cadence::Monthly { weekday, nth })
            }
        }
    }
}

/// A recurrence bounded by an inclusive range of dates.
///
/// An `end` that precedes `start` is not an error. Such a rule simply
/// expands to nothing.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct RecurrenceRule {
    pub recurrence: Recurrence,
    pub start: Date,
    pub end: Date,
}

impl RecurrenceRule {
    pub fn new(recurrence: Recurrence, start: Date, end: Date) -> RecurrenceRule {
        RecurrenceRule { recurrence, start, end }
    }

    /// Returns a lazy iterator over the dates covered by this rule, in
    /// ascending order.
    ///
    /// This returns an error before producing any dates when the recurrence
    /// is malformed.
    pub fn dates(&self) -> Result<Dates, InvalidRuleError> {
        let cadence = self.recurrence.cadence()?;
        let cursor = match cadence {
            Cadence::Weekly { weekday } => {
                let days = weekday.since(self.start.weekday());
                log::trace!(
                    "anchoring weekly recurrence on {weekday:?} \
                     {days} day(s) after {start}",
                    start = self.start,
                );
                self.start.checked_add(i64::from(days).days()).ok()
            }
            Cadence::Monthly { .. } => Some(self.start.first_of_month()),
        };
        Ok(Dates { cadence, start: self.start, end: self.end, cursor })
    }

    /// Expands this rule into every date it covers, in ascending order.
    ///
    /// Every date returned falls within `start..=end` and lands on the
    /// rule's day of the week. For monthly rules, each date is also the
    /// requested (or last) occurrence of that weekday in its month.
    pub fn expand(&self) -> Result<Vec<Date>, InvalidRuleError> {
        Ok(self.dates()?.collect())
    }
}

/// A validated recurrence.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Cadence {
    Weekly { weekday: Weekday },
    Monthly { weekday: Weekday, nth: i8 },
}

/// An iterator over the dates covered by a [`RecurrenceRule`].
///
/// For weekly rules, the cursor is the next candidate date. For monthly
/// rules, it is the first day of the next month to visit. In both cases
/// it strictly increases on every step and iteration stops once it passes
/// the end of the range (or the maximum date Jiff supports), so iteration
/// always terminates.
#[derive(Clone, Debug)]
pub struct Dates {
    cadence: Cadence,
    start: Date,
    end: Date,
    cursor: Option<Date>,
}

impl Iterator for Dates {
    type Item = Date;

    fn next(&mut self) -> Option<Date> {
        match self.cadence {
            Cadence::Weekly { .. } => {
                let date = self.cursor.take().filter(|&d| d <= self.end)?;
                self.cursor = date.checked_add(7.days()).ok();
                Some(date)
            }
            Cadence::Monthly { weekday, nth } => {
                while let Some(month) = self.cursor.take() {
                    if month > self.end {
                        return None;
                    }
                    self.cursor = month.checked_add(1.month()).ok();
                    let Ok(date) = month.nth_weekday_of_month(nth, weekday)
                    else {
                        log::trace!(
                            "no occurrence {nth} of {weekday:?} in \
                             {year:04}-{month:02}, skipping",
                            year = month.year(),
                            month = month.month(),
                        );
                        continue;
                    };
                    if self.start <= date && date <= self.end {
                        return Some(date);
                    }
                }
                None
            }
        }
    }
}

impl std::iter::FusedIterator for Dates {}

/// An error indicating that a recurrence is malformed.
///
/// This is returned before any dates are generated. Note that a monthly
/// rule that happens to produce no date in some month is never an error.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InvalidRuleError {
    /// No day of the week was given.
    MissingDayOfWeek { frequency: Frequency },
    /// A monthly recurrence was given without a week of the month.
    MissingWeekOfMonth,
    /// The day of the week is not in the range `0..=6`.
    DayOfWeekOutOfRange { given: i8 },
    /// The week of the month is not one of `1`, `2`, `3`, `4` or `-1`.
    WeekOfMonthOutOfRange { given: i8 },
}

impl std::fmt::Display for InvalidRuleError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            InvalidRuleError::MissingDayOfWeek { frequency } => write!(
                f,
                "{frequency} recurrence requires a day of the week",
            ),
            InvalidRuleError::MissingWeekOfMonth => write!(
                f,
                "monthly recurrence requires a week of the month",
            ),
            InvalidRuleError::DayOfWeekOutOfRange { given } => write!(
                f,
                "day of the week `{given}` is not in the range `0..=6` \
                 (where `0` is Sunday)",
            ),
            InvalidRuleError::WeekOfMonthOutOfRange { given } => write!(
                f,
                "week of the month `{given}` is not one of \
                 `1`, `2`, `3`, `4` or `-1` (last)",
            ),
        }
    }
}

impl std::error::Error for InvalidRuleError {}

#[cfg(test)]
impl Recurrence {
    /// A recurrence on every `day_of_week`.
    pub fn weekly(day_of_week: i8) -> Recurrence {
        Recurrence {
            frequency: Frequency::Weekly,
            day_of_week: Some(day_of_week),
            week_of_month: None,
        }
    }

    /// A recurrence on the `week_of_month`-th `day_of_week` of every month.
    pub fn monthly(day_of_week: i8, week_of_month: i8) -> Recurrence {
        Recurrence {
            frequency: Frequency::Monthly,
            day_of_week: Some(day_of_week),
            week_of_month: Some(week_of_month),
        }
    }
}
