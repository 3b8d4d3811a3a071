/*!
Schedule drafts: the records a band's rehearsal or performance calendar is
made of.

A draft pairs a date with a time of day, optional notes and a roster of
participants along with the instrument each one plays. Drafts are produced
either one at a time or, for recurring schedules, one per date that a
[`RecurrenceRule`] expands to. Persisting them is left to the consumer, which
is expected to write a recurring series as a single batch.
*/

use std::sync::LazyLock;

use {
    anyhow::Context,
    bstr::ByteSlice,
    jiff::civil::{Date, Time},
    regex::Regex,
};

use crate::{
    args::Usage,
    locale::Locale,
    parse::BufReadExt,
    recurrence::RecurrenceRule,
};

/// An instrument a participant can be scheduled to play.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Instrument {
    Guitar,
    ElectricGuitar,
    Bass,
    Vocal,
    Drum,
    Keyboard,
    Percussion,
    Saxophone,
}

impl Instrument {
    /// Every instrument, in catalog order.
    pub const ALL: [Instrument; 8] = [
        Instrument::Guitar,
        Instrument::ElectricGuitar,
        Instrument::Bass,
        Instrument::Vocal,
        Instrument::Drum,
        Instrument::Keyboard,
        Instrument::Percussion,
        Instrument::Saxophone,
    ];

    /// The stable identifier for this instrument.
    pub fn key(&self) -> &'static str {
        match *self {
            Instrument::Guitar => "guitar",
            Instrument::ElectricGuitar => "electricGuitar",
            Instrument::Bass => "bass",
            Instrument::Vocal => "vocal",
            Instrument::Drum => "drum",
            Instrument::Keyboard => "keyboard",
            Instrument::Percussion => "percussion",
            Instrument::Saxophone => "saxophone",
        }
    }

    /// The name shown to band members.
    pub fn label(&self) -> &'static str {
        match *self {
            Instrument::Guitar => "Violão",
            Instrument::ElectricGuitar => "Guitarra",
            Instrument::Bass => "Contrabaixo",
            Instrument::Vocal => "Vocal",
            Instrument::Drum => "Bateria",
            Instrument::Keyboard => "Teclado",
            Instrument::Percussion => "Percussão",
            Instrument::Saxophone => "Saxofone",
        }
    }

    pub fn icon(&self) -> &'static str {
        match *self {
            Instrument::Guitar => "🪕",
            Instrument::ElectricGuitar | Instrument::Bass => "🎸",
            Instrument::Vocal => "🎤",
            Instrument::Drum => "🥁",
            Instrument::Keyboard => "🎹",
            Instrument::Percussion => "🪘",
            Instrument::Saxophone => "🎷",
        }
    }
}

impl std::str::FromStr for Instrument {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Instrument> {
        let needle = s.to_lowercase();
        Instrument::ALL
            .into_iter()
            .find(|i| {
                i.key().to_lowercase() == needle
                    || i.label().to_lowercase() == needle
            })
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "unrecognized instrument `{s}` \
                     (see `escala schedule instruments`)",
                )
            })
    }
}

/// A band member assigned to play an instrument.
#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize)]
pub struct Participant {
    pub participant: String,
    pub instrument: Instrument,
}

impl Participant {
    pub const USAGE: Usage = Usage::flag(
        "-p/--participant <id>:<instrument>",
        "Add a participant and the instrument they play.",
        r#"
Add a participant and the instrument they play.

The participant is given as an identifier followed by a colon and an
instrument, e.g., `ana:vocal` or `joao:electricGuitar`. Instruments may be
given by their key or by their label, without regard for case. Use
`escala schedule instruments` to see the catalog.

This flag may be repeated. At least one participant is required, either via
this flag or via `-P/--participants-file`.
"#,
    );
}

impl std::str::FromStr for Participant {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Participant> {
        let s = s.trim();
        let (id, instrument) = match s.split_once(':') {
            Some((id, instrument)) => (id.trim(), instrument.trim()),
            None => match s.split_once(char::is_whitespace) {
                Some((id, instrument)) => (id.trim(), instrument.trim()),
                None => anyhow::bail!(
                    "missing instrument for participant `{s}` \
                     (expected `<id>:<instrument>`)",
                ),
            },
        };
        anyhow::ensure!(!id.is_empty(), "participant id must not be empty");
        anyhow::ensure!(
            !instrument.is_empty(),
            "missing instrument for participant `{id}`",
        );
        let instrument = instrument.parse()?;
        Ok(Participant { participant: id.to_string(), instrument })
    }
}

/// Reads participants, one per line, from the given reader.
///
/// Each line is either `<id>:<instrument>` or `<id> <instrument>`. Blank
/// lines and lines starting with `#` are skipped.
pub fn read_participants<R: std::io::BufRead>(
    mut rdr: R,
) -> anyhow::Result<Vec<Participant>> {
    let mut participants = vec![];
    rdr.for_byte_line(|line| {
        let content = line.content().trim_ascii();
        if content.is_empty() || content.starts_with(b"#") {
            return Ok(true);
        }
        let participant = content
            .to_str()
            .map_err(anyhow::Error::from)
            .and_then(|s| s.parse::<Participant>())
            .with_context(|| format!("line {}", line.number()))?;
        participants.push(participant);
        Ok(true)
    })?;
    Ok(participants)
}

/// A time of day at minute precision, written as `HH:MM`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ScheduleTime(Time);

impl ScheduleTime {
    pub const USAGE: Usage = Usage::flag(
        "-t/--time <HH:MM>",
        "The time of day at which the band meets.",
        r#"
The time of day at which the band meets.

This must be written as `HH:MM` in 24-hour time, e.g., `19:30` or `8:05`.

This flag is required.
"#,
    );

    pub fn get(&self) -> Time {
        self.0
    }
}

impl std::str::FromStr for ScheduleTime {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<ScheduleTime> {
        static RE: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^([0-1]?[0-9]|2[0-3]):([0-5][0-9])$").unwrap()
        });

        let Some(caps) = RE.captures(s) else {
            anyhow::bail!("invalid time format `{s}`, expected HH:MM")
        };
        let hour: i8 = caps[1].parse()?;
        let minute: i8 = caps[2].parse()?;
        Ok(ScheduleTime(Time::new(hour, minute, 0, 0)?))
    }
}

/// Whether a draft stands alone or belongs to a recurring series.
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecurrenceType {
    Single,
    Recurring,
}

/// A schedule ready to be persisted.
#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize)]
pub struct ScheduleDraft {
    pub date: Date,
    pub time: Time,
    pub recurrence_type: RecurrenceType,
    /// A human readable description of the series this draft belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub participants: Vec<Participant>,
}

/// Everything a schedule needs apart from its date.
#[derive(Clone, Debug)]
pub struct Roster {
    time: ScheduleTime,
    notes: Option<String>,
    participants: Vec<Participant>,
}

impl Roster {
    /// Creates a new roster. At least one participant is required.
    pub fn new(
        time: ScheduleTime,
        notes: Option<String>,
        participants: Vec<Participant>,
    ) -> anyhow::Result<Roster> {
        anyhow::ensure!(
            !participants.is_empty(),
            "at least one participant is required",
        );
        Ok(Roster { time, notes, participants })
    }

    /// Returns a draft for a one-off schedule on the given date.
    pub fn single(&self, date: Date) -> ScheduleDraft {
        self.draft(date, RecurrenceType::Single, None)
    }

    /// Returns one draft for every date the given rule expands to.
    ///
    /// Unlike the rule itself, this requires that the end of the range is
    /// strictly after its start. Every check happens before any draft is
    /// built, so this either returns the complete series or an error.
    pub fn recurring(
        &self,
        rule: &RecurrenceRule,
        locale: Locale,
    ) -> anyhow::Result<Vec<ScheduleDraft>> {
        anyhow::ensure!(
            rule.end > rule.start,
            "end date must be after start date \
             (got start `{start}` and end `{end}`)",
            start = rule.start,
            end = rule.end,
        );
        let description = rule
            .recurrence
            .describe(locale)
            .context("invalid recurrence rule")?;
        let dates = rule.expand().context("invalid recurrence rule")?;
        if dates.is_empty() {
            log::warn!(
                "`{description}` has no occurrences between \
                 {start} and {end}",
                start = rule.start,
                end = rule.end,
            );
        }
        let drafts = dates
            .into_iter()
            .map(|date| {
                self.draft(
                    date,
                    RecurrenceType::Recurring,
                    Some(description.clone()),
                )
            })
            .collect();
        Ok(drafts)
    }

    fn draft(
        &self,
        date: Date,
        recurrence_type: RecurrenceType,
        recurrence: Option<String>,
    ) -> ScheduleDraft {
        ScheduleDraft {
            date,
            time: self.time.get(),
            recurrence_type,
            recurrence,
            notes: self.notes.clone(),
            participants: self.participants.clone(),
        }
    }
}
