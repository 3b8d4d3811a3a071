use jiff::civil::Weekday;

use crate::args::Usage;

/// The language used when rendering human readable recurrence descriptions.
///
/// Only a small fixed set of locales is supported, since descriptions are
/// built from hand-written tables of weekday names and ordinal words.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Locale {
    /// Brazilian Portuguese.
    #[default]
    PtBr,
    /// English.
    En,
}

impl Locale {
    pub const USAGE: Usage = Usage::flag(
        "--locale <locale>",
        "The language used for recurrence descriptions.",
        r#"
The language used for recurrence descriptions.

Valid values are:

pt-BR, pt, pt_BR (Brazilian Portuguese, the default)

en, en-US, en-GB, en_US (English)

When this flag isn't given, the `ESCALA_LOCALE` environment variable is
consulted. If that isn't set either, then Brazilian Portuguese is used.
"#,
    );

    /// Returns the name of the given weekday, capitalized.
    pub fn weekday(&self, weekday: Weekday) -> &'static str {
        let index = sunday_zero_index(weekday);
        match *self {
            Locale::PtBr => PT_BR_WEEKDAYS[index].name,
            Locale::En => EN_WEEKDAYS[index],
        }
    }

    /// Writes a description of "every `weekday`."
    pub fn every(&self, weekday: Weekday) -> String {
        match *self {
            Locale::PtBr => {
                let wd = pt_br_weekday(weekday);
                format!("{} {}", wd.gender.every(), wd.name)
            }
            Locale::En => format!("Every {}", self.weekday(weekday)),
        }
    }

    /// Writes a description of "every `nth` `weekday` of the month."
    ///
    /// `nth` must be one of `1`, `2`, `3`, `4` or `-1`, where `-1`
    /// refers to the last such weekday in a month.
    pub fn every_nth_of_month(&self, nth: i8, weekday: Weekday) -> String {
        match *self {
            Locale::PtBr => {
                let wd = pt_br_weekday(weekday);
                let ordinal = match wd.gender {
                    Gender::Feminine => pt_br_ordinal(nth, PT_BR_FEMININE),
                    Gender::Masculine => pt_br_ordinal(nth, PT_BR_MASCULINE),
                };
                format!(
                    "{} {ordinal} {} do mês",
                    wd.gender.every(),
                    wd.name,
                )
            }
            Locale::En => {
                let ordinal = match nth {
                    -1 => "last",
                    1 => "first",
                    2 => "second",
                    3 => "third",
                    _ => "fourth",
                };
                format!(
                    "Every {ordinal} {} of the month",
                    self.weekday(weekday),
                )
            }
        }
    }
}

impl std::str::FromStr for Locale {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Locale> {
        let locale = match &*s.to_lowercase() {
            "pt-br" | "pt_br" | "pt" => Locale::PtBr,
            "en" | "en-us" | "en_us" | "en-gb" | "en_gb" => Locale::En,
            _ => anyhow::bail!("unrecognized locale: `{s}`"),
        };
        Ok(locale)
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let label = match *self {
            Locale::PtBr => "pt-BR",
            Locale::En => "en",
        };
        write!(f, "{label}")
    }
}

/// Portuguese weekday names agree in gender with "todo/toda" and with the
/// ordinal that precedes them. Saturday and Sunday are masculine.
#[derive(Clone, Copy, Debug)]
enum Gender {
    Feminine,
    Masculine,
}

impl Gender {
    fn every(&self) -> &'static str {
        match *self {
            Gender::Feminine => "Toda",
            Gender::Masculine => "Todo",
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct PtBrWeekday {
    name: &'static str,
    gender: Gender,
}

// Indexed by offset from Sunday.
const PT_BR_WEEKDAYS: [PtBrWeekday; 7] = [
    PtBrWeekday { name: "Domingo", gender: Gender::Masculine },
    PtBrWeekday { name: "Segunda-feira", gender: Gender::Feminine },
    PtBrWeekday { name: "Terça-feira", gender: Gender::Feminine },
    PtBrWeekday { name: "Quarta-feira", gender: Gender::Feminine },
    PtBrWeekday { name: "Quinta-feira", gender: Gender::Feminine },
    PtBrWeekday { name: "Sexta-feira", gender: Gender::Feminine },
    PtBrWeekday { name: "Sábado", gender: Gender::Masculine },
];

const EN_WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

// The first four entries are the 1st through 4th ordinals. The last is
// "last".
const PT_BR_FEMININE: [&str; 5] =
    ["primeira", "segunda", "terceira", "quarta", "última"];
const PT_BR_MASCULINE: [&str; 5] =
    ["primeiro", "segundo", "terceiro", "quarto", "último"];

fn pt_br_weekday(weekday: Weekday) -> PtBrWeekday {
    PT_BR_WEEKDAYS[sunday_zero_index(weekday)]
}

fn sunday_zero_index(weekday: Weekday) -> usize {
    usize::from(weekday.to_sunday_zero_offset().unsigned_abs())
}

fn pt_br_ordinal(nth: i8, table: [&'static str; 5]) -> &'static str {
    match nth {
        1..=4 => table[usize::from(nth.unsigned_abs()) - 1],
        _ => table[4],
    }
}
