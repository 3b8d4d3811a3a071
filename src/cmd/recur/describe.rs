use std::io::Write;

use anyhow::Context;

use crate::args::{
    self,
    flags::{LocaleFlag, RecurrenceArgs},
};

const USAGE: &'static str = r#"
Describe a recurrence in words.

The description names the weekday and, for monthly recurrences, which
occurrence of that weekday in the month is used. It is written in Brazilian
Portuguese unless another locale is requested.

USAGE:
    escala recur describe <frequency>

TIP:
    use -h for short docs and --help for long docs

EXAMPLES:
    Describe a monthly recurrence on the last Friday:

        $ escala recur describe monthly -d sexta -n ultima
        Toda última Sexta-feira do mês

    %snip-start%

    Or in English:

        $ escala recur describe monthly -d fri -n last --locale en
        Every last Friday of the month

    %snip-end%
REQUIRED ARGUMENTS:
%args%
OPTIONS:
%flags%
"#;

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    let mut recurrence = RecurrenceArgs::default();
    let mut locale = LocaleFlag::default();
    args::configure(p, USAGE, &mut [&mut recurrence, &mut locale])?;

    let description = recurrence
        .recurrence()?
        .describe(locale.get())
        .context("invalid recurrence rule")?;
    writeln!(std::io::stdout(), "{description}")?;
    Ok(())
}
