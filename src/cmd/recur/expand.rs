use std::io::Write;

use anyhow::Context;

use crate::args::{
    self,
    flags::{DateRange, RecurrenceArgs},
};

const USAGE: &'static str = r#"
Print every date a recurrence covers within a range.

Dates are printed in ascending order, one per line, in ISO 8601 format. Both
ends of the range are inclusive. A range whose end comes before its start
covers no dates.

A weekly recurrence covers every occurrence of its weekday. A monthly
recurrence covers, in each month, only the requested occurrence of its weekday
(e.g., the second Wednesday or the last Friday). An occurrence that falls
outside of the range is dropped, even when part of its month is in the range.

USAGE:
    escala recur expand <frequency> <start> <end>

TIP:
    use -h for short docs and --help for long docs

EXAMPLES:
    Every Wednesday in January 2024:

        $ escala recur expand weekly -d wed 2024-01-01 2024-01-31
        2024-01-03
        2024-01-10
        2024-01-17
        2024-01-24
        2024-01-31

    %snip-start%

    The second Wednesday of each month in the first quarter of 2024:

        $ escala recur expand monthly -d quarta -n 2 2024-01-01 2024-03-31
        2024-01-10
        2024-02-14
        2024-03-13

    The last Friday of every month in the first half of 2024:

        $ escala recur expand monthly -d fri -n last 2024-01-01 2024-06-30
        2024-01-26
        2024-02-23
        2024-03-29
        2024-04-26
        2024-05-31
        2024-06-28

    %snip-end%
REQUIRED ARGUMENTS:
%args%
OPTIONS:
%flags%
"#;

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    let mut recurrence = RecurrenceArgs::default();
    let mut range = DateRange::default();
    args::configure(p, USAGE, &mut [&mut recurrence, &mut range])?;

    let rule = range.rule(recurrence.recurrence()?)?;
    let dates = rule.dates().context("invalid recurrence rule")?;
    let mut wtr = std::io::stdout().lock();
    for date in dates {
        writeln!(wtr, "{date}")?;
    }
    Ok(())
}
