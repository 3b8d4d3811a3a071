use std::io::Write;

use crate::{
    args::{
        self,
        flags::{DateRange, LocaleFlag, RecurrenceArgs},
    },
    cmd::schedule::roster::RosterArgs,
};

const USAGE: &'static str = r#"
Build one draft for every date of a recurrence rule.

Each draft is printed as one line of JSON with the fields `date`, `time`,
`recurrence_type` (always `RECURRING`), `recurrence`, `notes` (only when
given) and `participants`. The `recurrence` field holds a description of the
rule in words, in the language selected by `--locale`.

Unlike `escala recur expand`, the end of the range must come strictly after
its start. Every check happens before anything is printed, so either the whole
series is emitted or nothing is. A rule with no dates in the range emits
nothing, and a warning is logged when `ESCALA_LOG=warn` (or more verbose).

USAGE:
    escala schedule recurring <frequency> <start> <end> -t <HH:MM> -p <id>:<instrument> ...

TIP:
    use -h for short docs and --help for long docs

EXAMPLES:
    A rehearsal every Sunday in June 2024:

        $ escala schedule recurring weekly -d dom 2024-06-01 2024-06-30 -t 19:30 -p ana:vocal
        {"date":"2024-06-02","time":"19:30:00","recurrence_type":"RECURRING","recurrence":"Todo Domingo","participants":[{"participant":"ana","instrument":"vocal"}]}
        {"date":"2024-06-09","time":"19:30:00","recurrence_type":"RECURRING","recurrence":"Todo Domingo","participants":[{"participant":"ana","instrument":"vocal"}]}
        {"date":"2024-06-16","time":"19:30:00","recurrence_type":"RECURRING","recurrence":"Todo Domingo","participants":[{"participant":"ana","instrument":"vocal"}]}
        {"date":"2024-06-23","time":"19:30:00","recurrence_type":"RECURRING","recurrence":"Todo Domingo","participants":[{"participant":"ana","instrument":"vocal"}]}
        {"date":"2024-06-30","time":"19:30:00","recurrence_type":"RECURRING","recurrence":"Todo Domingo","participants":[{"participant":"ana","instrument":"vocal"}]}

    %snip-start%

    A service on the last Friday of each month, described in English:

        $ escala schedule recurring monthly -d fri -n last 2024-01-01 2024-02-29 -t 20:00 -p bia:keyboard --locale en
        {"date":"2024-01-26","time":"20:00:00","recurrence_type":"RECURRING","recurrence":"Every last Friday of the month","participants":[{"participant":"bia","instrument":"keyboard"}]}
        {"date":"2024-02-23","time":"20:00:00","recurrence_type":"RECURRING","recurrence":"Every last Friday of the month","participants":[{"participant":"bia","instrument":"keyboard"}]}

    %snip-end%
REQUIRED ARGUMENTS:
%args%
OPTIONS:
%flags%
"#;

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    let mut recurrence = RecurrenceArgs::default();
    let mut range = DateRange::default();
    let mut roster = RosterArgs::default();
    let mut locale = LocaleFlag::default();
    args::configure(
        p,
        USAGE,
        &mut [&mut recurrence, &mut range, &mut roster, &mut locale],
    )?;

    let rule = range.rule(recurrence.recurrence()?)?;
    let drafts = roster.roster()?.recurring(&rule, locale.get())?;
    log::debug!("built {} drafts", drafts.len());

    let mut wtr = std::io::stdout().lock();
    for draft in drafts.iter() {
        serde_json::to_writer(&mut wtr, draft)?;
        writeln!(wtr)?;
    }
    Ok(())
}
