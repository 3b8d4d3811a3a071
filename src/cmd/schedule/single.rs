use std::io::Write;

use anyhow::Context;

use crate::{
    args::{self, Configurable, Usage, flags::DateArg},
    cmd::schedule::roster::RosterArgs,
    parse::OsStrExt,
};

const USAGE: &'static str = r#"
Build a draft for a schedule on a single date.

The draft is printed as one line of JSON with the fields `date`, `time`,
`recurrence_type` (always `SINGLE`), `notes` (only when given) and
`participants`.

USAGE:
    escala schedule single <date> -t <HH:MM> -p <id>:<instrument> ...

TIP:
    use -h for short docs and --help for long docs

EXAMPLES:
    A rehearsal with two participants:

        $ escala schedule single 2024-07-20 -t 19:30 -p ana:vocal -p joao:drum
        {"date":"2024-07-20","time":"19:30:00","recurrence_type":"SINGLE","participants":[{"participant":"ana","instrument":"vocal"},{"participant":"joao","instrument":"drum"}]}

    %snip-start%

    Participants can also be read from a file:

        $ cat band.txt
        ana:vocal
        joao:Bateria
        $ escala schedule single 2024-07-20 -t 19:30 -P band.txt --notes 'ensaio geral'
        {"date":"2024-07-20","time":"19:30:00","recurrence_type":"SINGLE","notes":"ensaio geral","participants":[{"participant":"ana","instrument":"vocal"},{"participant":"joao","instrument":"drum"}]}

    %snip-end%
REQUIRED ARGUMENTS:
%args%
OPTIONS:
%flags%
"#;

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    let mut config = Config::default();
    let mut roster = RosterArgs::default();
    args::configure(p, USAGE, &mut [&mut config, &mut roster])?;

    let date = config.date.context("missing required <date>")?;
    let draft = roster.roster()?.single(date.get());
    let mut wtr = std::io::stdout().lock();
    serde_json::to_writer(&mut wtr, &draft)?;
    writeln!(wtr)?;
    Ok(())
}

#[derive(Debug, Default)]
struct Config {
    date: Option<DateArg>,
}

impl Configurable for Config {
    fn configure(
        &mut self,
        _: &mut lexopt::Parser,
        arg: &mut lexopt::Arg,
    ) -> anyhow::Result<bool> {
        let lexopt::Arg::Value(ref v) = *arg else { return Ok(false) };
        if self.date.is_some() {
            return Ok(false);
        }
        self.date = Some(v.to_str()?.parse().context("<date>")?);
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        &[DateArg::DATE]
    }
}
