mod recur;
mod schedule;

const USAGE: &'static str = "\
A simple utility for planning band rehearsal and performance schedules.

USAGE:
    escala <command> ...

COMMANDS:
    recur     Expand and describe recurrence rules
    schedule  Build schedule drafts with participants and instruments
";

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    let cmd = crate::args::next_as_command(USAGE, p)?;
    match &*cmd {
        "recur" => recur::run(p),
        "schedule" => schedule::run(p),
        unk => anyhow::bail!("unrecognized command '{}'", unk),
    }
}
