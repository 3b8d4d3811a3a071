mod instruments;
mod recurring;
mod roster;
mod single;

const USAGE: &'static str = "\
Commands for building schedule drafts.

Drafts are printed as JSON lines, one schedule per line, so that they can be
persisted by another tool.

USAGE:
    escala schedule <command> ...

COMMANDS:
    instruments  List the instruments participants can play
    recurring    Build one draft for every date of a recurrence rule
    single       Build a draft for a single date
";

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    let cmd = crate::args::next_as_command(USAGE, p)?;
    match &*cmd {
        "instruments" => instruments::run(p),
        "recurring" => recurring::run(p),
        "single" => single::run(p),
        unk => anyhow::bail!("unrecognized command '{}'", unk),
    }
}
