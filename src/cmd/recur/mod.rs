mod describe;
mod expand;

const USAGE: &'static str = "\
Commands for working with recurrence rules.

USAGE:
    escala recur <command> ...

COMMANDS:
    describe  Describe a recurrence in words
    expand    Print every date a recurrence covers within a range
";

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    let cmd = crate::args::next_as_command(USAGE, p)?;
    match &*cmd {
        "describe" => describe::run(p),
        "expand" => expand::run(p),
        unk => anyhow::bail!("unrecognized command '{}'", unk),
    }
}
