use anyhow::Context;

use crate::{
    args::{self, Configurable, Usage, flags::FileOrStdin},
    schedule::{self, Participant, Roster, ScheduleTime},
};

/// The CLI configuration shared by every command that builds drafts: when
/// the band meets, who plays what and any notes.
#[derive(Debug, Default)]
pub struct RosterArgs {
    time: Option<ScheduleTime>,
    notes: Option<String>,
    participants: Vec<Participant>,
    participants_file: Option<FileOrStdin>,
}

impl RosterArgs {
    /// Builds a roster from the parsed flags.
    ///
    /// Participants given via `-p/--participant` come first, followed by
    /// those read from `-P/--participants-file`.
    pub fn roster(&self) -> anyhow::Result<Roster> {
        let time = self.time.context("missing required -t/--time")?;
        let mut participants = self.participants.clone();
        if let Some(ref file) = self.participants_file {
            let from_file = schedule::read_participants(file.reader()?)
                .with_context(|| format!("{}", file.display()))?;
            log::debug!(
                "read {} participants from {}",
                from_file.len(),
                file.display(),
            );
            participants.extend(from_file);
        }
        Roster::new(time, self.notes.clone(), participants)
    }
}

impl Configurable for RosterArgs {
    fn configure(
        &mut self,
        p: &mut lexopt::Parser,
        arg: &mut lexopt::Arg,
    ) -> anyhow::Result<bool> {
        use lexopt::Arg::*;

        match *arg {
            Short('t') | Long("time") => {
                self.time = Some(args::parse(p, "-t/--time")?);
            }
            Short('p') | Long("participant") => {
                self.participants.push(args::parse(p, "-p/--participant")?);
            }
            Short('P') | Long("participants-file") => {
                self.participants_file = Some(FileOrStdin::from(p.value()?));
            }
            Long("notes") => {
                self.notes = Some(args::parse(p, "--notes")?);
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        const PARTICIPANTS_FILE: Usage = Usage::flag(
            "-P/--participants-file <path>",
            "Read participants from a file, one per line.",
            r#"
Read participants from a file, one per line.

Each line is written the same way as the value given to `-p/--participant`,
e.g., `ana:vocal`. A space may be used in place of the colon. Blank lines and
lines starting with `#` are skipped. When `<path>` is `-`, participants are
read from stdin.

Participants read from this file are added after any given with
`-p/--participant`.
"#,
        );
        const NOTES: Usage = Usage::flag(
            "--notes <text>",
            "Free-form notes attached to every draft.",
            r#"
Free-form notes attached to every draft.

When absent, drafts are emitted without a `notes` field.
"#,
        );

        &[ScheduleTime::USAGE, Participant::USAGE, PARTICIPANTS_FILE, NOTES]
    }
}
