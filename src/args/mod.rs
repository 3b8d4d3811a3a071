use std::{
    fmt::{Debug, Display, Write},
    str::FromStr,
    sync::LazyLock,
};

use {
    anyhow::Context,
    lexopt::{Arg, Parser, ValueExt},
    regex::Regex,
};

pub mod flags;

/// A piece of command line configuration.
///
/// A command hands every argument it sees to each of its targets in turn.
/// The first target that returns `true` consumes it. Targets that take
/// positional values should return `false` once they are full, so that the
/// next target gets a chance.
pub trait Configurable: Debug {
    fn configure(
        &mut self,
        p: &mut Parser,
        arg: &mut Arg,
    ) -> anyhow::Result<bool>;

    /// The documentation for every flag and argument this target consumes.
    fn usage(&self) -> &[Usage] {
        &[]
    }
}

/// Feeds every remaining argument in `p` to `targets`.
///
/// `-h` and `--help` stop parsing and return a [`Help`] error rendered from
/// `usage` along with the docs of every target. An argument that no target
/// accepts is an error.
pub fn configure(
    p: &mut Parser,
    usage: &str,
    targets: &mut [&mut dyn Configurable],
) -> anyhow::Result<()> {
    while let Some(arg) = p.next()? {
        match arg {
            Arg::Short('h') => return Err(help(usage, targets, false).into()),
            Arg::Long("help") => return Err(help(usage, targets, true).into()),
            _ => {}
        }
        // A long flag borrows from `p`, which the targets need mutably, so
        // it gets its own copy.
        let long_flag: Option<String> = match arg {
            Arg::Long(name) => Some(name.to_string()),
            _ => None,
        };
        let mut arg = match (long_flag.as_deref(), arg) {
            (Some(flag), _) => Arg::Long(flag),
            (None, Arg::Short(c)) => Arg::Short(c),
            (None, Arg::Value(value)) => Arg::Value(value),
            (None, Arg::Long(_)) => unreachable!(),
        };
        let mut recognized = false;
        for t in targets.iter_mut() {
            if t.configure(p, &mut arg)? {
                recognized = true;
                break;
            }
        }
        if !recognized {
            return Err(arg.unexpected().into());
        }
    }
    Ok(())
}

/// Renders the help output for a command.
///
/// The short form drops everything between `%snip-start%` and `%snip-end%`
/// and lists one line per flag. The long form keeps the snipped text and
/// shows each flag's full docs.
fn help(usage: &str, targets: &[&mut dyn Configurable], long: bool) -> Help {
    static SNIPPED: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?m)^\s*%snip-start%\p{any}*?%snip-end%\s*$").unwrap()
    });
    static SNIP_MARKERS: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?m)^\s*%snip-(start|end)%\s*$").unwrap()
    });

    let (args, flags) = usages(targets);
    let (usage, args, flags) = if long {
        let usage = SNIP_MARKERS.replace_all(usage, "");
        (usage, Usage::long(&args), Usage::long(&flags))
    } else {
        let usage = SNIPPED.replace_all(usage, "");
        (usage, Usage::short(&args), Usage::short(&flags))
    };
    let usage = usage.replace("%args%", &args).replace("%flags%", &flags);
    Help(usage.trim().to_string())
}

/// Splits the docs of all targets into positional arguments and flags.
///
/// Arguments keep the order in which they are consumed. Flags, which always
/// include `-h/--help` and `--version`, are sorted by their long name.
fn usages(targets: &[&mut dyn Configurable]) -> (Vec<Usage>, Vec<Usage>) {
    let (mut flags, args): (Vec<Usage>, Vec<Usage>) = targets
        .iter()
        .flat_map(|t| t.usage().iter().copied())
        .partition(|u| u.flag);
    flags.push(Help::USAGE);
    flags.push(Version::USAGE);
    flags.sort_by_key(|u| u.long_name());
    (args, flags)
}

/// Returns the next argument as a command name.
///
/// With nothing left to parse, the given usage is returned as an error.
/// `-h/--help` and `--version` are turned into [`Help`] and [`Version`]
/// errors.
pub fn next_as_command(usage: &str, p: &mut Parser) -> anyhow::Result<String> {
    let usage = usage.trim();
    let Some(arg) = p.next()? else { anyhow::bail!("{usage}") };
    match arg {
        Arg::Value(cmd) => Ok(cmd.string()?),
        Arg::Short('h') | Arg::Long("help") => {
            Err(Help(usage.to_string()).into())
        }
        Arg::Long("version") => Err(Version.into()),
        arg => Err(arg.unexpected().into()),
    }
}

/// Parses the value of `flag_name` into a `T`.
///
/// Errors are prefixed with the flag name.
pub fn parse<T>(p: &mut Parser, flag_name: &'static str) -> anyhow::Result<T>
where
    T: FromStr,
    <T as FromStr>::Err: Display + Debug + Send + Sync + 'static,
{
    let value = p
        .value()
        .context(flag_name)?
        .into_string()
        .map_err(lexopt::Error::NonUnicodeValue)
        .context(flag_name)?;
    // `anyhow::Error`, which most `FromStr` impls here use, doesn't
    // implement `std::error::Error`, so `Context` can't be used.
    value.parse().map_err(|err| anyhow::Error::msg(err).context(flag_name))
}

/// The documentation of one flag or positional argument.
#[derive(Clone, Copy, Debug)]
pub struct Usage {
    /// Whether this is a flag (optional) or an argument (required).
    pub flag: bool,
    /// How the flag is written, e.g., `-d/--day-of-week <weekday>`.
    pub format: &'static str,
    /// A one line description.
    pub short: &'static str,
    /// The full description, in paragraphs separated by blank lines.
    pub long: &'static str,
}

impl Usage {
    pub const fn flag(
        format: &'static str,
        short: &'static str,
        long: &'static str,
    ) -> Usage {
        Usage { flag: true, format, short, long }
    }

    pub const fn arg(
        format: &'static str,
        short: &'static str,
        long: &'static str,
    ) -> Usage {
        Usage { flag: false, format, short, long }
    }

    /// Returns the long form of a flag, e.g., `--day-of-week <weekday>` for
    /// `-d/--day-of-week <weekday>`.
    fn long_name(&self) -> &'static str {
        self.format.split_once('/').map_or(self.format, |(_, long)| long)
    }

    /// Renders a two column table of formats and short descriptions.
    pub fn short(usages: &[Usage]) -> String {
        let width = usages.iter().map(|u| u.format.len()).max().unwrap_or(0);
        let mut result = String::new();
        for usage in usages.iter() {
            // Writing to a `String` never fails.
            let _ = writeln!(
                result,
                "    {:<width$}  {}",
                usage.format,
                usage.short,
            );
        }
        result
    }

    /// Renders each format followed by its full description, wrapped and
    /// indented below it.
    pub fn long(usages: &[Usage]) -> String {
        let wrap_opts = textwrap::Options::new(79)
            .initial_indent("        ")
            .subsequent_indent("        ");
        let mut blocks = vec![];
        for usage in usages.iter() {
            let mut block = format!("    {}\n", usage.format);
            let paragraphs = usage.long.trim().split("\n\n").map(|paragraph| {
                let flattened = paragraph.replace('\n', " ");
                let mut lines = String::new();
                for line in textwrap::wrap(&flattened, &wrap_opts) {
                    lines.push_str(&line);
                    lines.push('\n');
                }
                lines
            });
            block.push_str(&paragraphs.collect::<Vec<_>>().join("\n"));
            blocks.push(block);
        }
        blocks.join("\n")
    }
}

/// An error type indicating that the error is a `-h/--help` message.
///
/// In other words, it should be printed to stdout with a success exit code.
///
/// We sniff this out in `main` via downcasting an `anyhow::Error`.
#[derive(Debug)]
pub struct Help(String);

impl Help {
    const USAGE: Usage = Usage::flag(
        "-h/--help",
        "This flag prints the help output for escala.",
        r#"
This flag prints the help output for escala.

Unlike most other flags, the behavior of the short flag, -h, and the long flag,
--help, is different. The short flag will show a condensed help output while
the long flag will show a verbose help output. The verbose help output has
complete documentation, where as the condensed help output will show only a
single line for every flag.
"#,
    );
}

impl std::fmt::Display for Help {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for Help {}

/// An error type indicating that the error is a `--version` message.
///
/// In other words, it should be printed to stdout with a success exit code.
///
/// We sniff this out in `main` via downcasting an `anyhow::Error`.
#[derive(Debug)]
pub struct Version;

impl Version {
    const USAGE: Usage = Usage::flag(
        "--version",
        "This flag prints the version of escala.",
        r#"
This flag prints the version of escala.
"#,
    );
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let semver = option_env!("CARGO_PKG_VERSION").unwrap_or("N/A");
        let version = match option_env!("ESCALA_BUILD_GIT_HASH") {
            None => semver.to_string(),
            Some(hash) => format!("{semver} (rev {hash})"),
        };
        write!(f, "escala {version}")
    }
}

impl std::error::Error for Version {}
