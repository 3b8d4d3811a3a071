use std::io::Write;

use crate::{args, schedule::Instrument, style::Theme};

const USAGE: &'static str = r#"
List the instruments participants can play.

Each line shows the key of an instrument, its label and its icon. Either the
key or the label may be used when naming an instrument with
`-p/--participant`, without regard for case.

USAGE:
    escala schedule instruments

TIP:
    use -h for short docs and --help for long docs

EXAMPLES:
    List the catalog:

        $ escala schedule instruments
        guitar          Violão       🪕
        electricGuitar  Guitarra     🎸
        bass            Contrabaixo  🎸
        vocal           Vocal        🎤
        drum            Bateria      🥁
        keyboard        Teclado      🎹
        percussion      Percussão    🪘
        saxophone       Saxofone     🎷
"#;

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    args::configure(p, USAGE, &mut [])?;

    let theme = Theme::stdout();
    let mut wtr = std::io::stdout().lock();
    for instrument in Instrument::ALL {
        writeln!(
            wtr,
            "{:<16}{:<13}{}",
            theme.key(instrument.key()),
            instrument.label(),
            instrument.icon(),
        )?;
    }
    Ok(())
}
