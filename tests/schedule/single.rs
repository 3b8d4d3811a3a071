use crate::command::assert_cmd_snapshot;

use crate::TempDir;

fn single() -> crate::command::Command {
    crate::escala(["schedule", "single"])
}

#[test]
fn basic() {
    assert_cmd_snapshot!(
        single().args([
            "2024-07-20",
            "-t",
            "8:05",
            "-p",
            "ana:electricGuitar",
            "--notes",
            "ensaio geral",
        ]),
        @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    {"date":"2024-07-20","time":"08:05:00","recurrence_type":"SINGLE","notes":"ensaio geral","participants":[{"participant":"ana","instrument":"electricGuitar"}]}

    ----- stderr -----
    "#,
    );

    // Without notes, the field is omitted. Instruments can be named by their
    // label too.
    assert_cmd_snapshot!(
        single().args([
            "-t",
            "19:30",
            "2024-07-20",
            "-p",
            "ana:vocal",
            "-p",
            "joao:Bateria",
        ]),
        @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    {"date":"2024-07-20","time":"19:30:00","recurrence_type":"SINGLE","participants":[{"participant":"ana","instrument":"vocal"},{"participant":"joao","instrument":"drum"}]}

    ----- stderr -----
    "#,
    );
}

#[test]
fn participants_from_stdin() {
    let stdin = "\
# a small band
ana:vocal

joao Teclado
";
    assert_cmd_snapshot!(
        single()
            .args(["2024-07-20", "-t", "19:30", "-p", "bia:sax", "-P", "-"])
            .stdin(stdin),
        @r#"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    -p/--participant: unrecognized instrument `sax` (see `escala schedule instruments`)
    "#,
    );
    assert_cmd_snapshot!(
        single()
            .args(["2024-07-20", "-t", "19:30", "-p", "bia:saxofone", "-P", "-"])
            .stdin(stdin),
        @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    {"date":"2024-07-20","time":"19:30:00","recurrence_type":"SINGLE","participants":[{"participant":"bia","instrument":"saxophone"},{"participant":"ana","instrument":"vocal"},{"participant":"joao","instrument":"keyboard"}]}

    ----- stderr -----
    "#,
    );
}

#[test]
fn participants_from_file() {
    let tmp = TempDir::new();
    // Surrounding whitespace on a line is ignored.
    tmp.create("band.txt", "  ana:vocal \t\n\tbia:percussion\n   \n");
    assert_cmd_snapshot!(
        tmp.escala([
            "schedule",
            "single",
            "2024-07-20",
            "-t",
            "19:30",
            "-P",
            "band.txt",
        ]),
        @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    {"date":"2024-07-20","time":"19:30:00","recurrence_type":"SINGLE","participants":[{"participant":"ana","instrument":"vocal"},{"participant":"bia","instrument":"percussion"}]}

    ----- stderr -----
    "#,
    );

    tmp.create("bad.txt", "ana:vocal\nbia\n");
    assert_cmd_snapshot!(
        tmp.escala([
            "schedule",
            "single",
            "2024-07-20",
            "-t",
            "19:30",
            "-P",
            "bad.txt",
        ]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    bad.txt: line 2: missing instrument for participant `bia` (expected `<id>:<instrument>`)
    ",
    );
}

#[test]
fn invalid() {
    assert_cmd_snapshot!(
        single().args(["2024-07-20", "-t", "19:30"]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    at least one participant is required
    ",
    );
    assert_cmd_snapshot!(
        single().args(["2024-07-20", "-p", "ana:vocal"]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    missing required -t/--time
    ",
    );
    assert_cmd_snapshot!(
        single().args(["2024-07-20", "-t", "24:00", "-p", "ana:vocal"]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    -t/--time: invalid time format `24:00`, expected HH:MM
    ",
    );
    assert_cmd_snapshot!(
        single().args(["-t", "19:30", "-p", "ana:vocal"]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    missing required <date>
    ",
    );
}
