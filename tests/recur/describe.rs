use crate::command::assert_cmd_snapshot;

fn describe() -> crate::command::Command {
    crate::escala(["recur", "describe"])
}

#[test]
fn portuguese() {
    assert_cmd_snapshot!(
        describe().args(["weekly", "-d", "wed"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Toda Quarta-feira

    ----- stderr -----
    ",
    );
    assert_cmd_snapshot!(
        describe().args(["weekly", "-d", "0"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Todo Domingo

    ----- stderr -----
    ",
    );
    assert_cmd_snapshot!(
        describe().args(["monthly", "-d", "sexta", "-n", "ultima"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Toda última Sexta-feira do mês

    ----- stderr -----
    ",
    );
    assert_cmd_snapshot!(
        describe().args(["mensal", "-d", "sab", "-n", "1"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Todo primeiro Sábado do mês

    ----- stderr -----
    ",
    );
}

#[test]
fn english() {
    assert_cmd_snapshot!(
        describe().args(["monthly", "-d", "thu", "-n", "3", "--locale", "en"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Every third Thursday of the month

    ----- stderr -----
    ",
    );
    assert_cmd_snapshot!(
        describe().args(["weekly", "-d", "wed"]).env("ESCALA_LOCALE", "en-US"),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Every Wednesday

    ----- stderr -----
    ",
    );
}

#[test]
fn locale_fallback() {
    // The flag wins over the environment.
    assert_cmd_snapshot!(
        describe()
            .args(["weekly", "-d", "wed", "--locale", "pt"])
            .env("ESCALA_LOCALE", "en"),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Toda Quarta-feira

    ----- stderr -----
    ",
    );
    assert_cmd_snapshot!(
        describe().args(["weekly", "-d", "wed"]).env_remove("ESCALA_LOCALE"),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Toda Quarta-feira

    ----- stderr -----
    ",
    );
    // An unrecognized locale in the environment is not an error.
    assert_cmd_snapshot!(
        describe()
            .args(["weekly", "-d", "wed"])
            .env("ESCALA_LOCALE", "klingon"),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Toda Quarta-feira

    ----- stderr -----
    ",
    );
}

#[test]
fn invalid() {
    assert_cmd_snapshot!(
        describe().args(["monthly", "-d", "wed"]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    invalid recurrence rule: monthly recurrence requires a week of the month
    ",
    );
    assert_cmd_snapshot!(
        describe().args(["weekly", "-d", "-1"]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    invalid recurrence rule: day of the week `-1` is not in the range `0..=6` (where `0` is Sunday)
    ",
    );
    assert_cmd_snapshot!(
        describe().args(["weekly", "-d", "wed", "--locale", "fr-FR"]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    --locale: unrecognized locale: `fr-FR`
    ",
    );
}
